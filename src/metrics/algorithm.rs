use std::fmt::Debug;

use rayon::prelude::*;

use crate::core::OError;
use crate::utils::{vector_max, vector_min};

/// Check the input arguments of the hyper-volume algorithms.
///
/// # Arguments
///
/// * `points`: The points to use in the calculation.
/// * `reference_point`: The reference or anti-optimal point to use in the calculation.
///
/// returns: `Result<(), String>`
pub(crate) fn check_args(points: &[Vec<f64>], reference_point: &[f64]) -> Result<(), String> {
    if points.is_empty() {
        return Err("There are no points in the array".to_string());
    }
    for (idx, point) in points.iter().enumerate() {
        if point.len() != reference_point.len() {
            return Err(format!(
                "The dimension of point #{} ({}) must match the number of coordinates of the reference point ({})",
                idx,
                point.len(),
                reference_point.len()
            ));
        }
    }
    if reference_point.iter().any(|v| !v.is_finite()) {
        return Err(format!(
            "Non-finite value detected in the reference point {:?}",
            reference_point
        ));
    }
    Ok(())
}

/// Check that a reference point coordinate is weakly dominated by all the points, i.e. the
/// coordinate must be larger or equal than the coordinates of all points, as the objectives are
/// minimised.
///
/// # Arguments
///
/// * `points`: The points.
/// * `ref_point_coordinate`: The coordinate of the reference point.
/// * `coordinate_idx`: The index or position of the coordinate (for example 2 for z-coordinate).
///
/// returns: `Result<(), String>`
pub(crate) fn check_ref_point_coordinate(
    points: &[Vec<f64>],
    ref_point_coordinate: f64,
    coordinate_idx: usize,
) -> Result<(), String> {
    let values: Vec<f64> = points.iter().map(|p| p[coordinate_idx]).collect();
    let max_obj = vector_max(&values).map_err(|e| e.to_string())?;

    if ref_point_coordinate < max_obj {
        return Err(format!(
            "The coordinate #{} of the reference point ({}) must be larger or equal than the maximum value of the points ({}). The reference point must be dominated by all points.",
            coordinate_idx + 1,
            ref_point_coordinate,
            max_obj
        ));
    }
    Ok(())
}

/// Run [`check_args`] and [`check_ref_point_coordinate`] on all the coordinates.
///
/// # Arguments
///
/// * `name`: The name of the algorithm running the check.
/// * `points`: The points.
/// * `reference_point`: The reference point.
///
/// returns: `Result<(), OError>`
pub(crate) fn check_reference_point(
    name: &str,
    points: &[Vec<f64>],
    reference_point: &[f64],
) -> Result<(), OError> {
    check_args(points, reference_point).map_err(|e| OError::Validation(name.to_string(), e))?;
    for (idx, coordinate) in reference_point.iter().enumerate() {
        check_ref_point_coordinate(points, *coordinate, idx)
            .map_err(|e| OError::Validation(name.to_string(), e))?;
    }
    Ok(())
}

/// Check that the point index exists in the set.
///
/// # Arguments
///
/// * `index`: The index of the point.
/// * `points`: The points.
///
/// returns: `Result<(), OError>`
pub(crate) fn check_index(index: usize, points: &[Vec<f64>]) -> Result<(), OError> {
    if index >= points.len() {
        return Err(OError::OutOfRange("point".to_string(), index, points.len()));
    }
    Ok(())
}

/// Get the position of the first value equal to `target`.
fn first_position(values: &[f64], target: f64) -> Result<usize, OError> {
    values
        .iter()
        .position(|v| *v == target)
        .ok_or(OError::Generic(format!(
            "Cannot find the contribution {target} in {values:?}"
        )))
}

/// The trait to implement an exact (or approximated) algorithm to calculate the hyper-volume of
/// a set of points where all objectives are minimised. Each point defines a box which extends to
/// the reference point; the hyper-volume is the measure of the union of these boxes.
///
/// Implementations must be stateless, so that the same instance can be shared between threads and
/// reused for any number of calculations. Only [`HyperVolumeAlgorithm::name`] and
/// [`HyperVolumeAlgorithm::volume`] are required; the other methods have a default implementation
/// which can be overridden with a faster method for the algorithm.
///
/// The checked methods ([`HyperVolumeAlgorithm::compute`], [`HyperVolumeAlgorithm::exclusive`]
/// and the contributor methods) always call [`HyperVolumeAlgorithm::verify_before_compute`] first.
pub trait HyperVolumeAlgorithm: Debug + Send + Sync {
    /// The algorithm name.
    ///
    /// returns: `String`
    fn name(&self) -> String;

    /// Check the points and the reference point before calculating any metric. By default, this
    /// ensures that the reference point has the same dimension of the points, it only has finite
    /// values and that it is weakly dominated by all points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<(), OError>`
    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), OError> {
        check_reference_point(&self.name(), points, reference_point)
    }

    /// Calculate the hyper-volume without checking the arguments.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `f64`
    fn volume(&self, points: &[Vec<f64>], reference_point: &[f64]) -> f64;

    /// Calculate the exclusive contribution of a point without checking the arguments. This is
    /// the hyper-volume of all points minus the hyper-volume of the set without the point at
    /// `index`.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the point. This must exist in `points`.
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `f64`
    fn exclusive_volume(&self, index: usize, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        let others: Vec<Vec<f64>> = points
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, p)| p.clone())
            .collect();
        let others_volume = if others.is_empty() {
            0.0
        } else {
            self.volume(&others, reference_point)
        };
        (self.volume(points, reference_point) - others_volume).max(0.0)
    }

    /// Calculate the exclusive contribution of all points without checking the arguments. The
    /// contributions are evaluated in parallel.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Vec<f64>`. The contributions with the same order of `points`.
    fn contributions(&self, points: &[Vec<f64>], reference_point: &[f64]) -> Vec<f64> {
        (0..points.len())
            .into_par_iter()
            .map(|idx| self.exclusive_volume(idx, points, reference_point))
            .collect()
    }

    /// Calculate the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, OError>`
    fn compute(&self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, OError> {
        self.verify_before_compute(points, reference_point)?;
        Ok(self.volume(points, reference_point))
    }

    /// Calculate the hyper-volume contributed by the point at `index` alone.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the point.
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, OError>`
    fn exclusive(
        &self,
        index: usize,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<f64, OError> {
        self.verify_before_compute(points, reference_point)?;
        check_index(index, points)?;
        Ok(self.exclusive_volume(index, points, reference_point))
    }

    /// Find the point with the smallest exclusive contribution. When more points have the same
    /// contribution, the lowest index is returned.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<usize, OError>`
    fn least_contributor(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<usize, OError> {
        self.verify_before_compute(points, reference_point)?;
        let contributions = self.contributions(points, reference_point);
        first_position(&contributions, vector_min(&contributions)?)
    }

    /// Find the point with the largest exclusive contribution. When more points have the same
    /// contribution, the lowest index is returned.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<usize, OError>`
    fn greatest_contributor(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<usize, OError> {
        self.verify_before_compute(points, reference_point)?;
        let contributions = self.contributions(points, reference_point);
        first_position(&contributions, vector_max(&contributions)?)
    }
}
