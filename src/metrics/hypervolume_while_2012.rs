use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::OError;
use crate::metrics::algorithm::check_reference_point;
use crate::metrics::hypervolume_2d::volume_2d;
use crate::metrics::hypervolume_beume_2009::volume_3d;
use crate::metrics::HyperVolumeAlgorithm;

/// The dominance relationship between two points.
#[derive(Debug, PartialEq)]
enum Dominance {
    /// The first point dominates the second one.
    First,
    /// The second point dominates the first one.
    Second,
    /// The points are identical.
    Equal,
    /// The points do not dominate each other.
    Skip,
}

/// Compare two points using their first `obj_count` coordinates.
///
/// # Arguments
///
/// * `p1`: The first point.
/// * `p2`: The second point.
/// * `obj_count`: The number of objectives to process.
///
/// returns: `Dominance`
fn nds(p1: &[f64], p2: &[f64], obj_count: usize) -> Dominance {
    let mut first_better = false;
    let mut second_better = false;
    for i in 0..obj_count {
        if p1[i] < p2[i] {
            first_better = true;
        } else if p2[i] < p1[i] {
            second_better = true;
        }
    }
    match (first_better, second_better) {
        (true, false) => Dominance::First,
        (false, true) => Dominance::Second,
        (false, false) => Dominance::Equal,
        (true, true) => Dominance::Skip,
    }
}

/// Calculate the volume of the box between a point and the reference point.
///
/// # Arguments
///
/// * `point`: The point.
/// * `reference_point`: The reference point.
/// * `obj_count`: The number of objectives to process.
///
/// returns: `f64`
fn inclusive_hv(point: &[f64], reference_point: &[f64], obj_count: usize) -> f64 {
    (0..obj_count)
        .map(|i| reference_point[i] - point[i])
        .product()
}

/// Build the non-dominated set of the points in `others` limited by `point`, i.e. where each
/// coordinate is replaced by the worse between the coordinate of `point` and the other point.
/// The box of each limited point is the intersection between the box of `point` and the box of
/// the other point. Only the first `obj_count` coordinates are kept.
///
/// # Arguments
///
/// * `point`: The point.
/// * `others`: The points to limit.
/// * `obj_count`: The number of objectives to process.
///
/// returns: `Vec<Vec<f64>>`
fn limit_set(point: &[f64], others: &[Vec<f64>], obj_count: usize) -> Vec<Vec<f64>> {
    let mut limited: Vec<Vec<f64>> = Vec::with_capacity(others.len());
    for other in others {
        let candidate: Vec<f64> = (0..obj_count).map(|i| point[i].max(other[i])).collect();

        let mut preserve = true;
        let mut idx = 0;
        while idx < limited.len() {
            match nds(&candidate, &limited[idx], obj_count) {
                Dominance::First => {
                    limited.swap_remove(idx);
                }
                Dominance::Skip => {
                    idx += 1;
                }
                Dominance::Second | Dominance::Equal => {
                    preserve = false;
                    break;
                }
            }
        }
        if preserve {
            limited.push(candidate);
        }
    }
    limited
}

/// Calculate the hyper-volume using the WFG algorithm proposed by [While et al. (2012)](http://dx.doi.org/10.1109/TEVC.2010.2077298)
/// for a problem with `d` objectives and `n` points. This works with any number of objectives
/// and it is the only algorithm available for problems with `4` or more objectives.
///
/// The hyper-volume is the sum of the exclusive contributions of each point with respect to the
/// points following it. The exclusive contribution is the volume of the point box minus the
/// hyper-volume of the limited set, which is calculated recursively. The points are sorted by the
/// last objective, so that the limited points lie on the same slice and the recursion happens in
/// `d - 1` dimensions. The recursion stops at [`Wfg::stop_dimension`], where the 2D or 3D sweep
/// is used.
///
/// > Lyndon While, Lucas Bradstreet, and Luigi Barone. A Fast Way of Calculating Exact
/// > Hypervolumes. IEEE Transactions on Evolutionary Computation 16(1), 2012.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Wfg {
    /// The dimension at which the recursion stops.
    stop_dimension: usize,
}

impl Default for Wfg {
    fn default() -> Self {
        Self { stop_dimension: 2 }
    }
}

impl Wfg {
    /// Initialise the algorithm.
    ///
    /// # Arguments
    ///
    /// * `stop_dimension`: The number of objectives at which the recursion stops. With `2`, the
    ///   area is calculated with the sweep of [`crate::metrics::Native2D`]; with `3` the volume
    ///   is calculated with [`crate::metrics::Beume3D`].
    ///
    /// returns: `Result<Wfg, OError>`
    pub fn new(stop_dimension: usize) -> Result<Self, OError> {
        if !(2..=3).contains(&stop_dimension) {
            return Err(OError::Validation(
                "WFG hyper-volume".to_string(),
                format!("The stop dimension must be 2 or 3, but {stop_dimension} given"),
            ));
        }
        Ok(Self { stop_dimension })
    }

    /// The number of objectives at which the recursion stops.
    ///
    /// returns: `usize`
    pub fn stop_dimension(&self) -> usize {
        self.stop_dimension
    }

    /// Calculate the hyper-volume of `front` using the first `obj_count` objectives.
    ///
    /// # Arguments
    ///
    /// * `front`: The points.
    /// * `reference_point`: The reference point.
    /// * `obj_count`: The number of objectives to process.
    ///
    /// returns: `f64`
    fn wfg(&self, front: Vec<Vec<f64>>, reference_point: &[f64], obj_count: usize) -> f64 {
        match front.len() {
            0 => return 0.0,
            1 => return inclusive_hv(&front[0], reference_point, obj_count),
            _ => {}
        }
        if obj_count == 2 {
            return volume_2d(&front, reference_point);
        }
        if obj_count == 3 && self.stop_dimension == 3 {
            return volume_3d(&front, reference_point);
        }
        self.slice(front, reference_point, obj_count)
    }

    /// Calculate the hyper-volume of `front` by slicing it along the last of the `obj_count`
    /// objectives. Each slice is the exclusive hyper-volume of a point in `obj_count - 1`
    /// objectives.
    ///
    /// # Arguments
    ///
    /// * `front`: The points.
    /// * `reference_point`: The reference point.
    /// * `obj_count`: The number of objectives to process.
    ///
    /// returns: `f64`
    fn slice(&self, mut front: Vec<Vec<f64>>, reference_point: &[f64], obj_count: usize) -> f64 {
        // sort by decreasing last objective. The limited points of a point all get its last
        // coordinate and the slice height multiplies the exclusive volume in `d - 1` objectives
        let last = obj_count - 1;
        front.sort_by(|a, b| b[last].total_cmp(&a[last]));

        let mut volume = 0.0;
        for idx in 0..front.len() {
            let height = reference_point[last] - front[idx][last];
            if height > 0.0 {
                volume += height * self.exclusive_hv(&front, idx, reference_point, last);
            }
        }
        volume
    }

    /// Calculate the exclusive hyper-volume of the point at `idx` with respect to the points
    /// following it in `front`.
    ///
    /// # Arguments
    ///
    /// * `front`: The points.
    /// * `idx`: The point index.
    /// * `reference_point`: The reference point.
    /// * `obj_count`: The number of objectives to process.
    ///
    /// returns: `f64`
    fn exclusive_hv(
        &self,
        front: &[Vec<f64>],
        idx: usize,
        reference_point: &[f64],
        obj_count: usize,
    ) -> f64 {
        let mut volume = inclusive_hv(&front[idx], reference_point, obj_count);
        if front.len() > idx + 1 {
            let limited = limit_set(&front[idx], &front[idx + 1..], obj_count);
            volume -= self.wfg(limited, reference_point, obj_count);
        }
        volume
    }
}

impl HyperVolumeAlgorithm for Wfg {
    fn name(&self) -> String {
        "WFG hyper-volume".to_string()
    }

    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), OError> {
        check_reference_point(&self.name(), points, reference_point)?;
        if reference_point.len() < 4 {
            warn!(
                "The {} is used with {} objectives, but a faster algorithm is available",
                self.name(),
                reference_point.len()
            );
        }
        Ok(())
    }

    /// The first level is always sliced; the 2D and 3D sweeps are only used in the recursion.
    fn volume(&self, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        self.slice(points.to_vec(), reference_point, reference_point.len())
    }

    /// The exclusive contribution is the volume of the point box minus the hyper-volume of the
    /// other points limited by the point.
    fn exclusive_volume(&self, index: usize, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        let obj_count = reference_point.len();
        let others: Vec<Vec<f64>> = points
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, p)| p.clone())
            .collect();
        let limited = limit_set(&points[index], &others, obj_count);

        (inclusive_hv(&points[index], reference_point, obj_count)
            - self.wfg(limited, reference_point, obj_count))
        .max(0.0)
    }
}
