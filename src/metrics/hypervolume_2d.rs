use serde::{Deserialize, Serialize};

use crate::core::OError;
use crate::metrics::algorithm::check_reference_point;
use crate::metrics::HyperVolumeAlgorithm;

/// Sort the point indexes by the first coordinate and then by the second coordinate.
fn sort_by_xy(points: &[Vec<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|a, b| {
        points[*a][0]
            .total_cmp(&points[*b][0])
            .then(points[*a][1].total_cmp(&points[*b][1]))
    });
    order
}

/// Calculate the area dominated by the points in 2D by sweeping the points sorted by their first
/// coordinate. Only the first two coordinates of the points and of the reference point are used.
///
/// # Arguments
///
/// * `points`: The points.
/// * `reference_point`: The reference point.
///
/// returns: `f64`
pub(crate) fn volume_2d(points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    let mut volume = 0.0;
    // upper side of the next rectangle
    let mut last_y = reference_point[1];
    for idx in sort_by_xy(points) {
        let point = &points[idx];
        // points with a larger y are dominated
        if point[1] < last_y {
            volume += (reference_point[0] - point[0]) * (last_y - point[1]);
            last_y = point[1];
        }
    }
    volume
}

/// Calculate the hyper-volume for a two-objective problem by sorting the points by the first
/// objective and summing the areas of the rectangles between the front and the reference point.
/// The complexity of the algorithm is `O(n log n)`.
///
/// Dominated or duplicated points are allowed; they do not change the hyper-volume and their
/// exclusive contribution is `0`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Native2D;

impl HyperVolumeAlgorithm for Native2D {
    fn name(&self) -> String {
        "Native 2D hyper-volume".to_string()
    }

    /// This ensures that the points have two objectives and that the reference point is weakly
    /// dominated by all the points.
    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), OError> {
        if reference_point.len() != 2 {
            return Err(OError::Validation(
                self.name(),
                "This can only be used on a 2-objective problem.".to_string(),
            ));
        }
        check_reference_point(&self.name(), points, reference_point)
    }

    fn volume(&self, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        volume_2d(points, reference_point)
    }

    fn exclusive_volume(&self, index: usize, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        self.contributions(points, reference_point)[index]
    }

    /// Get all the contributions with one sweep. The exclusive area of a non-dominated point is
    /// the rectangle between the point, its neighbours on the front and the reference point,
    /// minus the part of the rectangle still covered by the dominated points. A dominated point
    /// can only fall in the rectangle of the front point with the largest `x` not exceeding its
    /// own, so each dominated point is assigned to one rectangle with a binary search.
    /// Dominated and duplicated points have no exclusive area.
    fn contributions(&self, points: &[Vec<f64>], reference_point: &[f64]) -> Vec<f64> {
        // non-dominated points with strictly increasing x and decreasing y. Duplicates and
        // weakly dominated points end up in `dominated`
        let mut front: Vec<usize> = Vec::new();
        let mut dominated: Vec<usize> = Vec::new();
        let mut min_y = f64::INFINITY;
        for idx in sort_by_xy(points) {
            if points[idx][1] < min_y {
                min_y = points[idx][1];
                front.push(idx);
            } else {
                dominated.push(idx);
            }
        }

        // the upper corner of the exclusive rectangle of each front point
        let corners: Vec<(f64, f64)> = (0..front.len())
            .map(|pos| {
                let right_x = front
                    .get(pos + 1)
                    .map_or(reference_point[0], |next| points[*next][0]);
                let top_y = if pos == 0 {
                    reference_point[1]
                } else {
                    points[front[pos - 1]][1]
                };
                (right_x, top_y)
            })
            .collect();

        let mut covered: Vec<Vec<Vec<f64>>> = vec![Vec::new(); front.len()];
        for idx in dominated {
            let point = &points[idx];
            let Some(pos) = front
                .partition_point(|f| points[*f][0] <= point[0])
                .checked_sub(1)
            else {
                continue;
            };
            let (right_x, top_y) = corners[pos];
            if point[0] < right_x && point[1] < top_y {
                covered[pos].push(vec![point[0], point[1]]);
            }
        }

        let mut contributions = vec![0.0; points.len()];
        for (pos, idx) in front.iter().enumerate() {
            let point = &points[*idx];
            let (right_x, top_y) = corners[pos];
            let area = (right_x - point[0]) * (top_y - point[1]);
            let covered_area = volume_2d(&covered[pos], &[right_x, top_y]);
            contributions[*idx] = (area - covered_area).max(0.0);
        }
        contributions
    }
}
