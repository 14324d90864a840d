use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::OError;
use crate::metrics::algorithm::check_reference_point;
use crate::metrics::HyperVolumeAlgorithm;
use crate::utils::{argsort, Sort};

/// The non-dominated points in the `x-y` plane and the area they dominate. The points are stored
/// by increasing `x`; as no point dominates another one, `y` is strictly decreasing.
#[derive(Debug)]
struct Skyline {
    /// Map of the `x` coordinate to the `y` coordinate of the points.
    front: BTreeMap<OrderedFloat<f64>, f64>,
    /// The area dominated by the points in `front` and bounded by the reference point.
    area: f64,
    /// The `x` coordinate of the reference point.
    ref_x: f64,
    /// The `y` coordinate of the reference point.
    ref_y: f64,
}

impl Skyline {
    fn new(ref_x: f64, ref_y: f64) -> Self {
        Self {
            front: BTreeMap::new(),
            area: 0.0,
            ref_x,
            ref_y,
        }
    }

    /// Add a point to the skyline and update the dominated area. Points dominated by the new
    /// point are removed; if the point is weakly dominated by the skyline, nothing changes.
    ///
    /// # Arguments
    ///
    /// * `x`: The `x` coordinate of the point.
    /// * `y`: The `y` coordinate of the point.
    fn insert(&mut self, x: f64, y: f64) {
        let key = OrderedFloat(x);
        if let Some((_, prev_y)) = self.front.range(..=key).next_back() {
            if *prev_y <= y {
                return;
            }
        }

        // walk the points on the right, which are dominated until one is found below `y`
        let mut cur_x = x;
        let mut cur_y = self
            .front
            .range(..key)
            .next_back()
            .map_or(self.ref_y, |(_, prev_y)| *prev_y);
        let mut added_area = 0.0;
        let mut dominated: Vec<OrderedFloat<f64>> = Vec::new();
        let mut bounded = false;
        for (next_x, next_y) in self.front.range(key..) {
            added_area += (next_x.0 - cur_x) * (cur_y - y);
            if *next_y < y {
                bounded = true;
                break;
            }
            dominated.push(*next_x);
            cur_x = next_x.0;
            cur_y = *next_y;
        }
        if !bounded {
            added_area += (self.ref_x - cur_x) * (cur_y - y);
        }

        for k in dominated {
            self.front.remove(&k);
        }
        self.front.insert(key, y);
        self.area += added_area;
    }
}

/// Calculate the volume dominated by the points in 3D. Only the first three coordinates of the
/// points and of the reference point are used.
///
/// # Arguments
///
/// * `points`: The points.
/// * `reference_point`: The reference point.
///
/// returns: `f64`
pub(crate) fn volume_3d(points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    let z_values: Vec<f64> = points.iter().map(|p| p[2]).collect();
    let order = argsort(&z_values, Sort::Ascending);
    let Some(first) = order.first() else {
        return 0.0;
    };

    let mut skyline = Skyline::new(reference_point[0], reference_point[1]);
    let mut volume = 0.0;
    let mut last_z = points[*first][2];
    for idx in order {
        let point = &points[idx];
        // the slab between the previous point and this one has the area of the current skyline
        volume += skyline.area * (point[2] - last_z);
        last_z = point[2];
        skyline.insert(point[0], point[1]);
    }
    volume + skyline.area * (reference_point[2] - last_z)
}

/// Calculate the hyper-volume for a three-objective problem using the sweep proposed by
/// [Beume et al. (2009)](https://doi.org/10.1109/TEVC.2008.915538). The points are processed by
/// increasing third objective; the 2D front of the points processed so far (the skyline) is kept
/// in a balanced tree together with its area, so that the volume between two consecutive points
/// is the area times the slab height. The complexity is `O(n log n)`.
///
/// > N. Beume, C. M. Fonseca, M. Lopez-Ibanez, L. Paquete and J. Vahrenhold, "On the Complexity of
/// > Computing the Hypervolume Indicator," in IEEE Transactions on Evolutionary Computation,
/// > vol. 13, no. 5, pp. 1075-1082, Oct. 2009.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Beume3D;

impl HyperVolumeAlgorithm for Beume3D {
    fn name(&self) -> String {
        "Beume et al. (2009) 3D hyper-volume".to_string()
    }

    fn verify_before_compute(
        &self,
        points: &[Vec<f64>],
        reference_point: &[f64],
    ) -> Result<(), OError> {
        if reference_point.len() != 3 {
            return Err(OError::Validation(
                self.name(),
                "This can only be used on a 3-objective problem.".to_string(),
            ));
        }
        check_reference_point(&self.name(), points, reference_point)
    }

    fn volume(&self, points: &[Vec<f64>], reference_point: &[f64]) -> f64 {
        volume_3d(points, reference_point)
    }
}
