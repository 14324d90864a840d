use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{OError, ParetoFrontSource, PointSet};
use crate::metrics::algorithm::check_index;
use crate::metrics::{best_algorithm, HyperVolumeAlgorithm};
use crate::utils::vector_max;

/// The struct used to export a point set to a JSON file.
#[derive(Debug, Serialize, Deserialize)]
pub struct PointSetExport {
    /// The points.
    pub points: PointSet,
    /// The number of objectives of each point.
    pub dimension: usize,
    /// The time when the points were exported.
    pub exported_on: DateTime<Utc>,
}

/// Calculate the exact hyper-volume metric and the contribution of each point for a set of
/// points where all objectives are minimised. The hyper-volume is the volume dominated by the
/// points and bounded by a reference point.
///
/// All the methods accept an optional algorithm implementing [`HyperVolumeAlgorithm`]. When this
/// is `None`, the fastest algorithm for the number of objectives is selected with
/// [`best_algorithm`]:
///
/// - with `2` objectives: [`crate::metrics::Native2D`].
/// - with `3` objectives: [`crate::metrics::Beume3D`].
/// - with `4` or more objectives: [`crate::metrics::Wfg`].
///
/// The points can be provided:
/// - as an array of objective values using [`HyperVolume::from_points`]
/// - from a population front using [`HyperVolume::from_population`]
/// - from a JSON file using [`HyperVolume::read_json_file`]
///
/// The struct never changes the points, therefore the same instance can be shared between
/// threads.
///
/// # Example
/// ```rust
#[doc = include_str!("../../demos/least_contributor.rs")]
/// ```
#[derive(Clone, Debug)]
pub struct HyperVolume {
    /// The points.
    points: PointSet,
}

impl HyperVolume {
    /// Initialise the struct from a validated set of points.
    ///
    /// # Arguments
    ///
    /// * `points`: The point set.
    ///
    /// returns: `HyperVolume`
    pub fn new(points: PointSet) -> Self {
        Self { points }
    }

    /// Initialise the struct from the objective values of the points.
    ///
    /// # Arguments
    ///
    /// * `points`: The objective values. Each item is a point and the nested vector contains its
    ///   coordinates.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_points(points: Vec<Vec<f64>>) -> Result<Self, OError> {
        Ok(Self::new(PointSet::new(points)?))
    }

    /// Initialise the struct using the points of one front of a population.
    ///
    /// # Arguments
    ///
    /// * `source`: The population.
    /// * `front_index`: The index of the front (`0` is the non-dominated front).
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_population<S: ParetoFrontSource + ?Sized>(
        source: &S,
        front_index: usize,
    ) -> Result<Self, OError> {
        Ok(Self::new(PointSet::from_population(source, front_index)?))
    }

    /// Run a function with the given algorithm or with the best algorithm for the point
    /// dimension.
    fn with_algorithm<T>(
        &self,
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
        f: impl FnOnce(&dyn HyperVolumeAlgorithm) -> Result<T, OError>,
    ) -> Result<T, OError> {
        match algorithm {
            Some(algorithm) => f(algorithm),
            None => {
                let algorithm = best_algorithm(self.points.dimension());
                f(algorithm.as_ref())
            }
        }
    }

    /// Calculate the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference or anti-optimal point. This must be weakly dominated
    ///   by all the points. If you are not sure about the point to use, you could use
    ///   [`HyperVolume::nadir_point`].
    /// * `algorithm`: The algorithm to use. When `None`, the best algorithm is used.
    ///
    /// returns: `Result<f64, OError>`
    pub fn compute(
        &self,
        reference_point: &[f64],
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
    ) -> Result<f64, OError> {
        self.with_algorithm(algorithm, |algorithm| {
            algorithm.verify_before_compute(self.points.points(), reference_point)?;
            debug!(
                "Calculating the hyper-volume of {} points with the {}",
                self.points.len(),
                algorithm.name()
            );
            Ok(algorithm.volume(self.points.points(), reference_point))
        })
    }

    /// Calculate the hyper-volume contributed only by one point.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the point.
    /// * `reference_point`: The reference point.
    /// * `algorithm`: The algorithm to use. When `None`, the best algorithm is used.
    ///
    /// returns: `Result<f64, OError>`. This returns an error if the point `index` does not exist.
    pub fn exclusive(
        &self,
        index: usize,
        reference_point: &[f64],
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
    ) -> Result<f64, OError> {
        check_index(index, self.points.points())?;
        self.with_algorithm(algorithm, |algorithm| {
            algorithm.verify_before_compute(self.points.points(), reference_point)?;
            Ok(algorithm.exclusive_volume(index, self.points.points(), reference_point))
        })
    }

    /// Calculate the exclusive contribution of all points.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference point.
    /// * `algorithm`: The algorithm to use. When `None`, the best algorithm is used.
    ///
    /// returns: `Result<Vec<f64>, OError>`. The contributions have the same order of the points.
    pub fn contributions(
        &self,
        reference_point: &[f64],
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
    ) -> Result<Vec<f64>, OError> {
        self.with_algorithm(algorithm, |algorithm| {
            algorithm.verify_before_compute(self.points.points(), reference_point)?;
            Ok(algorithm.contributions(self.points.points(), reference_point))
        })
    }

    /// Find the point contributing the least to the hyper-volume. When more points have the same
    /// contribution, the lowest index is returned.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference point.
    /// * `algorithm`: The algorithm to use. When `None`, the best algorithm is used.
    ///
    /// returns: `Result<usize, OError>`. The index of the point.
    pub fn least_contributor(
        &self,
        reference_point: &[f64],
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
    ) -> Result<usize, OError> {
        self.with_algorithm(algorithm, |algorithm| {
            algorithm.least_contributor(self.points.points(), reference_point)
        })
    }

    /// Find the point contributing the most to the hyper-volume. When more points have the same
    /// contribution, the lowest index is returned.
    ///
    /// # Arguments
    ///
    /// * `reference_point`: The reference point.
    /// * `algorithm`: The algorithm to use. When `None`, the best algorithm is used.
    ///
    /// returns: `Result<usize, OError>`. The index of the point.
    pub fn greatest_contributor(
        &self,
        reference_point: &[f64],
        algorithm: Option<&dyn HyperVolumeAlgorithm>,
    ) -> Result<usize, OError> {
        self.with_algorithm(algorithm, |algorithm| {
            algorithm.greatest_contributor(self.points.points(), reference_point)
        })
    }

    /// Calculate the nadir point by taking the maximum of each objective from the points, so that
    /// the point will be dominated by all other points. An offset `epsilon` is added to all
    /// coordinates to enforce strict dominance. The point can be used as reference point.
    ///
    /// # Arguments
    ///
    /// * `epsilon`: The offset to add to each coordinate.
    ///
    /// returns: `Vec<f64>`
    pub fn nadir_point(&self, epsilon: f64) -> Vec<f64> {
        (0..self.points.dimension())
            .map(|idx| {
                let values: Vec<f64> = self.points.points().iter().map(|p| p[idx]).collect();
                // the set is never empty
                vector_max(&values).unwrap_or(f64::NAN) + epsilon
            })
            .collect()
    }

    /// Get the points.
    ///
    /// returns: `&[Vec<f64>]`
    pub fn points(&self) -> &[Vec<f64>] {
        self.points.points()
    }

    /// Get the point set.
    ///
    /// returns: `&PointSet`
    pub fn point_set(&self) -> &PointSet {
        &self.points
    }

    /// Save the points to a JSON file. The file name is `<file_prefix>_d<dimension>_n<points>.json`.
    ///
    /// # Arguments
    ///
    /// * `destination`: The folder where to save the file.
    /// * `file_prefix`: The prefix of the file name. This defaults to `Points`.
    ///
    /// returns: `Result<PathBuf, OError>`. The path to the exported file.
    pub fn save_to_json(
        &self,
        destination: &Path,
        file_prefix: Option<&str>,
    ) -> Result<PathBuf, OError> {
        let file_prefix = file_prefix.unwrap_or("Points");
        let export = PointSetExport {
            points: self.points.clone(),
            dimension: self.points.dimension(),
            exported_on: Utc::now(),
        };
        let data = serde_json::to_string_pretty(&export).map_err(|e| {
            OError::Export(format!(
                "The following error occurred while converting the point set: {e}"
            ))
        })?;

        let file = destination.join(format!(
            "{}_d{}_n{}.json",
            file_prefix,
            self.points.dimension(),
            self.points.len()
        ));
        info!("Saving JSON file {:?}", file);
        fs::write(&file, data).map_err(|e| {
            OError::Export(format!(
                "The following error occurred while exporting the JSON file: {e}",
            ))
        })?;
        Ok(file)
    }

    /// Read the points from a JSON file exported with [`HyperVolume::save_to_json`]. The points
    /// are validated again.
    ///
    /// # Arguments
    ///
    /// * `file`: The path to the JSON file.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn read_json_file(file: &Path) -> Result<Self, OError> {
        info!("Reading JSON file {:?}", file);
        let data = fs::read_to_string(file).map_err(|e| {
            OError::Import(format!("Cannot read the JSON file {file:?}: {e}"))
        })?;
        let export: PointSetExport = serde_json::from_str(&data).map_err(|e| {
            OError::Import(format!("Cannot parse the JSON file {file:?}: {e}"))
        })?;
        if export.dimension != export.points.dimension() {
            return Err(OError::Import(format!(
                "The exported dimension ({}) does not match the dimension of the points ({})",
                export.dimension,
                export.points.dimension()
            )));
        }
        Ok(Self::new(export.points))
    }
}

#[cfg(test)]
mod test {
    use std::env;
    use std::fs;

    use float_cmp::assert_approx_eq;

    use crate::core::test_utils::{assert_relative_eq, random_points, random_spherical_front};
    use crate::core::{OError, Population};
    use crate::metrics::{Beume3D, HyperVolume, HyperVolumeAlgorithm, Native2D, Wfg};

    #[test]
    /// Native2D and WFG agree on a small front
    fn test_2d_agreement() {
        let hv =
            HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 0.5], vec![0.5, 2.0]]).unwrap();
        let ref_point = [3.0, 3.0];
        let native = hv.compute(&ref_point, Some(&Native2D)).unwrap();
        let wfg = hv.compute(&ref_point, Some(&Wfg::default())).unwrap();
        assert_approx_eq!(f64, native, wfg, epsilon = 1e-9);
        assert_eq!(native, 5.0);
        assert_eq!(hv.compute(&ref_point, None).unwrap(), 5.0);
    }

    #[test]
    fn test_single_point() {
        let hv = HyperVolume::from_points(vec![vec![1.0, 1.0]]).unwrap();
        assert_eq!(hv.compute(&[2.0, 2.0], None).unwrap(), 1.0);
        assert_eq!(hv.exclusive(0, &[2.0, 2.0], None).unwrap(), 1.0);
        assert_eq!(hv.least_contributor(&[2.0, 2.0], None).unwrap(), 0);

        // all points on the reference point
        let hv = HyperVolume::from_points(vec![vec![2.0, 2.0, 2.0]; 3]).unwrap();
        assert_eq!(hv.compute(&[2.0, 2.0, 2.0], None).unwrap(), 0.0);
    }

    #[test]
    fn test_errors() {
        let hv =
            HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 0.5], vec![0.5, 2.0]]).unwrap();

        let err = hv.exclusive(5, &[3.0, 3.0], None).unwrap_err();
        assert!(matches!(err, OError::OutOfRange(_, 5, 3)));
        // the index is checked before the reference point
        let err = hv.exclusive(5, &[3.0], None).unwrap_err();
        assert!(matches!(err, OError::OutOfRange(_, 5, 3)));

        for algorithm in [
            &Native2D as &dyn HyperVolumeAlgorithm,
            &Beume3D,
            &Wfg::default(),
        ] {
            let err = hv.compute(&[3.0, 3.0, 3.0], Some(algorithm)).unwrap_err();
            assert!(matches!(err, OError::Validation(_, _)), "{}", err);
        }
        let err = hv.least_contributor(&[3.0], None).unwrap_err();
        assert!(matches!(err, OError::Validation(_, _)));

        // reference point not dominated
        let err = hv.compute(&[1.5, 3.0], None).unwrap_err();
        assert!(err.to_string().contains("The coordinate #1"), "{}", err);

        let err = HyperVolume::from_points(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(err, OError::Validation(_, _)));
    }

    #[test]
    /// Random 2D and 3D sets must give the same value with the specialised algorithms and WFG
    fn test_cross_algorithm_agreement() {
        for seed in 0..5 {
            let points = random_points(60, 2, seed);
            let hv = HyperVolume::from_points(points).unwrap();
            let ref_point = [1.0, 1.0];
            assert_relative_eq(
                hv.compute(&ref_point, Some(&Wfg::default())).unwrap(),
                hv.compute(&ref_point, Some(&Native2D)).unwrap(),
                1e-9,
            );

            let hv = HyperVolume::from_points(random_spherical_front(40, 3, seed)).unwrap();
            let ref_point = [1.0, 1.0, 1.0];
            let expected = hv.compute(&ref_point, Some(&Beume3D)).unwrap();
            assert_relative_eq(
                hv.compute(&ref_point, Some(&Wfg::default())).unwrap(),
                expected,
                1e-9,
            );
            assert_relative_eq(
                hv.compute(&ref_point, Some(&Wfg::new(3).unwrap())).unwrap(),
                expected,
                1e-9,
            );
        }
    }

    #[test]
    /// Adding a point never decreases the hyper-volume
    fn test_monotonicity() {
        for dimension in [2, 3, 4] {
            let points = random_points(25, dimension, 7);
            let ref_point = vec![1.0; dimension];
            let mut previous = 0.0;
            for n in 1..=points.len() {
                let hv = HyperVolume::from_points(points[..n].to_vec()).unwrap();
                let value = hv.compute(&ref_point, None).unwrap();
                assert!(value >= 0.0);
                assert!(
                    value + 1e-12 >= previous,
                    "HV decreased from {previous} to {value} with {n} points in {dimension}D"
                );
                previous = value;
            }
        }
    }

    #[test]
    /// Each contribution is between zero and the total hyper-volume and the least contributor has
    /// the smallest contribution, with and without dominated points in the set
    fn test_contributions() {
        for dimension in [2, 3, 4, 5] {
            for points in [
                random_spherical_front(12, dimension, 3),
                random_points(12, dimension, 3),
            ] {
                let hv = HyperVolume::from_points(points).unwrap();
                let ref_point = vec![1.0; dimension];
                let total = hv.compute(&ref_point, None).unwrap();
                let contributions = hv.contributions(&ref_point, None).unwrap();

                assert_eq!(contributions.len(), 12);
                for (idx, c) in contributions.iter().enumerate() {
                    assert!(*c >= 0.0);
                    assert!(*c <= total);
                    assert_eq!(hv.exclusive(idx, &ref_point, None).unwrap(), *c);
                }

                let least = hv.least_contributor(&ref_point, None).unwrap();
                let greatest = hv.greatest_contributor(&ref_point, None).unwrap();
                for c in contributions.iter() {
                    assert!(contributions[least] <= *c);
                    assert!(contributions[greatest] >= *c);
                }
                // ties resolve to the lowest index
                assert_eq!(
                    contributions
                        .iter()
                        .position(|c| *c == contributions[least]),
                    Some(least)
                );
                assert_eq!(
                    contributions
                        .iter()
                        .position(|c| *c == contributions[greatest]),
                    Some(greatest)
                );
            }
        }
    }

    #[test]
    /// The contribution of each point matches the hyper-volume of the set minus the hyper-volume
    /// of the set without the point, for all algorithms and on sets with dominated points
    fn test_contributions_by_difference() {
        let wfg = Wfg::default();
        let wfg_3 = Wfg::new(3).unwrap();
        let algorithms: Vec<(usize, Vec<&dyn HyperVolumeAlgorithm>)> = vec![
            (2, vec![&Native2D as &dyn HyperVolumeAlgorithm, &wfg]),
            (3, vec![&Beume3D as &dyn HyperVolumeAlgorithm, &wfg, &wfg_3]),
            (4, vec![&wfg as &dyn HyperVolumeAlgorithm]),
        ];
        for (dimension, algorithms) in algorithms {
            let ref_point = vec![1.0; dimension];
            for seed in 0..3 {
                let points = random_points(15, dimension, seed);
                let hv = HyperVolume::from_points(points.clone()).unwrap();
                for algorithm in algorithms.iter() {
                    let total = hv.compute(&ref_point, Some(*algorithm)).unwrap();
                    let contributions = hv.contributions(&ref_point, Some(*algorithm)).unwrap();
                    for (idx, c) in contributions.iter().enumerate() {
                        let mut others = points.clone();
                        others.remove(idx);
                        let without = HyperVolume::from_points(others)
                            .unwrap()
                            .compute(&ref_point, Some(*algorithm))
                            .unwrap();
                        assert_approx_eq!(f64, *c, (total - without).max(0.0), epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    /// The WFG exclusive contributions match the ones of the specialised algorithms
    fn test_contributions_agreement() {
        for points in [
            random_spherical_front(20, 2, 11),
            random_points(20, 2, 11),
        ] {
            let hv = HyperVolume::from_points(points).unwrap();
            let ref_point = [1.0, 1.0];
            let expected = hv.contributions(&ref_point, Some(&Native2D)).unwrap();
            let calculated = hv.contributions(&ref_point, Some(&Wfg::default())).unwrap();
            for (c, e) in calculated.iter().zip(expected) {
                assert_approx_eq!(f64, *c, e, epsilon = 1e-12);
            }
        }

        for points in [
            random_spherical_front(20, 3, 11),
            random_points(20, 3, 11),
        ] {
            let hv = HyperVolume::from_points(points).unwrap();
            let ref_point = [1.0, 1.0, 1.0];
            let expected = hv.contributions(&ref_point, Some(&Beume3D)).unwrap();
            let calculated = hv.contributions(&ref_point, Some(&Wfg::default())).unwrap();
            for (c, e) in calculated.iter().zip(expected) {
                assert_approx_eq!(f64, *c, e, epsilon = 1e-12);
            }
        }
    }

    #[test]
    /// The points covered by a dominated point are not exclusive to the point dominating it
    fn test_exclusive_with_dominated_points() {
        let hv = HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 2.0]]).unwrap();
        let ref_point = [3.0, 3.0];
        assert_eq!(hv.exclusive(0, &ref_point, None).unwrap(), 3.0);
        assert_eq!(hv.exclusive(0, &ref_point, Some(&Wfg::default())).unwrap(), 3.0);

        let hv =
            HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![0.0, 2.5]]).unwrap();
        assert_eq!(hv.contributions(&ref_point, None).unwrap(), vec![2.5, 0.0, 0.5]);
        assert_eq!(
            hv.contributions(&ref_point, Some(&Wfg::default())).unwrap(),
            vec![2.5, 0.0, 0.5]
        );
    }

    #[test]
    fn test_least_contributor_ties() {
        // symmetric front: the two extremes have the same contribution
        let hv = HyperVolume::from_points(vec![vec![0.0, 2.0], vec![1.0, 1.0], vec![2.0, 0.0]])
            .unwrap();
        let ref_point = [3.0, 3.0];
        assert_eq!(hv.contributions(&ref_point, None).unwrap(), vec![1.0, 1.0, 1.0]);
        assert_eq!(hv.least_contributor(&ref_point, None).unwrap(), 0);
        assert_eq!(hv.greatest_contributor(&ref_point, None).unwrap(), 0);
        assert_eq!(
            hv.least_contributor(&ref_point, Some(&Wfg::default())).unwrap(),
            0
        );
    }

    #[test]
    fn test_nadir_point() {
        let hv = HyperVolume::from_points(vec![
            vec![-1.0, -2.0, 0.5],
            vec![3.0, 4.0, 0.1],
            vec![0.0, 6.0, 0.2],
        ])
        .unwrap();
        assert_eq!(hv.nadir_point(0.0), vec![3.0, 6.0, 0.5]);

        let nadir = hv.nadir_point(1.0);
        assert_eq!(nadir, vec![4.0, 7.0, 1.5]);
        for point in hv.points() {
            assert!(point.iter().zip(&nadir).all(|(p, n)| n - p >= 1.0));
        }
        // the nadir point is a valid reference point
        assert!(hv.compute(&nadir, None).unwrap() > 0.0);
    }

    #[test]
    fn test_from_population() {
        let population = Population::new(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![0.5, 5.0],
            vec![4.0, 5.0],
        ]);
        let hv = HyperVolume::from_population(&population, 0).unwrap();
        assert_eq!(hv.points(), &[vec![1.0, 2.0], vec![0.5, 5.0]]);
        assert_eq!(hv.point_set().len(), 2);
        // (10 - 0.5) * (10 - 5) + (10 - 1) * (5 - 2)
        assert_eq!(hv.compute(&[10.0, 10.0], None).unwrap(), 74.5);
    }

    #[test]
    /// The clone is independent and shares no data
    fn test_clone() {
        let hv = HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 0.5]]).unwrap();
        let copy = hv.clone();
        drop(hv);
        assert_eq!(copy.compute(&[3.0, 3.0], None).unwrap(), 4.5);
    }

    #[test]
    /// The engine and the algorithms can be shared between threads
    fn test_threads() {
        let hv = HyperVolume::from_points(random_spherical_front(30, 4, 5)).unwrap();
        let wfg = Wfg::default();
        let ref_point = [1.0; 4];
        let expected = hv.compute(&ref_point, Some(&wfg)).unwrap();
        let (hv, wfg, ref_point) = (&hv, &wfg, &ref_point);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(move || hv.compute(ref_point, Some(wfg)).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_json() {
        let points = random_points(10, 3, 1);
        let hv = HyperVolume::from_points(points).unwrap();
        let folder = env::temp_dir();

        let file = hv.save_to_json(&folder, Some("test_json")).unwrap();
        assert!(file.ends_with("test_json_d3_n10.json"));
        let imported = HyperVolume::read_json_file(&file).unwrap();
        assert_eq!(imported.point_set(), hv.point_set());
        assert_eq!(
            imported.compute(&[1.0; 3], None).unwrap(),
            hv.compute(&[1.0; 3], None).unwrap()
        );
        fs::remove_file(&file).unwrap();

        let err = HyperVolume::read_json_file(&folder.join("non_existing_file.json")).unwrap_err();
        assert!(matches!(err, OError::Import(_)));
    }
}
