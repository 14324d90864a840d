//! Exact hyper-volume indicator for sets of points in a minimisation objective space.
//!
//! The hyper-volume is the measure of the region dominated by a set of points and bounded by a
//! reference point. The crate validates the point set once ([`core::PointSet`]) and then
//! delegates the calculation to a [`metrics::HyperVolumeAlgorithm`]. Three exact algorithms are
//! provided and, when no algorithm is given, the fastest one for the point dimension is picked by
//! [`metrics::best_algorithm`]:
//!
//! - with `2` objectives: [`metrics::Native2D`], a `O(n log n)` sweep.
//! - with `3` objectives: [`metrics::Beume3D`], a sweep along the third axis maintaining a 2D
//!   skyline, as proposed by [Beume et al. (2009)](https://doi.org/10.1109/TEVC.2008.915538).
//! - with `4` or more objectives: [`metrics::Wfg`], the algorithm proposed by
//!   [While et al. (2012)](http://dx.doi.org/10.1109/TEVC.2010.2077298).
//!
//! # Example
//! ```rust
//! use hypervolume::core::OError;
//! use hypervolume::metrics::HyperVolume;
//!
//! fn main() -> Result<(), OError> {
//!     let hv = HyperVolume::from_points(vec![vec![1.0, 1.0], vec![2.0, 0.5], vec![0.5, 2.0]])?;
//!     let value = hv.compute(&[3.0, 3.0], None)?;
//!     assert!((value - 5.0).abs() < 1e-12);
//!
//!     // (2, 0.5) and (0.5, 2) both contribute 0.5 on their own; the lowest index wins
//!     assert_eq!(hv.least_contributor(&[3.0, 3.0], None)?, 1);
//!     Ok(())
//! }
//! ```
pub mod core;
pub mod metrics;
pub mod utils;
