use log::debug;

use crate::metrics::{Beume3D, HyperVolumeAlgorithm, Native2D, Wfg};

/// Get the fastest exact algorithm to calculate the hyper-volume of points with the given
/// number of objectives:
///
/// - with `2` objectives: [`Native2D`].
/// - with `3` objectives: [`Beume3D`].
/// - with `4` or more objectives: [`Wfg`].
///
/// # Arguments
///
/// * `dimension`: The number of objectives (or coordinates) of the points.
///
/// returns: `Box<dyn HyperVolumeAlgorithm>`
pub fn best_algorithm(dimension: usize) -> Box<dyn HyperVolumeAlgorithm> {
    let algorithm: Box<dyn HyperVolumeAlgorithm> = match dimension {
        2 => Box::new(Native2D),
        3 => Box::new(Beume3D),
        _ => Box::new(Wfg::default()),
    };
    debug!(
        "Selected the {} algorithm for {} objectives",
        algorithm.name(),
        dimension
    );
    algorithm
}
