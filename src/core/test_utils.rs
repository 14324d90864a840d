#[cfg(test)]
use rand::{Rng, SeedableRng};
#[cfg(test)]
use rand_chacha::ChaCha8Rng;

/// Generate random points whose coordinates are between `0` and `1`. A point set generated this
/// way contains dominated points as well.
///
/// # Arguments
///
/// * `number_of_points`: The number of points.
/// * `dimension`: The number of coordinates of each point.
/// * `seed`: The seed of the random number generator.
///
/// returns: `Vec<Vec<f64>>`
#[cfg(test)]
pub(crate) fn random_points(number_of_points: usize, dimension: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..number_of_points)
        .map(|_| (0..dimension).map(|_| rng.gen_range(0.0..1.0)).collect())
        .collect()
}

/// Generate random non-dominated points lying on the unit sphere in the positive orthant
/// (concave front).
///
/// # Arguments
///
/// * `number_of_points`: The number of points.
/// * `dimension`: The number of coordinates of each point.
/// * `seed`: The seed of the random number generator.
///
/// returns: `Vec<Vec<f64>>`
#[cfg(test)]
pub(crate) fn random_spherical_front(
    number_of_points: usize,
    dimension: usize,
    seed: u64,
) -> Vec<Vec<f64>> {
    random_points(number_of_points, dimension, seed)
        .into_iter()
        .map(|p| {
            // shift away from zero to avoid a null norm
            let p: Vec<f64> = p.iter().map(|v| v + 0.01).collect();
            let norm = p.iter().map(|v| v * v).sum::<f64>().sqrt();
            p.iter().map(|v| v / norm).collect()
        })
        .collect()
}

/// Assert that two values are equal within a relative tolerance.
///
/// # Arguments
///
/// * `calculated`: The calculated value.
/// * `expected`: The expected value.
/// * `r_tol`: The relative tolerance.
#[cfg(test)]
pub(crate) fn assert_relative_eq(calculated: f64, expected: f64, r_tol: f64) {
    let tolerance = r_tol * expected.abs().max(f64::MIN_POSITIVE);
    if (calculated - expected).abs() > tolerance {
        panic!(
            r#"assertion failed: `(left approx_eq right)`
                left: `{calculated:?}`,
                right: `{expected:?}`"#,
        )
    }
}
