use std::env;
use std::error::Error;

use log::{info, LevelFilter};

use hypervolume::core::Population;
use hypervolume::metrics::{HyperVolume, Wfg};

/// Calculate the hyper-volume of the non-dominated front of a small population with three
/// objectives and find the individual contributing the least to it. The reference point is the
/// nadir point of the front shifted by `0.1`.
///
/// Run this with:
///
/// `cargo run --example least_contributor`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    // The fitness of the individuals; the last two are dominated
    let population = Population::new(vec![
        vec![0.1, 0.8, 0.6],
        vec![0.5, 0.5, 0.5],
        vec![0.9, 0.2, 0.3],
        vec![0.4, 0.3, 0.9],
        vec![0.6, 0.6, 0.7],
        vec![1.0, 0.9, 0.9],
    ]);
    let hv = HyperVolume::from_population(&population, 0)?;
    info!("The first front has {} points", hv.points().len());

    let reference_point = hv.nadir_point(0.1);
    info!("Using reference point {:?}", reference_point);

    // The best algorithm for 3 objectives is selected when no algorithm is given
    let value = hv.compute(&reference_point, None)?;
    info!("Hyper-volume = {value}");

    // Any algorithm can be forced
    let wfg_value = hv.compute(&reference_point, Some(&Wfg::default()))?;
    info!("Hyper-volume with WFG = {wfg_value}");

    let contributions = hv.contributions(&reference_point, None)?;
    info!("Contributions = {:?}", contributions);
    let least = hv.least_contributor(&reference_point, None)?;
    info!("The least contributor is {:?}", hv.points()[least]);

    // Export the front
    let file = hv.save_to_json(&env::temp_dir(), Some("least_contributor"))?;
    info!("Front exported to {:?}", file);

    Ok(())
}
