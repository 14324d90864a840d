pub use error::OError;
pub use point_set::PointSet;
pub use population::{ParetoFrontSource, Population};

mod error;
mod point_set;
mod population;
pub(crate) mod test_utils;
