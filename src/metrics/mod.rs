pub use algorithm::HyperVolumeAlgorithm;
pub use hypervolume::{HyperVolume, PointSetExport};
pub use hypervolume_2d::Native2D;
pub use hypervolume_beume_2009::Beume3D;
pub use hypervolume_while_2012::Wfg;
pub use selector::best_algorithm;

mod algorithm;
mod hypervolume;
mod hypervolume_2d;
mod hypervolume_beume_2009;
mod hypervolume_while_2012;
mod selector;
