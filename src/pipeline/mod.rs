//! Pipeline module - the analysis steps in execution order

pub mod binning;
pub mod correlation;
pub mod describe;
pub mod evaluate;
pub mod loader;
pub mod missing;
pub mod preprocess;
pub mod stats;
pub mod target;

pub use binning::*;
pub use correlation::*;
pub use describe::*;
pub use evaluate::*;
pub use loader::*;
pub use missing::*;
pub use preprocess::*;
pub use target::*;
