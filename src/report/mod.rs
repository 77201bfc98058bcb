//! Report rendering and export

pub mod export;
pub mod tables;

pub use export::*;
pub use tables::*;
