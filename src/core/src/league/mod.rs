pub mod league;
mod generator;

pub use generator::*;
pub use league::*;
