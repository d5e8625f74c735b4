pub mod matchup;

pub use matchup::*;
