pub mod ledger;
pub mod ranking;
mod clinch;
mod standing;

pub use clinch::*;
pub use ledger::*;
pub use ranking::*;
pub use standing::*;
