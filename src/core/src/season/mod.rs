pub mod season;
mod progression;
mod result;

pub use progression::*;
pub use result::*;
pub use season::*;
