//! API request handlers

mod health;
mod imagery;
mod planets;

pub use health::*;
pub use imagery::*;
pub use planets::*;
