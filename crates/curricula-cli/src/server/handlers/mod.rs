//! API request handlers.

mod dataset;
mod export;
mod pivot;

pub use dataset::*;
pub use export::*;
pub use pivot::*;
