//! Library components of the cartogram pipeline CLI.

pub mod logging;
pub mod pipeline;
pub mod types;
