//! Schema module - Topology, step and playback configuration types.

mod builtin;
mod config;
mod scenario;
mod step;
mod topology;

pub use config::*;
pub use scenario::*;
pub use step::*;
pub use topology::*;
