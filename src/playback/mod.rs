//! Playback module - step sequencing and packet motion.
//!
//! The tracker moves a cursor along one path; the controller decides which
//! step is active; the engine feeds both from host frame deltas.

mod controller;
mod engine;
mod event;
mod snapshot;
mod timer;
mod tracker;

pub use controller::{PlaybackController, PlaybackState};
pub use engine::PlaybackEngine;
pub use event::{ActivationCause, Command, PlaybackEvent};
pub use snapshot::FrameSnapshot;
pub use timer::DeferredAdvance;
pub use tracker::{Advance, PathTracker, lerp, resolve_waypoints};
