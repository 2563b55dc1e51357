//! SecFlow - Step-playback engine for an animated network request lifecycle.
//!
//! A fixed network topology (client, internet, firewall, load balancer, WAF,
//! app server, auth service, database, SIEM) and a scripted list of steps
//! (DNS, TCP, TLS, HTTP, auth, DB query, logging, response). A single packet
//! marker travels each step's path; playback controls move through the steps,
//! optionally advancing on their own.
//!
//! # Architecture
//!
//! - `schema`: Topology, steps, playback configuration and scenario loading
//! - `playback`: Path tracker, playback controller and the frame-driven engine
//! - `scene`: Per-frame visual parameters for a renderer (no drawing)
//!
//! # Example
//!
//! ```rust
//! use secflow::playback::{PlaybackEngine, PlaybackState};
//!
//! let mut engine = PlaybackEngine::builtin().unwrap();
//!
//! // Enter auto-play and run one simulated minute at 60 fps.
//! engine.play_pause();
//! for _ in 0..3600 {
//!     engine.update(1.0 / 60.0);
//! }
//!
//! let last = engine.scenario().last_step();
//! assert_eq!(engine.state(), PlaybackState::new(last, false, false));
//! ```

pub mod playback;
pub mod scene;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use playback::{Command, FrameSnapshot, PlaybackEngine, PlaybackEvent, PlaybackState};
pub use schema::{NodeKind, PlaybackConfig, Scenario, ScenarioError, Step};
