//! Scene module - per-frame visual parameters for a renderer.
//!
//! Everything here is derived from a [`FrameSnapshot`] and a wall-clock value;
//! nothing feeds back into playback. Pulses and floats use the renderer's
//! clock, not simulated playback time, so they keep moving while paused.

mod node;
mod overlay;
mod packet;

pub use node::*;
pub use overlay::*;
pub use packet::*;

use serde::Serialize;

use crate::playback::FrameSnapshot;
use crate::schema::Scenario;

/// Complete draw list for one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub nodes: Vec<NodeVisual<'a>>,
    pub connections: Vec<ConnectionLine>,
    pub packet: PacketVisual<'a>,
    pub timeline: Vec<TimelineEntry<'a>>,
    pub play_button: PlayButton,
    pub legend: Vec<LegendEntry<'a>>,
    /// Text for the security context panel.
    pub description: &'a str,
}

impl<'a> SceneFrame<'a> {
    /// Build the draw list for `frame`.
    pub fn build(scenario: &'a Scenario, frame: &FrameSnapshot<'a>, clock: f32) -> Self {
        let nodes = scenario
            .topology
            .nodes
            .iter()
            .map(|node| NodeVisual::new(node, frame.is_highlighted(node.id), clock))
            .collect();

        Self {
            title: &scenario.title,
            subtitle: &scenario.subtitle,
            nodes,
            connections: connection_lines(&scenario.topology),
            packet: PacketVisual::new(frame, clock),
            timeline: timeline(scenario, frame.state.current_step),
            play_button: PlayButton::from(frame.state),
            legend: legend(&scenario.topology),
            description: frame.description,
        }
    }
}
