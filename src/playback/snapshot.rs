//! Per-frame output handed to the presentation layer.

use serde::Serialize;

use super::controller::PlaybackState;
use super::event::PlaybackEvent;
use crate::schema::{NodeKind, Step, Vec3};

/// Everything a renderer needs for one frame, borrowed from the engine.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot<'a> {
    /// Playback state after this frame's update.
    pub state: PlaybackState,
    /// Packet position, reflecting this frame's progress.
    pub position: Vec3,
    /// Progress along the active path in segments.
    pub progress: f32,
    /// Progress at which the active path ends.
    pub max_progress: f32,
    /// Whether to draw the packet. Independent of whether it is moving.
    pub show_packet: bool,
    /// Packet color (CSS hex).
    pub packet_color: &'a str,
    /// Label above the packet.
    pub packet_label: Option<&'a str>,
    /// Active step title.
    pub title: &'a str,
    /// Active step description.
    pub description: &'a str,
    /// Nodes to highlight.
    pub highlight: &'a [NodeKind],
    /// Total simulated seconds.
    pub elapsed: f64,
    /// Events since the previous snapshot.
    pub events: Vec<PlaybackEvent>,
}

impl<'a> FrameSnapshot<'a> {
    /// Assemble a snapshot for `step`.
    pub(crate) fn new(
        step: &'a Step,
        state: PlaybackState,
        position: Vec3,
        progress: f32,
        max_progress: f32,
        elapsed: f64,
        events: Vec<PlaybackEvent>,
    ) -> Self {
        Self {
            state,
            position,
            progress,
            max_progress,
            show_packet: step.packet_visible,
            packet_color: step.packet_color(),
            packet_label: step.packet_label.as_deref(),
            title: &step.title,
            description: &step.description,
            highlight: &step.highlight,
            elapsed,
            events,
        }
    }

    /// Check whether a node is highlighted this frame.
    #[inline]
    pub fn is_highlighted(&self, kind: NodeKind) -> bool {
        self.highlight.contains(&kind)
    }
}
