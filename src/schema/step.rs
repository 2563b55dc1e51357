//! Step types describing one stage of the request lifecycle.

use serde::{Deserialize, Serialize};

use super::NodeKind;

fn default_packet_visible() -> bool {
    true
}

/// Packet color used when a step does not set one.
pub const DEFAULT_PACKET_COLOR: &str = "#ffffff";

/// One labeled stage of the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Sequence index; must equal the step's position in the list.
    pub id: usize,
    /// Short title for the timeline.
    pub title: String,
    /// Longer explanation shown while the step is active.
    pub description: String,
    /// Nodes the packet visits, in order. A single entry is a stationary pulse.
    pub path: Vec<NodeKind>,
    /// Whether the packet is drawn. Hidden steps still consume time and complete.
    #[serde(default = "default_packet_visible")]
    pub packet_visible: bool,
    /// Nodes to emphasize while the step is active.
    #[serde(default)]
    pub highlight: Vec<NodeKind>,
    /// Packet color (CSS hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_color: Option<String>,
    /// Text floating above the packet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_label: Option<String>,
}

impl Step {
    /// Packet color, falling back to white.
    pub fn packet_color(&self) -> &str {
        self.packet_color.as_deref().unwrap_or(DEFAULT_PACKET_COLOR)
    }

    /// Whether the packet stays on one node for this step.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.path.len() < 2
    }

    /// Number of segments the packet crosses (path length minus one).
    #[inline]
    pub fn segments(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Check whether a node should be highlighted.
    #[inline]
    pub fn highlights(&self, kind: NodeKind) -> bool {
        self.highlight.contains(&kind)
    }
}
