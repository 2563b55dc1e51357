//! Packet marker visuals: pulse, trail ring and label.

use serde::Serialize;

use crate::playback::FrameSnapshot;
use crate::schema::Vec3;

/// Draw parameters for the packet marker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PacketVisual<'a> {
    pub visible: bool,
    pub position: Vec3,
    /// Uniform sphere scale.
    pub scale: f32,
    pub color: &'a str,
    /// Only present while visible.
    pub label: Option<&'a str>,
    /// Trail ring, present while visible.
    pub trail: Option<Trail>,
}

/// Flat ring drawn just under the packet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trail {
    pub position: Vec3,
    pub scale: Vec3,
}

impl<'a> PacketVisual<'a> {
    /// Compute packet visuals from a frame at wall-clock time `clock`.
    pub fn new(frame: &FrameSnapshot<'a>, clock: f32) -> Self {
        let scale = 0.2 + (clock * 15.0).sin() * 0.05;
        let visible = frame.show_packet;
        let [x, y, z] = frame.position;

        Self {
            visible,
            position: frame.position,
            scale,
            color: frame.packet_color,
            label: frame.packet_label.filter(|_| visible),
            trail: visible.then_some(Trail {
                position: [x, y - 0.05, z],
                scale: [scale * 2.0, 0.05, scale * 2.0],
            }),
        }
    }
}
