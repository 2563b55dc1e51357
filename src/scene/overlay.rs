//! Overlay data: connection lines, timeline, play button and legend.

use serde::Serialize;

use crate::playback::PlaybackState;
use crate::schema::{NodeKind, Scenario, Topology, Vec3};

/// Height at which connection lines float above the floor.
const LINE_HEIGHT: f32 = 0.5;

/// A connection drawn as a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConnectionLine {
    pub from: NodeKind,
    pub to: NodeKind,
    pub start: Vec3,
    pub end: Vec3,
}

/// Lines for every connection in the topology.
pub fn connection_lines(topology: &Topology) -> Vec<ConnectionLine> {
    topology
        .connected_nodes()
        .map(|(a, b)| ConnectionLine {
            from: a.id,
            to: b.id,
            start: [a.position[0], LINE_HEIGHT, a.position[2]],
            end: [b.position[0], LINE_HEIGHT, b.position[2]],
        })
        .collect()
}

/// Where a step sits relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Past,
    Active,
    Upcoming,
}

/// One row of the timeline sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry<'a> {
    pub index: usize,
    pub title: &'a str,
    pub status: StepStatus,
}

/// Timeline rows for all steps.
pub fn timeline<'a>(scenario: &'a Scenario, current_step: usize) -> Vec<TimelineEntry<'a>> {
    scenario
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| TimelineEntry {
            index,
            title: &step.title,
            status: match index.cmp(&current_step) {
                std::cmp::Ordering::Less => StepStatus::Past,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            },
        })
        .collect()
}

/// Glyph on the central playback button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayButton {
    Play,
    Pause,
}

impl From<PlaybackState> for PlayButton {
    fn from(state: PlaybackState) -> Self {
        if state.shows_pause() {
            PlayButton::Pause
        } else {
            PlayButton::Play
        }
    }
}

/// Legend swatch.
#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry<'a> {
    pub label: &'static str,
    pub color: &'a str,
}

/// Node kinds called out in the legend.
const LEGEND: [(NodeKind, &str); 3] = [
    (NodeKind::Firewall, "Firewall"),
    (NodeKind::LoadBalancer, "Load Balancer"),
    (NodeKind::App, "App Server"),
];

/// Legend swatches for kinds present in the topology.
pub fn legend(topology: &Topology) -> Vec<LegendEntry<'_>> {
    LEGEND
        .iter()
        .filter_map(|&(kind, label)| {
            topology.node(kind).map(|node| LegendEntry {
                label,
                color: &node.color,
            })
        })
        .collect()
}
