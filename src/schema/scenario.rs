//! Scenario: topology, step sequence and playback settings loaded as one unit.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConfigError, NodeKind, PlaybackConfig, Step, Topology, builtin};

fn default_title() -> String {
    "SecFlow 3D".to_string()
}

/// Everything the engine needs, loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Heading shown above the diagram.
    #[serde(default = "default_title")]
    pub title: String,
    /// Subheading.
    #[serde(default)]
    pub subtitle: String,
    /// Node table and connections.
    pub topology: Topology,
    /// Ordered, contiguous step list.
    pub steps: Vec<Step>,
    /// Timing parameters.
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: "Enterprise Network Request Lifecycle".to_string(),
            topology: builtin::topology(),
            steps: builtin::steps(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl Scenario {
    /// Parse and validate a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Index of the final step.
    #[inline]
    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Check the load-time invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.playback.validate()?;

        let mut seen = HashSet::new();
        for node in &self.topology.nodes {
            if !seen.insert(node.id) {
                return Err(ScenarioError::DuplicateNode(node.id));
            }
        }

        for &(a, b) in &self.topology.connections {
            for kind in [a, b] {
                if !seen.contains(&kind) {
                    return Err(ScenarioError::UnknownConnectionNode(kind));
                }
            }
        }

        if self.steps.is_empty() {
            return Err(ScenarioError::NoSteps);
        }

        for (index, step) in self.steps.iter().enumerate() {
            if step.id != index {
                return Err(ScenarioError::NonContiguousId { index, id: step.id });
            }
            if step.path.is_empty() {
                return Err(ScenarioError::EmptyPath { step: index });
            }
            if let Some(node) = step
                .path
                .iter()
                .chain(step.highlight.iter())
                .copied()
                .find(|kind| !seen.contains(kind))
            {
                return Err(ScenarioError::UnknownStepNode { step: index, node });
            }
        }

        Ok(())
    }
}

/// Scenario loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("Scenario has no steps")]
    NoSteps,
    #[error("Step {step} has an empty path")]
    EmptyPath { step: usize },
    #[error("Step at position {index} has id {id}")]
    NonContiguousId { index: usize, id: usize },
    #[error("Step {step} references node {node} which is not in the topology")]
    UnknownStepNode { step: usize, node: NodeKind },
    #[error("Node {0} appears more than once in the topology")]
    DuplicateNode(NodeKind),
    #[error("Connection references node {0} which is not in the topology")]
    UnknownConnectionNode(NodeKind),
    #[error("Playback config validation failed: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read scenario: {0}")]
    Io(#[from] io::Error),
}
