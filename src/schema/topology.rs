//! Network topology: node kinds, their placement, and the drawn connections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in scene space (x, y, z). Y is up; the floor is y = 0.
pub type Vec3 = [f32; 3];

/// The closed set of nodes the diagram knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "Client")]
    Client,
    #[serde(rename = "Internet")]
    Internet,
    #[serde(rename = "Firewall")]
    Firewall,
    #[serde(rename = "Load Balancer")]
    LoadBalancer,
    #[serde(rename = "WAF")]
    Waf,
    #[serde(rename = "App Server")]
    App,
    #[serde(rename = "Auth Service")]
    Auth,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "SIEM / Logging")]
    Siem,
}

impl NodeKind {
    /// Every kind, in canonical table order.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Client,
        NodeKind::Internet,
        NodeKind::Firewall,
        NodeKind::LoadBalancer,
        NodeKind::Waf,
        NodeKind::App,
        NodeKind::Auth,
        NodeKind::Database,
        NodeKind::Siem,
    ];

    /// Human-readable name, also the serialized form.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Client => "Client",
            NodeKind::Internet => "Internet",
            NodeKind::Firewall => "Firewall",
            NodeKind::LoadBalancer => "Load Balancer",
            NodeKind::Waf => "WAF",
            NodeKind::App => "App Server",
            NodeKind::Auth => "Auth Service",
            NodeKind::Database => "Database",
            NodeKind::Siem => "SIEM / Logging",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Placement and metadata for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which node this is.
    pub id: NodeKind,
    /// Position on the floor plane.
    pub position: Vec3,
    /// Base color as a CSS hex string.
    pub color: String,
    /// Short description shown on hover.
    pub description: String,
    /// Custom display label; falls back to the kind's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl NodeConfig {
    /// Label to draw above the node.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .unwrap_or_else(|| self.id.display_name())
    }
}

/// Static node table plus the connection lines drawn between nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Node table. Each kind appears at most once.
    pub nodes: Vec<NodeConfig>,
    /// Undirected links drawn as lines. Purely visual; paths need not follow them.
    #[serde(default)]
    pub connections: Vec<(NodeKind, NodeKind)>,
}

impl Topology {
    /// Look up a node by kind.
    pub fn node(&self, kind: NodeKind) -> Option<&NodeConfig> {
        self.nodes.iter().find(|n| n.id == kind)
    }

    /// Floor position of a node.
    pub fn position(&self, kind: NodeKind) -> Option<Vec3> {
        self.node(kind).map(|n| n.position)
    }

    /// Check whether a node is present in the table.
    #[inline]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.node(kind).is_some()
    }

    /// Iterate over connections as pairs of node configs.
    ///
    /// Connections that reference a missing node are skipped; a validated
    /// scenario has none.
    pub fn connected_nodes(&self) -> impl Iterator<Item = (&NodeConfig, &NodeConfig)> + '_ {
        self.connections
            .iter()
            .filter_map(|&(a, b)| Some((self.node(a)?, self.node(b)?)))
    }
}
