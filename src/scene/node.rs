//! Node visuals: idle float, highlight glow and per-kind geometry.

use serde::Serialize;

use crate::schema::{NodeConfig, NodeKind, Vec3};

/// Body lift above the node's floor position.
const BODY_LIFT: f32 = 0.5;

/// Primitive shape used to draw a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Cylinder { radius: f32, height: f32 },
    Icosahedron { radius: f32 },
    Dodecahedron { radius: f32 },
}

impl Geometry {
    /// Shape for a node kind.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            // Laptop-ish
            NodeKind::Client => Geometry::Box {
                width: 0.8,
                height: 0.5,
                depth: 0.6,
            },
            // Tall thin wall
            NodeKind::Firewall => Geometry::Box {
                width: 0.2,
                height: 1.5,
                depth: 1.5,
            },
            NodeKind::Database => Geometry::Cylinder {
                radius: 0.4,
                height: 1.0,
            },
            NodeKind::Internet => Geometry::Icosahedron { radius: 0.6 },
            NodeKind::Waf => Geometry::Dodecahedron { radius: 0.5 },
            _ => Geometry::Box {
                width: 0.8,
                height: 0.8,
                depth: 0.8,
            },
        }
    }
}

/// Draw parameters for one node on one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeVisual<'a> {
    pub id: NodeKind,
    pub label: &'a str,
    pub description: &'a str,
    pub geometry: Geometry,
    /// Body position including the idle float.
    pub body_position: Vec3,
    /// Glow sphere position (no float).
    pub glow_position: Vec3,
    pub glow_scale: f32,
    pub glow_opacity: f32,
    /// Body color: white while highlighted, the node color otherwise.
    pub body_color: &'a str,
    pub emissive_color: &'a str,
    pub emissive_intensity: f32,
    pub highlighted: bool,
}

impl<'a> NodeVisual<'a> {
    /// Compute visuals for `node` at wall-clock time `clock` (seconds).
    pub fn new(node: &'a NodeConfig, highlighted: bool, clock: f32) -> Self {
        let [x, y, z] = node.position;
        let float = (clock * 2.0).sin() * 0.05;

        let (glow_scale, glow_opacity) = if highlighted {
            (1.2 + (clock * 10.0).sin() * 0.1, 0.4)
        } else {
            (1.0, 0.1)
        };

        Self {
            id: node.id,
            label: node.display_label(),
            description: &node.description,
            geometry: Geometry::for_kind(node.id),
            body_position: [x, y + float + BODY_LIFT, z],
            glow_position: [x, y + BODY_LIFT, z],
            glow_scale,
            glow_opacity,
            body_color: if highlighted { "#ffffff" } else { node.color.as_str() },
            emissive_color: &node.color,
            emissive_intensity: if highlighted { 0.8 } else { 0.2 },
            highlighted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waf() -> NodeConfig {
        NodeConfig {
            id: NodeKind::Waf,
            position: [3.0, 0.0, -3.5],
            color: "#8b5cf6".into(),
            description: "Web App Firewall".into(),
            label: None,
        }
    }

    #[test]
    fn test_idle_node() {
        let node = waf();
        let visual = NodeVisual::new(&node, false, 0.0);
        assert_eq!(visual.body_position, [3.0, 0.5, -3.5]);
        assert_eq!(visual.glow_scale, 1.0);
        assert_eq!(visual.glow_opacity, 0.1);
        assert_eq!(visual.body_color, "#8b5cf6");
        assert_eq!(visual.emissive_intensity, 0.2);
        assert_eq!(visual.label, "WAF");
        assert_eq!(visual.geometry, Geometry::Dodecahedron { radius: 0.5 });
    }

    #[test]
    fn test_highlighted_node_pulses() {
        let node = waf();
        let visual = NodeVisual::new(&node, true, 0.0);
        assert_eq!(visual.body_color, "#ffffff");
        assert_eq!(visual.glow_opacity, 0.4);
        assert!((visual.glow_scale - 1.2).abs() < 1e-6);

        let t = std::f32::consts::FRAC_PI_2 / 10.0;
        let visual = NodeVisual::new(&node, true, t);
        assert!((visual.glow_scale - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_float_stays_small() {
        let node = waf();
        for i in 0..100 {
            let visual = NodeVisual::new(&node, false, i as f32 * 0.37);
            assert!((visual.body_position[1] - 0.5).abs() <= 0.05 + 1e-6);
            assert_eq!(visual.glow_position, [3.0, 0.5, -3.5]);
        }
    }

    #[test]
    fn test_geometry_per_kind() {
        assert!(matches!(
            Geometry::for_kind(NodeKind::Database),
            Geometry::Cylinder { .. }
        ));
        assert!(matches!(
            Geometry::for_kind(NodeKind::App),
            Geometry::Box { width, .. } if width == 0.8
        ));
    }
}
