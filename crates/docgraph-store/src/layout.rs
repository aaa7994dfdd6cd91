//! Deterministic radial layout.
//!
//! Each node class sits on its own concentric ring so the renderer can
//! separate them visually. A position depends only on the node's index
//! within its group and the group size.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::types::{Node, NodeType};

/// Render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A ring of nodes sharing one radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutGroup {
    Pages,
    AiKeywords,
    ConsultingInsights,
    Organizations,
    Clients,
    Capabilities,
}

/// Vertical distance between consecutive pages.
pub const PAGE_Z_STEP: f64 = 15.0;

impl LayoutGroup {
    pub fn for_node_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::PageImage => Self::Pages,
            NodeType::AiKeyword => Self::AiKeywords,
            NodeType::ConsultingInsight => Self::ConsultingInsights,
            NodeType::Organization => Self::Organizations,
            NodeType::Client => Self::Clients,
            NodeType::Capability => Self::Capabilities,
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            Self::Pages => 200.0,
            Self::AiKeywords => 350.0,
            Self::ConsultingInsights => 500.0,
            Self::Organizations => 0.0,
            Self::Clients => 150.0,
            Self::Capabilities => 300.0,
        }
    }

    /// Height of the node at `index`. Pages climb linearly; every other ring is flat.
    pub fn z(&self, index: usize) -> f64 {
        match self {
            Self::Pages => index as f64 * PAGE_Z_STEP,
            Self::AiKeywords => 80.0,
            Self::ConsultingInsights => -80.0,
            Self::Organizations => 0.0,
            Self::Clients => 40.0,
            Self::Capabilities => -40.0,
        }
    }
}

/// Angle of slot `index` when `count` slots share a full turn.
pub fn angle_for(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    2.0 * PI * index as f64 / count as f64
}

pub fn radial_position(group: LayoutGroup, index: usize, count: usize) -> Position {
    let angle = angle_for(index, count);
    let radius = group.radius();
    Position {
        x: radius * angle.cos(),
        y: radius * angle.sin(),
        z: group.z(index),
    }
}

/// Place every node of `nodes` on the ring of `group`, in slice order.
pub fn layout_group(nodes: &mut [Node], group: LayoutGroup) {
    let count = nodes.len();
    for (index, node) in nodes.iter_mut().enumerate() {
        let pos = radial_position(group, index, count);
        node.x = pos.x;
        node.y = pos.y;
        node.z = pos.z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_positions_lie_on_group_ring() {
        let count = 7;
        for i in 0..count {
            let pos = radial_position(LayoutGroup::AiKeywords, i, count);
            let r = (pos.x * pos.x + pos.y * pos.y).sqrt();
            assert!((r - 350.0).abs() < EPS);
            let expected = 2.0 * PI * i as f64 / count as f64;
            let actual = pos.y.atan2(pos.x).rem_euclid(2.0 * PI);
            assert!((actual - expected).abs() < 1e-6, "slot {}", i);
        }
    }

    #[test]
    fn test_layout_group_round_trips() {
        let mut nodes: Vec<Node> = (0..5)
            .map(|i| Node::new(format!("p{}", i), format!("Page {}", i + 1), NodeType::PageImage))
            .collect();
        layout_group(&mut nodes, LayoutGroup::Pages);
        for (i, node) in nodes.iter().enumerate() {
            let pos = radial_position(LayoutGroup::Pages, i, nodes.len());
            assert_eq!((node.x, node.y, node.z), (pos.x, pos.y, pos.z));
            assert_eq!(node.z, i as f64 * PAGE_Z_STEP);
        }
    }

    #[test]
    fn test_single_node_and_empty_group() {
        let pos = radial_position(LayoutGroup::Organizations, 0, 1);
        assert_eq!((pos.x, pos.y), (0.0, 0.0));
        assert_eq!(angle_for(3, 0), 0.0);
        let mut empty: Vec<Node> = Vec::new();
        layout_group(&mut empty, LayoutGroup::Clients);
    }
}
