use crate::common::{RenderError, RenderResult};
use crate::domains::scenario::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vertical position of the agent row.
pub const AGENT_ROW_Y: f64 = 0.1;
/// Vertical position of the target row.
pub const TARGET_ROW_Y: f64 = -0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Two-row placement of agents (top) and targets (bottom).
#[derive(Debug, Clone)]
pub struct Layout {
    positions: BTreeMap<Node, Position2D>,
    agent_count: usize,
    target_count: usize,
}

impl Layout {
    /// Agent `i` sits at `(i-1, 0.1)`. Target `j` sits at `(j-1, -0.2)` shifted
    /// so that both rows share the same centroid.
    pub fn compute(agent_count: usize, target_count: usize) -> RenderResult<Self> {
        if agent_count == 0 || target_count == 0 {
            return Err(RenderError::DegenerateGeometry {
                agents: agent_count,
                targets: target_count,
            });
        }

        let mut positions = BTreeMap::new();
        for i in 1..=agent_count {
            positions.insert(Node::Agent(i as u32), Position2D::new((i - 1) as f64, AGENT_ROW_Y));
        }

        let center_top = (agent_count - 1) as f64 / 2.0;
        let shift = center_top - (target_count - 1) as f64 / 2.0;
        for j in 1..=target_count {
            positions.insert(
                Node::Target(j as u32),
                Position2D::new((j - 1) as f64 + shift, TARGET_ROW_Y),
            );
        }

        Ok(Self { positions, agent_count, target_count })
    }

    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn position(&self, node: Node) -> Option<Position2D> {
        self.positions.get(&node).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (Node, Position2D)> + '_ {
        self.positions.iter().map(|(n, p)| (*n, *p))
    }

    /// Mean x of the agent row (`agents == true`) or the target row.
    pub fn centroid_x(&self, agents: bool) -> f64 {
        let xs: Vec<f64> = self
            .positions
            .iter()
            .filter(|(n, _)| n.is_agent() == agents)
            .map(|(_, p)| p.x)
            .collect();
        xs.iter().sum::<f64>() / xs.len() as f64
    }

    /// Horizontal extent over both rows.
    pub fn x_bounds(&self) -> (f64, f64) {
        self.positions
            .values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)))
    }
}

/// Marker area in pt², shrinking as the agent row gets wider.
pub fn node_size(agent_count: usize) -> f64 {
    500.0 * (5.0 / agent_count.max(1) as f64)
}

/// Pixel radius of a marker of `size` pt² at `dpi`.
pub fn node_radius_px(size: f64, dpi: f64) -> f64 {
    size.sqrt() / 2.0 * dpi / 72.0
}
