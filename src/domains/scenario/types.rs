use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based agent identifier.
pub type AgentId = u32;

/// 1-based target identifier.
pub type TargetId = u32;

/// A node in the two-row layout. Agents and targets share index space in the
/// scenario model, so the node kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    Agent(AgentId),
    Target(TargetId),
}

impl Node {
    pub fn is_agent(&self) -> bool {
        matches!(self, Node::Agent(_))
    }

    pub fn id(&self) -> u32 {
        match self {
            Node::Agent(id) | Node::Target(id) => *id,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Agent(id) => write!(f, "x{}", id),
            Node::Target(id) => write!(f, "t{}", id),
        }
    }
}

/// Which quality metric annotates a rendered assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Raw assignment score, rendered as `f(x)`.
    #[default]
    Score,
    /// Score divided by the optimal score, rendered as `γ(x)`.
    Efficiency,
}

impl Metric {
    pub fn symbol(&self) -> &'static str {
        match self {
            Metric::Score => "f(x)",
            Metric::Efficiency => "γ(x)",
        }
    }
}
