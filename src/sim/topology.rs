//! Ordered lane topology
//!
//! Lanes live in an arena and link to their neighbours by index. The two end
//! lanes have no outer neighbour: the track does not wrap around.

use serde::{Deserialize, Serialize};

use super::lane::LaneGeometry;

/// Index of a lane inside its topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneId(pub usize);

/// Which neighbour to move to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Towards the previous (inner) lane
    Left,
    /// Towards the next (outer) lane
    Right,
}

#[derive(Debug, Clone)]
struct LaneNode {
    geometry: LaneGeometry,
    previous: Option<LaneId>,
    next: Option<LaneId>,
}

/// Non-wrapping sequence of lanes
#[derive(Debug, Clone, Default)]
pub struct LaneTopology {
    nodes: Vec<LaneNode>,
}

impl LaneTopology {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a lane at the tail, linking it to the previous tail
    pub fn append(&mut self, geometry: impl Into<LaneGeometry>) -> LaneId {
        let id = LaneId(self.nodes.len());
        let previous = self.last_lane();
        if let Some(tail) = previous {
            self.nodes[tail.0].next = Some(id);
        }
        self.nodes.push(LaneNode {
            geometry: geometry.into(),
            previous,
            next: None,
        });
        id
    }

    pub fn first_lane(&self) -> Option<LaneId> {
        (!self.nodes.is_empty()).then_some(LaneId(0))
    }

    pub fn last_lane(&self) -> Option<LaneId> {
        self.nodes.len().checked_sub(1).map(LaneId)
    }

    /// Neighbour on `side`, or `None` at the track boundary
    pub fn adjacent(&self, lane: LaneId, side: Side) -> Option<LaneId> {
        let node = self.nodes.get(lane.0)?;
        match side {
            Side::Left => node.previous,
            Side::Right => node.next,
        }
    }

    pub fn get(&self, lane: LaneId) -> Option<&LaneGeometry> {
        self.nodes.get(lane.0).map(|node| &node.geometry)
    }

    /// Lanes in order, first to last
    pub fn iter(&self) -> impl Iterator<Item = (LaneId, &LaneGeometry)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (LaneId(i), &node.geometry))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Release every lane
    pub fn destroy(&mut self) {
        self.nodes.clear();
    }
}
