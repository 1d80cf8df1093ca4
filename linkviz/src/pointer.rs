use alloc::vec::Vec;

use crate::factory;
use crate::{Color, Entry, GraphEdge, GraphNode, Layout, NodeId, Palette, Point};

pub const HEAD_POINTER_ID: &str = "pointer-head";
pub const TAIL_POINTER_ID: &str = "pointer-tail";

/// Which end of the list a pointer node marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PointerRole {
    Head,
    Tail,
}

impl PointerRole {
    pub const ALL: [PointerRole; 2] = [PointerRole::Head, PointerRole::Tail];

    pub fn node_id(self) -> NodeId {
        NodeId::new(self.id_str())
    }

    pub fn id_str(self) -> &'static str {
        match self {
            Self::Head => HEAD_POINTER_ID,
            Self::Tail => TAIL_POINTER_ID,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Tail => "tail",
        }
    }

    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Head => palette.head,
            Self::Tail => palette.tail,
        }
    }

    /// Returns the role for a pointer node id.
    pub fn from_id(id: &NodeId) -> Option<Self> {
        match id.as_str() {
            HEAD_POINTER_ID => Some(Self::Head),
            TAIL_POINTER_ID => Some(Self::Tail),
            _ => None,
        }
    }
}

/// Where a pointer sits relative to its target: above the head, below the tail.
pub fn pointer_position(target: Point, role: PointerRole, layout: &Layout) -> Point {
    match role {
        PointerRole::Head => target.offset(0.0, -layout.pointer_offset),
        PointerRole::Tail => target.offset(0.0, layout.pointer_offset),
    }
}

/// Appends both pointer nodes and their edges for `entries` (in link order).
///
/// Nothing is appended for an empty sequence.
pub fn attach_pointers(
    nodes: &mut Vec<GraphNode>,
    edges: &mut Vec<GraphEdge>,
    entries: &[Entry],
    palette: &Palette,
    layout: &Layout,
) {
    let (Some(head), Some(tail)) = (entries.first(), entries.last()) else {
        return;
    };
    for (role, target) in [(PointerRole::Head, head), (PointerRole::Tail, tail)] {
        let at = pointer_position(target.position, role, layout);
        nodes.push(factory::pointer_node(role, at, palette));
        edges.push(factory::pointer_edge(role, &target.id, palette));
    }
}

/// The list node a pointer edge currently targets, if the graph has one.
pub fn pointer_target<'a>(edges: &'a [GraphEdge], role: PointerRole) -> Option<&'a NodeId> {
    let id = role.node_id();
    edges.iter().find(|e| e.source == id).map(|e| &e.target)
}
