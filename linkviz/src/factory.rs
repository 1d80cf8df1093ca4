//! Constructors for renderer-ready nodes and edges.
//!
//! Every constructor is deterministic: the same inputs always produce the same record, fully
//! styled, with nothing left for the caller to fill in.

use alloc::format;
use alloc::string::{String, ToString};

use crate::{
    Color, EdgeStyle, GraphEdge, GraphNode, Handle, MarkerEnd, NodeData, NodeId, NodeKind,
    NodeStyle, Palette, Point, PointerRole,
};

const EDGE_WIDTH: f32 = 2.0;
const ARROW_SIZE: f32 = 20.0;

pub fn list_node(
    id: NodeId,
    value: i64,
    position: Point,
    color: Color,
    palette: &Palette,
) -> GraphNode {
    GraphNode {
        id,
        kind: NodeKind::ListNode,
        position,
        data: NodeData {
            label: value.to_string(),
            value: Some(value),
        },
        style: NodeStyle {
            background: color,
            border_color: palette.border,
        },
    }
}

pub fn pointer_node(role: PointerRole, position: Point, palette: &Palette) -> GraphNode {
    GraphNode {
        id: role.node_id(),
        kind: NodeKind::Circle,
        position,
        data: NodeData {
            label: role.label().to_string(),
            value: None,
        },
        style: NodeStyle {
            background: palette.pointer,
            border_color: role.color(palette),
        },
    }
}

/// A free-standing circle with no list semantics.
pub fn marker_node(id: NodeId, position: Point, palette: &Palette) -> GraphNode {
    GraphNode {
        id,
        kind: NodeKind::Circle,
        position,
        data: NodeData {
            label: String::new(),
            value: None,
        },
        style: NodeStyle {
            background: palette.marker,
            border_color: palette.border,
        },
    }
}

/// The `next` link between two consecutive list nodes.
pub fn list_edge(source: &NodeId, target: &NodeId, palette: &Palette) -> GraphEdge {
    edge(
        format!("edge-{source}-{target}"),
        source,
        target,
        (Handle::Right, Handle::Left),
        palette.edge,
    )
}

/// A link rewired to point back at the previous node, shown while reversing.
pub fn reversed_edge(source: &NodeId, target: &NodeId, palette: &Palette) -> GraphEdge {
    edge(
        format!("edge-{source}-{target}"),
        source,
        target,
        (Handle::Left, Handle::Right),
        palette.reversed_edge,
    )
}

pub fn pointer_edge(role: PointerRole, target: &NodeId, palette: &Palette) -> GraphEdge {
    let handles = match role {
        PointerRole::Head => (Handle::Bottom, Handle::Top),
        PointerRole::Tail => (Handle::Top, Handle::Bottom),
    };
    edge(
        format!("edge-{}", role.node_id()),
        &role.node_id(),
        target,
        handles,
        role.color(palette),
    )
}

fn edge(
    id: String,
    source: &NodeId,
    target: &NodeId,
    (source_handle, target_handle): (Handle, Handle),
    color: Color,
) -> GraphEdge {
    GraphEdge {
        id,
        source: source.clone(),
        target: target.clone(),
        source_handle: Some(source_handle),
        target_handle: Some(target_handle),
        style: EdgeStyle {
            stroke: color,
            stroke_width: EDGE_WIDTH,
        },
        marker_end: Some(MarkerEnd {
            color,
            width: ARROW_SIZE,
            height: ARROW_SIZE,
        }),
        animated: false,
    }
}
