//! Side-effect-free queries over a node collection.

use crate::{GraphNode, NodeId, NodeKind, PointerRole};

/// List-tagged nodes in slice order.
pub fn list_nodes(nodes: &[GraphNode]) -> impl DoubleEndedIterator<Item = &GraphNode> + '_ {
    nodes.iter().filter(|n| n.kind == NodeKind::ListNode)
}

pub fn head_node(nodes: &[GraphNode]) -> Option<&GraphNode> {
    list_nodes(nodes).next()
}

pub fn tail_node(nodes: &[GraphNode]) -> Option<&GraphNode> {
    list_nodes(nodes).next_back()
}

/// Every circle node: the head/tail pointers plus any decoration markers.
pub fn pointer_nodes(nodes: &[GraphNode]) -> impl Iterator<Item = &GraphNode> + '_ {
    nodes.iter().filter(|n| n.kind == NodeKind::Circle)
}

pub fn pointer_node(nodes: &[GraphNode], role: PointerRole) -> Option<&GraphNode> {
    pointer_nodes(nodes).find(|n| n.id.as_str() == role.id_str())
}

pub fn node_by_id<'a>(nodes: &'a [GraphNode], id: &NodeId) -> Option<&'a GraphNode> {
    nodes.iter().find(|n| &n.id == id)
}
