use alloc::vec::Vec;

use crate::filter;
use crate::{Graph, NodeId, Palette, PointerRole};

/// Display flags applied on top of a frame or committed graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewOptions {
    pub show_pointers: bool,
    /// Outline the head node in the head color and the tail node in the tail color.
    pub highlight_ends: bool,
    pub hovered: Option<NodeId>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_pointers: true,
            highlight_ends: true,
            hovered: None,
        }
    }
}

/// Derives the graph a host should draw. `graph` itself is left untouched.
pub fn render_view(graph: &Graph, options: &ViewOptions, palette: &Palette) -> Graph {
    let is_pointer = |id: &NodeId| PointerRole::from_id(id).is_some();

    let mut nodes: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| options.show_pointers || !is_pointer(&n.id))
        .cloned()
        .collect();
    let mut edges: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| options.show_pointers || !is_pointer(&e.source))
        .cloned()
        .collect();

    if options.highlight_ends {
        let head = filter::head_node(&nodes).map(|n| n.id.clone());
        let tail = filter::tail_node(&nodes).map(|n| n.id.clone());
        for node in nodes.iter_mut() {
            if Some(&node.id) == tail.as_ref() {
                node.style.border_color = palette.tail;
            }
            // A single node is both; head wins.
            if Some(&node.id) == head.as_ref() {
                node.style.border_color = palette.head;
            }
        }
    }

    if let Some(hovered) = &options.hovered {
        for edge in edges.iter_mut().filter(|e| &e.source == hovered) {
            edge.style.stroke = palette.hover_edge;
            if let Some(marker) = edge.marker_end.as_mut() {
                marker.color = palette.hover_edge;
            }
            edge.animated = true;
        }
    }

    Graph { nodes, edges }
}
