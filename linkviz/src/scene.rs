use alloc::vec::Vec;

use crate::factory;
use crate::pointer::attach_pointers;
use crate::{Color, Entry, Graph, Layout, NodeId, Palette, Point};

/// A free-standing circle node added by the user. It has no list semantics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoration {
    pub id: NodeId,
    pub position: Point,
}

/// Highlight applied to one list node in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mark {
    Visit,
    New,
    Found,
    Removed,
    Duplicate,
    Slow,
    Fast,
}

impl Mark {
    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Visit => palette.iterate,
            Self::New => palette.new_node,
            Self::Found => palette.found,
            Self::Removed | Self::Duplicate => palette.removed,
            Self::Slow => palette.slow,
            Self::Fast => palette.fast,
        }
    }
}

/// How the `next` edges are drawn in a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Links {
    /// Every node points at its successor.
    #[default]
    Forward,
    /// In-place reversal in progress. Nodes before `pivot` already point backwards, nodes after
    /// it still point forwards. The pivot itself has lost its forward edge and, once
    /// `attached`, points at its predecessor.
    Reversing { pivot: usize, attached: bool },
}

/// Everything needed to project the list into a graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub entries: Vec<Entry>,
    pub decorations: Vec<Decoration>,
}

impl Scene {
    /// The resting projection: no highlights, forward links, pointers attached.
    pub fn project(&self, palette: &Palette, layout: &Layout) -> Graph {
        self.render(&[], Links::Forward, palette, layout)
    }

    /// Projects the scene with per-index highlights. Later marks on the same index win.
    pub fn render(
        &self,
        marks: &[(usize, Mark)],
        links: Links,
        palette: &Palette,
        layout: &Layout,
    ) -> Graph {
        let entries = &self.entries;
        let mut nodes = Vec::with_capacity(entries.len() + 2 + self.decorations.len());
        let mut edges = Vec::with_capacity(entries.len() + 1);

        for (i, entry) in entries.iter().enumerate() {
            let color = marks
                .iter()
                .rev()
                .find(|(at, _)| *at == i)
                .map_or(palette.node, |(_, mark)| mark.color(palette));
            nodes.push(factory::list_node(
                entry.id.clone(),
                entry.value,
                entry.position,
                color,
                palette,
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            let points_back = match links {
                Links::Forward => false,
                Links::Reversing { pivot, attached } => i < pivot || (i == pivot && attached),
            };
            if points_back {
                if i > 0 {
                    edges.push(factory::reversed_edge(&entry.id, &entries[i - 1].id, palette));
                }
                continue;
            }
            if matches!(links, Links::Reversing { pivot, .. } if pivot == i) {
                continue;
            }
            if let Some(next) = entries.get(i + 1) {
                edges.push(factory::list_edge(&entry.id, &next.id, palette));
            }
        }

        attach_pointers(&mut nodes, &mut edges, entries, palette, layout);

        for d in &self.decorations {
            nodes.push(factory::marker_node(d.id.clone(), d.position, palette));
        }

        Graph { nodes, edges }
    }
}
