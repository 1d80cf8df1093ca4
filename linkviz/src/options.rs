use alloc::sync::Arc;

use crate::{Color, Graph, Point};

/// A callback fired after every committed change to the list or its decorations.
///
/// It receives the committed graph projection.
pub type OnCommitCallback = Arc<dyn Fn(&Graph) + Send + Sync>;

/// Colors used by the projection and by animation frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    /// Resting background of list nodes.
    pub node: Color,
    pub border: Color,
    /// Node currently visited by a traversal.
    pub iterate: Color,
    /// Freshly inserted node.
    pub new_node: Color,
    /// Search hit, nth result, middle node.
    pub found: Color,
    /// Node about to be removed, and duplicates.
    pub removed: Color,
    pub slow: Color,
    pub fast: Color,
    pub pointer: Color,
    pub head: Color,
    pub tail: Color,
    pub edge: Color,
    /// Edges being rewired during a reversal.
    pub reversed_edge: Color,
    pub hover_edge: Color,
    pub marker: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            node: Color::rgb(0xf8fafc),
            border: Color::rgb(0x334155),
            iterate: Color::rgb(0xfacc15),
            new_node: Color::rgb(0x22c55e),
            found: Color::rgb(0x3b82f6),
            removed: Color::rgb(0xef4444),
            slow: Color::rgb(0xa855f7),
            fast: Color::rgb(0xf97316),
            pointer: Color::rgb(0xe0f2fe),
            head: Color::rgb(0x0ea5e9),
            tail: Color::rgb(0xf43f5e),
            edge: Color::rgb(0x64748b),
            reversed_edge: Color::rgb(0xd946ef),
            hover_edge: Color::rgb(0xf59e0b),
            marker: Color::rgb(0xcbd5e1),
        }
    }
}

/// Geometry of the left-to-right list layout.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Position of the node at index 0.
    pub origin: Point,
    /// Horizontal distance between consecutive list nodes.
    pub spacing: f32,
    /// Vertical distance between a pointer node and its target.
    pub pointer_offset: f32,
}

impl Layout {
    pub fn position_of(&self, index: usize) -> Point {
        self.origin.offset(self.spacing * index as f32, 0.0)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin: Point::new(100.0, 200.0),
            spacing: 150.0,
            pointer_offset: 100.0,
        }
    }
}

/// Configuration for [`crate::Engine`].
///
/// Cheap to clone: the commit callback is stored in an `Arc`.
pub struct EngineOptions {
    /// Duration of each animation step.
    pub speed_ms: u64,
    pub palette: Palette,
    pub layout: Layout,
    /// Ask the host to re-fit its viewport after operations that remove nodes, including a
    /// `Create` that replaces a non-empty list.
    pub fit_view_on_remove: bool,
    pub on_commit: Option<OnCommitCallback>,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self {
            speed_ms: 500,
            palette: Palette::default(),
            layout: Layout::default(),
            fit_view_on_remove: true,
            on_commit: None,
        }
    }

    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_fit_view_on_remove(mut self, fit_view_on_remove: bool) -> Self {
        self.fit_view_on_remove = fit_view_on_remove;
        self
    }

    pub fn with_on_commit(mut self, on_commit: impl Fn(&Graph) + Send + Sync + 'static) -> Self {
        self.on_commit = Some(Arc::new(on_commit));
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineOptions {
    fn clone(&self) -> Self {
        Self {
            speed_ms: self.speed_ms,
            palette: self.palette,
            layout: self.layout,
            fit_view_on_remove: self.fit_view_on_remove,
            on_commit: self.on_commit.clone(),
        }
    }
}

impl core::fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("speed_ms", &self.speed_ms)
            .field("palette", &self.palette)
            .field("layout", &self.layout)
            .field("fit_view_on_remove", &self.fit_view_on_remove)
            .field("on_commit", &self.on_commit.as_ref().map(|_| ".."))
            .finish()
    }
}
