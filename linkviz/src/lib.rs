//! A headless linked-list visualization engine.
//!
//! For adapter-level utilities (frame pacing, tweens, operation queueing), see the
//! `linkviz-adapter` crate.
//!
//! This crate owns the singly linked list being taught and turns every classic operation
//! (insert/delete at either end or at a position, traversal, reversal, search, find-middle,
//! remove-duplicates, length, nth-access) into an [`Animation`]: a finite, replayable sequence
//! of renderable graph frames, each with a display duration, ending on the committed graph.
//!
//! It is UI-agnostic. A GUI/TUI/web layer is expected to:
//! - submit [`Operation`]s and report refused ones ([`OpError`]) to the user
//! - draw each [`Frame`]'s [`Graph`] for its `duration_ms`
//! - optionally derive display tweaks with [`render_view`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod animation;
mod engine;
mod error;
pub mod factory;
pub mod filter;
mod graph;
mod key;
mod list;
mod operation;
mod options;
mod pointer;
mod scene;
mod sequence;
mod view;


pub use animation::{Animation, Caption, Frame, Frames};
pub use engine::Engine;
pub use error::{OpError, SequenceError};
pub use graph::{
    Bounds, Color, EdgeStyle, Graph, GraphEdge, GraphNode, Handle, MarkerEnd, NodeData, NodeId,
    NodeKind, NodeStyle, Point,
};
pub use list::{Entry, Iter, LinkedList};
pub use operation::{Hit, Operation, OperationKind, Outcome};
pub use options::{EngineOptions, Layout, OnCommitCallback, Palette};
pub use pointer::{
    HEAD_POINTER_ID, PointerRole, TAIL_POINTER_ID, attach_pointers, pointer_position,
    pointer_target,
};
pub use scene::{Decoration, Links, Mark, Scene};
pub use sequence::parse_sequence;
pub use view::{ViewOptions, render_view};
