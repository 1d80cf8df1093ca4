use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use linkviz::{
    Animation, Bounds, Engine, EngineOptions, Frame, Graph, NodeId, OpError, Operation, OperationKind,
    Outcome, Point, ViewOptions, render_view,
};

use crate::{PlaybackOptions, Player};

/// Something the host should react to after a `tick`.
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerEvent {
    /// An operation began animating. Operations started by `Controller::try_run` report this on
    /// the next `tick`, ahead of their `Completed`.
    Started {
        kind: OperationKind,
    },
    /// The animation reached its commit frame.
    Completed {
        kind: OperationKind,
        outcome: Outcome,
    },
    /// The engine refused a queued operation. Show `error` to the user.
    Rejected {
        kind: OperationKind,
        error: OpError,
    },
    /// Nodes were removed; re-fit the viewport to `bounds` (`None` when the graph is empty).
    FitView {
        bounds: Option<Bounds>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerError {
    /// An animation is playing or operations are queued.
    Busy,
    Operation(OpError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("another operation is still running"),
            Self::Operation(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl core::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Busy => None,
            Self::Operation(e) => Some(e),
        }
    }
}

impl From<OpError> for ControllerError {
    fn from(value: OpError) -> Self {
        Self::Operation(value)
    }
}

/// A framework-neutral controller that wraps a `linkviz::Engine` and serializes operations.
///
/// At most one operation animates at a time. Requests go through either:
/// - `submit`, which queues them and starts each one when the previous animation has finished
/// - `try_run`, a single-slot lock that refuses with [`ControllerError::Busy`] instead of queueing
///
/// This type does not hold any UI objects. Adapters drive it by calling `tick(now_ms)` each
/// frame/timer tick and drawing `graph(now_ms)`.
#[derive(Clone, Debug)]
pub struct Controller {
    engine: Engine,
    queue: VecDeque<Operation>,
    player: Option<Player>,
    /// A finished player whose commit-frame glide is still running.
    settling: Option<Player>,
    /// Events raised outside `tick`, reported by the next one.
    deferred: Vec<ControllerEvent>,
    playback: PlaybackOptions,
    view: ViewOptions,
}

impl Controller {
    pub fn new(options: EngineOptions) -> Self {
        Self::from_engine(Engine::new(options))
    }

    pub fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            queue: VecDeque::new(),
            player: None,
            settling: None,
            deferred: Vec::new(),
            playback: PlaybackOptions::default(),
            view: ViewOptions::default(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    pub fn playback(&self) -> PlaybackOptions {
        self.playback
    }

    /// Applies to animations started after this call.
    pub fn set_playback(&mut self, playback: PlaybackOptions) {
        self.playback = playback;
    }

    pub fn view_options(&self) -> &ViewOptions {
        &self.view
    }

    pub fn set_show_pointers(&mut self, show: bool) {
        self.view.show_pointers = show;
    }

    pub fn set_highlight_ends(&mut self, highlight: bool) {
        self.view.highlight_ends = highlight;
    }

    /// Call this when the pointer enters (`Some`) or leaves (`None`) a node.
    pub fn on_hover(&mut self, node: Option<NodeId>) {
        self.view.hovered = node;
    }

    pub fn is_animating(&self) -> bool {
        self.player.is_some()
    }

    /// Whether an operation is playing or waiting.
    pub fn is_busy(&self) -> bool {
        self.is_animating() || !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.player.as_ref().map(Player::frame)
    }

    /// Queues `op` behind any running or waiting operation. It starts on a later `tick`.
    ///
    /// Returns the number of queued operations.
    pub fn submit(&mut self, op: Operation) -> usize {
        adebug!(?op, pending = self.queue.len(), "Controller::submit");
        self.queue.push_back(op);
        self.queue.len()
    }

    /// Starts `op` immediately if nothing else is running or queued.
    ///
    /// The outcome is known as soon as the operation starts; the matching `Completed` event is
    /// still emitted once its animation ends.
    pub fn try_run(&mut self, op: Operation, now_ms: u64) -> Result<Outcome, ControllerError> {
        if self.is_busy() {
            adebug!(?op, "Controller::try_run: busy");
            return Err(ControllerError::Busy);
        }
        let animation = self.engine.run(op)?;
        let outcome = animation.outcome().clone();
        self.deferred.push(ControllerEvent::Started {
            kind: animation.kind(),
        });
        self.start(animation, now_ms);
        Ok(outcome)
    }

    /// Drops every queued operation. The running animation, if any, keeps playing.
    pub fn cancel_pending(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Fast-forwards the running animation to its commit frame.
    pub fn skip(&mut self, now_ms: u64) {
        if let Some(player) = self.player.as_mut() {
            player.skip_to_end(now_ms);
        }
    }

    /// Advances playback and starts queued operations. Returns what happened since the last tick.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ControllerEvent> {
        let mut events = core::mem::take(&mut self.deferred);
        loop {
            if let Some(player) = self.player.as_mut() {
                player.tick(now_ms);
                if !player.is_done() {
                    break;
                }
                self.finish(&mut events);
            }

            let Some(op) = self.queue.pop_front() else {
                break;
            };
            let kind = op.kind();
            match self.engine.run(op) {
                Ok(animation) => {
                    events.push(ControllerEvent::Started { kind });
                    self.start(animation, now_ms);
                }
                Err(error) => events.push(ControllerEvent::Rejected { kind, error }),
            }
        }
        if self.settling.as_ref().is_some_and(|p| p.is_settled(now_ms)) {
            self.settling = None;
        }
        events
    }

    /// The graph to draw at `now_ms`, with view options applied.
    pub fn graph(&self, now_ms: u64) -> Graph {
        let base = match (&self.player, &self.settling) {
            (Some(player), _) => player.sample(now_ms),
            (None, Some(player)) if !player.is_settled(now_ms) => player.sample(now_ms),
            _ => self.engine.graph(),
        };
        render_view(&base, &self.view, &self.engine.options().palette)
    }

    /// Drags a node. Refused while an animation is playing, since frames are drawn from
    /// positions captured when the operation started.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<(), ControllerError> {
        if self.is_animating() {
            return Err(ControllerError::Busy);
        }
        self.engine.move_node(id, position)?;
        self.settling = None;
        Ok(())
    }

    pub fn add_marker(&mut self, position: Point) -> NodeId {
        self.settling = None;
        self.engine.add_marker(position)
    }

    pub fn remove_marker(&mut self, id: &NodeId) -> bool {
        self.settling = None;
        self.engine.remove_marker(id)
    }

    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        self.engine.set_speed_ms(speed_ms);
    }

    fn start(&mut self, animation: Animation, now_ms: u64) {
        self.settling = None;
        self.player = Some(Player::start(animation, now_ms, self.playback));
    }

    /// Reports the finished animation. Its player stays around to glide the commit frame.
    fn finish(&mut self, events: &mut Vec<ControllerEvent>) {
        let Some(player) = self.player.take() else {
            return;
        };
        let animation = player.animation();
        let kind = animation.kind();
        let fit_view = animation.fit_view();
        adebug!(?kind, "Controller: animation finished");
        events.push(ControllerEvent::Completed {
            kind,
            outcome: animation.outcome().clone(),
        });
        self.settling = Some(player);
        if fit_view {
            events.push(ControllerEvent::FitView {
                bounds: self.engine.graph().bounds(),
            });
        }
    }
}
