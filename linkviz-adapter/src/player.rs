use linkviz::{Animation, Frame, Graph};

use crate::{Easing, Tween};

/// How a [`Player`] moves between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackOptions {
    /// Time over which moved nodes glide to their new position. `0` snaps.
    pub transition_ms: u64,
    pub easing: Easing,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            transition_ms: 200,
            easing: Easing::SmoothStep,
        }
    }
}

/// Plays an [`Animation`] against a millisecond clock.
///
/// The player holds no timers. Adapters call `tick(now_ms)` from their frame loop; each frame is
/// shown for its `duration_ms`, and a late tick skips every frame whose time has passed, so
/// playback never drifts. The commit frame is terminal.
#[derive(Clone, Debug)]
pub struct Player {
    animation: Animation,
    options: PlaybackOptions,
    index: usize,
    frame_started_ms: u64,
    current: Frame,
    previous: Option<Graph>,
}

impl Player {
    pub fn start(animation: Animation, now_ms: u64, options: PlaybackOptions) -> Self {
        let current = animation
            .frame(0)
            .unwrap_or_else(|| animation.commit_frame());
        atrace!(frames = animation.len(), now_ms, "Player::start");
        Self {
            animation,
            options,
            index: 0,
            frame_started_ms: now_ms,
            current,
            previous: None,
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn into_animation(self) -> Animation {
        self.animation
    }

    pub fn frame(&self) -> &Frame {
        &self.current
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_done(&self) -> bool {
        self.current.is_commit()
    }

    /// Whether the commit frame is showing and its glide has finished.
    pub fn is_settled(&self, now_ms: u64) -> bool {
        self.is_done()
            && now_ms >= self.frame_started_ms.saturating_add(self.options.transition_ms)
    }

    /// Advances past every frame whose duration has elapsed. Returns `true` if the frame changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        while !self.is_done() {
            let ends_at = self
                .frame_started_ms
                .saturating_add(self.current.duration_ms);
            if now_ms < ends_at {
                break;
            }
            self.advance(ends_at);
            changed = true;
        }
        changed
    }

    /// Jumps straight to the commit frame.
    pub fn skip_to_end(&mut self, now_ms: u64) {
        if self.is_done() {
            return;
        }
        self.previous = Some(core::mem::take(&mut self.current.graph));
        self.index = self.animation.len() - 1;
        self.current = self.animation.commit_frame();
        self.frame_started_ms = now_ms;
    }

    /// Replays from the first frame.
    pub fn restart(&mut self, now_ms: u64) {
        *self = Self::start(self.animation.clone(), now_ms, self.options);
    }

    /// The graph to draw at `now_ms`: the current frame, with nodes that moved since the
    /// previous frame still gliding towards their new position.
    pub fn sample(&self, now_ms: u64) -> Graph {
        let mut graph = self.current.graph.clone();
        let Some(previous) = &self.previous else {
            return graph;
        };
        if self.options.transition_ms == 0 {
            return graph;
        }
        for node in graph.nodes.iter_mut() {
            let Some(from) = previous.node(&node.id).map(|n| n.position) else {
                continue;
            };
            if from == node.position {
                continue;
            }
            let tween = Tween::new(
                from,
                node.position,
                self.frame_started_ms,
                self.options.transition_ms,
                self.options.easing,
            );
            node.position = tween.sample(now_ms);
        }
        graph
    }

    fn advance(&mut self, started_ms: u64) {
        let next = self.index + 1;
        let Some(frame) = self.animation.frame(next) else {
            return;
        };
        atrace!(index = next, caption = ?frame.caption, "Player::advance");
        self.previous = Some(core::mem::replace(&mut self.current, frame).graph);
        self.index = next;
        self.frame_started_ms = started_ms;
    }
}
