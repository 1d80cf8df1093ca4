use alloc::vec::Vec;

use crate::{Graph, Layout, Links, Mark, OperationKind, Outcome, Palette, Scene};

/// What a frame depicts, for captions and assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "step", rename_all = "snake_case"))]
pub enum Caption {
    Visit { index: usize },
    Compare { index: usize, matched: bool },
    Count { index: usize, count: usize },
    Race { slow: usize, fast: usize },
    Detach { index: usize },
    Attach { index: usize },
    Insert { index: usize },
    Remove { index: usize },
    Duplicate { index: usize },
    Result { index: usize },
    Commit,
}

/// Which scene a step is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Base {
    Before,
    After,
}

#[derive(Clone, Debug)]
pub(crate) struct Step {
    base: Base,
    marks: Vec<(usize, Mark)>,
    links: Links,
    duration_ms: u64,
    caption: Caption,
}

/// Collects the steps of one operation. Every step lasts `speed_ms`.
#[derive(Debug)]
pub(crate) struct Script {
    speed_ms: u64,
    steps: Vec<Step>,
}

impl Script {
    pub(crate) fn new(speed_ms: u64) -> Self {
        Self {
            speed_ms,
            steps: Vec::new(),
        }
    }

    pub(crate) fn step(&mut self, base: Base, marks: Vec<(usize, Mark)>, caption: Caption) {
        self.step_with_links(base, marks, Links::Forward, caption);
    }

    pub(crate) fn step_with_links(
        &mut self,
        base: Base,
        marks: Vec<(usize, Mark)>,
        links: Links,
        caption: Caption,
    ) {
        ltrace!(?caption, "Script::step");
        self.steps.push(Step {
            base,
            marks,
            links,
            duration_ms: self.speed_ms,
            caption,
        });
    }

    /// Highlights `index` in the pre-operation scene.
    pub(crate) fn visit(&mut self, index: usize) {
        self.step(
            Base::Before,
            alloc::vec![(index, Mark::Visit)],
            Caption::Visit { index },
        );
    }

    /// Highlights every index in `range`, one step each.
    pub(crate) fn traverse(&mut self, range: core::ops::Range<usize>) {
        for index in range {
            self.visit(index);
        }
    }
}

/// One renderable state of an animation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub index: usize,
    pub graph: Graph,
    /// How long the host should show this frame before moving on.
    pub duration_ms: u64,
    pub caption: Caption,
    /// Set on the commit frame of removals: the host should re-fit its viewport.
    pub fit_view: bool,
}

impl Frame {
    pub fn is_commit(&self) -> bool {
        self.caption == Caption::Commit
    }
}

/// The step-by-step depiction of one operation, followed by a commit frame.
///
/// Frames are rendered on demand from two scenes (before/after the structural change) and a
/// compact list of steps, so an animation is cheap to hold and can be replayed any number of
/// times. The last frame always equals the engine's committed graph.
#[derive(Clone, Debug)]
pub struct Animation {
    kind: OperationKind,
    outcome: Outcome,
    before: Scene,
    after: Scene,
    steps: Vec<Step>,
    fit_view: bool,
    palette: Palette,
    layout: Layout,
}

impl Animation {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: OperationKind,
        outcome: Outcome,
        before: Scene,
        after: Scene,
        script: Script,
        fit_view: bool,
        palette: Palette,
        layout: Layout,
    ) -> Self {
        Self {
            kind,
            outcome,
            before,
            after,
            steps: script.steps,
            fit_view,
            palette,
            layout,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Number of frames, including the commit frame.
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    /// Always `false`: there is at least the commit frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of highlight steps before the commit.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }

    pub fn fit_view(&self) -> bool {
        self.fit_view
    }

    pub fn captions(&self) -> impl Iterator<Item = Caption> + '_ {
        self.steps
            .iter()
            .map(|s| s.caption)
            .chain(core::iter::once(Caption::Commit))
    }

    pub fn frame(&self, index: usize) -> Option<Frame> {
        if index == self.steps.len() {
            return Some(self.commit_frame());
        }
        let step = self.steps.get(index)?;
        let scene = match step.base {
            Base::Before => &self.before,
            Base::After => &self.after,
        };
        Some(Frame {
            index,
            graph: scene.render(&step.marks, step.links, &self.palette, &self.layout),
            duration_ms: step.duration_ms,
            caption: step.caption,
            fit_view: false,
        })
    }

    pub fn commit_frame(&self) -> Frame {
        Frame {
            index: self.steps.len(),
            graph: self.committed_graph(),
            duration_ms: 0,
            caption: Caption::Commit,
            fit_view: self.fit_view,
        }
    }

    pub fn committed_graph(&self) -> Graph {
        self.after.project(&self.palette, &self.layout)
    }

    /// The graph before the operation started.
    pub fn initial_graph(&self) -> Graph {
        self.before.project(&self.palette, &self.layout)
    }

    /// Lazily renders every frame in order. Call again to replay.
    pub fn frames(&self) -> Frames<'_> {
        Frames {
            animation: self,
            next: 0,
        }
    }
}

/// Iterator over the frames of an [`Animation`].
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    animation: &'a Animation,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.animation.frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.animation.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
