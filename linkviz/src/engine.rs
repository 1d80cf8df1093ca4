use alloc::format;
use alloc::vec::Vec;

use crate::animation::{Base, Script};
use crate::key::SeenSet;
use crate::{
    Animation, Caption, Decoration, EngineOptions, Entry, Graph, Hit, LinkedList, Links, Mark,
    NodeId, OpError, Operation, Outcome, Point, PointerRole, Scene,
};

/// A headless linked-list visualizer.
///
/// The engine owns the list (an arena-backed singly linked list) and any decoration markers.
/// The renderable graph is always derived from them; there is no second copy of the list to
/// drift out of sync.
///
/// Operations run through [`Engine::run`]: the engine validates the request, applies the change
/// immediately, and returns an [`Animation`] that depicts the algorithm step by step and ends on
/// the committed graph. A refused operation returns an [`OpError`] and changes nothing.
///
/// Mutation requires `&mut self`, so two operations can never interleave on one engine. Hosts
/// that accept requests while an animation is still playing should serialize them (see the
/// `linkviz-adapter` crate's controller).
#[derive(Clone, Debug)]
pub struct Engine {
    options: EngineOptions,
    list: LinkedList,
    decorations: Vec<Decoration>,
    next_node: u64,
    next_marker: u64,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        ldebug!(speed_ms = options.speed_ms, "Engine::new");
        Self {
            options,
            list: LinkedList::new(),
            decorations: Vec::new(),
            next_node: 0,
            next_marker: 0,
        }
    }

    /// Creates an engine whose list already holds `values`, without animating.
    pub fn with_values(options: EngineOptions, values: &[i64]) -> Self {
        let mut engine = Self::new(options);
        engine.fill(values);
        engine.relayout();
        engine
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
        self.relayout();
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut EngineOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_speed_ms(&mut self, speed_ms: u64) {
        self.options.speed_ms = speed_ms;
    }

    pub fn list(&self) -> &LinkedList {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn values(&self) -> Vec<i64> {
        self.list.values()
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// The committed graph: list nodes in link order, pointers, then decorations.
    pub fn graph(&self) -> Graph {
        self.scene()
            .project(&self.options.palette, &self.options.layout)
    }

    /// Runs one operation to completion and returns its animation.
    pub fn run(&mut self, op: Operation) -> Result<Animation, OpError> {
        let kind = op.kind();
        ldebug!(?op, len = self.list.len(), "Engine::run");
        let before = self.scene();
        let mut script = Script::new(self.options.speed_ms);

        let outcome = match op {
            Operation::InsertHead { value } => self.insert_head(&mut script, value),
            Operation::InsertTail { value } => self.insert_tail(&mut script, value),
            Operation::InsertTailConstant { value } => {
                self.insert_tail_constant(&mut script, value)
            }
            Operation::DeleteHead => self.delete_head(&mut script),
            Operation::DeleteTail => self.delete_tail(&mut script),
            Operation::InsertAt { position, value } => {
                self.insert_at(&mut script, position, value)?
            }
            Operation::DeleteAt { position } => self.delete_at(&mut script, position)?,
            Operation::Reverse => self.reverse(&mut script),
            Operation::FindMiddle => self.race_to_middle(&mut script),
            Operation::Search { value } => self.search(&mut script, value),
            Operation::Length => self.length(&mut script),
            Operation::Nth { position } => self.nth(&mut script, position)?,
            Operation::RemoveDuplicates => self.drop_duplicates(&mut script),
            Operation::Create { values } => self.create(&values),
            Operation::Clear => self.clear(),
        };

        let changed = kind.is_structural() && outcome != Outcome::Unchanged;
        if changed {
            self.relayout();
            self.notify();
        }
        ldebug!(?outcome, len = self.list.len(), "Engine::run committed");

        let fit_view = self.options.fit_view_on_remove && outcome.removed_nodes();
        Ok(Animation::new(
            kind,
            outcome,
            before,
            self.scene(),
            script,
            fit_view,
            self.options.palette,
            self.options.layout,
        ))
    }

    pub fn insert_at_head(&mut self, value: i64) -> Animation {
        self.run_infallible(Operation::InsertHead { value })
    }

    pub fn insert_at_tail(&mut self, value: i64) -> Animation {
        self.run_infallible(Operation::InsertTail { value })
    }

    pub fn insert_at_tail_constant(&mut self, value: i64) -> Animation {
        self.run_infallible(Operation::InsertTailConstant { value })
    }

    pub fn delete_at_head(&mut self) -> Animation {
        self.run_infallible(Operation::DeleteHead)
    }

    pub fn delete_at_tail(&mut self) -> Animation {
        self.run_infallible(Operation::DeleteTail)
    }

    pub fn insert_at_position(
        &mut self,
        position: usize,
        value: i64,
    ) -> Result<Animation, OpError> {
        self.run(Operation::InsertAt { position, value })
    }

    pub fn delete_at_position(&mut self, position: usize) -> Result<Animation, OpError> {
        self.run(Operation::DeleteAt { position })
    }

    pub fn reverse_list(&mut self) -> Animation {
        self.run_infallible(Operation::Reverse)
    }

    pub fn find_middle(&mut self) -> (Option<Hit>, Animation) {
        let animation = self.run_infallible(Operation::FindMiddle);
        let hit = match animation.outcome() {
            Outcome::Middle { hit } => *hit,
            _ => None,
        };
        (hit, animation)
    }

    pub fn search_value(&mut self, value: i64) -> (Option<usize>, Animation) {
        let animation = self.run_infallible(Operation::Search { value });
        let position = match animation.outcome() {
            Outcome::Search { position } => *position,
            _ => None,
        };
        (position, animation)
    }

    pub fn get_length(&mut self) -> (usize, Animation) {
        let animation = self.run_infallible(Operation::Length);
        let len = match animation.outcome() {
            Outcome::Length { len } => *len,
            _ => self.list.len(),
        };
        (len, animation)
    }

    pub fn access_nth(&mut self, position: usize) -> Result<(i64, Animation), OpError> {
        let animation = self.run(Operation::Nth { position })?;
        let value = match animation.outcome() {
            Outcome::Nth { value } => *value,
            other => unreachable!("Nth produced {other:?}"),
        };
        Ok((value, animation))
    }

    pub fn remove_duplicates(&mut self) -> Animation {
        self.run_infallible(Operation::RemoveDuplicates)
    }

    /// Replaces the list with a parsed custom sequence (see [`crate::parse_sequence`]).
    pub fn create_from_input(&mut self, input: &str) -> Result<Animation, OpError> {
        let values = crate::parse_sequence(input).map_err(|e| {
            lwarn!(error = %e, "Engine::create_from_input: rejected sequence");
            OpError::from(e)
        })?;
        self.run(Operation::Create { values })
    }

    /// Drags a list node or decoration to `position`.
    ///
    /// The pointer overlay follows a moved list node. Positions are reset to the layout grid by
    /// the next structural operation.
    pub fn move_node(&mut self, id: &NodeId, position: Point) -> Result<(), OpError> {
        if PointerRole::from_id(id).is_some() {
            return Err(OpError::PointerNotMovable(id.clone()));
        }
        if let Some(entry) = self.list.find_mut(id) {
            entry.position = position;
        } else if let Some(d) = self.decorations.iter_mut().find(|d| &d.id == id) {
            d.position = position;
        } else {
            lwarn!(%id, "Engine::move_node: unknown node");
            return Err(OpError::UnknownNode(id.clone()));
        }
        self.notify();
        Ok(())
    }

    /// Adds an inert circle node and returns its id.
    pub fn add_marker(&mut self, position: Point) -> NodeId {
        let id = NodeId::new(format!("marker-{}", self.next_marker));
        self.next_marker += 1;
        self.decorations.push(Decoration {
            id: id.clone(),
            position,
        });
        self.notify();
        id
    }

    pub fn remove_marker(&mut self, id: &NodeId) -> bool {
        let before = self.decorations.len();
        self.decorations.retain(|d| &d.id != id);
        let removed = self.decorations.len() != before;
        if removed {
            self.notify();
        }
        removed
    }

    fn run_infallible(&mut self, op: Operation) -> Animation {
        match self.run(op) {
            Ok(animation) => animation,
            Err(e) => unreachable!("operation without preconditions was refused: {e}"),
        }
    }

    fn insert_head(&mut self, script: &mut Script, value: i64) -> Outcome {
        if !self.list.is_empty() {
            script.visit(0);
        }
        let id = self.next_id();
        let entry = self.entry(id.clone(), value);
        self.list.push_front(entry);
        script.step(
            Base::After,
            alloc::vec![(0, Mark::New)],
            Caption::Insert { index: 0 },
        );
        Outcome::Inserted { id, index: 0 }
    }

    fn insert_tail(&mut self, script: &mut Script, value: i64) -> Outcome {
        let len = self.list.len();
        script.traverse(0..len);
        self.append(script, value)
    }

    fn insert_tail_constant(&mut self, script: &mut Script, value: i64) -> Outcome {
        let len = self.list.len();
        if len > 0 {
            script.visit(len - 1);
        }
        self.append(script, value)
    }

    fn append(&mut self, script: &mut Script, value: i64) -> Outcome {
        let index = self.list.len();
        let id = self.next_id();
        let entry = self.entry(id.clone(), value);
        self.list.push_back(entry);
        script.step(
            Base::After,
            alloc::vec![(index, Mark::New)],
            Caption::Insert { index },
        );
        Outcome::Inserted { id, index }
    }

    fn delete_head(&mut self, script: &mut Script) -> Outcome {
        if self.list.is_empty() {
            return Outcome::Unchanged;
        }
        script.step(
            Base::Before,
            alloc::vec![(0, Mark::Removed)],
            Caption::Remove { index: 0 },
        );
        match self.list.pop_front() {
            Some(entry) => Outcome::Removed {
                value: entry.value,
                index: 0,
            },
            None => Outcome::Unchanged,
        }
    }

    fn delete_tail(&mut self, script: &mut Script) -> Outcome {
        let len = self.list.len();
        if len == 0 {
            return Outcome::Unchanged;
        }
        let last = len - 1;
        script.traverse(0..last);
        script.step(
            Base::Before,
            alloc::vec![(last, Mark::Removed)],
            Caption::Remove { index: last },
        );
        match self.list.pop_back() {
            Some(entry) => Outcome::Removed {
                value: entry.value,
                index: last,
            },
            None => Outcome::Unchanged,
        }
    }

    fn insert_at(
        &mut self,
        script: &mut Script,
        position: usize,
        value: i64,
    ) -> Result<Outcome, OpError> {
        let len = self.list.len();
        if position > len {
            lwarn!(position, len, "Engine::insert_at: position out of range");
            return Err(OpError::PositionOutOfRange {
                position,
                len,
                allow_end: true,
            });
        }
        if position == 0 {
            return Ok(self.insert_head(script, value));
        }
        if position == len {
            return Ok(self.insert_tail(script, value));
        }

        script.traverse(0..position);
        let id = self.next_id();
        let entry = self.entry(id.clone(), value);
        self.list.insert(position, entry);
        script.step(
            Base::After,
            alloc::vec![(position - 1, Mark::Visit), (position, Mark::New)],
            Caption::Insert { index: position },
        );
        Ok(Outcome::Inserted {
            id,
            index: position,
        })
    }

    fn delete_at(&mut self, script: &mut Script, position: usize) -> Result<Outcome, OpError> {
        let len = self.list.len();
        if position >= len {
            lwarn!(position, len, "Engine::delete_at: position out of range");
            return Err(OpError::PositionOutOfRange {
                position,
                len,
                allow_end: false,
            });
        }
        if position == 0 {
            return Ok(self.delete_head(script));
        }
        if position == len - 1 {
            return Ok(self.delete_tail(script));
        }

        script.traverse(0..position);
        script.step(
            Base::Before,
            alloc::vec![(position - 1, Mark::Visit), (position, Mark::Removed)],
            Caption::Remove { index: position },
        );
        Ok(match self.list.remove(position) {
            Some(entry) => Outcome::Removed {
                value: entry.value,
                index: position,
            },
            None => Outcome::Unchanged,
        })
    }

    /// Phase one rewires edges node by node on the old layout; phase two is the commit, where the
    /// reversed list is laid out left to right again.
    fn reverse(&mut self, script: &mut Script) -> Outcome {
        for index in 0..self.list.len() {
            let marks = alloc::vec![(index, Mark::Visit)];
            script.step_with_links(
                Base::Before,
                marks.clone(),
                Links::Reversing {
                    pivot: index,
                    attached: false,
                },
                Caption::Detach { index },
            );
            if index > 0 {
                script.step_with_links(
                    Base::Before,
                    marks,
                    Links::Reversing {
                        pivot: index,
                        attached: true,
                    },
                    Caption::Attach { index },
                );
            }
        }
        self.list.reverse();
        Outcome::Reversed
    }

    /// Slow/fast race. Fast moves two nodes per tick and only when both exist, so even lengths
    /// settle on the lower middle: index `(len - 1) / 2`.
    fn race_to_middle(&mut self, script: &mut Script) -> Outcome {
        let len = self.list.len();
        if len == 0 {
            return Outcome::Middle { hit: None };
        }
        let (mut slow, mut fast) = (0usize, 0usize);
        script.step(
            Base::Before,
            alloc::vec![(fast, Mark::Fast), (slow, Mark::Slow)],
            Caption::Race { slow, fast },
        );
        while fast + 2 < len {
            fast += 2;
            slow += 1;
            script.step(
                Base::Before,
                alloc::vec![(fast, Mark::Fast), (slow, Mark::Slow)],
                Caption::Race { slow, fast },
            );
        }
        script.step(
            Base::Before,
            alloc::vec![(slow, Mark::Found)],
            Caption::Result { index: slow },
        );
        let hit = self.list.get(slow).map(|e| Hit {
            index: slow,
            value: e.value,
        });
        Outcome::Middle { hit }
    }

    fn search(&mut self, script: &mut Script, value: i64) -> Outcome {
        let mut position = None;
        for (index, entry) in self.list.iter().enumerate() {
            let matched = entry.value == value;
            let mark = if matched { Mark::Found } else { Mark::Visit };
            script.step(
                Base::Before,
                alloc::vec![(index, mark)],
                Caption::Compare { index, matched },
            );
            if matched {
                position = Some(index);
                break;
            }
        }
        Outcome::Search { position }
    }

    fn length(&mut self, script: &mut Script) -> Outcome {
        let mut len = 0;
        for index in 0..self.list.len() {
            len += 1;
            script.step(
                Base::Before,
                alloc::vec![(index, Mark::Visit)],
                Caption::Count { index, count: len },
            );
        }
        Outcome::Length { len }
    }

    fn nth(&mut self, script: &mut Script, position: usize) -> Result<Outcome, OpError> {
        let len = self.list.len();
        let Some(value) = self.list.get(position).map(|e| e.value) else {
            lwarn!(position, len, "Engine::nth: position out of range");
            return Err(OpError::PositionOutOfRange {
                position,
                len,
                allow_end: false,
            });
        };
        script.traverse(0..position);
        script.step(
            Base::Before,
            alloc::vec![(position, Mark::Found)],
            Caption::Result { index: position },
        );
        Ok(Outcome::Nth { value })
    }

    /// Keeps the first occurrence of every value. Duplicates stay marked as the pass goes on and
    /// are all unlinked in one rebuild at the end.
    fn drop_duplicates(&mut self, script: &mut Script) -> Outcome {
        let mut seen = SeenSet::new();
        let mut marks: Vec<(usize, Mark)> = Vec::new();
        for (index, entry) in self.list.iter().enumerate() {
            if seen.insert(entry.value) {
                let mut step_marks = marks.clone();
                step_marks.push((index, Mark::Visit));
                script.step(Base::Before, step_marks, Caption::Visit { index });
            } else {
                marks.push((index, Mark::Duplicate));
                script.step(Base::Before, marks.clone(), Caption::Duplicate { index });
            }
        }

        let mut kept = SeenSet::new();
        let removed: Vec<i64> = self
            .list
            .retain(|e| kept.insert(e.value))
            .into_iter()
            .map(|e| e.value)
            .collect();
        ldebug!(?removed, "Engine::drop_duplicates");
        Outcome::Deduplicated { removed }
    }

    fn create(&mut self, values: &[i64]) -> Outcome {
        let replaced = self.list.len();
        self.list.clear();
        self.fill(values);
        Outcome::Created {
            len: values.len(),
            replaced,
        }
    }

    fn clear(&mut self) -> Outcome {
        if self.list.is_empty() {
            return Outcome::Unchanged;
        }
        self.list.clear();
        Outcome::Cleared
    }

    fn fill(&mut self, values: &[i64]) {
        for &value in values {
            let id = self.next_id();
            let entry = self.entry(id, value);
            self.list.push_back(entry);
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("node-{}", self.next_node));
        self.next_node += 1;
        id
    }

    fn entry(&self, id: NodeId, value: i64) -> Entry {
        Entry {
            id,
            value,
            position: self.options.layout.origin,
        }
    }

    fn relayout(&mut self) {
        let layout = self.options.layout;
        self.list.relayout(|i| layout.position_of(i));
    }

    fn scene(&self) -> Scene {
        Scene {
            entries: self.list.to_vec(),
            decorations: self.decorations.clone(),
        }
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_commit {
            cb(&self.graph());
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
