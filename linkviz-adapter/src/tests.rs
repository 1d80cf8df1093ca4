use crate::*;

use alloc::vec;
use alloc::vec::Vec;
use linkviz::{
    Caption, Engine, EngineOptions, NodeId, OpError, Operation, OperationKind, Outcome, Point,
    PointerRole, filter,
};

fn controller(values: &[i64]) -> Controller {
    let engine = Engine::with_values(EngineOptions::new().with_speed_ms(100), values);
    let mut c = Controller::from_engine(engine);
    c.set_playback(PlaybackOptions {
        transition_ms: 0,
        easing: Easing::Linear,
    });
    c
}

fn kinds(events: &[ControllerEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            ControllerEvent::Started { .. } => "started",
            ControllerEvent::Completed { .. } => "completed",
            ControllerEvent::Rejected { .. } => "rejected",
            ControllerEvent::FitView { .. } => "fit_view",
        })
        .collect()
}

#[test]
fn tween_interpolates_between_points() {
    let t = Tween::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 10, 100, Easing::Linear);
    assert_eq!(t.sample(0), Point::new(0.0, 0.0));
    assert_eq!(t.sample(60), Point::new(50.0, 25.0));
    assert_eq!(t.sample(500), Point::new(100.0, 50.0));
    assert!(!t.is_done(100));
    assert!(t.is_done(110));

    let mut r = t;
    r.retarget(60, Point::new(0.0, 0.0), 10);
    assert_eq!(r.from, Point::new(50.0, 25.0));
    assert_eq!(r.sample(70), Point::new(0.0, 0.0));
}

#[test]
fn easings_start_at_zero_and_end_at_one() {
    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuad,
    ] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}

#[test]
fn player_advances_one_frame_per_duration() {
    let mut engine = Engine::with_values(EngineOptions::new().with_speed_ms(100), &[1, 2, 3]);
    let (_, animation) = engine.get_length();
    let mut p = Player::start(animation, 1_000, PlaybackOptions::default());

    assert_eq!(p.frame().caption, Caption::Count { index: 0, count: 1 });
    assert!(!p.tick(1_099));
    assert!(p.tick(1_100));
    assert_eq!(p.index(), 1);
    assert!(p.tick(1_250));
    assert_eq!(p.index(), 2);
    assert!(!p.is_done());
    assert!(p.tick(1_300));
    assert!(p.is_done());
    assert_eq!(p.frame().graph, engine.graph());
    assert!(!p.tick(9_999));
}

#[test]
fn late_tick_catches_up_without_drift() {
    let mut engine = Engine::with_values(EngineOptions::new().with_speed_ms(100), &[1, 2, 3, 4]);
    let (_, animation) = engine.get_length();
    let mut p = Player::start(animation, 0, PlaybackOptions::default());

    assert!(p.tick(250));
    assert_eq!(p.index(), 2);
    // Frame 2 started at 200, not 250.
    assert!(p.tick(300));
    assert_eq!(p.index(), 3);

    p.restart(1_000);
    assert_eq!(p.index(), 0);
    p.skip_to_end(1_000);
    assert!(p.is_done());
}

#[test]
fn player_glides_moved_nodes() {
    let mut engine = Engine::with_values(EngineOptions::new().with_speed_ms(100), &[1, 2]);
    let animation = engine.insert_at_head(0);
    let options = PlaybackOptions {
        transition_ms: 100,
        easing: Easing::Linear,
    };
    let mut p = Player::start(animation, 0, options);
    // visit head, new node, commit
    assert!(p.tick(200));
    assert!(p.is_done());

    let layout = engine.options().layout;
    let one = p
        .frame()
        .graph
        .nodes
        .iter()
        .find(|n| n.value() == Some(1))
        .map(|n| n.id.clone())
        .unwrap();

    // The commit frame started at t=200; the new-node frame already used the final layout.
    let mid = p.sample(250);
    assert_eq!(mid.node(&one).map(|n| n.position), Some(layout.position_of(1)));

    let mut engine = Engine::with_values(EngineOptions::new().with_speed_ms(100), &[1, 2]);
    let animation = engine.insert_at_head(0);
    let mut p = Player::start(animation, 0, options);
    assert!(p.tick(100));
    let from = layout.position_of(0);
    let to = layout.position_of(1);
    let halfway = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    assert_eq!(p.sample(150).node(&one).map(|n| n.position), Some(halfway));
    assert_eq!(p.sample(200).node(&one).map(|n| n.position), Some(to));
}

#[test]
fn submitted_operations_run_one_after_another() {
    let mut c = controller(&[1, 2, 3]);
    c.submit(Operation::InsertTail { value: 4 });
    c.submit(Operation::DeleteHead);
    assert_eq!(c.pending(), 2);
    assert!(c.is_busy());

    let events = c.tick(0);
    assert_eq!(kinds(&events), vec!["started"]);
    // The second operation has not touched the list yet.
    assert_eq!(c.engine().values(), vec![1, 2, 3, 4]);
    assert_eq!(c.pending(), 1);

    // Three visits plus the insert frame.
    assert!(c.tick(399).is_empty());
    let events = c.tick(400);
    assert_eq!(kinds(&events), vec!["completed", "started"]);
    assert_eq!(
        events[0],
        ControllerEvent::Completed {
            kind: OperationKind::InsertTail,
            outcome: Outcome::Inserted {
                id: NodeId::new("node-3"),
                index: 3
            }
        }
    );
    assert_eq!(c.engine().values(), vec![2, 3, 4]);

    let events = c.tick(500);
    assert_eq!(kinds(&events), vec!["completed", "fit_view"]);
    assert!(!c.is_busy());
    assert!(c.tick(700).is_empty());
}

#[test]
fn rejected_operations_are_reported_and_skipped() {
    let mut c = controller(&[1]);
    c.submit(Operation::DeleteAt { position: 5 });
    c.submit(Operation::Length);
    let events = c.tick(0);
    assert_eq!(kinds(&events), vec!["rejected", "started"]);
    assert_eq!(
        events[0],
        ControllerEvent::Rejected {
            kind: OperationKind::DeleteAt,
            error: OpError::PositionOutOfRange {
                position: 5,
                len: 1,
                allow_end: false
            }
        }
    );
    assert_eq!(c.engine().values(), vec![1]);
}

#[test]
fn try_run_is_a_single_slot_lock() {
    let mut c = controller(&[1, 2]);
    let outcome = c.try_run(Operation::Search { value: 2 }, 0).unwrap();
    assert_eq!(outcome, Outcome::Search { position: Some(1) });

    assert_eq!(
        c.try_run(Operation::Reverse, 10),
        Err(ControllerError::Busy)
    );
    assert_eq!(c.engine().values(), vec![1, 2]);
    assert_eq!(
        c.move_node(&NodeId::new("node-0"), Point::default()),
        Err(ControllerError::Busy)
    );

    c.skip(20);
    let events = c.tick(20);
    assert_eq!(kinds(&events), vec!["started", "completed"]);
    assert_eq!(
        events[0],
        ControllerEvent::Started {
            kind: OperationKind::Search
        }
    );
    assert!(c.try_run(Operation::Reverse, 30).is_ok());
    assert_eq!(c.engine().values(), vec![2, 1]);

    c.skip(40);
    c.tick(40);
    assert_eq!(
        c.try_run(Operation::Nth { position: 9 }, 50),
        Err(ControllerError::Operation(OpError::PositionOutOfRange {
            position: 9,
            len: 2,
            allow_end: false
        }))
    );
    assert!(!c.is_busy());
}

#[test]
fn graph_shows_frames_while_animating_then_the_committed_state() {
    let mut c = controller(&[1, 2, 3]);
    c.set_highlight_ends(false);
    c.submit(Operation::DeleteTail);
    c.tick(0);

    let palette = c.engine().options().palette;
    let first = c.graph(0);
    let backgrounds: Vec<_> = filter::list_nodes(&first.nodes)
        .map(|n| n.style.background)
        .collect();
    assert_eq!(backgrounds, vec![palette.iterate, palette.node, palette.node]);
    assert_eq!(
        c.current_frame().map(|f| f.caption),
        Some(Caption::Visit { index: 0 })
    );

    c.tick(10_000);
    assert!(c.current_frame().is_none());
    assert_eq!(c.graph(10_000).values(), vec![1, 2]);
}

#[test]
fn view_flags_apply_to_controller_output() {
    let mut c = controller(&[1, 2]);
    c.set_show_pointers(false);
    let g = c.graph(0);
    assert!(filter::pointer_node(&g.nodes, PointerRole::Head).is_none());

    c.set_show_pointers(true);
    let head = filter::head_node(&c.graph(0).nodes).map(|n| n.id.clone());
    c.on_hover(head.clone());
    let g = c.graph(0);
    let hovered: Vec<_> = g
        .edges
        .iter()
        .filter(|e| Some(&e.source) == head.as_ref())
        .collect();
    assert_eq!(hovered.len(), 1);
    assert!(hovered[0].animated);
}

#[test]
fn cancel_pending_keeps_the_running_animation() {
    let mut c = controller(&[1]);
    c.submit(Operation::InsertHead { value: 0 });
    c.submit(Operation::Clear);
    c.tick(0);
    assert_eq!(c.cancel_pending(), 1);
    assert!(c.is_animating());
    c.tick(10_000);
    assert_eq!(c.engine().values(), vec![0, 1]);
}

#[test]
fn markers_can_be_dragged_when_idle() {
    let mut c = controller(&[]);
    let id = c.add_marker(Point::new(1.0, 1.0));
    c.move_node(&id, Point::new(2.0, 3.0)).unwrap();
    assert_eq!(
        c.graph(0).node(&id).map(|n| n.position),
        Some(Point::new(2.0, 3.0))
    );
    assert!(c.remove_marker(&id));
    assert!(c.graph(0).nodes.is_empty());
}

#[test]
fn commit_frame_glides_after_the_animation_completes() {
    let mut c = controller(&[1, 2, 3]);
    c.set_playback(PlaybackOptions {
        transition_ms: 1_000,
        easing: Easing::Linear,
    });
    let layout = c.engine().options().layout;
    let one = NodeId::new("node-0");
    let x_at = |c: &Controller, now: u64| c.graph(now).node(&one).map(|n| n.position.x);

    c.try_run(Operation::Reverse, 0).unwrap();
    // Rewiring frames keep the old layout.
    assert_eq!(x_at(&c, 250), Some(layout.position_of(0).x));

    // Three detach + two attach steps.
    let events = c.tick(500);
    assert_eq!(kinds(&events), vec!["started", "completed"]);
    assert!(!c.is_busy());
    assert_eq!(x_at(&c, 500), Some(layout.position_of(0).x));
    assert_eq!(x_at(&c, 1_000), Some(250.0));
    assert_eq!(x_at(&c, 1_500), Some(layout.position_of(2).x));

    c.tick(1_500);
    assert_eq!(x_at(&c, 1_500), Some(layout.position_of(2).x));
}

#[test]
fn queued_operation_replaces_a_settling_glide() {
    let mut c = controller(&[1, 2, 3]);
    c.set_playback(PlaybackOptions {
        transition_ms: 1_000,
        easing: Easing::Linear,
    });
    let layout = c.engine().options().layout;
    let one = NodeId::new("node-0");

    c.submit(Operation::DeleteHead);
    c.submit(Operation::Length);
    assert_eq!(kinds(&c.tick(0)), vec!["started"]);
    // Removal frame, then commit; the next operation starts on the same tick.
    let events = c.tick(100);
    assert_eq!(kinds(&events), vec!["completed", "fit_view", "started"]);
    let two = NodeId::new("node-1");
    let g = c.graph(150);
    assert!(g.node(&one).is_none());
    assert_eq!(g.node(&two).map(|n| n.position), Some(layout.position_of(0)));
}
