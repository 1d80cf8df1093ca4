use linkviz::{EngineOptions, Operation};
use linkviz_adapter::{Controller, ControllerEvent};

fn main() {
    // Example: a host that queues button presses and drives playback from a 16ms timer.
    //
    // An adapter would:
    // - submit an operation per user request, even while another one is animating
    // - call tick(now_ms) in a frame loop / timer and react to the returned events
    // - draw graph(now_ms) with its own renderer
    let mut c = Controller::new(EngineOptions::new().with_speed_ms(120));
    c.submit(Operation::Create {
        values: vec![1, 2, 2, 3, 1],
    });
    c.submit(Operation::RemoveDuplicates);
    c.submit(Operation::Nth { position: 7 });
    c.submit(Operation::Reverse);

    let mut now_ms = 0u64;
    while c.is_busy() {
        for event in c.tick(now_ms) {
            match event {
                ControllerEvent::Rejected { kind, error } => {
                    println!("t={now_ms} {kind:?} refused: {error}")
                }
                ControllerEvent::FitView { bounds } => println!("t={now_ms} fit view to {bounds:?}"),
                other => println!("t={now_ms} {other:?}"),
            }
        }
        if let Some(frame) = c.current_frame() {
            if now_ms % 48 == 0 {
                println!("t={now_ms} frame #{} {:?}", frame.index, frame.caption);
            }
        }
        now_ms += 16;
    }

    println!("done: values={:?}", c.engine().values());
    println!("nodes drawn={}", c.graph(now_ms).nodes.len());
}
