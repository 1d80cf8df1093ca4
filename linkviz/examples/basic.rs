// Example: run a few operations and print each animation's captions.
use linkviz::{Engine, EngineOptions, Operation};

fn main() {
    let mut engine = Engine::with_values(EngineOptions::new().with_speed_ms(300), &[4, 8, 15]);

    let ops = [
        Operation::InsertTail { value: 16 },
        Operation::InsertAt {
            position: 2,
            value: 23,
        },
        Operation::DeleteAt { position: 9 },
        Operation::FindMiddle,
        Operation::Search { value: 15 },
    ];

    for op in ops {
        match engine.run(op.clone()) {
            Ok(animation) => {
                let captions: Vec<_> = animation.captions().collect();
                println!(
                    "{:?}: {} frames, {}ms -> {:?}",
                    op,
                    animation.len(),
                    animation.total_duration_ms(),
                    animation.outcome()
                );
                println!("  captions={captions:?}");
            }
            Err(e) => println!("{op:?}: refused: {e}"),
        }
    }
    println!("values={:?}", engine.values());
}
