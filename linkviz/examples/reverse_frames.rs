// Example: inspect the edges of every frame while a list is reversed.
use linkviz::{Engine, EngineOptions, NodeId, filter};

fn main() {
    let mut engine = Engine::with_values(EngineOptions::default(), &[1, 2, 3]);
    let animation = engine.reverse_list();

    for frame in animation.frames() {
        let nodes = &frame.graph.nodes;
        let label = |id: &NodeId| {
            filter::node_by_id(nodes, id)
                .and_then(|n| n.value())
                .map_or_else(|| "?".to_string(), |v| v.to_string())
        };
        let edges: Vec<_> = frame
            .graph
            .edges
            .iter()
            .filter(|e| filter::node_by_id(nodes, &e.source).is_some_and(|n| n.is_list_node()))
            .map(|e| format!("{}->{}", label(&e.source), label(&e.target)))
            .collect();
        println!("#{} {:?} edges={edges:?}", frame.index, frame.caption);
    }
    println!("values={:?}", engine.values());
}
