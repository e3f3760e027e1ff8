// Travelling signals.
//
// An active edge carries one signal from source to target. On arrival the
// target's table entry is set to full activation; the node copy picks it up at
// the next sync, so arrivals never cascade within the frame they land.

use crate::topology::Topology;

/// Fraction of an edge a signal covers per frame at speed 1.
pub const SIGNAL_STEP: f64 = 0.02;

/// Advance every active signal by `SIGNAL_STEP * speed`. Returns the number of
/// signals that arrived this frame.
pub fn advance(topology: &mut Topology, speed: f64) -> usize {
    let step = SIGNAL_STEP * speed;
    let mut arrived = 0;

    for i in 0..topology.edges.len() {
        let edge = &mut topology.edges[i];
        if !edge.signal_active {
            continue;
        }
        edge.animation_progress += step;
        if edge.animation_progress < 1.0 {
            continue;
        }

        edge.signal_active = false;
        edge.animation_progress = 0.0;
        let target = &topology.nodes[edge.target().index()];
        let (layer, index) = (target.layer, target.index);
        topology.activations[layer][index] = 1.0;
        arrived += 1;
    }

    arrived
}
