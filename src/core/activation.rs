//! Synthetic firing patterns.
//!
//! Nothing here computes a real network: activations are driven by time or
//! chance so the picture looks alive. Each frame the selected pattern writes
//! the activations table and starts signals on edges, then the node copies
//! are synced from the table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prng::Prng;
use crate::topology::{NodeId, Topology};

/// Per-frame firing probability of a node in [`ActivationPattern::Random`], before speed scaling.
pub const RANDOM_FIRE_RATE: f64 = 0.01;
/// Wave activation above which outgoing edges start a signal.
pub const WAVE_TRIGGER: f64 = 0.8;
/// Sequential activation above which outgoing edges start a signal.
pub const SEQUENTIAL_TRIGGER: f64 = 0.9;
/// Time for the sequential sweep to cross every layer once, at speed 1.
pub const SEQUENTIAL_PERIOD_MS: f64 = 5000.0;
/// Multiplicative fade applied each frame to layers the sweep is not on.
pub const SEQUENTIAL_DECAY: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActivationPattern {
    #[default]
    Random,
    Wave,
    Sequential,
}

impl ActivationPattern {
    pub fn label(self) -> &'static str {
        match self {
            ActivationPattern::Random => "random",
            ActivationPattern::Wave => "wave",
            ActivationPattern::Sequential => "sequential",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ActivationPattern::Random => "Random",
            ActivationPattern::Wave => "Wave",
            ActivationPattern::Sequential => "Sequential",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s))
    }

    pub fn all() -> &'static [ActivationPattern] {
        &[
            ActivationPattern::Random,
            ActivationPattern::Wave,
            ActivationPattern::Sequential,
        ]
    }
}

/// Wave activation of node `(layer, index)` at `now_ms`.
#[inline]
pub fn wave_value(now_ms: f64, speed: f64, layer: usize, index: usize) -> f64 {
    let t = now_ms / 1000.0;
    0.5 + 0.5 * (t * speed + layer as f64 + index as f64 * 0.5).sin()
}

/// Layer the sequential sweep is on at `now_ms`.
pub fn sequential_active_layer(now_ms: f64, speed: f64, layers: usize) -> usize {
    if layers == 0 {
        return 0;
    }
    let period = SEQUENTIAL_PERIOD_MS / speed;
    if !period.is_finite() || period <= 0.0 {
        return 0;
    }
    let phase = (now_ms % period) / period;
    ((phase * layers as f64).floor().max(0.0) as usize).min(layers - 1)
}

/// Oscillation of a node on the sequential sweep's active layer.
#[inline]
pub fn sequential_value(now_ms: f64, speed: f64, index: usize) -> f64 {
    0.8 + 0.2 * ((now_ms / 200.0) * speed + index as f64).sin()
}

/// Run one frame of `pattern`, then sync node activations from the table.
pub fn update(
    topology: &mut Topology,
    pattern: ActivationPattern,
    speed: f64,
    now_ms: f64,
    rng: &mut Prng,
) {
    match pattern {
        ActivationPattern::Random => update_random(topology, speed, rng),
        ActivationPattern::Wave => update_wave(topology, speed, now_ms),
        ActivationPattern::Sequential => update_sequential(topology, speed, now_ms),
    }
    topology.sync_nodes();
}

fn update_random(t: &mut Topology, speed: f64, rng: &mut Prng) {
    let p = RANDOM_FIRE_RATE * speed;
    for id in 0..t.nodes.len() {
        if !rng.chance(p) {
            continue;
        }
        let (layer, index) = (t.nodes[id].layer, t.nodes[id].index);
        t.activations[layer][index] = 1.0;

        // Re-fire even if a signal is already travelling.
        let out = t.outgoing(NodeId(id as u32));
        t.edges[out].iter_mut().for_each(|e| e.fire());
    }
}

fn update_wave(t: &mut Topology, speed: f64, now_ms: f64) {
    for id in 0..t.nodes.len() {
        let (layer, index) = (t.nodes[id].layer, t.nodes[id].index);
        let a = wave_value(now_ms, speed, layer, index);
        t.activations[layer][index] = a;

        if a > WAVE_TRIGGER {
            let out = t.outgoing(NodeId(id as u32));
            t.edges[out].iter_mut().for_each(|e| e.fire_if_idle());
        }
    }
}

fn update_sequential(t: &mut Topology, speed: f64, now_ms: f64) {
    let active = sequential_active_layer(now_ms, speed, t.layer_count());
    for id in 0..t.nodes.len() {
        let (layer, index) = (t.nodes[id].layer, t.nodes[id].index);
        if layer != active {
            // Asymptotic fade; never snaps to zero.
            t.activations[layer][index] *= SEQUENTIAL_DECAY;
            continue;
        }

        let a = sequential_value(now_ms, speed, index);
        t.activations[layer][index] = a;
        if a > SEQUENTIAL_TRIGGER {
            let out = t.outgoing(NodeId(id as u32));
            t.edges[out].iter_mut().for_each(|e| e.fire_if_idle());
        }
    }
}
