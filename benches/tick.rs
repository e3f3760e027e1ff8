//! Criterion benchmarks for the frame loop.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use neuroviz::prelude::*;

fn make_network(layers: u32, neurons: u32, pattern: ActivationPattern) -> Network {
    let cfg = NetworkConfig::with_size(layers, neurons)
        .with_pattern(pattern)
        .with_seed(42);
    Network::new(cfg, CanvasSize::new(1280.0, 720.0))
}

/// Simulation step only, per pattern, at the largest allowed network.
fn bench_step_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_pattern");
    let (layers, neurons) = (NetworkConfig::MAX_LAYERS, NetworkConfig::MAX_NEURONS);

    for pattern in ActivationPattern::all() {
        group.bench_function(pattern.label(), |b| {
            let mut net = make_network(layers, neurons, *pattern);
            let dt = Duration::from_millis(16);
            b.iter(|| {
                net.step(dt);
                black_box(net.stats().active_signals)
            });
        });
    }

    group.finish();
}

/// Full tick (step + draw into a recording surface) with varying sizes.
fn bench_tick_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_size");

    for (layers, neurons) in [(3u32, 5u32), (6, 12), (12, 24)] {
        let net = make_network(layers, neurons, ActivationPattern::Random);
        group.throughput(Throughput::Elements(net.topology().edges().len() as u64));

        group.bench_with_input(
            BenchmarkId::new("random", format!("{layers}x{neurons}")),
            &(layers, neurons),
            |b, &(layers, neurons)| {
                let mut net = make_network(layers, neurons, ActivationPattern::Random);
                let mut surface = RecordingSurface::new();
                let mut clock = FixedStep::from_fps(60);
                net.submit(Command::PointerMoved { x: 640.0, y: 360.0 });
                b.iter(|| {
                    surface.clear_ops();
                    let out = net.tick_with(&mut clock, &mut surface);
                    black_box(out.cursor)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_step_patterns, bench_tick_sizes);
criterion_main!(benches);
