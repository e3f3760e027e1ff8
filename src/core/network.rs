//! The simulation state and its frame loop.
//!
//! [`Network`] owns the configuration, the current [`Topology`] and the PRNG.
//! Hosts submit [`Command`]s at any time; they take effect at the start of the
//! next [`Network::step`]. A frame is: drain commands, run the activation
//! pattern, sync node copies, advance signals. Rendering reads the result.

use tracing::{info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::{self, ActivationPattern};
use crate::color::parse_hex;
use crate::config::{clamp_f64, clamp_layers, clamp_neurons, NetworkConfig};
use crate::geometry::{CanvasSize, Point};
use crate::interaction::{Command, CommandQueue, ControlError};
use crate::prng::Prng;
use crate::render::{FrameOutput, Renderer, Surface, DEFAULT_TOOLTIP_SIZE};
use crate::signal;
use crate::time::{Duration, FrameScheduler};
use crate::topology::Topology;

/// Counters describing the most recent frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameStats {
    pub frame: u64,
    pub clock_ms: f64,
    pub nodes: usize,
    pub edges: usize,
    pub active_signals: usize,
    /// Signals that reached their target during the last step.
    pub arrivals: usize,
    pub mean_activation: f64,
}

pub struct Network {
    config: NetworkConfig,
    canvas: CanvasSize,
    topology: Topology,
    rng: Prng,
    commands: CommandQueue,
    pointer: Option<Point>,
    tooltip_size: (f64, f64),
    clock_ms: f64,
    frame: u64,
    last_arrivals: usize,
}

impl Network {
    /// Build a network for `config` on a canvas of `canvas` pixels.
    ///
    /// Out-of-range config values are clamped rather than rejected; call
    /// [`NetworkConfig::validate`] first to be strict.
    pub fn new(config: NetworkConfig, canvas: CanvasSize) -> Self {
        let config = config.clamped();
        let canvas = canvas.sanitized();
        let mut rng = match config.seed {
            Some(seed) => Prng::new(seed),
            None => Prng::from_entropy(),
        };
        let topology = Topology::build(
            config.layers as usize,
            config.neurons as usize,
            canvas,
            &mut rng,
        );
        Self {
            config,
            canvas,
            topology,
            rng,
            commands: CommandQueue::new(),
            pointer: None,
            tooltip_size: DEFAULT_TOOLTIP_SIZE,
            clock_ms: 0.0,
            frame: 0,
            last_arrivals: 0,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Milliseconds of simulated time; drives the wave and sequential patterns.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Jump the pattern clock, e.g. to wall-clock epoch millis.
    pub fn set_clock_ms(&mut self, ms: f64) {
        if ms.is_finite() {
            self.clock_ms = ms;
        }
    }

    /// Measured tooltip box, used to keep it on the canvas.
    pub fn set_tooltip_size(&mut self, width: f64, height: f64) {
        self.tooltip_size = (width.max(0.0), height.max(0.0));
    }

    /// Queue a command for the next frame boundary.
    pub fn submit(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Parse a raw control change and queue it.
    pub fn submit_control(&mut self, control: &str, raw: &str) -> Result<(), ControlError> {
        match Command::from_control(control, raw) {
            Ok(cmd) => {
                self.submit(cmd);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected control input: {}", e);
                Err(e)
            }
        }
    }

    /// Apply everything queued so far. Called at the start of each step.
    pub fn apply_pending(&mut self) {
        let pending: Vec<Command> = self.commands.drain().collect();
        for cmd in pending {
            self.apply(cmd);
        }
    }

    fn apply(&mut self, cmd: Command) {
        let rebuild = cmd.rebuilds_topology();
        match cmd {
            Command::SetLayers { layers } => self.config.layers = clamp_layers(layers),
            Command::SetNeurons { neurons } => self.config.neurons = clamp_neurons(neurons),
            Command::Resize { width, height } => {
                self.canvas = CanvasSize::new(width, height).sanitized();
            }
            Command::SetPattern { pattern } => self.set_pattern(pattern),
            Command::SetSpeed { speed } => {
                self.config.animation_speed = clamp_f64(
                    speed,
                    NetworkConfig::MIN_SPEED,
                    NetworkConfig::MAX_SPEED,
                    self.config.animation_speed,
                );
            }
            Command::SetGlow { glow } => {
                self.config.glow_intensity = clamp_f64(
                    glow,
                    NetworkConfig::MIN_GLOW,
                    NetworkConfig::MAX_GLOW,
                    self.config.glow_intensity,
                );
            }
            Command::SetNodeColor { color } => {
                if parse_hex(&color).is_none() {
                    warn!("Node color {:?} is not #rrggbb; drawing black", color);
                }
                self.config.node_color = color;
            }
            Command::SetEdgeColor { color } => {
                if parse_hex(&color).is_none() {
                    warn!("Edge color {:?} is not #rrggbb; drawing black", color);
                }
                self.config.edge_color = color;
            }
            Command::PointerMoved { x, y } => {
                self.pointer = (x.is_finite() && y.is_finite()).then(|| Point::new(x, y));
            }
            Command::PointerLeft => self.pointer = None,
            Command::Reset => self.reset(),
        }
        if rebuild {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.topology = Topology::build(
            self.config.layers as usize,
            self.config.neurons as usize,
            self.canvas,
            &mut self.rng,
        );
    }

    fn set_pattern(&mut self, pattern: ActivationPattern) {
        self.config.pattern = pattern;
        // In-flight signals keep travelling; only activations restart.
        self.topology.reset_activations();
        info!("Activation pattern set to {}", pattern.display_name());
    }

    /// Restore every control to its default. The seed is kept.
    fn reset(&mut self) {
        let seed = self.config.seed;
        self.config = NetworkConfig {
            seed,
            ..NetworkConfig::default()
        };
        info!("Network reset to defaults");
    }

    /// Advance the simulation by `dt` without drawing.
    pub fn step(&mut self, dt: Duration) {
        self.apply_pending();
        self.clock_ms += dt.as_secs_f64() * 1000.0;

        let speed = self.config.animation_speed;
        activation::update(
            &mut self.topology,
            self.config.pattern,
            speed,
            self.clock_ms,
            &mut self.rng,
        );
        self.last_arrivals = signal::advance(&mut self.topology, speed);
        self.frame += 1;
    }

    /// Draw the current state and hit-test the pointer.
    pub fn render(&self, surface: &mut dyn Surface) -> FrameOutput {
        Renderer::new(&self.topology, &self.config)
            .with_pointer(self.pointer)
            .with_tooltip_size(self.tooltip_size)
            .draw(surface)
    }

    /// One full frame: step by `dt`, then render.
    pub fn tick(&mut self, dt: Duration, surface: &mut dyn Surface) -> FrameOutput {
        self.step(dt);
        self.render(surface)
    }

    /// One full frame with `dt` taken from `scheduler`.
    pub fn tick_with(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        surface: &mut dyn Surface,
    ) -> FrameOutput {
        let dt = scheduler.next_dt();
        self.tick(dt, surface)
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frame,
            clock_ms: self.clock_ms,
            nodes: self.topology.nodes().len(),
            edges: self.topology.edges().len(),
            active_signals: self.topology.active_signal_count(),
            arrivals: self.last_arrivals,
            mean_activation: self.topology.mean_activation(),
        }
    }
}
