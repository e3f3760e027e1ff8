//! # neuroviz
//!
//! An animated picture of a layered feed-forward neural network.
//!
//! Nodes are laid out in columns, edges carry random fixed weights, and a
//! synthetic activation pattern (random, wave or sequential) makes nodes light
//! up and send signals along their outgoing edges. Nothing is learned or
//! computed; the point is the picture.
//!
//! ## Quick Start
//!
//! ```
//! use neuroviz::prelude::*;
//!
//! let cfg = NetworkConfig::with_size(3, 5).with_seed(42);
//! let mut net = Network::new(cfg, CanvasSize::new(800.0, 600.0));
//!
//! // Controls are queued and applied at the next frame boundary.
//! net.submit(Command::SetPattern { pattern: ActivationPattern::Wave });
//!
//! let mut surface = RecordingSurface::new();
//! let mut clock = FixedStep::from_fps(60);
//! let out = net.tick_with(&mut clock, &mut surface);
//! assert!(out.tooltip.is_none());
//! assert_eq!(net.topology().edges().len(), 30);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of config, commands and frame stats
//!
//! ## Modules
//!
//! - [`topology`]: node and edge arena
//! - [`activation`]: firing patterns
//! - [`signal`]: signals travelling along edges
//! - [`render`]: surface trait, drawing and hover hit-testing
//! - [`network`]: state, command handling and the frame loop

#[path = "core/activation.rs"]
pub mod activation;

#[path = "core/color.rs"]
pub mod color;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/geometry.rs"]
pub mod geometry;

#[path = "core/interaction.rs"]
pub mod interaction;

#[path = "core/network.rs"]
pub mod network;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/recording.rs"]
pub mod recording;

#[path = "core/render.rs"]
pub mod render;

#[path = "core/signal.rs"]
pub mod signal;

#[path = "core/time.rs"]
pub mod time;

#[path = "core/topology.rs"]
pub mod topology;

/// Prelude module for convenient imports.
///
/// ```
/// use neuroviz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::activation::ActivationPattern;
    pub use crate::color::{hex_to_rgb, Rgb, Rgba};
    pub use crate::config::{ConfigError, DisplayValues, NetworkConfig};
    pub use crate::geometry::{CanvasSize, Point};
    pub use crate::interaction::{Command, ControlError};
    pub use crate::network::{FrameStats, Network};
    pub use crate::recording::{DrawOp, RecordingSurface, Shape};
    pub use crate::render::{
        Cursor, FrameOutput, HoverTarget, LayerKind, Paint, RadialGradient, Surface, Tooltip,
    };
    pub use crate::time::{Duration, FixedStep, FrameScheduler, WallClock};
    pub use crate::topology::{Edge, Node, NodeId, Topology};
}
