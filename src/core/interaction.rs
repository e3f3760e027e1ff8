//! Host input as commands.
//!
//! Controls, pointer events and resizes arrive between frames. They are turned
//! into [`Command`]s and queued; the network drains the queue at the start of
//! the next tick, so nothing mutates state half-way through a frame.

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::ActivationPattern;

/// Element ids of the stock control panel.
pub mod controls {
    pub const LAYERS: &str = "layers";
    pub const NEURONS: &str = "neurons";
    pub const ACTIVATION: &str = "activation";
    pub const ANIMATION_SPEED: &str = "animation-speed";
    pub const NODE_COLOR: &str = "node-color";
    pub const EDGE_COLOR: &str = "edge-color";
    pub const GLOW_INTENSITY: &str = "glow-intensity";
    pub const RESET: &str = "reset";

    pub const ALL: &[&str] = &[
        LAYERS,
        NEURONS,
        ACTIVATION,
        ANIMATION_SPEED,
        NODE_COLOR,
        EDGE_COLOR,
        GLOW_INTENSITY,
        RESET,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("unknown control `{0}`")]
    UnknownControl(String),
    #[error("control `{control}` expects an integer, got `{value}`")]
    NotAnInteger { control: String, value: String },
    #[error("control `{control}` expects a number, got `{value}`")]
    NotANumber { control: String, value: String },
    #[error("unknown activation pattern `{0}`")]
    UnknownPattern(String),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Command {
    SetLayers { layers: u32 },
    SetNeurons { neurons: u32 },
    SetPattern { pattern: ActivationPattern },
    SetSpeed { speed: f64 },
    SetNodeColor { color: String },
    SetEdgeColor { color: String },
    SetGlow { glow: f64 },
    Resize { width: f64, height: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    Reset,
}

impl Command {
    /// Translate a control change notification into a command.
    ///
    /// Counts parse like `parseInt` and scalars like `parseFloat`: the leading
    /// number is used and trailing text ignored. Colors pass through untouched.
    pub fn from_control(control: &str, raw: &str) -> Result<Command, ControlError> {
        let int = || {
            parse_int_prefix(raw)
                .map(|v| v.clamp(0, u32::MAX as i64) as u32)
                .ok_or_else(|| ControlError::NotAnInteger {
                    control: control.to_string(),
                    value: raw.to_string(),
                })
        };
        let float = || {
            parse_float_prefix(raw).ok_or_else(|| ControlError::NotANumber {
                control: control.to_string(),
                value: raw.to_string(),
            })
        };

        match control {
            controls::LAYERS => Ok(Command::SetLayers { layers: int()? }),
            controls::NEURONS => Ok(Command::SetNeurons { neurons: int()? }),
            controls::ACTIVATION => ActivationPattern::parse(raw)
                .map(|pattern| Command::SetPattern { pattern })
                .ok_or_else(|| ControlError::UnknownPattern(raw.to_string())),
            controls::ANIMATION_SPEED => Ok(Command::SetSpeed { speed: float()? }),
            controls::NODE_COLOR => Ok(Command::SetNodeColor {
                color: raw.to_string(),
            }),
            controls::EDGE_COLOR => Ok(Command::SetEdgeColor {
                color: raw.to_string(),
            }),
            controls::GLOW_INTENSITY => Ok(Command::SetGlow { glow: float()? }),
            controls::RESET => Ok(Command::Reset),
            other => Err(ControlError::UnknownControl(other.to_string())),
        }
    }

    /// True for commands that throw away the current nodes and edges.
    pub fn rebuilds_topology(&self) -> bool {
        matches!(
            self,
            Command::SetLayers { .. }
                | Command::SetNeurons { .. }
                | Command::Resize { .. }
                | Command::Reset
        )
    }
}

/// FIFO of commands waiting for the next frame boundary.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: Command) {
        self.pending.push_back(cmd);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}

/// Leading decimal integer, after optional whitespace and sign.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    s[..end].parse::<i64>().ok().or_else(|| {
        Some(if s.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    })
}

/// Longest leading decimal float, after optional whitespace.
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_parse_leading_integer() {
        assert_eq!(
            Command::from_control("layers", "4"),
            Ok(Command::SetLayers { layers: 4 })
        );
        assert_eq!(
            Command::from_control("neurons", " 7px"),
            Ok(Command::SetNeurons { neurons: 7 })
        );
        assert_eq!(
            Command::from_control("layers", "-3"),
            Ok(Command::SetLayers { layers: 0 })
        );
        assert!(matches!(
            Command::from_control("layers", "abc"),
            Err(ControlError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn scalars_parse_leading_float() {
        assert_eq!(
            Command::from_control("animation-speed", "1.5"),
            Ok(Command::SetSpeed { speed: 1.5 })
        );
        assert_eq!(
            Command::from_control("glow-intensity", ".5x"),
            Ok(Command::SetGlow { glow: 0.5 })
        );
        assert_eq!(
            Command::from_control("glow-intensity", "2e"),
            Ok(Command::SetGlow { glow: 2.0 })
        );
        assert_eq!(
            Command::from_control("glow-intensity", "1e1"),
            Ok(Command::SetGlow { glow: 10.0 })
        );
        assert!(matches!(
            Command::from_control("animation-speed", "."),
            Err(ControlError::NotANumber { .. })
        ));
    }

    #[test]
    fn colors_pass_through_and_patterns_parse() {
        assert_eq!(
            Command::from_control("node-color", "notacolor"),
            Ok(Command::SetNodeColor {
                color: "notacolor".to_string()
            })
        );
        assert_eq!(
            Command::from_control("activation", "sequential"),
            Ok(Command::SetPattern {
                pattern: ActivationPattern::Sequential
            })
        );
        assert!(matches!(
            Command::from_control("activation", "spiral"),
            Err(ControlError::UnknownPattern(_))
        ));
        assert!(matches!(
            Command::from_control("volume", "3"),
            Err(ControlError::UnknownControl(_))
        ));
    }

    #[test]
    fn every_stock_control_is_recognized() {
        for id in controls::ALL {
            let raw = match *id {
                controls::ACTIVATION => "wave",
                controls::NODE_COLOR | controls::EDGE_COLOR => "#ffffff",
                _ => "2",
            };
            assert!(Command::from_control(id, raw).is_ok(), "{id}");
        }
    }

    #[test]
    fn only_layout_commands_rebuild() {
        assert!(Command::SetLayers { layers: 2 }.rebuilds_topology());
        assert!(Command::Resize {
            width: 1.0,
            height: 1.0
        }
        .rebuilds_topology());
        assert!(Command::Reset.rebuilds_topology());
        assert!(!Command::SetSpeed { speed: 2.0 }.rebuilds_topology());
        assert!(!Command::SetPattern {
            pattern: ActivationPattern::Wave
        }
        .rebuilds_topology());
    }

    #[test]
    fn queue_drains_in_order() {
        let mut q = CommandQueue::new();
        q.push(Command::SetLayers { layers: 2 });
        q.push(Command::Reset);
        assert_eq!(q.len(), 2);
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(
            drained,
            vec![Command::SetLayers { layers: 2 }, Command::Reset]
        );
        assert!(q.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn commands_use_tagged_json() {
        let cmd: Command =
            serde_json::from_str(r#"{"type":"SetPattern","pattern":"wave"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::SetPattern {
                pattern: ActivationPattern::Wave
            }
        );
    }
}
