//! Control panel metadata that should be available on both wasm and native.
//!
//! Keeping this out of the wasm-only `web` module allows us to unit-test the
//! control inventory on the host.

use neuroviz::config::{DisplayValues, NetworkConfig};
use neuroviz::interaction::controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Layers,
    Neurons,
    Speed,
    Glow,
}

impl Slider {
    pub fn all() -> &'static [Slider] {
        &[Slider::Layers, Slider::Neurons, Slider::Speed, Slider::Glow]
    }

    /// Element id; also the control name understood by `Command::from_control`.
    pub fn id(self) -> &'static str {
        match self {
            Slider::Layers => controls::LAYERS,
            Slider::Neurons => controls::NEURONS,
            Slider::Speed => controls::ANIMATION_SPEED,
            Slider::Glow => controls::GLOW_INTENSITY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slider::Layers => "Layers",
            Slider::Neurons => "Neurons per layer",
            Slider::Speed => "Animation speed",
            Slider::Glow => "Glow intensity",
        }
    }

    /// `(min, max, step)` as HTML attribute strings.
    pub fn range(self) -> (String, String, &'static str) {
        match self {
            Slider::Layers => (
                NetworkConfig::MIN_LAYERS.to_string(),
                NetworkConfig::MAX_LAYERS.to_string(),
                "1",
            ),
            Slider::Neurons => (
                NetworkConfig::MIN_NEURONS.to_string(),
                NetworkConfig::MAX_NEURONS.to_string(),
                "1",
            ),
            Slider::Speed => (
                NetworkConfig::MIN_SPEED.to_string(),
                NetworkConfig::MAX_SPEED.to_string(),
                "0.1",
            ),
            Slider::Glow => (
                NetworkConfig::MIN_GLOW.to_string(),
                NetworkConfig::MAX_GLOW.to_string(),
                "0.1",
            ),
        }
    }

    /// Raw input value for the slider position.
    pub fn value(self, cfg: &NetworkConfig) -> String {
        match self {
            Slider::Layers => cfg.layers.to_string(),
            Slider::Neurons => cfg.neurons.to_string(),
            Slider::Speed => cfg.animation_speed.to_string(),
            Slider::Glow => cfg.glow_intensity.to_string(),
        }
    }

    /// Text shown next to the slider.
    pub fn display(self, values: &DisplayValues) -> &str {
        match self {
            Slider::Layers => &values.layers,
            Slider::Neurons => &values.neurons,
            Slider::Speed => &values.speed,
            Slider::Glow => &values.glow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPicker {
    Node,
    Edge,
}

impl ColorPicker {
    pub fn all() -> &'static [ColorPicker] {
        &[ColorPicker::Node, ColorPicker::Edge]
    }

    pub fn id(self) -> &'static str {
        match self {
            ColorPicker::Node => controls::NODE_COLOR,
            ColorPicker::Edge => controls::EDGE_COLOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorPicker::Node => "Node color",
            ColorPicker::Edge => "Edge color",
        }
    }

    pub fn value(self, cfg: &NetworkConfig) -> String {
        match self {
            ColorPicker::Node => cfg.node_color.clone(),
            ColorPicker::Edge => cfg.edge_color.clone(),
        }
    }
}
