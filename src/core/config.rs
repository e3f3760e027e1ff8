#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::ActivationPattern;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("layer count {0} is outside {min}..={max}", min = NetworkConfig::MIN_LAYERS, max = NetworkConfig::MAX_LAYERS)]
    Layers(u32),
    #[error("neurons per layer {0} is outside {min}..={max}", min = NetworkConfig::MIN_NEURONS, max = NetworkConfig::MAX_NEURONS)]
    Neurons(u32),
    #[error("animation speed {0} is outside {min}..={max}", min = NetworkConfig::MIN_SPEED, max = NetworkConfig::MAX_SPEED)]
    Speed(f64),
    #[error("glow intensity {0} is outside {min}..={max}", min = NetworkConfig::MIN_GLOW, max = NetworkConfig::MAX_GLOW)]
    Glow(f64),
}

/// User-facing parameters of the visualization.
///
/// Colors stay as the raw strings the color pickers produce; they are resolved
/// (with a black fallback) at draw time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    pub layers: u32,
    pub neurons: u32,
    pub pattern: ActivationPattern,
    pub animation_speed: f64,
    pub node_color: String,
    pub edge_color: String,
    pub glow_intensity: f64,
    /// PRNG seed for edge weights and random firing. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            layers: 3,
            neurons: 5,
            pattern: ActivationPattern::Random,
            animation_speed: 1.0,
            node_color: "#00b0ff".to_string(),
            edge_color: "#4f5b62".to_string(),
            glow_intensity: 1.0,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub const MIN_LAYERS: u32 = 1;
    pub const MAX_LAYERS: u32 = 12;
    pub const MIN_NEURONS: u32 = 1;
    pub const MAX_NEURONS: u32 = 24;
    pub const MIN_SPEED: f64 = 0.1;
    pub const MAX_SPEED: f64 = 5.0;
    pub const MIN_GLOW: f64 = 0.0;
    pub const MAX_GLOW: f64 = 3.0;

    pub fn with_size(layers: u32, neurons: u32) -> Self {
        Self {
            layers,
            neurons,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pattern(mut self, pattern: ActivationPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.animation_speed = speed;
        self
    }

    pub fn with_glow(mut self, glow: f64) -> Self {
        self.glow_intensity = glow;
        self
    }

    pub fn with_colors(mut self, node: impl Into<String>, edge: impl Into<String>) -> Self {
        self.node_color = node.into();
        self.edge_color = edge.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_LAYERS..=Self::MAX_LAYERS).contains(&self.layers) {
            return Err(ConfigError::Layers(self.layers));
        }
        if !(Self::MIN_NEURONS..=Self::MAX_NEURONS).contains(&self.neurons) {
            return Err(ConfigError::Neurons(self.neurons));
        }
        if !(Self::MIN_SPEED..=Self::MAX_SPEED).contains(&self.animation_speed) {
            return Err(ConfigError::Speed(self.animation_speed));
        }
        if !(Self::MIN_GLOW..=Self::MAX_GLOW).contains(&self.glow_intensity) {
            return Err(ConfigError::Glow(self.glow_intensity));
        }
        Ok(())
    }

    /// Pull every numeric field into its allowed range. NaN falls back to the default.
    pub fn clamped(mut self) -> Self {
        let d = Self::default();
        self.layers = clamp_layers(self.layers);
        self.neurons = clamp_neurons(self.neurons);
        self.animation_speed = clamp_f64(
            self.animation_speed,
            Self::MIN_SPEED,
            Self::MAX_SPEED,
            d.animation_speed,
        );
        self.glow_intensity = clamp_f64(
            self.glow_intensity,
            Self::MIN_GLOW,
            Self::MAX_GLOW,
            d.glow_intensity,
        );
        self
    }

    /// Values shown next to the sliders: counts as integers, scalars with one decimal.
    pub fn display_values(&self) -> DisplayValues {
        DisplayValues {
            layers: self.layers.to_string(),
            neurons: self.neurons.to_string(),
            speed: format!("{:.1}", self.animation_speed),
            glow: format!("{:.1}", self.glow_intensity),
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValues {
    pub layers: String,
    pub neurons: String,
    pub speed: String,
    pub glow: String,
}

pub(crate) fn clamp_layers(v: u32) -> u32 {
    v.clamp(NetworkConfig::MIN_LAYERS, NetworkConfig::MAX_LAYERS)
}

pub(crate) fn clamp_neurons(v: u32) -> u32 {
    v.clamp(NetworkConfig::MIN_NEURONS, NetworkConfig::MAX_NEURONS)
}

pub(crate) fn clamp_f64(v: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if v.is_nan() {
        fallback
    } else {
        v.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = NetworkConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.layers, 3);
        assert_eq!(cfg.neurons, 5);
        assert_eq!(cfg.pattern, ActivationPattern::Random);
        assert_eq!(cfg.node_color, "#00b0ff");
        assert_eq!(cfg.edge_color, "#4f5b62");
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            NetworkConfig::with_size(0, 5).validate(),
            Err(ConfigError::Layers(0))
        );
        assert_eq!(
            NetworkConfig::with_size(3, 99).validate(),
            Err(ConfigError::Neurons(99))
        );
        assert!(matches!(
            NetworkConfig::default().with_speed(0.0).validate(),
            Err(ConfigError::Speed(_))
        ));
        assert!(matches!(
            NetworkConfig::default().with_glow(f64::NAN).validate(),
            Err(ConfigError::Glow(_))
        ));
    }

    #[test]
    fn clamped_is_always_valid() {
        let cfg = NetworkConfig::with_size(0, 1000)
            .with_speed(f64::NAN)
            .with_glow(-4.0)
            .clamped();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.layers, 1);
        assert_eq!(cfg.neurons, NetworkConfig::MAX_NEURONS);
        assert_eq!(cfg.animation_speed, 1.0);
        assert_eq!(cfg.glow_intensity, 0.0);
    }

    #[test]
    fn display_values_use_one_decimal() {
        let v = NetworkConfig::default().with_speed(1.26).display_values();
        assert_eq!(v.layers, "3");
        assert_eq!(v.speed, "1.3");
        assert_eq!(v.glow, "1.0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_fills_missing_fields_from_defaults() {
        let cfg = NetworkConfig::from_json_str(r#"{"layers": 4, "pattern": "wave"}"#).unwrap();
        assert_eq!(cfg.layers, 4);
        assert_eq!(cfg.neurons, 5);
        assert_eq!(cfg.pattern, ActivationPattern::Wave);
    }
}
