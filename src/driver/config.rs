//! Display configuration and partial updates.
//!
//! Configurations are plain values: equality is structural, which is what
//! the driver diffs against when deciding whether a reconfiguration needs a
//! full restart. Out-of-range values are clamped on the way in, never
//! rejected, and presets round-trip through JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effects::EffectConfig;
use crate::pattern::PatternId;
use crate::reactive::{ReactiveSignals, DEFAULT_DEBOUNCE_MS};
use crate::Result;

/// Full driver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Text to reveal and animate.
    pub text: String,
    /// Caller-chosen reveal order; reactive states preserve it except ERROR.
    pub base_pattern: PatternId,
    /// Fade-in duration per pixel in milliseconds (minimum 1).
    pub ms_per_pixel: u32,
    /// Signal coalescing window in milliseconds.
    pub debounce_ms: f64,
    /// Effect tunables.
    pub effects: EffectConfig,
    /// Initial reactive signal state.
    pub reactive: ReactiveSignals,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            text: String::new(),
            base_pattern: PatternId::Sequential,
            ms_per_pixel: 30,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            effects: EffectConfig::default(),
            reactive: ReactiveSignals::default(),
        }
    }
}

impl DisplayConfig {
    /// Default configuration for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        DisplayConfig {
            text: text.into(),
            ..DisplayConfig::default()
        }
    }

    /// Copy with every tunable clamped into its valid range.
    pub fn sanitized(&self) -> Self {
        DisplayConfig {
            text: self.text.clone(),
            base_pattern: self.base_pattern,
            ms_per_pixel: self.ms_per_pixel.max(1),
            debounce_ms: self.debounce_ms.clamp(0.0, 5000.0),
            effects: self.effects.sanitized(),
            reactive: self.reactive,
        }
    }

    /// Parse a JSON preset. Out-of-range values are clamped, not rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DisplayConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Serialize as a pretty-printed JSON preset.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        DisplayConfig::from_json(&json)
    }

    /// Save a preset file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Partial configuration overlay; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    /// Replace the displayed text.
    pub text: Option<String>,
    /// Replace the base reveal pattern.
    pub base_pattern: Option<PatternId>,
    /// Replace the per-pixel fade duration.
    pub ms_per_pixel: Option<u32>,
    /// Replace the debounce window.
    pub debounce_ms: Option<f64>,
    /// Replace the effect tunables.
    pub effects: Option<EffectConfig>,
    /// Push a reactive signal change (debounced).
    pub reactive: Option<ReactiveSignals>,
}

impl ConfigUpdate {
    /// Empty update; a no-op when applied.
    pub fn new() -> Self {
        ConfigUpdate::default()
    }

    /// Set the text field.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the base pattern field.
    pub fn base_pattern(mut self, pattern: PatternId) -> Self {
        self.base_pattern = Some(pattern);
        self
    }

    /// Set the per-pixel duration field.
    pub fn ms_per_pixel(mut self, ms: u32) -> Self {
        self.ms_per_pixel = Some(ms);
        self
    }

    /// Set the debounce window field.
    pub fn debounce_ms(mut self, ms: f64) -> Self {
        self.debounce_ms = Some(ms);
        self
    }

    /// Set the effect tunables field.
    pub fn effects(mut self, effects: EffectConfig) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Set the reactive signals field.
    pub fn reactive(mut self, signals: ReactiveSignals) -> Self {
        self.reactive = Some(signals);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == ConfigUpdate::default()
    }
}
