//! Per-pixel effect processing
//!
//! Computes a modulated (intensity, glow) pair from a base value, elapsed
//! time and the set of active effects. The processor is pure: identical
//! inputs always produce identical outputs, including the flicker noise,
//! which is derived from a deterministic hash of the timing inputs rather
//! than a platform randomness source.
//!
//! Combination rule (fixed order, commutative for the multiplicative
//! factors): `intensity = clamp(base * blink * pulsate * (1 + noise),
//! background_floor, 1.0)` and `glow = base_glow * glow_factor`. An empty
//! effect set is the identity on `(base_intensity, base_glow)`, so the
//! clamp never distorts untouched pixels. Out-of-range tunables are
//! clamped into their valid ranges, never rejected.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::pattern::rng;

bitflags! {
    /// Set of simultaneously active pixel effects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EffectSet: u8 {
        /// Square-wave intensity blink during the fade-in window.
        const BLINK = 0x01;
        /// Gentle sine intensity modulation once fully lit.
        const PULSATE = 0x02;
        /// Continuous additive noise, independent of lit state.
        const FLICKER = 0x04;
        /// Sine modulation of the glow channel only.
        const GLOW_PULSE = 0x08;
    }
}

impl EffectSet {
    /// Short names of the contained effects, for snapshots and logs.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(EffectSet::BLINK) {
            names.push("blink");
        }
        if self.contains(EffectSet::PULSATE) {
            names.push("pulsate");
        }
        if self.contains(EffectSet::FLICKER) {
            names.push("flicker");
        }
        if self.contains(EffectSet::GLOW_PULSE) {
            names.push("glow-pulse");
        }
        names
    }
}

/// Named tunables for the pixel effects.
///
/// All values are clamped into valid ranges by [`EffectConfig::sanitized`];
/// a configuration is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Blink square-wave frequency in Hz.
    pub blink_hz: f32,
    /// Intensity multiplier in the blink low half-cycle.
    pub blink_low: f32,
    /// Pulsate sine period in milliseconds.
    pub pulsate_period_ms: f32,
    /// Lower bound of the pulsate band; the factor spans `[floor, 1.0]`.
    pub pulsate_floor: f32,
    /// Flicker noise amplitude; noise is uniform in `±amplitude`.
    pub flicker_amplitude: f32,
    /// Glow-pulse sine period in milliseconds.
    pub glow_period_ms: f32,
    /// Lower bound of the glow-pulse band.
    pub glow_floor: f32,
    /// Intensity floor for unlit/background pixels and the clamp low end.
    pub background_floor: f32,
    /// Glow level fed into the pipeline for every pixel.
    pub base_glow: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        EffectConfig {
            blink_hz: 2.0,
            blink_low: 0.3,
            pulsate_period_ms: 1200.0,
            pulsate_floor: 0.85,
            flicker_amplitude: 0.2,
            glow_period_ms: 1500.0,
            glow_floor: 0.5,
            background_floor: 0.05,
            base_glow: 1.0,
        }
    }
}

impl EffectConfig {
    /// Copy with every tunable clamped into its valid range.
    pub fn sanitized(&self) -> Self {
        EffectConfig {
            blink_hz: self.blink_hz.clamp(0.1, 30.0),
            blink_low: self.blink_low.clamp(0.0, 1.0),
            pulsate_period_ms: self.pulsate_period_ms.clamp(100.0, 10_000.0),
            pulsate_floor: self.pulsate_floor.clamp(0.0, 1.0),
            flicker_amplitude: self.flicker_amplitude.clamp(0.0, 0.5),
            glow_period_ms: self.glow_period_ms.clamp(100.0, 10_000.0),
            glow_floor: self.glow_floor.clamp(0.0, 1.0),
            background_floor: self.background_floor.clamp(0.0, 0.5),
            base_glow: self.base_glow.clamp(0.0, 2.0),
        }
    }
}

/// Timing context of one pixel in the current frame.
#[derive(Debug, Clone, Copy)]
pub struct PixelSample {
    /// Unmodulated intensity from the reveal ramp.
    pub base_intensity: f32,
    /// Unmodulated glow level.
    pub base_glow: f32,
    /// Milliseconds since animation start.
    pub elapsed_ms: f64,
    /// Milliseconds since this pixel's fade-in window opened. Negative while
    /// the window has not started yet.
    pub pixel_elapsed_ms: f64,
    /// Fade-in duration allotted to each pixel.
    pub ms_per_pixel: u32,
    /// Whether the pixel has completed its fade-in.
    pub fully_lit: bool,
}

/// Modulated output levels for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelLevels {
    /// Final intensity in `[background_floor, 1.0]`.
    pub intensity: f32,
    /// Final glow level.
    pub glow: f32,
}

/// Sine mapped into `[0, 1]` over the given period.
fn sine_unit(elapsed_ms: f64, period_ms: f32) -> f32 {
    let phase = elapsed_ms / f64::from(period_ms) * std::f64::consts::TAU;
    (0.5 + 0.5 * phase.sin()) as f32
}

/// Deterministic noise in `[-1, 1]` keyed on the frame and pixel clocks.
fn noise_unit(elapsed_ms: f64, pixel_elapsed_ms: f64) -> f32 {
    let key = elapsed_ms.to_bits() ^ pixel_elapsed_ms.to_bits().rotate_left(17);
    let mixed = rng::mix64(key);
    // Top 24 bits -> [0, 1) -> [-1, 1)
    let unit = (mixed >> 40) as f32 / (1u64 << 24) as f32;
    unit * 2.0 - 1.0
}

/// Apply the active effects to one pixel.
///
/// With an empty effect set this is the identity on
/// `(base_intensity, base_glow)`.
pub fn apply(sample: &PixelSample, active: EffectSet, config: &EffectConfig) -> PixelLevels {
    if active.is_empty() {
        return PixelLevels {
            intensity: sample.base_intensity,
            glow: sample.base_glow,
        };
    }

    let cfg = config.sanitized();
    let mut factor = 1.0f32;

    // Blink only modulates the fade-in window
    if active.contains(EffectSet::BLINK)
        && sample.pixel_elapsed_ms < f64::from(sample.ms_per_pixel)
    {
        let phase = sample.elapsed_ms / 1000.0 * f64::from(cfg.blink_hz);
        if phase.fract() >= 0.5 {
            factor *= cfg.blink_low;
        }
    }

    // Pulsate only once the pixel holds its final level
    if active.contains(EffectSet::PULSATE) && sample.fully_lit {
        let wave = sine_unit(sample.elapsed_ms, cfg.pulsate_period_ms);
        factor *= cfg.pulsate_floor + (1.0 - cfg.pulsate_floor) * wave;
    }

    let noise = if active.contains(EffectSet::FLICKER) {
        noise_unit(sample.elapsed_ms, sample.pixel_elapsed_ms) * cfg.flicker_amplitude
    } else {
        0.0
    };

    // Combine first, clamp once
    let intensity = (sample.base_intensity * factor * (1.0 + noise))
        .clamp(cfg.background_floor, 1.0);

    let glow = if active.contains(EffectSet::GLOW_PULSE) {
        let wave = sine_unit(sample.elapsed_ms, cfg.glow_period_ms);
        sample.base_glow * (cfg.glow_floor + (1.0 - cfg.glow_floor) * wave)
    } else {
        sample.base_glow
    };

    PixelLevels { intensity, glow }
}
