//! Pixel-reveal animation engine for LED-style text displays
//!
//! Drives a pixel-addressable LED-style text display: given a string, it
//! reveals each character's 7x5 pixel grid in one of several deterministic
//! orders, layers composable per-pixel effects on top, and reconfigures
//! itself live in response to pushed operational-state signals without
//! discarding animation progress unless the reveal order itself changes.
//!
//! # Features
//! - 8 deterministic reveal patterns with exact, testable timing arithmetic
//! - Composable blink/pulsate/flicker/glow effects with a fixed combination rule
//! - Reactive processing/error/success signals with debounced reconfiguration
//! - Restart-avoidance: effect-only changes hot-swap without a clock reset
//! - Render-surface trait for terminal, capture, or custom LED backends
//! - Timing-table CSV export and JSON configuration presets
//!
//! # Crate feature flags
//! - `engine` (default): pattern timing, effect processing, glyph table
//! - `driver` (default): animation driver and reactive state manager (`driver`, `reactive`)
//! - `visualization` (default): terminal visualization helpers (`visualization`)
//! - `terminal` (opt-in): crossterm rendering surface and the `ledtext` demo binary
//!
//! # Quick start
//! ## Timing table only
//! ```
//! use ledtext::pattern::{self, PatternId};
//! let timing = pattern::timing_for(0, 3, 2, PatternId::Spiral, 30);
//! assert_eq!(timing.start_offset_ms, 0); // spiral starts at the center cell
//! ```
//!
//! ## Run the driver against a capture surface
//! ```
//! use ledtext::driver::{AnimationDriver, DisplayConfig};
//! use ledtext::surface::FrameCapture;
//!
//! let config = DisplayConfig::new("HELLO");
//! let mut driver = AnimationDriver::new(config, FrameCapture::new());
//! driver.start();
//! driver.tick(16.0); // host frame callback
//! let frame = driver.surface().handle().latest();
//! assert_eq!(frame.text_len, 5);
//! ```

#![warn(missing_docs)]

// Domain modules (feature-gated for modular use)
pub mod effects; // Per-pixel effect processing
pub mod glyphs; // Character -> pixel grid lookup
pub mod pattern; // Reveal-order timing calculator
pub mod surface; // Rendering surface seam

#[cfg(feature = "driver")]
pub mod driver; // Animation driver & frame clock
#[cfg(feature = "driver")]
pub mod reactive; // Reactive state mapping & debouncing

#[cfg(feature = "terminal")]
pub mod terminal; // Crossterm rendering surface
#[cfg(feature = "visualization")]
pub mod visualization; // Terminal UI helpers

/// Error types for display engine operations
#[derive(thiserror::Error, Debug)]
pub enum LedTextError {
    /// Error while parsing a font definition
    #[error("Font parse error: {0}")]
    FontParse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration preset (de)serialization error
    #[error("Preset error: {0}")]
    Preset(#[from] serde_json::Error),

    /// Timing table export error
    #[error("Timing export error: {0}")]
    Export(#[from] csv::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for LedTextError {
    /// Converts a String into `LedTextError::Other`.
    ///
    /// This is a convenience conversion for generic string errors. All string
    /// errors land in the `Other` variant, losing semantic information about
    /// the error type; prefer the specific variant constructors
    /// (`FontParse`, `ConfigError`) where the category is known.
    fn from(msg: String) -> Self {
        LedTextError::Other(msg)
    }
}

impl From<&str> for LedTextError {
    /// Converts a string slice into `LedTextError::Other`.
    ///
    /// See [`From<String>`] for guidance on when to use explicit variant
    /// constructors instead.
    fn from(msg: &str) -> Self {
        LedTextError::Other(msg.to_string())
    }
}

/// Result type for display engine operations
pub type Result<T> = std::result::Result<T, LedTextError>;

// Public API exports
pub use effects::{EffectConfig, EffectSet, PixelLevels, PixelSample};
pub use glyphs::{Glyph, GlyphTable, COLS, PIXELS_PER_CHAR, ROWS};
pub use pattern::{PatternId, PatternTable, PixelTiming};
pub use surface::{FrameCapture, NullSurface, RenderSurface};

#[cfg(feature = "driver")]
pub use driver::{AnimationDriver, ConfigUpdate, DisplayConfig, DriverSnapshot, DriverState};
#[cfg(feature = "driver")]
pub use reactive::{DisplayState, ReactiveSignals, ResolvedConfig, SignalDebouncer};

#[cfg(feature = "terminal")]
pub use terminal::TerminalSurface;
#[cfg(feature = "visualization")]
pub use visualization::create_intensity_bar;
