//! Reactive state mapping & debouncing
//!
//! Maps externally pushed operational signals (processing, error, success)
//! plus the caller's base pattern into a concrete (pattern, effect-set)
//! configuration. Signals carry no pattern or effect knowledge themselves;
//! the mapping policy lives entirely here.
//!
//! Rapid signal bursts are coalesced by [`SignalDebouncer`], a cooperative
//! timer driven by the animation clock: no threads, and the pending change
//! only surfaces at a frame boundary.

use serde::{Deserialize, Serialize};

use crate::effects::EffectSet;
use crate::pattern::PatternId;

/// Operational state booleans pushed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactiveSignals {
    /// Master switch; all other flags are ignored while false.
    pub enabled: bool,
    /// A request or task is in flight.
    pub is_processing: bool,
    /// The last operation failed.
    pub has_error: bool,
    /// The last operation completed successfully.
    pub is_success: bool,
}

impl ReactiveSignals {
    /// Signals for an idle, enabled display.
    pub fn idle() -> Self {
        ReactiveSignals {
            enabled: true,
            ..ReactiveSignals::default()
        }
    }
}

/// Operational display state derived from the signal flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    /// Nothing in flight; the resting animation.
    #[default]
    Idle,
    /// Work in flight; highest priority.
    Processing,
    /// Failure indication; outranks success.
    Error,
    /// Completion indication.
    Success,
}

impl DisplayState {
    /// Derive the state from raw signals.
    ///
    /// Priority when several flags are simultaneously true:
    /// `Processing > Error > Success > Idle`. A disabled signal block always
    /// resolves to `Idle`.
    pub fn from_signals(signals: &ReactiveSignals) -> Self {
        if !signals.enabled {
            DisplayState::Idle
        } else if signals.is_processing {
            DisplayState::Processing
        } else if signals.has_error {
            DisplayState::Error
        } else if signals.is_success {
            DisplayState::Success
        } else {
            DisplayState::Idle
        }
    }
}

/// Concrete configuration resolved from signals and the base pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Reveal pattern to run.
    pub pattern: PatternId,
    /// Effects to layer on top.
    pub effects: EffectSet,
}

/// Map signals and the caller's base pattern to a runnable configuration.
///
/// Every state except `Error` preserves the caller's chosen reveal order;
/// `Error` switches to `sequential` as an intentional visual disruption.
pub fn resolve(signals: &ReactiveSignals, base_pattern: PatternId) -> ResolvedConfig {
    match DisplayState::from_signals(signals) {
        DisplayState::Idle => ResolvedConfig {
            pattern: base_pattern,
            effects: EffectSet::PULSATE,
        },
        DisplayState::Processing => ResolvedConfig {
            pattern: base_pattern,
            effects: EffectSet::BLINK | EffectSet::PULSATE,
        },
        DisplayState::Success => ResolvedConfig {
            pattern: base_pattern,
            effects: EffectSet::GLOW_PULSE,
        },
        DisplayState::Error => ResolvedConfig {
            pattern: PatternId::Sequential,
            effects: EffectSet::FLICKER,
        },
    }
}

/// Default coalescing window for signal bursts, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: f64 = 100.0;

/// Cooperative coalescing timer for reactive signal pushes.
///
/// Each push records the latest signals and re-arms the window; only the
/// last push within the window surfaces from [`SignalDebouncer::poll`].
/// Time is supplied by the caller (the driver's monotonic clock), so the
/// debouncer itself never blocks or spawns anything.
#[derive(Debug, Clone)]
pub struct SignalDebouncer {
    window_ms: f64,
    pending: Option<ReactiveSignals>,
    deadline_ms: f64,
}

impl SignalDebouncer {
    /// Create a debouncer with the given window, clamped to `[0, 5000]` ms.
    pub fn new(window_ms: f64) -> Self {
        SignalDebouncer {
            window_ms: window_ms.clamp(0.0, 5000.0),
            pending: None,
            deadline_ms: 0.0,
        }
    }

    /// Record a signal push at `now_ms`, re-arming the window.
    pub fn push(&mut self, signals: ReactiveSignals, now_ms: f64) {
        self.pending = Some(signals);
        self.deadline_ms = now_ms + self.window_ms;
    }

    /// Take the pending signals once the window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<ReactiveSignals> {
        if self.pending.is_some() && now_ms >= self.deadline_ms {
            self.pending.take()
        } else {
            None
        }
    }

    /// Whether a push is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending push.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Configured window length.
    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Change the window, keeping any pending push and its deadline.
    pub fn set_window_ms(&mut self, window_ms: f64) {
        self.window_ms = window_ms.clamp(0.0, 5000.0);
    }
}

impl Default for SignalDebouncer {
    fn default() -> Self {
        SignalDebouncer::new(DEFAULT_DEBOUNCE_MS)
    }
}
