//! Animation driver & frame clock
//!
//! Owns the mutable animation state, reconciles configuration changes and
//! writes pixel intensities to the rendering surface once per host frame
//! callback. Single-threaded and cooperative: nothing here blocks, spawns
//! or locks; cancellation is synchronous.
//!
//! Reconfiguration policy: equality is structural, never reference-based. A
//! change to `text`, `base_pattern` or `ms_per_pixel` rebuilds the timing
//! table and rewinds the clock; a change that only touches effects (or a
//! reactive transition whose resolved pattern matches the running one) is a
//! live swap with no clock reset and no visible interruption.

mod clock;
mod config;

use crate::effects::{self, EffectSet, PixelSample};
use crate::glyphs::{GlyphTable, COLS, ROWS};
use crate::pattern::{PatternId, PatternTable};
use crate::reactive::{self, ReactiveSignals, ResolvedConfig, SignalDebouncer};
use crate::surface::RenderSurface;

pub use clock::FrameClock;
pub use config::{ConfigUpdate, DisplayConfig};

/// Driver lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Not ticking; state preserved and resumable.
    #[default]
    Stopped,
    /// Frame loop active.
    Running,
    /// Terminal state; every further operation is a no-op.
    Destroyed,
}

/// Read-only driver snapshot for introspection and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSnapshot {
    /// Current lifecycle state.
    pub state: DriverState,
    /// Whether the frame loop is active.
    pub is_running: bool,
    /// Reveal pattern currently running (post reactive resolution).
    pub pattern: PatternId,
    /// Effects currently applied.
    pub effects: EffectSet,
    /// Milliseconds since the current animation started.
    pub elapsed_ms: f64,
    /// Frames ticked since driver creation.
    pub frame: u64,
    /// Full restarts performed since driver creation.
    pub restart_count: u64,
}

/// Drives the reveal animation against a rendering surface.
///
/// Generic over the surface backend: the driver computes levels, the
/// surface decides what a pixel is.
#[derive(Debug)]
pub struct AnimationDriver<S: RenderSurface> {
    config: DisplayConfig,
    resolved: ResolvedConfig,
    table: Option<PatternTable>,
    clock: FrameClock,
    debouncer: SignalDebouncer,
    state: DriverState,
    restart_count: u64,
    glyphs: &'static GlyphTable,
    surface: S,
}

impl<S: RenderSurface> AnimationDriver<S> {
    /// Create a driver for `config`, writing to `surface`.
    ///
    /// The configuration is sanitized (clamped) on the way in; nothing is
    /// rejected.
    pub fn new(config: DisplayConfig, surface: S) -> Self {
        let config = config.sanitized();
        let resolved = reactive::resolve(&config.reactive, config.base_pattern);
        let debouncer = SignalDebouncer::new(config.debounce_ms);
        AnimationDriver {
            config,
            resolved,
            table: None,
            clock: FrameClock::new(),
            debouncer,
            state: DriverState::Stopped,
            restart_count: 0,
            glyphs: GlyphTable::global(),
            surface,
        }
    }

    /// Begin (or resume) the frame loop.
    ///
    /// Builds the timing table on first start; resuming after [`stop`]
    /// keeps the elapsed clock. No-op while running or destroyed.
    ///
    /// [`stop`]: AnimationDriver::stop
    pub fn start(&mut self) {
        if self.state != DriverState::Stopped {
            return;
        }
        if self.table.is_none() {
            self.build_table();
            self.clock.reset();
        }
        self.state = DriverState::Running;
    }

    /// Halt the frame loop, preserving state. No-op unless running.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
        }
    }

    /// Rewind to the start of the reveal: rebuild the table and zero the
    /// clock. No-op once destroyed.
    pub fn reset(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.restart();
    }

    /// Tear down: cancel pending debounce, release the timing table, refuse
    /// all further operations. Idempotent.
    pub fn destroy(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.state = DriverState::Destroyed;
        self.debouncer.cancel();
        self.table = None;
    }

    /// Advance one frame by `delta_ms` and render every pixel.
    ///
    /// Debounced reactive changes are applied here, before the frame
    /// renders, so a single frame always sees one consistent configuration.
    /// No-op unless running.
    pub fn tick(&mut self, delta_ms: f64) {
        if self.state != DriverState::Running {
            return;
        }
        if let Some(signals) = self.debouncer.poll(self.clock.total_ms()) {
            self.apply_signals(signals);
        }
        self.clock.advance(delta_ms);
        self.render_frame();
    }

    /// Apply a partial configuration change.
    ///
    /// Field values are diffed structurally; identical values are a no-op.
    /// `text` / `base_pattern` / `ms_per_pixel` changes trigger a full
    /// restart, `effects` swaps live, `reactive` goes through the debouncer.
    /// No-op once destroyed.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        if self.state == DriverState::Destroyed {
            return;
        }

        let mut table_dirty = false;

        if let Some(text) = update.text {
            if text != self.config.text {
                self.config.text = text;
                table_dirty = true;
            }
        }
        if let Some(pattern) = update.base_pattern {
            if pattern != self.config.base_pattern {
                self.config.base_pattern = pattern;
                table_dirty = true;
            }
        }
        if let Some(ms) = update.ms_per_pixel {
            let ms = ms.max(1);
            if ms != self.config.ms_per_pixel {
                self.config.ms_per_pixel = ms;
                table_dirty = true;
            }
        }
        if let Some(window) = update.debounce_ms {
            self.config.debounce_ms = window.clamp(0.0, 5000.0);
            self.debouncer.set_window_ms(self.config.debounce_ms);
        }
        if let Some(effects) = update.effects {
            // Live swap: no clock reset, no table rebuild
            self.config.effects = effects.sanitized();
        }
        if let Some(signals) = update.reactive {
            self.push_signals(signals);
        }

        if table_dirty {
            self.resolved = reactive::resolve(&self.config.reactive, self.config.base_pattern);
            self.restart();
        }
    }

    /// Push a reactive signal change (debounced).
    ///
    /// The change surfaces at the next frame boundary after the coalescing
    /// window; bursts collapse to the last push. No-op once destroyed.
    pub fn update_reactive(&mut self, signals: ReactiveSignals) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.push_signals(signals);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Read-only snapshot of the running configuration and clocks.
    pub fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot {
            state: self.state,
            is_running: self.state == DriverState::Running,
            pattern: self.resolved.pattern,
            effects: self.resolved.effects,
            elapsed_ms: self.clock.elapsed_ms(),
            frame: self.clock.frame_count(),
            restart_count: self.restart_count,
        }
    }

    /// Current (sanitized) configuration.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface (presentation calls).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the driver and hand the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn push_signals(&mut self, signals: ReactiveSignals) {
        // A push equal to the applied state with nothing pending is a no-op;
        // otherwise the latest push wins and re-arms the window.
        if signals != self.config.reactive || self.debouncer.is_pending() {
            self.debouncer.push(signals, self.clock.total_ms());
        }
    }

    fn apply_signals(&mut self, signals: ReactiveSignals) {
        self.config.reactive = signals;
        let next = reactive::resolve(&signals, self.config.base_pattern);
        let pattern_changed = next.pattern != self.resolved.pattern;
        self.resolved = next;
        if pattern_changed {
            // Reveal order changed: progress cannot be preserved
            self.restart();
        }
    }

    fn build_table(&mut self) {
        self.table = Some(PatternTable::build(
            self.config.text.chars().count(),
            self.resolved.pattern,
            self.config.ms_per_pixel,
        ));
    }

    fn restart(&mut self) {
        self.build_table();
        self.clock.reset();
        self.restart_count += 1;
    }

    fn render_frame(&mut self) {
        let Some(table) = self.table.as_ref() else {
            return;
        };
        let cfg = self.config.effects;
        let active = self.resolved.effects;
        let elapsed = self.clock.elapsed_ms();
        let ms_per_pixel = table.ms_per_pixel();
        let glyphs = self.glyphs;
        let surface = &mut self.surface;

        surface.begin_frame(table.text_len());
        for (char_index, ch) in self.config.text.chars().enumerate() {
            let glyph = glyphs.get(ch);
            for row in 0..ROWS {
                for col in 0..COLS {
                    let Some(timing) = table.get(char_index, row, col) else {
                        continue;
                    };
                    let pixel_elapsed = elapsed - timing.start_offset_ms as f64;
                    let lit_cell = glyph.pixel(row, col);
                    let fully_lit = lit_cell && pixel_elapsed >= f64::from(ms_per_pixel);

                    // Dark glyph cells hold the background floor; lit cells
                    // ramp linearly across their fade-in window.
                    let base = if lit_cell {
                        let ramp = (pixel_elapsed / f64::from(ms_per_pixel)).clamp(0.0, 1.0);
                        cfg.background_floor + (1.0 - cfg.background_floor) * ramp as f32
                    } else {
                        cfg.background_floor
                    };

                    let sample = PixelSample {
                        base_intensity: base,
                        base_glow: cfg.base_glow,
                        elapsed_ms: elapsed,
                        pixel_elapsed_ms: pixel_elapsed,
                        ms_per_pixel,
                        fully_lit,
                    };
                    let levels = effects::apply(&sample, active, &cfg);
                    surface.set_pixel(char_index, row, col, levels.intensity, levels.glow);
                }
            }
        }
        surface.end_frame();
    }
}
