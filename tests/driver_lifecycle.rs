//! End-to-end driver behavior against a capture surface: reveal timing,
//! debounced reactive reconfiguration and the restart-avoidance policy.

#![cfg(feature = "driver")]

use ledtext::driver::{AnimationDriver, ConfigUpdate, DisplayConfig, DriverState};
use ledtext::glyphs::{GlyphTable, COLS, ROWS};
use ledtext::pattern::PatternId;
use ledtext::reactive::ReactiveSignals;
use ledtext::surface::FrameCapture;
use ledtext::EffectSet;

fn wave_driver(text: &str) -> AnimationDriver<FrameCapture> {
    let mut config = DisplayConfig::new(text);
    config.base_pattern = PatternId::Wave;
    config.reactive = ReactiveSignals::idle();
    AnimationDriver::new(config, FrameCapture::new())
}

fn processing() -> ReactiveSignals {
    ReactiveSignals {
        enabled: true,
        is_processing: true,
        ..ReactiveSignals::default()
    }
}

fn error() -> ReactiveSignals {
    ReactiveSignals {
        enabled: true,
        has_error: true,
        ..ReactiveSignals::default()
    }
}

#[test]
fn two_char_text_is_fully_lit_after_total_duration() {
    // text="AB", msPerPixel=30 -> total duration 2 * 35 * 30 = 2100ms
    let mut driver = wave_driver("AB");
    let floor = driver.config().effects.background_floor;
    let pulsate_floor = driver.config().effects.pulsate_floor;
    driver.start();
    driver.tick(2200.0);

    let frame = driver.surface().handle().latest();
    assert_eq!(frame.text_len, 2);

    let glyphs = GlyphTable::global();
    for (char_index, ch) in "AB".chars().enumerate() {
        let glyph = glyphs.get(ch);
        for row in 0..ROWS {
            for col in 0..COLS {
                let intensity = frame.intensity_at(char_index, row, col).unwrap();
                if glyph.pixel(row, col) {
                    // Idle state pulsates fully lit pixels within its band
                    assert!(
                        (pulsate_floor..=1.0).contains(&intensity),
                        "lit cell ({char_index},{row},{col}) at {intensity}"
                    );
                } else {
                    assert_eq!(
                        intensity, floor,
                        "dark cell ({char_index},{row},{col}) must hold the floor"
                    );
                }
            }
        }
    }
}

#[test]
fn reveal_progresses_monotonically_for_first_pixel() {
    let mut config = DisplayConfig::new("T");
    config.reactive = ReactiveSignals::default(); // idle
    config.base_pattern = PatternId::Sequential;
    let mut driver = AnimationDriver::new(config, FrameCapture::new());
    driver.start();

    // First revealed cell of 'T' under sequential order is (0,0)
    driver.tick(10.0);
    let early = driver
        .surface()
        .handle()
        .latest()
        .intensity_at(0, 0, 0)
        .unwrap();
    driver.tick(10.0);
    let later = driver
        .surface()
        .handle()
        .latest()
        .intensity_at(0, 0, 0)
        .unwrap();

    assert!(
        later > early,
        "fade-in must progress: {early} then {later}"
    );
    assert!(later < 1.0, "pixel must still be mid-fade at 20ms of 30ms");
}

#[test]
fn processing_signal_swaps_effects_without_clock_reset() {
    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(50.0);
    assert_eq!(driver.snapshot().effects, EffectSet::PULSATE);
    assert_eq!(driver.snapshot().restart_count, 0);

    driver.update_reactive(processing());

    // Debounce window (100ms) has not elapsed: nothing applied yet
    driver.tick(60.0);
    assert_eq!(driver.snapshot().effects, EffectSet::PULSATE);

    driver.tick(60.0);
    driver.tick(10.0);

    let snap = driver.snapshot();
    assert_eq!(snap.effects, EffectSet::BLINK | EffectSet::PULSATE);
    assert_eq!(snap.pattern, PatternId::Wave, "base pattern must survive");
    assert_eq!(snap.restart_count, 0, "effect-only change must not restart");
    assert_eq!(snap.elapsed_ms, 180.0, "clock must keep running");
}

#[test]
fn text_change_restarts_after_reactive_swap_did_not() {
    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(50.0);

    driver.update_config(ConfigUpdate::new().reactive(processing()));
    driver.tick(120.0);
    assert_eq!(driver.snapshot().restart_count, 0);

    driver.update_config(ConfigUpdate::new().text("NEW"));
    let snap = driver.snapshot();
    assert_eq!(snap.restart_count, 1);
    assert_eq!(snap.elapsed_ms, 0.0);
}

#[test]
fn error_signal_forces_sequential_with_restart() {
    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(500.0);

    driver.update_reactive(error());
    driver.tick(120.0); // past the debounce window
    driver.tick(16.0); // applied at this frame boundary

    let snap = driver.snapshot();
    assert_eq!(snap.pattern, PatternId::Sequential);
    assert_eq!(snap.effects, EffectSet::FLICKER);
    assert_eq!(snap.restart_count, 1, "reveal order changed: full restart");
    assert_eq!(
        snap.elapsed_ms, 16.0,
        "clock rewinds when the pattern changes"
    );

    // Clearing the error returns to the base pattern, restarting again
    driver.update_reactive(ReactiveSignals::idle());
    driver.tick(120.0);
    driver.tick(16.0);
    let snap = driver.snapshot();
    assert_eq!(snap.pattern, PatternId::Wave);
    assert_eq!(snap.restart_count, 2);
}

#[test]
fn signal_bursts_coalesce_to_the_last_push() {
    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(10.0);

    // Rapid toggling within one window: only the error push survives
    driver.update_reactive(processing());
    driver.tick(30.0);
    driver.update_reactive(ReactiveSignals::idle());
    driver.tick(30.0);
    driver.update_reactive(error());
    driver.tick(120.0);
    driver.tick(16.0);

    let snap = driver.snapshot();
    assert_eq!(snap.pattern, PatternId::Sequential);
    assert_eq!(snap.effects, EffectSet::FLICKER);
    assert_eq!(
        snap.restart_count, 1,
        "a coalesced burst must reconfigure exactly once"
    );
}

#[test]
fn stop_resume_destroy_lifecycle() {
    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(40.0);

    driver.stop();
    assert_eq!(driver.state(), DriverState::Stopped);
    let frames_at_stop = driver.surface().handle().latest().frame_index;

    driver.tick(999.0); // ignored while stopped
    assert_eq!(driver.surface().handle().latest().frame_index, frames_at_stop);

    driver.start();
    driver.tick(10.0);
    assert_eq!(driver.snapshot().elapsed_ms, 50.0);

    driver.destroy();
    driver.destroy(); // idempotent
    assert_eq!(driver.state(), DriverState::Destroyed);
    driver.tick(16.0);
    assert_eq!(
        driver.surface().handle().latest().frame_index,
        frames_at_stop + 1,
        "no frames render after destroy"
    );
}

#[test]
fn unsupported_characters_render_via_fallback() {
    let mut config = DisplayConfig::new("\u{263A}"); // not in the font
    config.reactive = ReactiveSignals::idle();
    let mut driver = AnimationDriver::new(config, FrameCapture::new());
    driver.start();
    driver.tick(35.0 * 30.0 + 100.0); // past full reveal

    let frame = driver.surface().handle().latest();
    let pulsate_floor = driver.config().effects.pulsate_floor;
    // Fallback glyph is the full block: every cell is lit
    for row in 0..ROWS {
        for col in 0..COLS {
            let intensity = frame.intensity_at(0, row, col).unwrap();
            assert!(
                intensity >= pulsate_floor,
                "fallback cell ({row},{col}) should be lit, got {intensity}"
            );
        }
    }
}

#[cfg(feature = "visualization")]
#[test]
fn revealed_frame_renders_glyph_shape_as_text() {
    use ledtext::visualization::render_frame_lines;

    let mut driver = wave_driver("HI");
    driver.start();
    driver.tick(2.0 * 35.0 * 30.0 + 100.0);

    let frame = driver.surface().handle().latest();
    let lines = render_frame_lines(&frame);
    assert_eq!(lines.len(), ROWS);

    let glyphs = GlyphTable::global();
    for (char_index, ch) in "HI".chars().enumerate() {
        let glyph = glyphs.get(ch);
        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            for col in 0..COLS {
                let cell = cells[char_index * (COLS + 1) + col];
                if glyph.pixel(row, col) {
                    assert!(
                        cell == '%' || cell == '@',
                        "lit cell ({char_index},{row},{col}) rendered as '{cell}'"
                    );
                } else {
                    assert_eq!(cell, ' ', "dark cell must render as blank");
                }
            }
        }
    }
}
