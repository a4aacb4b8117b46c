//! Demo player for the LED text animation engine.
//!
//! Reveals a text in the terminal with the selected pattern and effect
//! configuration, optionally cycling through the reactive states to show
//! live reconfiguration. Exit with `q`, `Esc` or `Ctrl-C`.

use std::env;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use num_traits::FromPrimitive;

use ledtext::driver::{AnimationDriver, DisplayConfig};
use ledtext::pattern::{write_timing_csv, PatternId, PatternTable};
use ledtext::reactive::ReactiveSignals;
use ledtext::terminal::{self, TerminalSurface};

/// Parsed command-line arguments.
#[derive(Debug, Default)]
struct CliArgs {
    /// Text to display (defaults to "LEDTEXT").
    text: Option<String>,
    /// Reveal pattern override.
    pattern: Option<PatternId>,
    /// Per-pixel fade duration override.
    ms_per_pixel: Option<u32>,
    /// JSON preset to start from.
    config_path: Option<String>,
    /// Write the timing table as CSV and exit.
    dump_timing: Option<String>,
    /// Cycle idle -> processing -> success -> error while running.
    demo_reactive: bool,
    /// Whether help was requested.
    show_help: bool,
}

impl CliArgs {
    /// Parse arguments from the command line.
    fn parse() -> Result<Self> {
        let mut args = Self::default();
        let mut iter = env::args().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => {
                    args.show_help = true;
                }
                "--pattern" => {
                    let value = iter
                        .next()
                        .context("--pattern requires a name or index (see --help)")?;
                    args.pattern = Some(parse_pattern(&value)?);
                }
                "--ms-per-pixel" => {
                    let value = iter.next().context("--ms-per-pixel requires a number")?;
                    let ms: u32 = value
                        .parse()
                        .with_context(|| format!("invalid --ms-per-pixel value '{value}'"))?;
                    args.ms_per_pixel = Some(ms);
                }
                "--config" => {
                    args.config_path = Some(iter.next().context("--config requires a path")?);
                }
                "--dump-timing" => {
                    args.dump_timing = Some(iter.next().context("--dump-timing requires a path")?);
                }
                "--demo-reactive" => {
                    args.demo_reactive = true;
                }
                other if other.starts_with("--") => {
                    bail!("unknown option '{other}' (see --help)");
                }
                text => {
                    args.text = Some(text.to_string());
                }
            }
        }

        Ok(args)
    }
}

fn parse_pattern(value: &str) -> Result<PatternId> {
    if let Some(pattern) = PatternId::from_name(value) {
        return Ok(pattern);
    }
    if let Ok(index) = value.parse::<usize>() {
        if let Some(pattern) = PatternId::from_usize(index) {
            return Ok(pattern);
        }
    }
    bail!(
        "unknown pattern '{value}'; expected one of {} or an index 0-7",
        PatternId::ALL.map(|p| p.as_str()).join(", ")
    );
}

fn print_help() {
    println!("LED text display demo");
    println!();
    println!("Usage: ledtext [OPTIONS] [TEXT]");
    println!();
    println!("Options:");
    println!("  --pattern <name|index>   Reveal pattern (sequential, reverse, column, row,");
    println!("                           wave, center-out, spiral, random; or 0-7)");
    println!("  --ms-per-pixel <ms>      Fade-in duration per pixel (default 30)");
    println!("  --config <file.json>     Start from a JSON configuration preset");
    println!("  --dump-timing <file.csv> Write the timing table as CSV and exit");
    println!("  --demo-reactive          Cycle processing/success/error states");
    println!("  -h, --help               Show this help");
    println!();
    println!("Keys: q / Esc / Ctrl-C quit");
}

/// Reactive signals for one phase of the `--demo-reactive` cycle.
fn demo_signals(phase: usize) -> ReactiveSignals {
    match phase {
        1 => ReactiveSignals {
            enabled: true,
            is_processing: true,
            ..ReactiveSignals::default()
        },
        2 => ReactiveSignals {
            enabled: true,
            is_success: true,
            ..ReactiveSignals::default()
        },
        3 => ReactiveSignals {
            enabled: true,
            has_error: true,
            ..ReactiveSignals::default()
        },
        _ => ReactiveSignals::idle(),
    }
}

fn quit_requested() -> Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn run_player(driver: &mut AnimationDriver<TerminalSurface>, demo_reactive: bool) -> Result<()> {
    let mut out = io::stdout();
    let started = Instant::now();
    let mut last_tick = started;
    let mut demo_phase = 0usize;

    driver.start();
    loop {
        if quit_requested()? {
            return Ok(());
        }

        let now = Instant::now();
        let delta_ms = now.duration_since(last_tick).as_secs_f64() * 1000.0;
        last_tick = now;

        driver.tick(delta_ms);
        driver.surface_mut().present(&mut out)?;

        if demo_reactive {
            let phase = (started.elapsed().as_millis() / 2500) as usize % 4;
            if phase != demo_phase {
                demo_phase = phase;
                driver.update_reactive(demo_signals(phase));
            }
        }

        std::thread::sleep(Duration::from_millis(16));
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse()?;
    if args.show_help {
        print_help();
        return Ok(());
    }

    let mut config = match &args.config_path {
        Some(path) => DisplayConfig::load(path)
            .with_context(|| format!("failed to load preset '{path}'"))?,
        None => DisplayConfig::default(),
    };
    if let Some(text) = args.text {
        config.text = text;
    }
    if config.text.is_empty() {
        config.text = "LEDTEXT".to_string();
    }
    if let Some(pattern) = args.pattern {
        config.base_pattern = pattern;
    }
    if let Some(ms) = args.ms_per_pixel {
        config.ms_per_pixel = ms;
    }
    config.reactive.enabled = true;

    if let Some(path) = &args.dump_timing {
        let table = PatternTable::build(
            config.text.chars().count(),
            config.base_pattern,
            config.ms_per_pixel,
        );
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create '{path}'"))?;
        write_timing_csv(&table, file)?;
        println!(
            "timing table for \"{}\" ({}) written to {path}",
            config.text, config.base_pattern
        );
        return Ok(());
    }

    let mut out = io::stdout();
    terminal::prepare_screen(&mut out)?;

    let mut driver = AnimationDriver::new(config, TerminalSurface::at(2, 1));
    let result = run_player(&mut driver, args.demo_reactive);

    driver.destroy();
    terminal::restore_screen(&mut out)?;
    out.flush()?;
    result
}
