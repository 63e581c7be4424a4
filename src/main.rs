//! Hanafuda Pon: hanafuda tile-matching game in the terminal.

mod app;
mod input;
mod logging;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};
use hanafuda_pon::GameConfig;
use log::LevelFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        logging::init(path, args.log_level.into())?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_else(|e| {
        log::warn!("theme not loaded, using defaults: {e}");
        theme::Theme::default()
    });
    let config = GameConfig {
        seed: args.seed,
        spawn_interval: args.spawn_interval,
        min_spawn_interval: args.min_spawn_interval.min(args.spawn_interval),
    };
    let mut app = App::new(args, config, theme);
    app.run()?;
    Ok(())
}

/// Hanafuda tile-matching puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "hanafuda-pon",
    version,
    about = "Hanafuda matching game in the terminal. Pick cards that form combos before the grid fills up.",
    long_about = "Hanafuda Pon is a real-time matching game played with the 48 hanafuda cards.\n\n\
        Cards appear on an 8x4 grid, faster and faster. Select up to three cards; a scoring \
        combination clears them. Three cards that form nothing are simply deselected. The \
        round ends when all 32 cells are full.\n\n\
        COMBOS:\n  Boar-Deer-Butterfly 2000   ThreeBrights 1000 (doubles score for 20 s)\n  \
        BlueRibbons / RedRibbons 800   Viewing-Blossoms / Viewing-Moon 500 (two cards)\n  \
        SameMonth (three of one month) 100\n\n\
        CONTROLS:\n  Mouse       Click a card    Arrows/hjkl  Move cursor\n  Space/Enter Toggle card     R            Restart    Q / Esc  Quit"
)]
pub struct Args {
    /// RNG seed for a reproducible deal. Random if not set.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Game steps per second; all timers count in steps.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub fps: f64,

    /// Steps between spawns at round start.
    #[arg(long, default_value = "90", value_name = "STEPS")]
    pub spawn_interval: u32,

    /// Shortest spawn interval reached as the round speeds up.
    #[arg(long, default_value = "30", value_name = "STEPS")]
    pub min_spawn_interval: u32,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Skip the title screen and start a round immediately.
    #[arg(long)]
    pub no_title: bool,

    /// Disable the fade effect on cleared cards.
    #[arg(long)]
    pub no_animation: bool,

    /// Write logs to this file (nothing is logged otherwise).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<std::path::PathBuf>,

    /// Log level used with --log-file.
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}
