//! Shricktris: falling-block puzzle game in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use shricktris::GameConfig;
use shricktris::config::{DEFAULT_COLUMNS, DEFAULT_ROWS, DEFAULT_STEP_INTERVAL};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path, args.log_level)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_else(|e| {
        log::warn!("theme not loaded, using defaults: {e}");
        theme::Theme::default()
    });
    let config = GameConfig {
        columns: args.columns,
        rows: args.rows,
        step_interval: args.step_interval,
        seed: args.seed,
    };
    let mut app = App::new(&args, config, theme)?;
    app.run()?;
    Ok(())
}

/// Log records go to a file; the terminal belongs to the game.
fn init_logging(path: &Path, level: log::LevelFilter) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "shricktris",
    version,
    about = "Falling-block puzzle game in the terminal. Fill rows to clear them; clearing several at once scores more.",
    long_about = "Shricktris is a falling-block puzzle game for the terminal.\n\n\
        Bricks fall on a fixed cadence. Full rows are cleared and score the square of the \
        number of rows cleared at once. Every clear speeds the game up. The game ends when a \
        new brick has no room to appear.\n\n\
        Keyboard keys to control game:\n\n  \
        P / Pause     pause/continue (also starts the game)\n  \
        q / Esc       quit\n  \
        +             speed up\n  \
        -             speed down\n\n  \
        Cursor left   move left\n         \
        right  move right\n         \
        down   move down\n         \
        up     rotate\n  \
        Space         fall down\n  \
        r             restart after game over"
)]
pub struct Args {
    /// Playfield width in cells. Shrunk to fit the terminal if needed.
    #[arg(long, default_value_t = DEFAULT_COLUMNS, value_name = "COLS")]
    pub columns: u16,

    /// Playfield height in cells. Shrunk to fit the terminal if needed.
    #[arg(long, default_value_t = DEFAULT_ROWS, value_name = "ROWS")]
    pub rows: u16,

    /// Ticks between gravity steps at the start (lower is faster, minimum 1).
    #[arg(long, default_value_t = DEFAULT_STEP_INTERVAL, value_name = "TICKS")]
    pub step_interval: u32,

    /// Game ticks per second.
    #[arg(long, default_value = "12.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Seed for the brick bag (reproducible games).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses the classic colours if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Write log records to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: log::LevelFilter,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_defaults() {
        let args = Args::parse_from(["shricktris"]);
        assert_eq!(args.columns, DEFAULT_COLUMNS);
        assert_eq!(args.rows, DEFAULT_ROWS);
        assert_eq!(args.step_interval, DEFAULT_STEP_INTERVAL);
        assert!((args.tick_rate - 12.0).abs() < f64::EPSILON);
        assert_eq!(args.palette, Palette::Normal);
        assert_eq!(args.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_parse_options() {
        let args = Args::parse_from([
            "shricktris",
            "--columns",
            "10",
            "--seed",
            "7",
            "--palette",
            "contrast",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.columns, 10);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.palette, Palette::HighContrast);
        assert_eq!(args.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
