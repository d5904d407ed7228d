use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::{FoodPlacement, GameConfig};
use grid_snake::modes::PlayMode;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a square grid")]
struct Cli {
    /// JSON game configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<i32>,

    /// Milliseconds between game ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Never place food on a cell the snake occupies
    #[arg(long)]
    avoid_snake_food: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.avoid_snake_food {
            config.food_placement = FoodPlacement::AvoidSnake;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["grid_snake"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 30, "tick_interval_ms": 100 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let cli = Cli::parse_from([
            "grid_snake",
            "--config",
            path.as_str(),
            "--tick-ms",
            "250",
            "--seed",
            "9",
            "--avoid-snake-food",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.food_placement, FoodPlacement::AvoidSnake);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--grid-size", "5"]);
        let err = cli.game_config().unwrap_err();
        assert!(format!("{err:#}").contains("outside a 5x5 grid"));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let cli = Cli::parse_from(["grid_snake", "--grid-size", "4000"]);
        let err = cli.game_config().unwrap_err();
        assert!(format!("{err:#}").contains("grid size 4000 exceeds the maximum of 100"));
    }
}
