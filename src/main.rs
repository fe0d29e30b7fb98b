use std::fs::File;
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_bot::game::GameConfig;
use snake_bot::modes::{run_setup, HeadlessRunner, PlayMode, Session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_bot")]
#[command(version, about = "Snake game with an A* autopilot")]
struct Cli {
    /// Who steers the snake; prompts for everything when left out
    #[arg(long)]
    mode: Option<Mode>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Game speed; ticks are 500/speed milliseconds apart
    #[arg(long)]
    speed: Option<f32>,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with a game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run autopilot games without a terminal UI
    #[arg(long)]
    headless: bool,

    /// Number of games to play in headless mode
    #[arg(long, default_value = "1")]
    games: usize,

    /// Print headless results as JSON
    #[arg(long)]
    json: bool,

    /// Write logs to this file (the terminal UI owns stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Player,
    /// Let the pathfinding agent play
    Bot,
}

impl Cli {
    /// True when nothing about the game was given on the command line
    fn wants_prompts(&self) -> bool {
        self.mode.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.speed.is_none()
            && self.config.is_none()
    }

    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config = config.with_speed(speed);
        }
        if let Some(mode) = self.mode {
            config.autonomous = matches!(mode, Mode::Bot);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {:?}", path))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if to_stderr {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.headless)?;

    if cli.headless {
        let config = cli.game_config()?.with_autonomous(true);
        let reports = HeadlessRunner::new(config, cli.games).run()?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            println!("{}", HeadlessRunner::summarize(&reports));
        }
        return Ok(());
    }

    let session = if cli.wants_prompts() {
        let mut defaults = GameConfig::default();
        defaults.seed = cli.seed;
        run_setup(defaults, &mut stdin().lock(), &mut stdout())?
    } else {
        Session::playing(cli.game_config()?)
    };

    let mut play_mode = PlayMode::new(session)?;
    play_mode.run().await?;

    Ok(())
}
