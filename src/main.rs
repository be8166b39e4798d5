use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::{AppConfig, ConfigSource, LogConfig};
use connect_four::ui::App;

/// Play two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Skip the how-to-play screen
    #[arg(long)]
    no_instructions: bool,

    /// Quit automatically once the game is won or drawn
    #[arg(long)]
    exit_on_game_over: bool,

    /// Override the log level (off, error, warn, info, debug, trace).
    /// Levels above warn log to connect_four.log unless --log-file is given
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let (mut config, source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.no_instructions {
        config.ui.show_instructions = false;
    }
    if cli.exit_on_game_over {
        config.ui.exit_on_game_over = true;
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    if let Some(path) = cli.log_file {
        config.log.file = Some(path);
    }
    config.validate().context("invalid configuration")?;

    init_logger(&config.log)?;
    match source {
        ConfigSource::File => log::info!("loaded config from {}", cli.config.display()),
        ConfigSource::Defaults => log::warn!(
            "config file '{}' not found, using defaults",
            cli.config.display()
        ),
    }
    log::info!("starting with {:?}", config.ui);

    run(App::new(config.ui)).context("terminal error")
}

/// Set up env_logger from the config; RUST_LOG takes precedence.
fn init_logger(config: &LogConfig) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.level_filter()?);
    builder.parse_default_env();

    let env_override = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    if let Some(path) = config.output_file(env_override)? {
        let file = File::create(&path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("initialising logger")
}

fn run(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;

    let res = execute!(io::stdout(), EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())))
        .and_then(|mut terminal| {
            let res = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            res
        });

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);

    res
}
