mod analysis;
mod api;
mod config;
mod display;
mod error;

use analysis::dashboard::{ChampionIcons, Dashboard};
use analysis::player_stats::aggregate;
use anyhow::Context;
use api::client::{FileSource, HttpSource, MatchSource};
use clap::{Parser, ValueEnum};
use config::Config;
use display::output::{
    display_error, display_info, display_success, JsonRenderer, Renderer, TerminalRenderer,
};
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "Player Analytics")]
#[command(about = "Summarize a player's tournament match history", long_about = None)]
struct Args {
    /// Player name as used in the scoreboard file name
    player: String,

    /// Directory containing scoreboards/ (default: data, or ANALYTICS_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Fetch scoreboards over HTTP from this base URL instead of the data directory
    #[arg(short, long)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Data Dragon patch used for champion icon URLs
    #[arg(long)]
    icon_version: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }
    if let Some(icon_version) = args.icon_version {
        config.icon_version = icon_version;
    }

    let source: Box<dyn MatchSource> = match &config.base_url {
        Some(url) => {
            display_info(&format!("Fetching match history for {} from {}", args.player, url));
            Box::new(HttpSource::new(url.clone()))
        }
        None => {
            display_info(&format!(
                "Loading match history for {} from {}",
                args.player,
                config.data_dir.display()
            ));
            Box::new(FileSource::new(config.data_dir.clone()))
        }
    };

    let interactive = args.format == OutputFormat::Terminal;
    let spinner = interactive.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Loading scoreboards");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let fetched = source.fetch_matches(&args.player);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let games = fetched.with_context(|| format!("Failed to load player data for {}", args.player))?;

    display_success(&format!("Loaded {} games", games.len()));

    let summary = aggregate(&games);
    let icons = ChampionIcons::new(config.icon_version.clone());
    let dashboard = Dashboard::build(&args.player, &summary, &games, &icons);

    let renderer: Box<dyn Renderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render(&dashboard, &mut out)?;
    out.flush().context("Failed to flush output")?;

    Ok(())
}
