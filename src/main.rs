use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use groundzero::{EngineConfig, PageKind, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "groundzero", about = "Browse the Ground Zero pages in the terminal")]
struct Args {
    /// Page to open: home, about, contact, services or tutor. Unknown names are an error
    #[arg(long, default_value = "home")]
    page: PageKind,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show final values immediately instead of animating
    #[arg(long)]
    reduced_motion: bool,

    /// Log file; the terminal itself is taken by the page
    #[arg(long, default_value = "groundzero.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let (width, height) = terminal::size().context("failed to read terminal size")?;
    info!(page = %args.page, width, height, reduced_motion = args.reduced_motion, "starting");

    TerminalApp::new(args.page, &config, args.reduced_motion, width, height)
        .context("failed to build page")?
        .run()
        .context("terminal app failed")?;

    Ok(())
}
