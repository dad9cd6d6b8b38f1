mod app;
mod capability;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod logging;
mod overlay;
mod popup;
mod prompt;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::capability::CommandCapability;
use crate::config::{AppConfig, GeneralConfig, LogConfig};
use crate::event::{Event, EventHandler};
use crate::fs::volume::Volume;
use crate::tui::{install_panic_hook, Tui};

/// A controller-style file browser for a single mounted volume.
#[derive(Parser, Debug)]
#[command(name = "nxfb", version, about)]
struct Cli {
    /// Host directory mounted as `/` (defaults to the configured root, then `.`)
    path: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// CLI flags as a partial config layered over every file source.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                root: self.path.as_ref().map(|p| p.display().to_string()),
                ..Default::default()
            },
            log: LogConfig {
                dir: self.log_dir.as_ref().map(|p| p.display().to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let _log_guard = match logging::init(&config.log_dir(), config.log_level()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    // Only a root that cannot be listed is fatal.
    let app = match build_app(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "cannot read filesystem");
            eprintln!("Error: cannot read filesystem: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(app, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "terminal failure");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_app(config: &AppConfig) -> error::Result<App> {
    let volume = Volume::mount(Path::new(config.root()), config.device_prefix())?;
    let mut app = App::new(volume, config.message_ticks(), config.error_ticks())?;

    if let Some(program) = config.launch_command() {
        app = app.with_launcher(Box::new(CommandCapability::new(program)));
    }
    if let Some(program) = config.install_command() {
        app = app.with_installer(Box::new(CommandCapability::new(program)));
    }
    Ok(app)
}

async fn run(mut app: App, config: &AppConfig) -> error::Result<()> {
    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(config.tick_rate_ms()));
    tracing::info!(root = %app.volume.root().display(), "started");

    let result = loop {
        if let Err(e) = tui.terminal_mut().draw(|frame| ui::render(&app, frame)) {
            break Err(e.into());
        }

        match events.next().await {
            Ok(Event::Key(key)) => handler::handle_key_event(&mut app, key),
            Ok(Event::Tick) => app.tick(),
            Ok(Event::Resize(_, _)) => {}
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui.restore()?;
    tracing::info!("exited");
    result
}
