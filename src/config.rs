//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`ROOT`, `--log-dir`) and an explicit `--config` file
//! 2. `$NXFB_CONFIG` environment variable (path to config file)
//! 3. Project-local `.nxfb.toml` in the current working directory
//! 4. Global `~/.config/nxfb/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::volume::DEFAULT_DEVICE_PREFIX;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Host directory mounted as `/` (overridden by CLI positional arg).
    pub root: Option<String>,
    /// Prefix treated as an alias of the root, e.g. `sdmc:`.
    pub device_prefix: Option<String>,
    /// Frame length in milliseconds.
    pub tick_rate_ms: Option<u64>,
}

/// Popup timing, in frames.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PopupConfig {
    /// Lifetime of success messages; 0 waits for input.
    pub message_ticks: Option<u32>,
    /// Lifetime of failure messages; 0 waits for input.
    pub error_ticks: Option<u32>,
}

/// External programs backing the launch and install actions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CapabilitiesConfig {
    pub launch_command: Option<String>,
    pub install_command: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: Option<String>,
    /// Directory receiving the rolling log files.
    pub dir: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub popup: PopupConfig,
    pub capabilities: CapabilitiesConfig,
    pub log: LogConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default frame length (about 60 frames per second).
pub const DEFAULT_TICK_RATE_MS: u64 = 16;
/// Default lifetime of success popups (two seconds at 60 fps).
pub const DEFAULT_MESSAGE_TICKS: u32 = 120;
/// Default lifetime of failure popups: wait for input.
pub const DEFAULT_ERROR_TICKS: u32 = 0;
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Config files to probe, highest priority first.
///
/// The explicit `--config` file is layered on separately in `load`.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("NXFB_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".nxfb.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("nxfb").join("config.toml"));
    }

    paths
}

/// Read one config file. Missing files yield `None`; unparseable ones
/// also yield `None` after a warning on stderr.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Layer `other` over `self`; any field set in `other` wins.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                root: other.general.root.clone().or(self.general.root),
                device_prefix: other
                    .general
                    .device_prefix
                    .clone()
                    .or(self.general.device_prefix),
                tick_rate_ms: other.general.tick_rate_ms.or(self.general.tick_rate_ms),
            },
            popup: PopupConfig {
                message_ticks: other.popup.message_ticks.or(self.popup.message_ticks),
                error_ticks: other.popup.error_ticks.or(self.popup.error_ticks),
            },
            capabilities: CapabilitiesConfig {
                launch_command: other
                    .capabilities
                    .launch_command
                    .clone()
                    .or(self.capabilities.launch_command),
                install_command: other
                    .capabilities
                    .install_command
                    .clone()
                    .or(self.capabilities.install_command),
            },
            log: LogConfig {
                level: other.log.level.clone().or(self.log.level),
                dir: other.log.dir.clone().or(self.log.dir),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Host directory to mount as `/`.
    pub fn root(&self) -> &str {
        self.general.root.as_deref().unwrap_or(".")
    }

    pub fn device_prefix(&self) -> &str {
        self.general
            .device_prefix
            .as_deref()
            .unwrap_or(DEFAULT_DEVICE_PREFIX)
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.general.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS)
    }

    pub fn message_ticks(&self) -> u32 {
        self.popup.message_ticks.unwrap_or(DEFAULT_MESSAGE_TICKS)
    }

    pub fn error_ticks(&self) -> u32 {
        self.popup.error_ticks.unwrap_or(DEFAULT_ERROR_TICKS)
    }

    pub fn launch_command(&self) -> Option<&str> {
        self.capabilities.launch_command.as_deref()
    }

    pub fn install_command(&self) -> Option<&str> {
        self.capabilities.install_command.as_deref()
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log directory: configured value, else the platform data dir, else `./logs`.
    pub fn log_dir(&self) -> PathBuf {
        match &self.log.dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .map(|d| d.join("nxfb").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
