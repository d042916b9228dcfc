use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_AGRICONTRACT_CONFIG: &str = "AGRICONTRACT_CONFIG";

const THEME_DARK: &str = "dark";
const THEME_LIGHT: &str = "light";
const DEFAULT_UI_THEME: &str = THEME_DARK;
const DEFAULT_UI_TICK_RATE_MS: u64 = 100;
const MAX_UI_TICK_RATE_MS: u64 = 1_000;
const DEFAULT_COUNTERPARTY_REPLY_DELAY_MS: u64 = 2_000;
const DEFAULT_COUNTERPARTY_SIGNATURE_DELAY_MS: u64 = 2_000;
const DEFAULT_PAYMENT_STEP_DELAY_MS: u64 = 1_500;
const DEFAULT_LISTING_SUBMIT_DELAY_MS: u64 = 2_000;
const MAX_SIMULATED_DELAY_MS: u64 = 60_000;
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_NAME: &str = "agricontract.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),
}

impl ConfigError {
    fn configuration(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AgriContractConfig {
    #[serde(default)]
    pub ui: UiConfigToml,
    #[serde(default)]
    pub simulation: SimulationConfigToml,
    #[serde(default)]
    pub logging: LoggingConfigToml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiViewConfig {
    pub theme: String,
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRuntimeConfig {
    pub counterparty_reply_delay_ms: u64,
    pub counterparty_signature_delay_ms: u64,
    pub payment_step_delay_ms: u64,
    pub listing_submit_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingRuntimeConfig {
    pub log_path: PathBuf,
    pub filter: String,
}

impl AgriContractConfig {
    pub fn ui_view(&self) -> UiViewConfig {
        UiViewConfig {
            theme: self.ui.theme.clone(),
            tick_rate_ms: self.ui.tick_rate_ms,
        }
    }

    pub fn simulation(&self) -> SimulationRuntimeConfig {
        SimulationRuntimeConfig {
            counterparty_reply_delay_ms: self.simulation.counterparty_reply_delay_ms,
            counterparty_signature_delay_ms: self.simulation.counterparty_signature_delay_ms,
            payment_step_delay_ms: self.simulation.payment_step_delay_ms,
            listing_submit_delay_ms: self.simulation.listing_submit_delay_ms,
            rng_seed: self.simulation.rng_seed,
        }
    }

    pub fn logging(&self) -> LoggingRuntimeConfig {
        LoggingRuntimeConfig {
            log_path: PathBuf::from(self.logging.log_path.as_str()),
            filter: self.logging.filter.clone(),
        }
    }
}

pub fn load_from_env() -> Result<AgriContractConfig, ConfigError> {
    let path = config_path_from_env()?;
    load_from_path(path)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<AgriContractConfig, ConfigError> {
    load_or_create_config(path.as_ref())
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = resolve_home_dir().ok_or_else(|| {
        ConfigError::configuration("Unable to resolve home directory from HOME or USERPROFILE")
    })?;

    Ok(home
        .join(".config")
        .join("agricontract")
        .join("config.toml"))
}

fn config_path_from_env() -> Result<PathBuf, ConfigError> {
    match std::env::var(ENV_AGRICONTRACT_CONFIG) {
        Ok(raw) => {
            if raw.trim().is_empty() {
                default_config_path()
            } else {
                Ok(raw.into())
            }
        }
        Err(std::env::VarError::NotPresent) => default_config_path(),
        Err(_) => Err(ConfigError::configuration(
            "AGRICONTRACT_CONFIG contained invalid UTF-8",
        )),
    }
}

fn default_data_dir() -> PathBuf {
    resolve_data_local_dir().join("agricontract")
}

fn resolve_data_local_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(path) = std::env::var("LOCALAPPDATA") {
            let path = path.trim();
            if !path.is_empty() {
                return absolutize_path(PathBuf::from(path));
            }
        }
        if let Some(home) = resolve_home_dir() {
            return home.join("AppData").join("Local");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = resolve_home_dir() {
            return home.join("Library").join("Application Support");
        }
    }

    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    {
        if let Ok(path) = std::env::var("XDG_DATA_HOME") {
            let path = path.trim();
            if !path.is_empty() {
                return absolutize_path(PathBuf::from(path));
            }
        }
        if let Some(home) = resolve_home_dir() {
            return home.join(".local").join("share");
        }
    }

    std::env::temp_dir()
}

fn resolve_home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("USERPROFILE")
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
}

fn absolutize_path(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }

    if let Ok(current) = std::env::current_dir() {
        return current.join(path);
    }

    std::env::temp_dir().join(path)
}

fn default_log_path() -> String {
    default_data_dir()
        .join(LOG_FILE_NAME)
        .to_string_lossy()
        .to_string()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

fn default_ui_theme() -> String {
    DEFAULT_UI_THEME.to_owned()
}

fn default_ui_tick_rate_ms() -> u64 {
    DEFAULT_UI_TICK_RATE_MS
}

fn default_counterparty_reply_delay_ms() -> u64 {
    DEFAULT_COUNTERPARTY_REPLY_DELAY_MS
}

fn default_counterparty_signature_delay_ms() -> u64 {
    DEFAULT_COUNTERPARTY_SIGNATURE_DELAY_MS
}

fn default_payment_step_delay_ms() -> u64 {
    DEFAULT_PAYMENT_STEP_DELAY_MS
}

fn default_listing_submit_delay_ms() -> u64 {
    DEFAULT_LISTING_SUBMIT_DELAY_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfigToml {
    #[serde(default = "default_ui_theme")]
    pub theme: String,
    #[serde(default = "default_ui_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfigToml {
    fn default() -> Self {
        Self {
            theme: default_ui_theme(),
            tick_rate_ms: default_ui_tick_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfigToml {
    #[serde(default = "default_counterparty_reply_delay_ms")]
    pub counterparty_reply_delay_ms: u64,
    #[serde(default = "default_counterparty_signature_delay_ms")]
    pub counterparty_signature_delay_ms: u64,
    #[serde(default = "default_payment_step_delay_ms")]
    pub payment_step_delay_ms: u64,
    #[serde(default = "default_listing_submit_delay_ms")]
    pub listing_submit_delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfigToml {
    fn default() -> Self {
        Self {
            counterparty_reply_delay_ms: default_counterparty_reply_delay_ms(),
            counterparty_signature_delay_ms: default_counterparty_signature_delay_ms(),
            payment_step_delay_ms: default_payment_step_delay_ms(),
            listing_submit_delay_ms: default_listing_submit_delay_ms(),
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfigToml {
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfigToml {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            filter: default_log_filter(),
        }
    }
}

fn persist_config(path: &Path, config: &AgriContractConfig) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to serialize AGRICONTRACT_CONFIG for {}: {err}",
            path.display()
        ))
    })?;

    std::fs::write(path, rendered.as_bytes()).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to write AGRICONTRACT_CONFIG to {}: {err}",
            path.display()
        ))
    })
}

fn load_or_create_config(path: &Path) -> Result<AgriContractConfig, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|err| {
                        ConfigError::configuration(format!(
                            "Failed to create parent directory {} for AGRICONTRACT_CONFIG: {err}",
                            parent.display()
                        ))
                    })?;
                }
            }

            let default_config = AgriContractConfig::default();
            persist_config(path, &default_config)?;
            return Ok(default_config);
        }
        Err(err) => {
            return Err(ConfigError::configuration(format!(
                "Failed to read AGRICONTRACT_CONFIG from {}: {err}",
                path.display()
            )));
        }
    };

    let mut config: AgriContractConfig = toml::from_str(&raw).map_err(|err| {
        ConfigError::configuration(format!(
            "Failed to parse AGRICONTRACT_CONFIG from {}: {err}",
            path.display()
        ))
    })?;

    if normalize_config(&mut config) {
        persist_config(path, &config)?;
    }

    Ok(config)
}

fn normalize_config(config: &mut AgriContractConfig) -> bool {
    let mut changed = false;

    let theme = normalize_theme(&config.ui.theme);
    if theme != config.ui.theme {
        config.ui.theme = theme;
        changed = true;
    }
    if config.ui.tick_rate_ms == 0 {
        config.ui.tick_rate_ms = DEFAULT_UI_TICK_RATE_MS;
        changed = true;
    }
    changed |= clamp_u64(&mut config.ui.tick_rate_ms, MAX_UI_TICK_RATE_MS);

    let simulation = &mut config.simulation;
    for delay in [
        &mut simulation.counterparty_reply_delay_ms,
        &mut simulation.counterparty_signature_delay_ms,
        &mut simulation.payment_step_delay_ms,
        &mut simulation.listing_submit_delay_ms,
    ] {
        changed |= clamp_u64(delay, MAX_SIMULATED_DELAY_MS);
    }

    if config.logging.log_path.trim().is_empty() {
        config.logging.log_path = default_log_path();
        changed = true;
    }
    if config.logging.filter.trim().is_empty() {
        config.logging.filter = default_log_filter();
        changed = true;
    }

    changed
}

fn normalize_theme(value: &str) -> String {
    let candidate = value.trim().to_ascii_lowercase();
    match candidate.as_str() {
        THEME_DARK | THEME_LIGHT => candidate,
        _ => default_ui_theme(),
    }
}

fn clamp_u64(value: &mut u64, max: u64) -> bool {
    if *value > max {
        *value = max;
        return true;
    }
    false
}
