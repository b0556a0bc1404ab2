use chrono::{FixedOffset, Offset, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

// Default configuration
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_SERVER_ID: &str = "1";
pub const DEFAULT_CHANNEL_ID: &str = "1";
/// The service runs on Korean time
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Environment variable that hands a new access token to the client
pub const ACCESS_TOKEN_ENV: &str = "CHANNEL_CHAT_TOKEN";

const KEYRING_SERVICE: &str = "channel-chat";
const KEYRING_USER: &str = "access-token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    NoProjectDirs,
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub server_id: String,
    pub channel_id: String,
    /// Offset used to decide calendar days and header times
    pub utc_offset_hours: i32,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server_id: DEFAULT_SERVER_ID.to_string(),
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            theme: "dark".to_string(),
        }
    }
}

impl Settings {
    /// Display offset, falling back to UTC for out-of-range hours.
    pub fn display_offset(&self) -> FixedOffset {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                warn!(hours = self.utc_offset_hours, "invalid UTC offset, using UTC");
                Utc.fix()
            })
    }
}

pub fn settings_path() -> Result<PathBuf, ConfigError> {
    let proj = ProjectDirs::from("com", "channel-chat", "channel-chat")
        .ok_or(ConfigError::NoProjectDirs)?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir)?;
    Ok(dir.join("settings.json"))
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(settings)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}

/// Load settings from the platform config dir, defaults on any failure.
pub fn load_settings() -> Settings {
    match settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("failed to load settings: {}", e);
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&settings_path()?, settings)
}

/// Access token for the chat API, if one was stored.
pub fn load_access_token() -> Option<String> {
    let entry = match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("keyring unavailable: {}", e);
            return None;
        }
    };
    match entry.get_password() {
        Ok(token) => Some(token),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!("failed to read access token: {}", e);
            None
        }
    }
}

pub fn save_access_token(token: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?.set_password(token)?;
    Ok(())
}

fn non_empty_token(value: Option<String>) -> Option<String> {
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Token for this run.
///
/// A token in [`ACCESS_TOKEN_ENV`] wins and is stored in the keyring for
/// later runs; otherwise the stored one is used.
pub fn access_token() -> Option<String> {
    let Some(token) = non_empty_token(std::env::var(ACCESS_TOKEN_ENV).ok()) else {
        return load_access_token();
    };
    match save_access_token(&token) {
        Ok(()) => debug!("access token stored in keyring"),
        Err(e) => warn!("failed to store access token: {}", e),
    }
    Some(token)
}
