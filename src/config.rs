use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::network::Timeout;
use crate::session::Profile;

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";
pub const DEFAULT_ENDPOINT: &str = "tcp://server:5556";

/// Contents of the JSON config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    /// Milliseconds to wait for each reply; absent or 0 waits forever.
    #[serde(default)]
    pub reply_timeout_ms: Option<u64>,
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub channel: Option<String>,
    pub reply_timeout_ms: Option<u64>,
}

/// Everything needed to open a client and run a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    pub profile: Profile,
    pub reply_timeout: Timeout,
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// Layers command line over config file over the profile defaults.
pub fn resolve(config: AppConfig, overrides: Overrides, base: Profile) -> ClientSettings {
    let endpoint = overrides
        .endpoint
        .or(config.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let profile = Profile {
        user: overrides.user.or(config.user).unwrap_or(base.user),
        channel: overrides.channel.or(config.channel).unwrap_or(base.channel),
    };

    let reply_timeout =
        Timeout::from_millis(overrides.reply_timeout_ms.or(config.reply_timeout_ms));

    ClientSettings {
        endpoint,
        profile,
        reply_timeout,
    }
}
