//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.ragchat/` in production)
//! and deserializes it into [`ClientConfig`]. Runs before the tracing
//! subscriber exists (the log format lives in the file), so problems are
//! returned to the caller instead of logged here.

use std::path::Path;

use ragchat_types::config::ClientConfig;
use ragchat_types::error::ConfigError;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: `Ok(ClientConfig::default())`.
/// - Unreadable or unparsable file: `Err`, see [`config_or_default`].
pub async fn load_client_config(data_dir: &Path) -> Result<ClientConfig, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<ClientConfig>(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })
}

/// The config to run with, plus the problem to report once logging is up.
pub fn config_or_default(
    loaded: Result<ClientConfig, ConfigError>,
) -> (ClientConfig, Option<ConfigError>) {
    match loaded {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    }
}
