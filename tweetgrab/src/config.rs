use crate::error::{Error, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const BASE_CONFIG: &str = "tweetgrab/config.toml";
pub const DEFAULT_EXTRACTOR_URL: &str = "https://twitsave.com/info";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values read from `config.toml`, every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub extractor_url: String,
    pub download_dir: Option<PathBuf>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            extractor_url: DEFAULT_EXTRACTOR_URL.to_string(),
            download_dir: None,
            user_agent: concat!("tweetgrab/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn from_toml(raw: &str, path: &Path) -> Result<Self> {
        let settings: Settings = toml::from_str(raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        // a zero connect timeout fails every request before it starts
        if settings.timeout_secs == 0 {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "timeout_secs has to be at least 1".to_string(),
            });
        }
        Ok(settings)
    }

    /// An explicit path has to exist, the default one is allowed to be missing.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Settings::default());
                }
            },
        };
        debug!("reading config from {:?}", path);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
        Settings::from_toml(&raw, &path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn build_client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .connect_timeout(self.timeout())
            .build()?)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(BASE_CONFIG))
}
