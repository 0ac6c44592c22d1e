use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Proxy every request is routed through unless the config says otherwise
pub const DEFAULT_PROXY: &str = "socks5h://127.0.0.1:9150";

/// Browser identity presented to the forum
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; rv:102.0) Gecko/20100101 Firefox/102.0";

/// Main configuration structure for the archiver
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(rename = "forum", default)]
    pub forums: Vec<ForumProfile>,
}

impl Config {
    /// Picks the forum profile to archive.
    ///
    /// With no name the config must hold exactly one profile.
    pub fn forum(&self, name: Option<&str>) -> ConfigResult<&ForumProfile> {
        match name {
            Some(name) => self
                .forums
                .iter()
                .find(|forum| forum.name == name)
                .ok_or_else(|| ConfigError::Validation(format!("unknown forum profile '{}'", name))),
            None => match self.forums.as_slice() {
                [only] => Ok(only),
                [] => Err(ConfigError::Validation(
                    "no [[forum]] profiles configured".to_string(),
                )),
                _ => Err(ConfigError::Validation(format!(
                    "{} forum profiles configured; pick one with --forum",
                    self.forums.len()
                ))),
            },
        }
    }
}

/// Network behaviour: proxy, timeouts and the transport retry policy
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Proxy URL (e.g. `socks5h://127.0.0.1:9150`)
    #[serde(default = "default_proxy")]
    pub proxy: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Wait between attempts after a transport error, in seconds
    #[serde(rename = "retry-wait-secs", default = "default_retry_wait_secs")]
    pub retry_wait_secs: u64,

    /// Give up after this many attempts; absent means retry forever
    #[serde(rename = "max-attempts", default)]
    pub max_attempts: Option<u32>,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Extra request headers; these override the built-in browser headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: default_proxy(),
            timeout_secs: default_timeout_secs(),
            retry_wait_secs: default_retry_wait_secs(),
            max_attempts: None,
            user_agent: default_user_agent(),
            headers: BTreeMap::new(),
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root of the mirrored archive tree
    #[serde(rename = "archive-dir", default = "default_archive_dir")]
    pub archive_dir: String,

    /// Flat file that roster text is appended to
    #[serde(rename = "roster-path", default = "default_roster_path")]
    pub roster_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive_dir: default_archive_dir(),
            roster_path: default_roster_path(),
        }
    }
}

/// Member roster paging
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Members listed per roster page
    #[serde(rename = "per-page", default = "default_per_page")]
    pub per_page: u32,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Pre-obtained session credentials sent as phpBB cookies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "user-id", default)]
    pub user_id: String,

    #[serde(rename = "k-id", default)]
    pub k_id: String,

    #[serde(rename = "session-id", default)]
    pub session_id: String,

    /// Board cookie name prefix (`<prefix>_u`, `<prefix>_k`, `<prefix>_sid`)
    #[serde(rename = "cookie-prefix", default)]
    pub cookie_prefix: String,
}

/// One archivable board
#[derive(Debug, Clone, Deserialize)]
pub struct ForumProfile {
    pub name: String,

    /// Board root, ending in `/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Forum IDs that are never archived for this board
    #[serde(default)]
    pub ignore: Vec<u32>,
}

fn default_proxy() -> Option<String> {
    Some(DEFAULT_PROXY.to_string())
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_retry_wait_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_archive_dir() -> String {
    "phpbb_archives".to_string()
}

fn default_roster_path() -> String {
    "extracted_text.txt".to_string()
}

fn default_per_page() -> u32 {
    25
}
