use crate::document::DEFAULT_PROXY_SUFFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for a link-check run
///
/// Every table is optional; a missing table falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub screenshot: ScreenshotConfig,
}

/// Link resolution behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum redirect hops before the URL counts as unresolvable
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Whether to follow redirects at all
    #[serde(rename = "follow-redirects")]
    pub follow_redirects: bool,

    /// Institutional proxy host suffix stripped from every href
    #[serde(rename = "proxy-suffix")]
    pub proxy_suffix: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 30,
            follow_redirects: true,
            proxy_suffix: DEFAULT_PROXY_SUFFIX.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Delay applied before every network call
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Fixed minimum delay (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the random delay added on top (milliseconds)
    #[serde(rename = "jitter-ms")]
    pub jitter_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 10,
            jitter_ms: 100,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,

    /// URL with information about the checker; optional
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "ouxml-linkcheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `name/version` or `name/version (+url)`
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.name, self.version)
        } else {
            format!("{}/{} (+{})", self.name, self.version, self.contact_url)
        }
    }
}

/// Output locations, all relative to `directory`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    #[serde(rename = "all-json")]
    pub all_json: String,
    #[serde(rename = "broken-json")]
    pub broken_json: String,
    #[serde(rename = "all-csv")]
    pub all_csv: String,
    #[serde(rename = "broken-csv")]
    pub broken_csv: String,
    #[serde(rename = "redirects-csv")]
    pub redirects_csv: String,
    #[serde(rename = "screenshots-dir")]
    pub screenshots_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            all_json: "all_links_report.json".to_string(),
            broken_json: "broken_links_report.json".to_string(),
            all_csv: "all_links_report.csv".to_string(),
            broken_csv: "broken_links_report.csv".to_string(),
            redirects_csv: "redirect_report.csv".to_string(),
            screenshots_dir: "grab_link_screenshots".to_string(),
        }
    }
}

impl OutputConfig {
    /// Resolves an output file name against the output directory
    pub fn path_for(&self, name: &str) -> PathBuf {
        Path::new(&self.directory).join(name)
    }
}

/// Web archive submission endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Save-page endpoint; the encoded URL is appended as a path segment
    pub endpoint: String,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://web.archive.org/save".to_string(),
            timeout_secs: 60,
        }
    }
}

/// External screenshot renderer
///
/// `command` is a program followed by its arguments; `{url}` and `{path}`
/// are substituted per capture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub command: Option<Vec<String>>,
}
