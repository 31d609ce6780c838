use crate::config::ScreenshotConfig;
use crate::url::sanitize_filename;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

const URL_PLACEHOLDER: &str = "{url}";
const PATH_PLACEHOLDER: &str = "{path}";

/// Something that renders a URL into an image file
#[async_trait]
pub trait ScreenshotService: Send + Sync {
    /// Returns true if an image was written to `dest`
    async fn capture(&self, url: &str, dest: &Path) -> bool;
}

/// Result of capturing one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotOutcome {
    pub url: String,
    pub path: PathBuf,
    pub captured: bool,
}

/// Screenshot service backed by an external command
#[derive(Debug, Clone)]
pub struct CommandScreenshotter {
    program: String,
    args: Vec<String>,
}

impl CommandScreenshotter {
    /// Returns `None` when no command is configured
    pub fn from_config(config: &ScreenshotConfig) -> Option<Self> {
        let (program, args) = config.command.as_deref()?.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn render_args(&self, url: &str, dest: &Path) -> Vec<String> {
        let dest = dest.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(URL_PLACEHOLDER, url)
                    .replace(PATH_PLACEHOLDER, &dest)
            })
            .collect()
    }
}

#[async_trait]
impl ScreenshotService for CommandScreenshotter {
    async fn capture(&self, url: &str, dest: &Path) -> bool {
        let args = self.render_args(url, dest);
        match Command::new(&self.program).args(&args).status().await {
            Ok(status) if status.success() => true,
            Ok(status) => {
                tracing::warn!("Screenshot command exited with {} for {}", status, url);
                false
            }
            Err(e) => {
                tracing::warn!("Could not run screenshot command for {}: {}", url, e);
                false
            }
        }
    }
}

/// Image path for `url` inside `dir`
pub fn screenshot_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(format!("{}.png", sanitize_filename(url)))
}

/// Captures every URL into `dir`, creating the directory first
///
/// Failing to create the directory is fatal; individual capture failures
/// are recorded and skipped.
pub async fn capture_all<S>(
    service: &S,
    urls: &[String],
    dir: &Path,
) -> std::io::Result<Vec<ScreenshotOutcome>>
where
    S: ScreenshotService + ?Sized,
{
    tokio::fs::create_dir_all(dir).await?;

    let mut outcomes = Vec::with_capacity(urls.len());
    for url in urls {
        let path = screenshot_path(dir, url);
        let captured = service.capture(url, &path).await;
        if !captured {
            tracing::warn!("Failed to grab screenshot for {}", url);
        }
        outcomes.push(ScreenshotOutcome {
            url: url.clone(),
            path,
            captured,
        });
    }

    tracing::info!(
        "Captured {}/{} screenshots",
        outcomes.iter().filter(|o| o.captured).count(),
        outcomes.len()
    );

    Ok(outcomes)
}
