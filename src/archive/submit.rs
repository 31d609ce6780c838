//! Web archive submission
//!
//! Archival is best-effort: a failed or rejected submission is recorded
//! as not archived and the run carries on.

use crate::checker::Throttle;
use crate::config::{ArchiveConfig, UserAgentConfig};
use crate::url::is_ok_status;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// How many submissions between progress lines
const PROGRESS_INTERVAL: usize = 10;

/// Something that can be asked to preserve a URL
#[async_trait]
pub trait Archiver: Send + Sync {
    /// Returns true if the archive confirmed the save
    async fn submit(&self, url: &str) -> bool;
}

/// Result of submitting one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub url: String,
    pub archived: bool,
}

/// Save-page request URL for `url`
///
/// The target is percent-encoded with `/` left as-is, so the archive sees
/// `https%3A//example.com/page`.
pub fn save_url(endpoint: &str, url: &str) -> String {
    let encoded = urlencoding::encode(url).replace("%2F", "/");
    format!("{}/{}", endpoint.trim_end_matches('/'), encoded)
}

/// Archiver that calls a web-archive save endpoint
#[derive(Debug, Clone)]
pub struct WebArchiver {
    client: Client,
    endpoint: String,
}

impl WebArchiver {
    pub fn new(config: &ArchiveConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.endpoint))
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl Archiver for WebArchiver {
    async fn submit(&self, url: &str) -> bool {
        let request_url = save_url(&self.endpoint, url);
        match self.client.get(&request_url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Archive answered {} for {}", status, url);
                is_ok_status(status.as_u16())
            }
            Err(e) => {
                tracing::warn!("Archive request for {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Submits each URL in turn, throttling before every request
pub async fn submit_all<A>(archiver: &A, urls: &[String], throttle: &Throttle) -> Vec<ArchiveOutcome>
where
    A: Archiver + ?Sized,
{
    let start_time = Instant::now();
    let mut outcomes = Vec::with_capacity(urls.len());

    for (index, url) in urls.iter().enumerate() {
        throttle.pause().await;
        tracing::debug!("Archiving {}", url);

        let archived = archiver.submit(url).await;
        outcomes.push(ArchiveOutcome {
            url: url.clone(),
            archived,
        });

        let done = index + 1;
        if done % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {}/{} URLs submitted in {:?}",
                done,
                urls.len(),
                start_time.elapsed()
            );
        }
    }

    outcomes
}
