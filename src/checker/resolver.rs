//! HTTP status resolution
//!
//! This module resolves a single URL into its chain of HTTP hops:
//! - HEAD requests only; bodies are never downloaded
//! - Redirects are followed manually so every hop is recorded
//! - Transport failures become a one-step failure chain, never an error

use crate::config::{CheckerConfig, UserAgentConfig};
use crate::url::is_ok_status;
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Reason recorded when a URL could not be resolved at all
pub const RESOLUTION_FAILURE_REASON: &str = "Error resolving URL";

/// One hop of a redirect chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStep {
    /// Whether this hop's own status was a success code
    pub ok: bool,

    /// The URL answered at this hop
    #[serde(rename = "url")]
    pub resolved_url: String,

    /// HTTP status; `None` when no response was received
    #[serde(rename = "status")]
    pub status_code: Option<u16>,

    /// Status phrase, or the failure reason
    pub reason: String,
}

impl ResolutionStep {
    /// Builds a step from a received HTTP response status
    pub fn from_status(url: impl Into<String>, status: StatusCode) -> Self {
        Self {
            ok: is_ok_status(status.as_u16()),
            resolved_url: url.into(),
            status_code: Some(status.as_u16()),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Error returned when building a chain from no steps
#[derive(Debug, Error)]
#[error("a resolution chain needs at least one step")]
pub struct EmptyChain;

/// Ordered, non-empty sequence of hops; the last one is the terminal response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ResolutionStep>", into = "Vec<ResolutionStep>")]
pub struct ResolutionChain(Vec<ResolutionStep>);

impl ResolutionChain {
    /// Builds a chain from its hops, oldest first
    pub fn from_steps(steps: Vec<ResolutionStep>) -> Result<Self, EmptyChain> {
        if steps.is_empty() {
            return Err(EmptyChain);
        }
        Ok(Self(steps))
    }

    /// The synthetic chain recorded when a request could not complete
    pub fn failure(url: &str) -> Self {
        Self(vec![ResolutionStep {
            ok: false,
            resolved_url: url.to_string(),
            status_code: None,
            reason: RESOLUTION_FAILURE_REASON.to_string(),
        }])
    }

    pub fn steps(&self) -> &[ResolutionStep] {
        &self.0
    }

    /// First hop: the URL as originally requested
    pub fn first(&self) -> &ResolutionStep {
        &self.0[0]
    }

    /// Last hop: the final outcome after all redirects
    pub fn terminal(&self) -> &ResolutionStep {
        &self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A chain always holds at least one step
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the terminal step succeeded
    pub fn is_ok(&self) -> bool {
        self.terminal().ok
    }

    /// Terminal status code, `None` for unresolved URLs
    pub fn terminal_status(&self) -> Option<u16> {
        self.terminal().status_code
    }
}

impl TryFrom<Vec<ResolutionStep>> for ResolutionChain {
    type Error = EmptyChain;

    fn try_from(steps: Vec<ResolutionStep>) -> Result<Self, Self::Error> {
        Self::from_steps(steps)
    }
}

impl From<ResolutionChain> for Vec<ResolutionStep> {
    fn from(chain: ResolutionChain) -> Self {
        chain.0
    }
}

/// Resolves URLs into redirect chains
///
/// Implementations must never fail: a URL that cannot be resolved yields
/// [`ResolutionChain::failure`].
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, url: &str) -> ResolutionChain;
}

/// Internal failure while walking a chain
#[derive(Debug, Error)]
enum ResolveError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("more than {0} redirects")]
    TooManyRedirects(usize),
}

/// Builds the HTTP client used for link resolution
///
/// Redirects are disabled at the client level; [`HttpResolver`] follows
/// them itself so each hop is observable.
pub fn build_http_client(
    checker: &CheckerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = checker.timeout();

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Resolver backed by real HEAD requests
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
    follow_redirects: bool,
    max_redirects: usize,
}

impl HttpResolver {
    /// Creates a resolver from configuration
    pub fn new(checker: &CheckerConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(checker, user_agent)?;
        Ok(Self::with_client(
            client,
            checker.follow_redirects,
            checker.max_redirects,
        ))
    }

    /// Creates a resolver around an existing client
    ///
    /// The client must not follow redirects itself, or only the final hop
    /// will ever be recorded.
    pub fn with_client(client: Client, follow_redirects: bool, max_redirects: usize) -> Self {
        Self {
            client,
            follow_redirects,
            max_redirects,
        }
    }

    async fn walk_chain(&self, url: &str) -> Result<Vec<ResolutionStep>, ResolveError> {
        let mut current = Url::parse(url)?;
        let mut steps = Vec::new();

        loop {
            tracing::trace!("HEAD {}", current);
            let response = self.client.head(current.clone()).send().await?;
            let status = response.status();
            steps.push(ResolutionStep::from_status(response.url().as_str(), status));

            if !self.follow_redirects || !is_followed_redirect(status) {
                return Ok(steps);
            }

            // A redirect without a usable Location is the end of the chain
            let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
            else {
                return Ok(steps);
            };

            if steps.len() > self.max_redirects {
                return Err(ResolveError::TooManyRedirects(self.max_redirects));
            }

            current = current.join(location)?;
        }
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    async fn resolve(&self, url: &str) -> ResolutionChain {
        match self.walk_chain(url).await {
            Ok(steps) => ResolutionChain::from_steps(steps)
                .unwrap_or_else(|_| ResolutionChain::failure(url)),
            Err(e) => {
                tracing::debug!("Failed to resolve {}: {}", url, e);
                ResolutionChain::failure(url)
            }
        }
    }
}

fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}
