use crate::checker::resolver::{ResolutionChain, Resolver};
use std::collections::BTreeMap;

/// Run-scoped mapping from normalized URL to its resolution chain
///
/// Keys are compared as plain strings. A URL is resolved over the network
/// at most once for the lifetime of the cache, however many documents or
/// sections reference it. Iteration is ordered by URL.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    entries: BTreeMap<String, ResolutionChain>,
    resolutions: usize,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&ResolutionChain> {
        self.entries.get(url)
    }

    /// Returns the cached chain, resolving and storing it on a miss
    pub async fn get_or_resolve<R>(&mut self, url: &str, resolver: &R) -> ResolutionChain
    where
        R: Resolver + ?Sized,
    {
        if let Some(chain) = self.entries.get(url) {
            tracing::trace!("Cache hit for {}", url);
            return chain.clone();
        }

        let chain = resolver.resolve(url).await;
        self.resolutions += 1;
        self.entries.insert(url.to_string(), chain.clone());
        chain
    }

    /// Number of distinct URLs cached
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of resolver calls made through this cache
    pub fn resolutions(&self) -> usize {
        self.resolutions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolutionChain)> {
        self.entries.iter().map(|(url, chain)| (url.as_str(), chain))
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, ResolutionChain)> for ResolutionCache {
    /// Seeds a cache with already-known chains; no resolutions are counted
    fn from_iter<I: IntoIterator<Item = (String, ResolutionChain)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            resolutions: 0,
        }
    }
}
