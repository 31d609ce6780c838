use serde::{Deserialize, Serialize};

/// A titled group of entries within one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section<T> {
    pub title: String,
    pub links: Vec<T>,
}

/// Ordered mapping from section title to its entries
///
/// Behaves like an insertion-ordered map: inserting a title that already
/// exists replaces that section's entries but keeps its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections<T>(Vec<Section<T>>);

impl<T> Default for Sections<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Sections<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entries for `title`
    pub fn insert(&mut self, title: impl Into<String>, links: Vec<T>) {
        let title = title.into();
        match self.0.iter_mut().find(|section| section.title == title) {
            Some(existing) => existing.links = links,
            None => self.0.push(Section { title, links }),
        }
    }

    pub fn get(&self, title: &str) -> Option<&[T]> {
        self.0
            .iter()
            .find(|section| section.title == title)
            .map(|section| section.links.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section<T>> {
        self.0.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|section| section.title.as_str())
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of entries across all sections
    pub fn entry_count(&self) -> usize {
        self.0.iter().map(|section| section.links.len()).sum()
    }
}

impl<'a, T> IntoIterator for &'a Sections<T> {
    type Item = &'a Section<T>;
    type IntoIter = std::slice::Iter<'a, Section<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
