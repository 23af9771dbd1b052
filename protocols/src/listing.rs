use serde::Deserialize;

/// A DRF page: `{"count": 120, "next": "...", "previous": null, "results": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Collection endpoints answer either a page or a bare array depending on
/// whether pagination is enabled for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    /// Total across all pages; for bare arrays, the array length.
    pub fn total(&self) -> u64 {
        match self {
            Listing::Page(page) => page.count,
            Listing::Plain(items) => items.len() as u64,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self, Listing::Page(page) if page.next.is_some())
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page(page) => page.results,
            Listing::Plain(items) => items,
        }
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Plain(Vec::new())
    }
}
