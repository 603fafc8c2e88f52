//! Module listing query building
//!
//! Builds the `GET /modules` query string with marketplace defaults.

use modbay_domain::constants::{DEFAULT_PAGE_SIZE, FEATURED_PAGE_SIZE, MAX_PAGE_SIZE};
use modbay_domain::ModuleFilter;

/// Parameters of a `GET /modules` listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleQuery {
    pub page: u32,
    pub filter: ModuleFilter,
    pub search: Option<String>,
    pub limit: u32,
}

impl Default for ModuleQuery {
    fn default() -> Self {
        Self { page: 1, filter: ModuleFilter::All, search: None, limit: DEFAULT_PAGE_SIZE }
    }
}

impl ModuleQuery {
    /// Query for the landing view: a handful of popular modules
    #[must_use]
    pub fn featured() -> Self {
        Self { filter: ModuleFilter::Popular, limit: FEATURED_PAGE_SIZE, ..Self::default() }
    }

    /// Select a page (1-based; zero is coerced to the first page)
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Restrict the listing to the given filter
    #[must_use]
    pub fn filter(mut self, filter: ModuleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Full-text search term; blank terms clear the search
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() { None } else { Some(term) };
        self
    }

    /// Page size, clamped to the server maximum
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Request path including the encoded query string
    #[must_use]
    pub fn to_path(&self) -> String {
        let mut query = format!("page={}&filter={}", self.page, self.filter.as_str());
        if let Some(term) = &self.search {
            query.push_str("&search=");
            query.push_str(&urlencoding::encode(term));
        }
        query.push_str(&format!("&limit={}", self.limit));
        format!("/modules?{query}")
    }
}
