//! Listing filter options and their query/dedup encodings.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use toolscout_core::{DomainError, ValueObject};

/// Page requested when none (or zero) is given.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size requested when none (or zero) is given.
pub const DEFAULT_LIMIT: u32 = 20;

/// Server-side sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Popularity,
    Ratings,
    Price,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::Ratings => "ratings",
            SortKey::Price => "price",
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "popularity" => Ok(SortKey::Popularity),
            "ratings" => Ok(SortKey::Ratings),
            "price" => Ok(SortKey::Price),
            other => Err(DomainError::validation(format!(
                "sort must be one of: popularity, ratings, price (got {other:?})"
            ))),
        }
    }
}

/// Options for a product listing request.
///
/// Passed by value; used to build the query string and as the dedup key of
/// the listing state (see [`FilterOptions::effective_key`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub sort: Option<SortKey>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ValueObject for FilterOptions {}

/// The fields of [`FilterOptions`] that decide whether two listings differ.
///
/// Tags are folded into one comma-joined string, so `["a", "b"]` and
/// `["a,b"]` compare equal, exactly like the query string they produce.
/// Empty category/search and zero page/limit are normalized the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub category: Option<String>,
    pub tags: String,
    pub sort: Option<SortKey>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Category, if set and non-empty.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Search text, if set and non-empty.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit_or_default(&self) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT)
    }

    /// Query parameters in request order.
    ///
    /// Empty fields are left out; `page` and `limit` are always present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(category) = self.category() {
            pairs.push(("category", category.to_string()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(search) = self.search() {
            pairs.push(("search", search.to_string()));
        }
        pairs.push(("page", self.page_or_default().to_string()));
        pairs.push(("limit", self.limit_or_default().to_string()));
        pairs
    }

    pub fn effective_key(&self) -> FilterKey {
        FilterKey {
            category: self.category().map(str::to_string),
            tags: self.tags.join(","),
            sort: self.sort,
            search: self.search().map(str::to_string),
            page: self.page_or_default(),
            limit: self.limit_or_default(),
        }
    }
}
