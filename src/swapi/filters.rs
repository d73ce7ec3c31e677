//! Search Filters
//!
//! The semantic fields of an upstream query. These fields are the ONLY
//! inputs to cache-key derivation, which keeps keys collision-free and
//! independent of whoever issues the call.

// == Search Filters ==
/// Filters forwarded to the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free-text name/title search, passed through to the upstream
    pub search: Option<String>,
    /// Upstream page number, 1-based
    pub page: u32,
}

impl SearchFilters {
    // == Constructor ==
    /// Creates filters; an absent page means page 1.
    pub fn new(search: Option<String>, page: Option<u32>) -> Self {
        Self {
            search,
            page: page.unwrap_or(1),
        }
    }

    // == Query Params ==
    /// Converts the filters into upstream query parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}
