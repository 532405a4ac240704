//! Filter state and the query builder that turns it into request parameters.

use std::fmt;
use std::str::FromStr;

use gamedex_rawg::{DateRange, RequestParams};
use indexmap::IndexSet;

use crate::error::CatalogError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Result ordering offered by the sort selector.
///
/// [`SortKey::Relevance`] is RAWG's own default and is never sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Relevance,
    RatingDesc,
    RatingAsc,
    ReleasedDesc,
    ReleasedAsc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Relevance,
        SortKey::RatingDesc,
        SortKey::RatingAsc,
        SortKey::ReleasedDesc,
        SortKey::ReleasedAsc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// The `ordering` parameter value. Empty for the default.
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Relevance => "",
            SortKey::RatingDesc => "-rating",
            SortKey::RatingAsc => "rating",
            SortKey::ReleasedDesc => "-released",
            SortKey::ReleasedAsc => "released",
            SortKey::NameAsc => "name",
            SortKey::NameDesc => "-name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Relevance => "Default",
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::RatingAsc => "Rating: Low to High",
            SortKey::ReleasedDesc => "Newest First",
            SortKey::ReleasedAsc => "Oldest First",
            SortKey::NameAsc => "Name: A-Z",
            SortKey::NameDesc => "Name: Z-A",
        }
    }

    pub fn is_default(self) -> bool {
        self == SortKey::Relevance
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_param() == s)
            .ok_or_else(|| CatalogError::InvalidSortKey(s.to_string()))
    }
}

/// Every user-adjustable query-shaping input at a point in time.
///
/// `platform_ids` keeps selection order: it is sent to the API in the order
/// the user ticked the boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub platform_ids: IndexSet<u32>,
    pub genre_id: Option<u32>,
    pub sort_key: Option<SortKey>,
    pub dates: Option<DateRange>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            platform_ids: IndexSet::new(),
            genre_id: None,
            sort_key: None,
            dates: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// The effective sort, collapsing an explicit default to `None`.
    pub fn effective_sort(&self) -> Option<SortKey> {
        self.sort_key.filter(|k| !k.is_default())
    }

    /// Whether any filter beyond paging is set.
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || !self.platform_ids.is_empty()
            || self.genre_id.is_some()
            || self.effective_sort().is_some()
            || self.dates.is_some()
    }
}

/// Per-request paging that takes precedence over the filter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOverride {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageOverride {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            page_size: None,
        }
    }
}

/// Derives canonical request parameters from a [`FilterState`].
///
/// Deterministic and side-effect free: equal inputs give equal parameter sets.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    credential: String,
}

impl QueryBuilder {
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Builds the `/games` parameters for `state`.
    pub fn build(&self, state: &FilterState, overrides: Option<PageOverride>) -> RequestParams {
        let overrides = overrides.unwrap_or_default();
        let page = overrides.page.unwrap_or(state.page).max(1);
        let page_size = overrides.page_size.unwrap_or(state.page_size).max(1);

        let mut params = RequestParams::with_credential(&self.credential);
        params
            .insert("page", page.to_string())
            .insert("page_size", page_size.to_string());

        let search = state.search_text.trim();
        if !search.is_empty() {
            params.insert("search", search);
        }

        if !state.platform_ids.is_empty() {
            let joined = state
                .platform_ids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.insert("platforms", joined);
        }

        if let Some(genre_id) = state.genre_id {
            params.insert("genres", genre_id.to_string());
        }

        if let Some(sort) = state.effective_sort() {
            params.insert("ordering", sort.as_param());
        }

        if let Some(dates) = state.dates {
            params.insert("dates", dates.to_string());
        }

        params
    }

    /// Builds the `/genres` parameters for a page.
    pub fn build_genres(&self, page: u32) -> RequestParams {
        let mut params = RequestParams::with_credential(&self.credential);
        params.insert("page", page.max(1).to_string());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "test-key";

    fn builder() -> QueryBuilder {
        QueryBuilder::new(KEY)
    }

    fn state_with_platforms(ids: &[u32]) -> FilterState {
        FilterState {
            platform_ids: ids.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn default_state_only_has_key_and_paging() {
        let params = builder().build(&FilterState::default(), None);
        assert_eq!(params.names(), vec!["key", "page", "page_size"]);
        assert_eq!(params.get("key"), Some(KEY));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("page_size"), Some("20"));
    }

    #[test]
    fn build_is_idempotent() {
        let state = FilterState {
            search_text: "portal".into(),
            platform_ids: [4, 7].into_iter().collect(),
            genre_id: Some(3),
            sort_key: Some(SortKey::RatingDesc),
            page: 4,
            ..Default::default()
        };
        let a = builder().build(&state, None);
        let b = builder().build(&state, None);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn zelda_on_switch() {
        let state = FilterState {
            search_text: "zelda".into(),
            platform_ids: [7].into_iter().collect(),
            ..Default::default()
        };
        let params = builder().build(&state, None);

        let mut expected = RequestParams::with_credential(KEY);
        expected
            .insert("page", "1")
            .insert("page_size", "20")
            .insert("search", "zelda")
            .insert("platforms", "7");
        assert_eq!(params, expected);
    }

    #[test]
    fn whitespace_search_is_omitted() {
        let state = FilterState {
            search_text: "   ".into(),
            ..Default::default()
        };
        assert!(!builder().build(&state, None).contains("search"));
    }

    #[test]
    fn search_is_trimmed() {
        let state = FilterState {
            search_text: "  half life ".into(),
            ..Default::default()
        };
        assert_eq!(builder().build(&state, None).get("search"), Some("half life"));
    }

    #[test]
    fn platforms_keep_selection_order() {
        let params = builder().build(&state_with_platforms(&[187, 4, 18]), None);
        assert_eq!(params.get("platforms"), Some("187,4,18"));
    }

    #[test]
    fn default_sort_is_omitted() {
        let state = FilterState {
            sort_key: Some(SortKey::Relevance),
            ..Default::default()
        };
        assert!(!builder().build(&state, None).contains("ordering"));
    }

    #[test]
    fn sort_and_genre_are_sent() {
        let state = FilterState {
            genre_id: Some(51),
            sort_key: Some(SortKey::ReleasedDesc),
            ..Default::default()
        };
        let params = builder().build(&state, None);
        assert_eq!(params.get("genres"), Some("51"));
        assert_eq!(params.get("ordering"), Some("-released"));
    }

    #[test]
    fn dates_are_sent_as_range() {
        let state = FilterState {
            dates: Some("2019-01-01,2019-12-31".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(
            builder().build(&state, None).get("dates"),
            Some("2019-01-01,2019-12-31")
        );
    }

    #[test]
    fn overrides_win_over_state() {
        let state = FilterState {
            page: 3,
            page_size: 40,
            ..Default::default()
        };
        let params = builder().build(
            &state,
            Some(PageOverride {
                page: Some(1),
                page_size: Some(6),
            }),
        );
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("page_size"), Some("6"));
    }

    #[test]
    fn zero_page_is_clamped() {
        let state = FilterState {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        let params = builder().build(&state, None);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("page_size"), Some("1"));
    }

    #[test]
    fn genres_params() {
        let params = builder().build_genres(2);
        assert_eq!(params.names(), vec!["key", "page"]);
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn sort_key_parse_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(key.as_param().parse::<SortKey>().unwrap(), key);
        }
        assert!(matches!(
            "popularity".parse::<SortKey>(),
            Err(CatalogError::InvalidSortKey(_))
        ));
    }

    #[test]
    fn active_filters() {
        assert!(!FilterState::default().has_active_filters());
        let state = FilterState {
            sort_key: Some(SortKey::Relevance),
            page: 9,
            ..Default::default()
        };
        assert!(!state.has_active_filters());
        assert!(state_with_platforms(&[4]).has_active_filters());
    }
}
