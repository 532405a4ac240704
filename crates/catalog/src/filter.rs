//! Filter coordinator: owns the filter state and plans the fetch each change
//! needs.
//!
//! All updates are synchronous. A setter returns a [`FetchPlan`]; performing
//! the fetch is the caller's job (see [`Catalog`](crate::Catalog)).

use gamedex_rawg::{DateRange, RequestParams};
use indexmap::IndexSet;

use crate::query::{FilterState, QueryBuilder, SortKey};

/// What the catalog must do after a filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    /// Parameters for the games listing request.
    pub params: RequestParams,
    /// Whether the genre cache key (platforms or sort) changed.
    pub invalidate_genre_cache: bool,
}

/// Owner of the user-visible [`FilterState`].
#[derive(Debug, Clone)]
pub struct FilterCoordinator {
    state: FilterState,
    query: QueryBuilder,
}

impl FilterCoordinator {
    pub fn new(query: QueryBuilder) -> Self {
        Self {
            state: FilterState::default(),
            query,
        }
    }

    /// Starts from an explicit state, e.g. a restored session.
    pub fn with_state(query: QueryBuilder, state: FilterState) -> Self {
        Self { state, query }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn query(&self) -> &QueryBuilder {
        &self.query
    }

    /// Parameters for the current state without changing it (retry).
    pub fn current_plan(&self) -> FetchPlan {
        FetchPlan {
            params: self.query.build(&self.state, None),
            invalidate_genre_cache: false,
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> FetchPlan {
        self.state.search_text = text.into();
        self.reset_page_and_plan(false)
    }

    /// Replaces the platform selection, keeping first-seen order.
    pub fn set_platforms(&mut self, ids: impl IntoIterator<Item = u32>) -> FetchPlan {
        let ids: IndexSet<u32> = ids.into_iter().collect();
        let changed = !same_platform_set(&self.state.platform_ids, &ids);
        self.state.platform_ids = ids;
        self.reset_page_and_plan(changed)
    }

    /// Adds `id` at the end of the selection, or removes it if present.
    pub fn toggle_platform(&mut self, id: u32) -> FetchPlan {
        if !self.state.platform_ids.shift_remove(&id) {
            self.state.platform_ids.insert(id);
        }
        self.reset_page_and_plan(true)
    }

    /// Switches the genre filter. Does not touch the genre cache.
    pub fn set_genre(&mut self, genre_id: Option<u32>) -> FetchPlan {
        self.state.genre_id = genre_id;
        self.reset_page_and_plan(false)
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> FetchPlan {
        let changed = self.state.effective_sort() != sort.filter(|k| !k.is_default());
        self.state.sort_key = sort;
        self.reset_page_and_plan(changed)
    }

    pub fn set_dates(&mut self, dates: Option<DateRange>) -> FetchPlan {
        self.state.dates = dates;
        self.reset_page_and_plan(false)
    }

    /// Moves to `page` (at least 1). The only setter that keeps other fields.
    pub fn set_page(&mut self, page: u32) -> FetchPlan {
        self.state.page = page.max(1);
        FetchPlan {
            params: self.query.build(&self.state, None),
            invalidate_genre_cache: false,
        }
    }

    /// Resets every filter to its default.
    pub fn clear_all(&mut self) -> FetchPlan {
        let changed =
            !self.state.platform_ids.is_empty() || self.state.effective_sort().is_some();
        let page_size = self.state.page_size;
        self.state = FilterState {
            page_size,
            ..FilterState::default()
        };
        self.reset_page_and_plan(changed)
    }

    fn reset_page_and_plan(&mut self, invalidate_genre_cache: bool) -> FetchPlan {
        self.state.page = 1;
        FetchPlan {
            params: self.query.build(&self.state, None),
            invalidate_genre_cache,
        }
    }
}

/// Set equality, ignoring selection order.
fn same_platform_set(a: &IndexSet<u32>, b: &IndexSet<u32>) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator() -> FilterCoordinator {
        FilterCoordinator::new(QueryBuilder::new("k"))
    }

    /// A coordinator sitting on page 5.
    fn on_page_five() -> FilterCoordinator {
        let mut c = coordinator();
        c.set_page(5);
        assert_eq!(c.state().page, 5);
        c
    }

    #[test]
    fn every_setter_but_set_page_resets_page() {
        type Setter = fn(&mut FilterCoordinator) -> FetchPlan;
        let setters: [(&str, Setter); 7] = [
            ("search", |c| c.set_search("zelda")),
            ("platforms", |c| c.set_platforms([4, 7])),
            ("toggle", |c| c.toggle_platform(4)),
            ("genre", |c| c.set_genre(Some(3))),
            ("sort", |c| c.set_sort(Some(SortKey::RatingDesc))),
            ("dates", |c| c.set_dates("2020-01-01,2020-12-31".parse().ok())),
            ("clear", |c| c.clear_all()),
        ];
        for (name, setter) in setters {
            let mut c = on_page_five();
            let plan = setter(&mut c);
            assert_eq!(c.state().page, 1, "{name} should reset page");
            assert_eq!(plan.params.get("page"), Some("1"), "{name}");
        }
    }

    #[test]
    fn set_page_keeps_filters() {
        let mut c = coordinator();
        c.set_search("doom");
        let plan = c.set_page(3);
        assert_eq!(c.state().search_text, "doom");
        assert_eq!(plan.params.get("page"), Some("3"));
        assert_eq!(plan.params.get("search"), Some("doom"));
        assert!(!plan.invalidate_genre_cache);
    }

    #[test]
    fn set_page_zero_clamps_to_one() {
        let mut c = coordinator();
        c.set_page(0);
        assert_eq!(c.state().page, 1);
    }

    #[test]
    fn platform_change_invalidates_cache() {
        let mut c = coordinator();
        assert!(c.set_platforms([4]).invalidate_genre_cache);
        assert!(c.set_platforms([4, 7]).invalidate_genre_cache);
    }

    #[test]
    fn same_platform_set_reordered_keeps_cache() {
        let mut c = coordinator();
        c.set_platforms([4, 7]);
        let plan = c.set_platforms([7, 4]);
        assert!(!plan.invalidate_genre_cache);
        // The outbound query follows the new selection order.
        assert_eq!(plan.params.get("platforms"), Some("7,4"));
    }

    #[test]
    fn toggle_appends_and_removes() {
        let mut c = coordinator();
        c.toggle_platform(18);
        c.toggle_platform(4);
        assert_eq!(c.state().platform_ids.iter().copied().collect::<Vec<_>>(), vec![18, 4]);

        let plan = c.toggle_platform(18);
        assert!(plan.invalidate_genre_cache);
        assert_eq!(plan.params.get("platforms"), Some("4"));
    }

    #[test]
    fn sort_change_invalidates_cache() {
        let mut c = coordinator();
        assert!(c.set_sort(Some(SortKey::RatingDesc)).invalidate_genre_cache);
        assert!(!c.set_sort(Some(SortKey::RatingDesc)).invalidate_genre_cache);
        assert!(c.set_sort(None).invalidate_genre_cache);
        assert!(!c.set_sort(Some(SortKey::Relevance)).invalidate_genre_cache);
    }

    #[test]
    fn genre_search_and_dates_keep_cache() {
        let mut c = coordinator();
        assert!(!c.set_genre(Some(4)).invalidate_genre_cache);
        assert!(!c.set_search("mario").invalidate_genre_cache);
        assert!(!c.set_dates(None).invalidate_genre_cache);
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut c = coordinator();
        c.set_search("halo");
        c.set_platforms([1]);
        c.set_genre(Some(2));
        c.set_sort(Some(SortKey::NameAsc));

        let plan = c.clear_all();
        assert!(plan.invalidate_genre_cache);
        assert_eq!(c.state(), &FilterState::default());
        assert_eq!(plan.params.names(), vec!["key", "page", "page_size"]);
    }

    #[test]
    fn clear_all_from_defaults_keeps_cache() {
        let mut c = coordinator();
        c.set_search("halo");
        assert!(!c.clear_all().invalidate_genre_cache);
    }

    #[test]
    fn current_plan_matches_state() {
        let mut c = coordinator();
        c.set_genre(Some(5));
        c.set_page(2);
        let plan = c.current_plan();
        assert_eq!(plan.params.get("genres"), Some("5"));
        assert_eq!(plan.params.get("page"), Some("2"));
    }
}
