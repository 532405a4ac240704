//! Catalog service: wires filters, queries, request slices and the genre
//! cache to a [`CatalogApi`].
//!
//! State updates run to completion under a short lock; no lock is held
//! across a network call. Each dispatch takes a token from its slice before
//! the request goes out, and its result is committed only if that token is
//! still the slice's latest when the response arrives. Filter changes take
//! their games token before releasing the filter lock.

use gamedex_rawg::{DateRange, GameSummary, PagedResult, RequestParams};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::api::CatalogApi;
use crate::cache::{CacheKey, GenreGamesCache};
use crate::error::CatalogError;
use crate::filter::{FetchPlan, FilterCoordinator};
use crate::query::{FilterState, PageOverride, QueryBuilder, SortKey};
use crate::resource::{AsyncResource, RequestToken, Settlement, Status};
use crate::state::{CatalogState, ResourceKind};

/// Number of games shown in the home page's featured row.
pub const FEATURED_COUNT: usize = 9;

/// Events emitted by the catalog for observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CatalogEvent {
    /// A request left for the API.
    Dispatched {
        kind: ResourceKind,
        token: RequestToken,
    },
    /// A response was written into its slice.
    Committed {
        kind: ResourceKind,
        token: RequestToken,
        status: Status,
    },
    /// A response arrived after a newer dispatch and was dropped.
    StaleDiscarded {
        kind: ResourceKind,
        token: RequestToken,
    },
    /// A genre tab was served from the cache.
    CacheHit { key: String },
    /// The genre cache was dropped after a platform or sort change.
    CacheCleared { generation: u64 },
}

type Slice<T> = fn(&mut CatalogState) -> &mut AsyncResource<T>;

/// The catalog's single owner of filter state, request slices and the genre
/// cache.
pub struct Catalog<A> {
    api: A,
    state: RwLock<CatalogState>,
    filters: Mutex<FilterCoordinator>,
    genre_cache: Mutex<GenreGamesCache>,
    events_tx: mpsc::Sender<CatalogEvent>,
    events_rx: Mutex<Option<mpsc::Receiver<CatalogEvent>>>,
}

impl<A: CatalogApi> Catalog<A> {
    pub fn new(api: A) -> Self {
        let filters = FilterCoordinator::new(QueryBuilder::new(api.credential()));
        Self::with_filters(api, filters)
    }

    /// Creates a catalog starting from an existing filter state.
    pub fn with_filter_state(api: A, state: FilterState) -> Self {
        let filters = FilterCoordinator::with_state(QueryBuilder::new(api.credential()), state);
        Self::with_filters(api, filters)
    }

    fn with_filters(api: A, filters: FilterCoordinator) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            api,
            state: RwLock::new(CatalogState::new()),
            filters: Mutex::new(filters),
            genre_cache: Mutex::new(GenreGamesCache::new()),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Takes the event receiver. Can only be called once.
    pub async fn take_events(&self) -> Option<mpsc::Receiver<CatalogEvent>> {
        self.events_rx.lock().await.take()
    }

    /// Returns a copy of every request slice.
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    /// Runs `f` against the current state without copying it.
    ///
    /// Pair with the functions in [`selectors`](crate::selectors).
    pub async fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Returns the current filter state.
    pub async fn filters(&self) -> FilterState {
        self.filters.lock().await.state().clone()
    }

    /// Runs `f` against the genre cache.
    pub async fn with_genre_cache<R>(&self, f: impl FnOnce(&GenreGamesCache) -> R) -> R {
        f(&*self.genre_cache.lock().await)
    }

    // --- Dispatch ---

    /// Fetches a games page into the games-list slice.
    pub async fn dispatch_games(&self, params: RequestParams) -> Settlement {
        let token = self
            .begin(ResourceKind::GamesList, CatalogState::games_mut)
            .await;
        self.fetch_games_for(token, params).await
    }

    /// Fetches a genres page into the genres-list slice.
    pub async fn dispatch_genres(&self, page: u32) -> Settlement {
        let params = self.filters.lock().await.query().build_genres(page);
        let kind = ResourceKind::GenresList;
        let token = self.begin(kind, CatalogState::genres_mut).await;
        let result = self.api.fetch_genres(&params).await;
        self.settle(kind, CatalogState::genres_mut, token, result).await
    }

    pub async fn dispatch_game_detail(&self, id: &str) -> Settlement {
        let kind = ResourceKind::GameDetail;
        let token = self.begin(kind, CatalogState::game_detail_mut).await;
        let result = self.api.fetch_game_by_id(id).await;
        self.settle(kind, CatalogState::game_detail_mut, token, result)
            .await
    }

    pub async fn dispatch_screenshots(&self, id: &str) -> Settlement {
        let kind = ResourceKind::Screenshots;
        let token = self.begin(kind, CatalogState::screenshots_mut).await;
        let result = self.api.fetch_screenshots(id).await;
        self.settle(kind, CatalogState::screenshots_mut, token, result)
            .await
    }

    /// Loads the detail page for one game: record and screenshots together.
    pub async fn load_game(&self, id: &str) -> (Settlement, Settlement) {
        tokio::join!(self.dispatch_game_detail(id), self.dispatch_screenshots(id))
    }

    /// Loads the home page: the unfiltered games listing and the first page
    /// of genres.
    pub async fn load_home(&self) -> (Settlement, Settlement) {
        let params = self
            .filters
            .lock()
            .await
            .query()
            .build(&FilterState::default(), None);
        tokio::join!(self.dispatch_games(params), self.dispatch_genres(1))
    }

    // --- Filters ---

    pub async fn set_search(&self, text: impl Into<String>) -> Settlement {
        let text = text.into();
        self.apply_filter(move |f| f.set_search(text)).await
    }

    pub async fn set_platforms(&self, ids: impl IntoIterator<Item = u32>) -> Settlement {
        let ids: Vec<u32> = ids.into_iter().collect();
        self.apply_filter(move |f| f.set_platforms(ids)).await
    }

    pub async fn toggle_platform(&self, id: u32) -> Settlement {
        self.apply_filter(|f| f.toggle_platform(id)).await
    }

    pub async fn set_genre(&self, genre_id: Option<u32>) -> Settlement {
        self.apply_filter(|f| f.set_genre(genre_id)).await
    }

    pub async fn set_sort(&self, sort: Option<SortKey>) -> Settlement {
        self.apply_filter(|f| f.set_sort(sort)).await
    }

    pub async fn set_dates(&self, dates: Option<DateRange>) -> Settlement {
        self.apply_filter(|f| f.set_dates(dates)).await
    }

    pub async fn set_page(&self, page: u32) -> Settlement {
        self.apply_filter(|f| f.set_page(page)).await
    }

    pub async fn clear_all(&self) -> Settlement {
        self.apply_filter(FilterCoordinator::clear_all).await
    }

    /// Re-issues the games request for the unchanged filter state, e.g. as a
    /// manual retry after a failure.
    pub async fn refresh_games(&self) -> Settlement {
        self.apply_filter(|f| f.current_plan()).await
    }

    pub async fn clear_error(&self, kind: ResourceKind) {
        self.state.write().await.clear_error(kind);
    }

    // --- Genre tabs ---

    /// Returns the first page of games for a genre tab under the current
    /// platform and sort filters.
    ///
    /// Served from the cache when present; otherwise fetched and stored.
    /// The result does not touch the games-list slice.
    pub async fn load_genre_tab(
        &self,
        genre_id: u32,
    ) -> Result<PagedResult<GameSummary>, CatalogError> {
        let (key, params) = {
            let filters = self.filters.lock().await;
            let current = filters.state();
            let key = CacheKey::new(genre_id, &current.platform_ids, current.effective_sort());
            let tab = FilterState {
                platform_ids: current.platform_ids.clone(),
                genre_id: Some(genre_id),
                sort_key: current.effective_sort(),
                page_size: current.page_size,
                ..FilterState::default()
            };
            (key, filters.query().build(&tab, Some(PageOverride::page(1))))
        };

        let generation = {
            let cache = self.genre_cache.lock().await;
            if let Some(hit) = cache.get_by_key(&key) {
                debug!(%key, "genre tab served from cache");
                self.emit(CatalogEvent::CacheHit {
                    key: key.to_string(),
                });
                return Ok(hit.clone());
            }
            cache.generation()
        };

        debug!(%key, "fetching genre tab");
        let result = self.api.fetch_games(&params).await.inspect_err(|e| {
            warn!(%key, error = %e, "genre tab fetch failed");
        })?;

        let stored = self
            .genre_cache
            .lock()
            .await
            .put_if_current(generation, key.clone(), result.clone());
        if !stored {
            debug!(%key, "filters changed during fetch, result not cached");
        }
        Ok(result)
    }

    // --- Internals ---

    /// Applies a filter change and dispatches the games request it plans.
    ///
    /// The `filters` guard is held until the games token is taken, so tokens
    /// follow the order in which filter changes were applied and the latest
    /// token always belongs to the current filter state.
    async fn apply_filter(
        &self,
        change: impl FnOnce(&mut FilterCoordinator) -> FetchPlan,
    ) -> Settlement {
        let (token, params) = {
            let mut filters = self.filters.lock().await;
            let plan = change(&mut filters);
            if plan.invalidate_genre_cache {
                self.clear_genre_cache().await;
            }
            let token = self
                .begin(ResourceKind::GamesList, CatalogState::games_mut)
                .await;
            (token, plan.params)
        };
        self.fetch_games_for(token, params).await
    }

    async fn fetch_games_for(&self, token: RequestToken, params: RequestParams) -> Settlement {
        let result = self.api.fetch_games(&params).await;
        self.settle(ResourceKind::GamesList, CatalogState::games_mut, token, result)
            .await
    }

    async fn clear_genre_cache(&self) {
        let generation = {
            let mut cache = self.genre_cache.lock().await;
            cache.clear();
            cache.generation()
        };
        info!(generation, "genre cache cleared");
        self.emit(CatalogEvent::CacheCleared { generation });
    }

    async fn begin<T>(&self, kind: ResourceKind, slice: Slice<T>) -> RequestToken {
        let token = slice(&mut *self.state.write().await).begin();
        debug!(%kind, %token, "dispatched");
        self.emit(CatalogEvent::Dispatched { kind, token });
        token
    }

    async fn settle<T>(
        &self,
        kind: ResourceKind,
        slice: Slice<T>,
        token: RequestToken,
        result: Result<T, CatalogError>,
    ) -> Settlement {
        let result = result.map_err(|e| {
            warn!(%kind, %token, error = %e, "fetch failed");
            e.to_string()
        });

        let (settlement, status) = {
            let mut state = self.state.write().await;
            let resource = slice(&mut *state);
            let settlement = resource.settle(token, result);
            (settlement, resource.status())
        };

        match settlement {
            Settlement::Committed => {
                debug!(%kind, %token, ?status, "committed");
                self.emit(CatalogEvent::Committed {
                    kind,
                    token,
                    status,
                });
            }
            Settlement::Stale => {
                debug!(%kind, %token, "superseded response discarded");
                self.emit(CatalogEvent::StaleDiscarded { kind, token });
            }
        }
        settlement
    }

    fn emit(&self, event: CatalogEvent) {
        if self.events_tx.try_send(event).is_err() {
            debug!("event channel full or closed, event dropped");
        }
    }
}
