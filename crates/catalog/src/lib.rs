//! Game catalog state: filters, queries, request slices and the genre cache.
//!
//! This crate implements the **data-synchronization core** of the catalog
//! browser. It has no UI dependencies: a rendering layer drives it through
//! [`Catalog`] and reads state through the pure functions in [`selectors`].
//!
//! # Flow
//!
//! 1. **Filter**: [`FilterCoordinator`] applies a user change and resets the page
//! 2. **Query**: [`QueryBuilder`] derives the canonical [`RequestParams`]
//! 3. **Fetch**: a [`CatalogApi`] implementation issues the GET request
//! 4. **Commit**: the [`AsyncResource`] slice accepts the result only if its
//!    request token is still the latest one dispatched
//! 5. **Memoize**: genre tab results land in the [`GenreGamesCache`]

pub mod api;
pub mod cache;
pub mod error;
pub mod filter;
pub mod platforms;
pub mod query;
pub mod resource;
pub mod selectors;
pub mod service;
pub mod state;

// Re-export primary types for convenience.
pub use api::{ApiFuture, CatalogApi};
pub use cache::{CacheKey, GenreGamesCache};
pub use error::CatalogError;
pub use filter::{FetchPlan, FilterCoordinator};
pub use platforms::{KNOWN_PLATFORMS, Platform, find_platform};
pub use query::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, FilterState, PageOverride, QueryBuilder, SortKey,
};
pub use resource::{AsyncResource, RequestToken, ResourceEvent, Settlement, Status};
pub use service::{Catalog, CatalogEvent, FEATURED_COUNT};
pub use state::{CatalogState, ResourceKind};

pub use gamedex_rawg::{
    DateRange, GameDetail, GameSummary, GenreSummary, PagedResult, RequestParams, Screenshot,
};
