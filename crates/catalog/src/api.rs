//! Remote catalog abstraction.
//!
//! [`Catalog`](crate::Catalog) talks to the game database through this trait
//! so tests can substitute a scripted source. The RAWG client implements it
//! directly.

use std::future::Future;
use std::pin::Pin;

use gamedex_rawg::{GameDetail, GameSummary, GenreSummary, PagedResult, RequestParams, Screenshot};

use crate::error::CatalogError;

/// Boxed future returned by [`CatalogApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CatalogError>> + Send + 'a>>;

/// Source of catalog data. One call is one request: no retries.
pub trait CatalogApi: Send + Sync {
    /// The API credential placed into every parameter set.
    fn credential(&self) -> &str;

    fn fetch_games<'a>(&'a self, params: &'a RequestParams) -> ApiFuture<'a, PagedResult<GameSummary>>;

    fn fetch_genres<'a>(&'a self, params: &'a RequestParams) -> ApiFuture<'a, Vec<GenreSummary>>;

    fn fetch_game_by_id<'a>(&'a self, id: &'a str) -> ApiFuture<'a, GameDetail>;

    fn fetch_screenshots<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Vec<Screenshot>>;
}

impl CatalogApi for gamedex_rawg::Client {
    fn credential(&self) -> &str {
        self.api_key()
    }

    fn fetch_games<'a>(&'a self, params: &'a RequestParams) -> ApiFuture<'a, PagedResult<GameSummary>> {
        Box::pin(async move { Ok(gamedex_rawg::Client::fetch_games(self, params).await?) })
    }

    fn fetch_genres<'a>(&'a self, params: &'a RequestParams) -> ApiFuture<'a, Vec<GenreSummary>> {
        Box::pin(async move { Ok(gamedex_rawg::Client::fetch_genres(self, params).await?) })
    }

    fn fetch_game_by_id<'a>(&'a self, id: &'a str) -> ApiFuture<'a, GameDetail> {
        Box::pin(async move { Ok(gamedex_rawg::Client::fetch_game_by_id(self, id).await?) })
    }

    fn fetch_screenshots<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Vec<Screenshot>> {
        Box::pin(async move { Ok(gamedex_rawg::Client::fetch_screenshots(self, id).await?) })
    }
}
