//! The catalog state container: one request slice per resource kind.

use std::fmt;

use gamedex_rawg::{GameDetail, GameSummary, GenreSummary, PagedResult, Screenshot};
use serde::Serialize;

use crate::resource::{AsyncResource, RequestToken, Settlement};

/// The fetchable entity categories, each with its own slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    GamesList,
    GameDetail,
    Screenshots,
    GenresList,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::GamesList => "games-list",
            ResourceKind::GameDetail => "game-detail",
            ResourceKind::Screenshots => "screenshots",
            ResourceKind::GenresList => "genres-list",
        })
    }
}

/// Snapshot of every request slice.
///
/// Writes go through [`Catalog`](crate::Catalog); readers get `&CatalogState`
/// and project it with [`selectors`](crate::selectors).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub(crate) games: AsyncResource<PagedResult<GameSummary>>,
    pub(crate) game_detail: AsyncResource<GameDetail>,
    pub(crate) screenshots: AsyncResource<Vec<Screenshot>>,
    pub(crate) genres: AsyncResource<Vec<GenreSummary>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> &AsyncResource<PagedResult<GameSummary>> {
        &self.games
    }

    pub fn game_detail(&self) -> &AsyncResource<GameDetail> {
        &self.game_detail
    }

    pub fn screenshots(&self) -> &AsyncResource<Vec<Screenshot>> {
        &self.screenshots
    }

    pub fn genres(&self) -> &AsyncResource<Vec<GenreSummary>> {
        &self.genres
    }

    pub(crate) fn games_mut(&mut self) -> &mut AsyncResource<PagedResult<GameSummary>> {
        &mut self.games
    }

    pub(crate) fn game_detail_mut(&mut self) -> &mut AsyncResource<GameDetail> {
        &mut self.game_detail
    }

    pub(crate) fn screenshots_mut(&mut self) -> &mut AsyncResource<Vec<Screenshot>> {
        &mut self.screenshots
    }

    pub(crate) fn genres_mut(&mut self) -> &mut AsyncResource<Vec<GenreSummary>> {
        &mut self.genres
    }

    /// Starts a request on the slice for `kind`.
    pub(crate) fn begin(&mut self, kind: ResourceKind) -> RequestToken {
        match kind {
            ResourceKind::GamesList => self.games.begin(),
            ResourceKind::GameDetail => self.game_detail.begin(),
            ResourceKind::Screenshots => self.screenshots.begin(),
            ResourceKind::GenresList => self.genres.begin(),
        }
    }

    /// Records a failure on the slice for `kind`.
    pub(crate) fn fail(
        &mut self,
        kind: ResourceKind,
        token: RequestToken,
        message: String,
    ) -> Settlement {
        match kind {
            ResourceKind::GamesList => self.games.settle(token, Err(message)),
            ResourceKind::GameDetail => self.game_detail.settle(token, Err(message)),
            ResourceKind::Screenshots => self.screenshots.settle(token, Err(message)),
            ResourceKind::GenresList => self.genres.settle(token, Err(message)),
        }
    }

    /// Resets the error of one slice.
    pub fn clear_error(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::GamesList => self.games.clear_error(),
            ResourceKind::GameDetail => self.game_detail.clear_error(),
            ResourceKind::Screenshots => self.screenshots.clear_error(),
            ResourceKind::GenresList => self.genres.clear_error(),
        }
    }
}
