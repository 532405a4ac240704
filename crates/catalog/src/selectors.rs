//! Read-only projections over a [`CatalogState`] snapshot.

use gamedex_rawg::{GameDetail, GameSummary, GenreSummary, Screenshot};

use crate::resource::Status;
use crate::state::CatalogState;

/// Games of the last committed page; empty before the first success.
pub fn all_games(state: &CatalogState) -> &[GameSummary] {
    state
        .games()
        .data()
        .map(|p| p.items.as_slice())
        .unwrap_or_default()
}

/// The first `n` games, for featured rows.
pub fn featured_games(state: &CatalogState, n: usize) -> &[GameSummary] {
    let games = all_games(state);
    &games[..games.len().min(n)]
}

pub fn games_status(state: &CatalogState) -> Status {
    state.games().status()
}

pub fn games_error(state: &CatalogState) -> Option<&str> {
    state.games().error()
}

/// Total number of games matching the last committed query.
pub fn games_count(state: &CatalogState) -> u64 {
    state.games().data().map_or(0, |p| p.count)
}

pub fn has_next_page(state: &CatalogState) -> bool {
    state.games().data().is_some_and(|p| p.has_next())
}

pub fn has_previous_page(state: &CatalogState) -> bool {
    state.games().data().is_some_and(|p| p.has_previous())
}

/// Whether the last games query succeeded with no results.
///
/// An empty page is a valid success, distinct from a failure.
pub fn games_empty(state: &CatalogState) -> bool {
    games_status(state) == Status::Succeeded && all_games(state).is_empty()
}

pub fn single_game(state: &CatalogState) -> Option<&GameDetail> {
    state.game_detail().data()
}

pub fn single_game_status(state: &CatalogState) -> Status {
    state.game_detail().status()
}

pub fn single_game_error(state: &CatalogState) -> Option<&str> {
    state.game_detail().error()
}

pub fn screenshots(state: &CatalogState) -> &[Screenshot] {
    state
        .screenshots()
        .data()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn screenshots_status(state: &CatalogState) -> Status {
    state.screenshots().status()
}

pub fn all_genres(state: &CatalogState) -> &[GenreSummary] {
    state
        .genres()
        .data()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub fn genres_status(state: &CatalogState) -> Status {
    state.genres().status()
}

pub fn genres_error(state: &CatalogState) -> Option<&str> {
    state.genres().error()
}

/// The genre filter is offered only once genres loaded and are non-empty.
pub fn genre_filter_available(state: &CatalogState) -> bool {
    genres_status(state) == Status::Succeeded && !all_genres(state).is_empty()
}

pub fn genre_by_id(state: &CatalogState, id: u32) -> Option<&GenreSummary> {
    all_genres(state).iter().find(|g| g.id == id)
}
