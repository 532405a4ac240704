//! RAWG video game database API client.
//!
//! Provides an async client for the [RAWG](https://rawg.io/apidocs) REST API.
//! Every request is a single GET decorated with the static API key as a
//! `key` query parameter. There is no retry: a failed call surfaces as
//! [`Error`] and the caller decides whether to dispatch again.

pub mod client;
pub mod params;
pub mod types;

pub use client::{Client, ClientConfig, DEFAULT_BASE_URL, Error};
pub use params::RequestParams;
pub use types::{
    DateRange, GameDetail, GameSummary, GenreGame, GenreSummary, NamedRef, PagedResult,
    PlatformEntry, Screenshot,
};
