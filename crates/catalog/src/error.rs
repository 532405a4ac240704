//! Error types for catalog operations.

/// Errors produced by the catalog core.
///
/// Fetch failures never escape a request slice: they are recorded as the
/// slice's error message. This type is what a [`CatalogApi`](crate::CatalogApi)
/// returns and what input parsing reports.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Remote(#[from] gamedex_rawg::Error),

    /// Remote failure reported by a non-RAWG transport.
    #[error("{0}")]
    Fetch(String),

    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}
