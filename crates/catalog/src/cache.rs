//! In-memory memo of genre tab results.
//!
//! Entries are keyed by genre, platform selection and sort. Platform ids are
//! sorted in the key, so `[1, 4]` and `[4, 1]` share an entry even though the
//! outbound query keeps selection order. Nothing is evicted; the whole map is
//! dropped when the platform or sort filter changes.

use std::collections::HashMap;
use std::fmt;

use gamedex_rawg::{GameSummary, PagedResult};

use crate::query::SortKey;

/// Deterministic identity of a memoized genre result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new<'a>(
        genre_id: u32,
        platform_ids: impl IntoIterator<Item = &'a u32>,
        sort: Option<SortKey>,
    ) -> Self {
        let mut platforms: Vec<u32> = platform_ids.into_iter().copied().collect();
        platforms.sort_unstable();
        platforms.dedup();
        let platforms = platforms
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let sort = sort.map_or("", SortKey::as_param);
        Self(format!("{genre_id}|{platforms}|{sort}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Genre tab results for the current platform/sort filters.
#[derive(Debug, Clone, Default)]
pub struct GenreGamesCache {
    entries: HashMap<CacheKey, PagedResult<GameSummary>>,
    generation: u64,
}

impl GenreGamesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<'a>(
        &self,
        genre_id: u32,
        platform_ids: impl IntoIterator<Item = &'a u32>,
        sort: Option<SortKey>,
    ) -> Option<&PagedResult<GameSummary>> {
        self.entries.get(&CacheKey::new(genre_id, platform_ids, sort))
    }

    pub fn get_by_key(&self, key: &CacheKey) -> Option<&PagedResult<GameSummary>> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: CacheKey, result: PagedResult<GameSummary>) {
        self.entries.insert(key, result);
    }

    /// Stores `result` only if no [`clear`](Self::clear) happened since
    /// `generation` was read.
    ///
    /// Returns whether the entry was stored. A fetch that started under the
    /// old filters must not repopulate a cache that was just invalidated.
    pub fn put_if_current(
        &mut self,
        generation: u64,
        key: CacheKey,
        result: PagedResult<GameSummary>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.put(key, result);
        true
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    /// Incremented on every [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
