//! API response types for RAWG.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of a RAWG list endpoint.
///
/// `next` and `previous` are opaque URLs. They are only used as presence
/// indicators for pagination controls and are never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(rename = "results", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "next", default)]
    pub next_page: Option<String>,
    #[serde(rename = "previous", default)]
    pub previous_page: Option<String>,
}

impl<T> PagedResult<T> {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_page.is_some()
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next_page: None,
            previous_page: None,
        }
    }
}

/// A game as it appears in list results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub background_image: Option<String>,
    /// Average user rating, 0–5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default)]
    pub ratings_count: u64,
}

impl GameSummary {
    /// Number of filled stars on a five-star scale.
    pub fn full_stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).floor() as u8
    }

    /// Rating with one decimal, or `"N/A"` when unrated.
    pub fn rating_label(&self) -> String {
        if self.rating > 0.0 {
            format!("{:.1}", self.rating)
        } else {
            "N/A".into()
        }
    }

    /// Release date, or `"TBA"` when unknown.
    pub fn release_label(&self) -> String {
        self.released
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "TBA".into())
    }
}

/// A small `{id, name, slug}` reference embedded in detail payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Platform wrapper as nested by the game detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub platform: NamedRef,
}

/// Full game record from `/games/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description_raw: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub ratings_count: u64,
    #[serde(default)]
    pub metacritic: Option<u32>,
    #[serde(default)]
    pub playtime: u32,
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default)]
    pub genres: Vec<NamedRef>,
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
    #[serde(default)]
    pub developers: Vec<NamedRef>,
    #[serde(default)]
    pub publishers: Vec<NamedRef>,
}

impl GameDetail {
    /// Platform names in API order.
    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms
            .iter()
            .map(|p| p.platform.name.as_str())
            .collect()
    }
}

/// Screenshot metadata from `/games/{id}/screenshots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    /// RAWG reports the game's background image with id `-1`.
    pub id: i64,
    pub image: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// One of a genre's top games, embedded in the genre listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreGame {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub added: u64,
}

/// A genre from `/genres`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreSummary {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
    #[serde(default)]
    pub games: Vec<GenreGame>,
}

/// Inclusive release-date window, sent as `dates=YYYY-MM-DD,YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range, swapping the bounds if given in reverse.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d")
        )
    }
}

impl FromStr for DateRange {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s.split_once(',').unwrap_or((s, s));
        let from = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d")?;
        let to = NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d")?;
        Ok(Self::new(from, to))
    }
}
