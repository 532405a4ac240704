//! Platforms offered by the platform filter.

use crate::error::CatalogError;

/// A RAWG parent platform the filter UI can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub id: u32,
    pub name: &'static str,
    pub slug: &'static str,
}

/// RAWG platform ids listed in the filter, in display order.
pub const KNOWN_PLATFORMS: &[Platform] = &[
    Platform {
        id: 4,
        name: "PC",
        slug: "pc",
    },
    Platform {
        id: 187,
        name: "PlayStation 5",
        slug: "playstation5",
    },
    Platform {
        id: 18,
        name: "PlayStation 4",
        slug: "playstation4",
    },
    Platform {
        id: 16,
        name: "PlayStation 3",
        slug: "playstation3",
    },
    Platform {
        id: 1,
        name: "Xbox One",
        slug: "xbox-one",
    },
    Platform {
        id: 186,
        name: "Xbox Series S/X",
        slug: "xbox-series-x",
    },
    Platform {
        id: 14,
        name: "Xbox 360",
        slug: "xbox360",
    },
    Platform {
        id: 7,
        name: "Nintendo Switch",
        slug: "nintendo-switch",
    },
];

/// Looks up a platform by numeric id, slug, or case-insensitive name.
pub fn find_platform(query: &str) -> Option<&'static Platform> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u32>() {
        return KNOWN_PLATFORMS.iter().find(|p| p.id == id);
    }
    KNOWN_PLATFORMS
        .iter()
        .find(|p| p.slug == query || p.name.eq_ignore_ascii_case(query))
}

/// Resolves each query to a platform id.
///
/// Unlisted numeric ids are accepted as-is: RAWG knows more platforms than
/// the filter offers.
pub fn resolve_platforms<'a>(
    queries: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<u32>, CatalogError> {
    queries
        .into_iter()
        .map(|q| match find_platform(q) {
            Some(p) => Ok(p.id),
            None => q
                .trim()
                .parse::<u32>()
                .map_err(|_| CatalogError::UnknownPlatform(q.to_string())),
        })
        .collect()
}

/// Display name for a platform id, if listed.
pub fn platform_name(id: u32) -> Option<&'static str> {
    KNOWN_PLATFORMS.iter().find(|p| p.id == id).map(|p| p.name)
}
