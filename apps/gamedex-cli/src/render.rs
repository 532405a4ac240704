//! Plain-text rendering of catalog state.

use std::fmt::Write;

use gamedex_catalog::platforms::platform_name;
use gamedex_catalog::{FilterState, GameDetail, GameSummary, GenreSummary, Screenshot};

/// Top games listed under each genre tab on the home page.
const GENRE_TAB_GAMES: usize = 6;

/// Five-character star bar, e.g. `★★★☆☆`.
pub fn stars(game: &GameSummary) -> String {
    let full = usize::from(game.full_stars());
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// One line per game: id, name, stars, rating and release date.
pub fn game_list(games: &[GameSummary]) -> String {
    let mut out = String::new();
    for game in games {
        let _ = writeln!(
            out,
            "{:>7}  {:<40}  {} {:>3}  {}",
            game.id,
            truncate(&game.name, 40),
            stars(game),
            game.rating_label(),
            game.release_label(),
        );
    }
    out
}

/// Footer for a games page: totals and pagination hints.
pub fn page_footer(page: u32, count: u64, has_previous: bool, has_next: bool) -> String {
    let mut nav = Vec::new();
    if has_previous {
        nav.push(format!("--page {}", page.saturating_sub(1).max(1)));
    }
    if has_next {
        nav.push(format!("--page {}", page.saturating_add(1)));
    }
    if nav.is_empty() {
        format!("page {page} · {count} games")
    } else {
        format!("page {page} · {count} games · {}", nav.join(" | "))
    }
}

/// Human summary of the active filters, or `None` when nothing is set.
pub fn filter_summary(state: &FilterState) -> Option<String> {
    if !state.has_active_filters() {
        return None;
    }

    let mut parts = Vec::new();
    let search = state.search_text.trim();
    if !search.is_empty() {
        parts.push(format!("search \"{search}\""));
    }
    if !state.platform_ids.is_empty() {
        let names: Vec<String> = state
            .platform_ids
            .iter()
            .map(|&id| platform_name(id).map_or_else(|| format!("#{id}"), str::to_string))
            .collect();
        parts.push(format!("platforms {}", names.join(", ")));
    }
    if let Some(genre) = state.genre_id {
        parts.push(format!("genre {genre}"));
    }
    if let Some(sort) = state.effective_sort() {
        parts.push(format!("sorted by {}", sort.label()));
    }
    if let Some(dates) = state.dates {
        parts.push(format!("released {dates}"));
    }
    Some(parts.join(" · "))
}

pub fn game_detail(game: &GameDetail, screenshots: &[Screenshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", game.name, game.id);

    let released = game
        .released
        .map_or_else(|| "TBA".to_string(), |d| d.format("%Y-%m-%d").to_string());
    let _ = writeln!(out, "Released:   {released}");
    if game.rating > 0.0 {
        let _ = writeln!(out, "Rating:     {:.1} ({} ratings)", game.rating, game.ratings_count);
    }
    if let Some(score) = game.metacritic {
        let _ = writeln!(out, "Metacritic: {score}");
    }
    if game.playtime > 0 {
        let _ = writeln!(out, "Playtime:   {}h", game.playtime);
    }
    write_names(&mut out, "Genres", game.genres.iter().map(|g| g.name.as_str()));
    write_names(&mut out, "Platforms", game.platform_names().into_iter());
    write_names(&mut out, "Developers", game.developers.iter().map(|d| d.name.as_str()));
    write_names(&mut out, "Publishers", game.publishers.iter().map(|p| p.name.as_str()));
    if let Some(site) = game.website.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "Website:    {site}");
    }

    let description = game.description_raw.trim();
    if !description.is_empty() {
        let _ = writeln!(out, "\n{description}");
    }

    if !screenshots.is_empty() {
        let _ = writeln!(out, "\nScreenshots:");
        for shot in screenshots {
            let _ = writeln!(out, "  {} ({}x{})", shot.image, shot.width, shot.height);
        }
    }
    out
}

/// Genres with their game counts and top games.
pub fn genre_list(genres: &[GenreSummary]) -> String {
    let mut out = String::new();
    for genre in genres {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {} games",
            genre.id, genre.name, genre.games_count
        );
        for game in genre.games.iter().take(GENRE_TAB_GAMES) {
            let _ = writeln!(out, "         - {}", game.name);
        }
    }
    out
}

fn write_names<'a>(out: &mut String, label: &str, names: impl Iterator<Item = &'a str>) {
    let names: Vec<&str> = names.collect();
    if !names.is_empty() {
        let _ = writeln!(out, "{:<11} {}", format!("{label}:"), names.join(", "));
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
