//! Gamedex entry point: a terminal view over the RAWG game catalog.

mod config;
mod render;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use gamedex_catalog::platforms::resolve_platforms;
use gamedex_catalog::{
    Catalog, DateRange, FEATURED_COUNT, FilterState, SortKey, Status, selectors,
};
use gamedex_rawg::Client;
use tracing_subscriber::EnvFilter;

use crate::config::{API_KEY_ENV, AppConfig};

#[derive(Debug, Parser)]
#[command(name = "gamedex", version, about = "Browse the RAWG game catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Featured games and the genre overview.
    Home,
    /// Search and filter the games listing.
    Games {
        #[arg(long)]
        search: Option<String>,
        /// Platform id, slug or name. Repeat to select several.
        #[arg(long = "platform")]
        platforms: Vec<String>,
        #[arg(long)]
        genre: Option<u32>,
        /// Ordering, e.g. `-rating`, `released`, `name`.
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Release window as `YYYY-MM-DD,YYYY-MM-DD`.
        #[arg(long)]
        dates: Option<DateRange>,
    },
    /// Details and screenshots for one game (id or slug).
    Game { id: String },
    /// List genres.
    Genres {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// First page of a genre under the platform and sort filters.
    GenreTab {
        id: u32,
        #[arg(long = "platform")]
        platforms: Vec<String>,
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Print the config file location.
    ConfigPath,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gamedex=debug")),
        )
        .init();

    let cli = Cli::parse();

    if let Command::ConfigPath = cli.command {
        println!("{}", config::config_path()?.display());
        return Ok(());
    }

    let config = AppConfig::load()?;
    if config.api_key.is_empty() {
        bail!(
            "no API key: set {API_KEY_ENV} or \"apiKey\" in {}",
            config::config_path()?.display()
        );
    }
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let client = Client::with_config(config.client_config()).context("creating RAWG client")?;

    match cli.command {
        Command::Home => home(Catalog::new(client)).await,
        Command::Games {
            search,
            platforms,
            genre,
            sort,
            page,
            dates,
        } => {
            let state = FilterState {
                search_text: search.unwrap_or_default(),
                platform_ids: resolve_platforms(platforms.iter().map(String::as_str))?
                    .into_iter()
                    .collect(),
                genre_id: genre,
                sort_key: sort,
                dates,
                page: page.max(1),
                page_size: config.page_size,
            };
            games(Catalog::with_filter_state(client, state)).await
        }
        Command::Game { id } => game(Catalog::new(client), &id).await,
        Command::Genres { page } => genres(Catalog::new(client), page).await,
        Command::GenreTab {
            id,
            platforms,
            sort,
        } => {
            let state = FilterState {
                platform_ids: resolve_platforms(platforms.iter().map(String::as_str))?
                    .into_iter()
                    .collect(),
                sort_key: sort,
                page_size: config.page_size,
                ..FilterState::default()
            };
            genre_tab(Catalog::with_filter_state(client, state), id).await
        }
        Command::ConfigPath => Ok(()),
    }
}

async fn home(catalog: Catalog<Client>) -> anyhow::Result<()> {
    catalog.load_home().await;
    let state = catalog.snapshot().await;

    println!("Top popular games");
    match selectors::games_status(&state) {
        Status::Failed => println!(
            "  could not load games: {}",
            selectors::games_error(&state).unwrap_or("unknown error")
        ),
        _ => print!(
            "{}",
            render::game_list(selectors::featured_games(&state, FEATURED_COUNT))
        ),
    }

    println!();
    println!("Genres");
    if selectors::genre_filter_available(&state) {
        print!("{}", render::genre_list(selectors::all_genres(&state)));
    } else if let Some(error) = selectors::genres_error(&state) {
        println!("  could not load genres: {error}");
    }
    Ok(())
}

async fn games(catalog: Catalog<Client>) -> anyhow::Result<()> {
    catalog.refresh_games().await;
    let filters = catalog.filters().await;
    let state = catalog.snapshot().await;

    if let Some(error) = selectors::games_error(&state) {
        bail!("could not load games: {error}");
    }
    if let Some(summary) = render::filter_summary(&filters) {
        println!("{summary}");
    }
    if selectors::games_empty(&state) {
        println!("No games found.");
        return Ok(());
    }

    print!("{}", render::game_list(selectors::all_games(&state)));
    println!(
        "{}",
        render::page_footer(
            filters.page,
            selectors::games_count(&state),
            selectors::has_previous_page(&state),
            selectors::has_next_page(&state),
        )
    );
    Ok(())
}

async fn game(catalog: Catalog<Client>, id: &str) -> anyhow::Result<()> {
    catalog.load_game(id).await;
    let state = catalog.snapshot().await;

    let Some(detail) = selectors::single_game(&state) else {
        bail!(
            "could not load game {id}: {}",
            selectors::single_game_error(&state).unwrap_or("unknown error")
        );
    };
    if selectors::screenshots_status(&state) == Status::Failed {
        tracing::warn!(id, "screenshots unavailable");
    }
    print!("{}", render::game_detail(detail, selectors::screenshots(&state)));
    Ok(())
}

async fn genres(catalog: Catalog<Client>, page: u32) -> anyhow::Result<()> {
    catalog.dispatch_genres(page).await;
    let state = catalog.snapshot().await;

    if let Some(error) = selectors::genres_error(&state) {
        bail!("could not load genres: {error}");
    }
    print!("{}", render::genre_list(selectors::all_genres(&state)));
    Ok(())
}

async fn genre_tab(catalog: Catalog<Client>, genre_id: u32) -> anyhow::Result<()> {
    let page = catalog
        .load_genre_tab(genre_id)
        .await
        .with_context(|| format!("loading genre {genre_id}"))?;

    if page.items.is_empty() {
        println!("No games found.");
    } else {
        print!("{}", render::game_list(&page.items));
    }
    Ok(())
}
