//! CLI runner - executes commands

use crate::catalog::{CatalogApi, CatalogClient};
use crate::cli::commands::{Cli, Commands, FilterArgs, OutputFormat};
use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::model::{Character, CharacterPage, Episode};
use crate::pagination::{last_page, CharacterPaginator, EpisodeWindowPaginator};
use crate::store::{CharacterStore, EpisodeListView, ListingView, LoadOutcome};
use crate::types::LogLevel;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// One window of a character's episodes
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EpisodeWindowView {
    pub character_id: u32,
    pub page: u32,
    pub pages: u32,
    pub total: usize,
    pub episodes: Vec<Episode>,
}

/// Character detail with its first episode window
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CharacterDetail {
    #[serde(flatten)]
    pub character: Character,
    pub episode_page: u32,
    pub episode_pages: u32,
    pub episodes: Vec<Episode>,
}

/// Resolve window `page` of character `id`'s episodes
///
/// A character without episodes yields an empty window instead of an error.
pub(crate) async fn episode_window(
    api: Arc<dyn CatalogApi>,
    id: u32,
    page: u32,
) -> Result<EpisodeWindowView> {
    let character = api.character(id).await?;
    let episodes = match EpisodeWindowPaginator::new(api)
        .try_fetch_window(&character.episode, page)
        .await
    {
        Ok(episodes) => episodes,
        Err(Error::EmptyEpisodeList) => Vec::new(),
        Err(e) => return Err(e),
    };

    Ok(EpisodeWindowView {
        character_id: character.id,
        page: page.max(1),
        pages: last_page(character.episode.len()),
        total: character.episode.len(),
        episodes,
    })
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed arguments
    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Resolve configuration: file, then environment, then `--base-url`
    pub fn config(&self) -> Result<BrowserConfig> {
        let config = BrowserConfig::load(self.cli.config.as_deref())?;
        match &self.cli.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => Ok(config),
        }
    }

    /// Log level: DEBUG with `--verbose`, else the configured level, else INFO
    pub fn log_level(&self, config: &BrowserConfig) -> tracing::Level {
        if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            config.log_level.unwrap_or(LogLevel::Info).into()
        }
    }

    /// Run the CLI command against the catalog described by `config`
    pub async fn run(&self, config: BrowserConfig) -> Result<()> {
        info!(base_url = %config.base_url, "Using catalog");
        let api: Arc<dyn CatalogApi> = Arc::new(CatalogClient::from_config(&config)?);

        if let Commands::Serve { port } = &self.cli.command {
            return crate::cli::serve(api, *port).await;
        }

        let output = self.execute(api).await?;
        println!("{output}");
        Ok(())
    }

    /// Execute a one-shot command and render its output
    pub async fn execute(&self, api: Arc<dyn CatalogApi>) -> Result<String> {
        let value = match &self.cli.command {
            Commands::Characters {
                filter,
                page,
                all,
                max_pages,
            } => {
                if *all {
                    self.all_characters(api, filter, *max_pages).await?
                } else {
                    self.characters(api, filter, *page).await?
                }
            }
            Commands::Character { id } => self.character(api, *id).await?,
            Commands::Episodes { id, page } => {
                serde_json::to_value(episode_window(api, *id, *page).await?)?
            }
            Commands::Serve { .. } => {
                return Err(Error::config("serve is not a one-shot command"));
            }
        };
        render(&value, self.cli.format)
    }

    async fn characters(
        &self,
        api: Arc<dyn CatalogApi>,
        filter: &FilterArgs,
        page: u32,
    ) -> Result<serde_json::Value> {
        let page = CharacterPaginator::new(api)
            .try_fetch(&filter.to_filter(), page)
            .await?;
        Ok(serde_json::to_value(page)?)
    }

    /// Drive a listing view until the catalog runs out or `max_pages` is reached
    async fn all_characters(
        &self,
        api: Arc<dyn CatalogApi>,
        filter: &FilterArgs,
        max_pages: Option<u32>,
    ) -> Result<serde_json::Value> {
        let store = Arc::new(RwLock::new(CharacterStore::new()));
        let view = ListingView::new(CharacterPaginator::new(api), Arc::clone(&store));

        check(view.apply_filter(filter.to_filter()).await)?;
        let mut pages = 1;
        while view.can_load_more().await && max_pages.map_or(true, |max| pages < max) {
            check(view.load_more().await)?;
            pages += 1;
        }
        debug!(pages, "Listing complete");

        let store = store.read().await;
        Ok(serde_json::to_value(CharacterPage {
            info: store.page_info().clone(),
            results: store.characters().to_vec(),
        })?)
    }

    async fn character(&self, api: Arc<dyn CatalogApi>, id: u32) -> Result<serde_json::Value> {
        let character = api.character(id).await?;
        let view = EpisodeListView::new(EpisodeWindowPaginator::new(api), &character);
        check(view.load_initial().await)?;

        let detail = CharacterDetail {
            episode_page: view.page().await,
            episode_pages: view.last_page(),
            episodes: view.episodes().await,
            character,
        };
        Ok(serde_json::to_value(detail)?)
    }
}

fn check(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Failed(e) => Err(e),
        _ => Ok(()),
    }
}

/// Render a JSON document in the requested format
pub fn render(value: &serde_json::Value, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(output)
}
