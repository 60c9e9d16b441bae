//! Core service façade and bootstrap helpers.
//!
//! This crate is the composition root: it builds the shared HTTP client,
//! the SQLite pool and the stores exactly once, wires them into the
//! character and episode repositories, and hands those repositories to the
//! host UI layer. There is no ambient service locator; everything is
//! constructor-injected here.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder, DEFAULT_API_BASE_URL};
pub use error::{CoreError, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};

use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use core_catalog::{CharacterRepository, EpisodeRepository};
use core_store::{create_pool, DatabaseConfig, SqliteCharacterStore, SqliteEpisodeStore};
use provider_rickmorty::RickMortyClient;

/// Primary façade exposed to host applications.
///
/// Clone is cheap: the repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct CoreService {
    characters: Arc<CharacterRepository>,
    episodes: Arc<EpisodeRepository>,
}

impl CoreService {
    /// Build the full dependency graph from a validated configuration.
    pub async fn init(config: CoreConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CoreError::InitializationFailed(format!("HTTP client: {}", e)))?;
        let client = Arc::new(
            RickMortyClient::with_base_url(http, &config.api_base_url)
                .map_err(|e| CoreError::InitializationFailed(format!("API client: {}", e)))?,
        );

        let db_config =
            DatabaseConfig::new(&config.database_path).max_connections(config.max_connections);
        let pool = create_pool(db_config).await?;

        let character_store = Arc::new(SqliteCharacterStore::new(pool.clone()));
        let episode_store = Arc::new(SqliteEpisodeStore::new(pool));

        let characters = Arc::new(CharacterRepository::new(client.clone(), character_store));
        let episodes = Arc::new(EpisodeRepository::new(
            client,
            episode_store,
            Arc::clone(&characters),
        ));

        info!("Core service initialized");
        Ok(Self {
            characters,
            episodes,
        })
    }

    /// Character repository handle
    pub fn characters(&self) -> Arc<CharacterRepository> {
        Arc::clone(&self.characters)
    }

    /// Episode repository handle
    pub fn episodes(&self) -> Arc<EpisodeRepository> {
        Arc::clone(&self.episodes)
    }
}
