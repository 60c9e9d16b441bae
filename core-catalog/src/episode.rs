//! Episode repository: remote-first point lookups over a cache-backed live
//! collection, with best-effort character hydration on the remote path.

use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, error, warn};

use core_store::EpisodeStore;
use provider_rickmorty::{parse_reference_id, EpisodeSource};

use crate::character::CharacterRepository;
use crate::error::{CatalogError, Result};
use crate::models::{Character, Episode};
use crate::translate;

/// Repository merging the remote episode source with the local store.
///
/// Holds the character repository as a third dependency so a freshly
/// fetched episode can resolve (and cache) the characters it references.
pub struct EpisodeRepository {
    source: Arc<dyn EpisodeSource>,
    store: Arc<dyn EpisodeStore>,
    characters: Arc<CharacterRepository>,
}

impl EpisodeRepository {
    pub fn new(
        source: Arc<dyn EpisodeSource>,
        store: Arc<dyn EpisodeStore>,
        characters: Arc<CharacterRepository>,
    ) -> Self {
        Self {
            source,
            store,
            characters,
        }
    }

    /// Live sequence of the full episode collection.
    ///
    /// Kicks off a best-effort refresh walking every page of the remote
    /// listing, then streams cached snapshots. The stream is not gated on
    /// the refresh and remote failures are swallowed here. Snapshots come
    /// from the stored projection, so their character lists are always
    /// empty.
    ///
    /// Must be called from within a tokio runtime.
    pub fn get_all(&self) -> BoxStream<'static, Result<Vec<Episode>>> {
        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            Self::refresh(source, store).await;
        });

        self.store
            .observe_all()
            .map(|snapshot| -> Result<Vec<Episode>> {
                let entities = snapshot?;
                Ok(entities
                    .iter()
                    .map(translate::episode_entity_to_domain)
                    .collect())
            })
            .boxed()
    }

    /// Fetch every page and persist the lot. A failed page aborts the
    /// whole refresh; callers keep whatever was cached before.
    async fn refresh(source: Arc<dyn EpisodeSource>, store: Arc<dyn EpisodeStore>) {
        let mut page: Option<u32> = None;
        let mut entities = Vec::new();

        loop {
            let batch = match source.list_episodes(page).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(error = %e, "Episode refresh failed, serving cached data");
                    return;
                }
            };

            entities.extend(batch.results.iter().map(translate::episode_record_to_entity));

            if batch.info.next.is_none() {
                break;
            }
            page = Some(page.unwrap_or(1) + 1);
        }

        match store.upsert_all(&entities).await {
            Ok(()) => debug!(count = entities.len(), "Episode cache refreshed"),
            Err(e) => error!(error = %e, "Failed to persist refreshed episodes"),
        }
    }

    /// Point lookup: remote first, then the cache, failing with `NotFound`
    /// only when both come up empty.
    ///
    /// On a remote hit the stored projection is persisted (without
    /// character references) and the returned value is translated from the
    /// remote record, with its characters resolved through the character
    /// repository. A cache hit returns the degraded projection with an
    /// empty character list.
    pub async fn get_one(&self, id: i64) -> Result<Episode> {
        match self.source.get_episode(id).await {
            Ok(Some(record)) => {
                self.store
                    .upsert(&translate::episode_record_to_entity(&record))
                    .await?;
                let characters = self.resolve_characters(&record.characters).await?;
                Ok(translate::episode_record_to_domain(&record, characters))
            }
            Ok(None) => self.get_cached(id).await,
            Err(e) => {
                warn!(id, error = %e, "Remote episode fetch failed, trying cache");
                self.get_cached(id).await
            }
        }
    }

    /// Best-effort hydration of an episode's character references.
    ///
    /// Each reference resolves through the character repository, so the
    /// characters land in the cache too. References that fail to parse or
    /// that neither source knows are skipped; store failures propagate.
    async fn resolve_characters(&self, references: &[String]) -> Result<Vec<Character>> {
        let mut characters = Vec::with_capacity(references.len());

        for reference in references {
            let Some(id) = parse_reference_id(reference) else {
                warn!(reference = %reference, "Unparseable character reference, skipping");
                continue;
            };

            match self.characters.get_one(id).await {
                Ok(character) => characters.push(character),
                Err(CatalogError::NotFound { .. }) => {
                    warn!(id, "Episode references an unknown character, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(characters)
    }

    async fn get_cached(&self, id: i64) -> Result<Episode> {
        match self.store.get_by_id(id).await? {
            Some(entity) => Ok(translate::episode_entity_to_domain(&entity)),
            None => Err(CatalogError::NotFound {
                entity_type: "episode",
                id,
            }),
        }
    }
}
