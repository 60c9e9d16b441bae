//! Character repository: remote-first point lookups over a cache-backed
//! live collection.

use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, error, warn};

use core_store::CharacterStore;
use provider_rickmorty::CharacterSource;

use crate::error::{CatalogError, Result};
use crate::models::Character;
use crate::translate;

/// Repository merging the remote character source with the local store.
pub struct CharacterRepository {
    source: Arc<dyn CharacterSource>,
    store: Arc<dyn CharacterStore>,
}

impl CharacterRepository {
    pub fn new(source: Arc<dyn CharacterSource>, store: Arc<dyn CharacterStore>) -> Self {
        Self { source, store }
    }

    /// Live sequence of the full character collection.
    ///
    /// Kicks off a best-effort refresh from the remote source (first page)
    /// and independently streams cached snapshots. The stream is not gated
    /// on the refresh completing, and a remote failure is swallowed here:
    /// list views degrade to whatever is cached instead of blocking on the
    /// network.
    ///
    /// Must be called from within a tokio runtime.
    pub fn get_all(&self) -> BoxStream<'static, Result<Vec<Character>>> {
        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            Self::refresh(source, store).await;
        });

        self.store
            .observe_all()
            .map(|snapshot| -> Result<Vec<Character>> {
                let entities = snapshot?;
                Ok(entities
                    .iter()
                    .map(translate::character_entity_to_domain)
                    .collect())
            })
            .boxed()
    }

    /// Fetch the first page and persist it. Failures never reach `get_all`
    /// callers; a store failure is logged at error level.
    async fn refresh(source: Arc<dyn CharacterSource>, store: Arc<dyn CharacterStore>) {
        let page = match source.list_characters(None).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "Character refresh failed, serving cached data");
                return;
            }
        };

        let entities: Vec<_> = page
            .results
            .iter()
            .map(translate::character_record_to_entity)
            .collect();

        match store.upsert_all(&entities).await {
            Ok(()) => debug!(count = entities.len(), "Character cache refreshed"),
            Err(e) => error!(error = %e, "Failed to persist refreshed characters"),
        }
    }

    /// Point lookup: remote first, then the cache, failing with `NotFound`
    /// only when both come up empty.
    ///
    /// On a remote hit the record is persisted before returning, so a
    /// follow-up store read observes the same fields.
    pub async fn get_one(&self, id: i64) -> Result<Character> {
        match self.source.get_character(id).await {
            Ok(Some(record)) => {
                self.store
                    .upsert(&translate::character_record_to_entity(&record))
                    .await?;
                Ok(translate::character_record_to_domain(&record))
            }
            Ok(None) => self.get_cached(id).await,
            Err(e) => {
                warn!(id, error = %e, "Remote character fetch failed, trying cache");
                self.get_cached(id).await
            }
        }
    }

    async fn get_cached(&self, id: i64) -> Result<Character> {
        match self.store.get_by_id(id).await? {
            Some(entity) => Ok(translate::character_entity_to_domain(&entity)),
            None => Err(CatalogError::NotFound {
                entity_type: "character",
                id,
            }),
        }
    }
}
