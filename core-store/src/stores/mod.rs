//! Key-indexed stores over the catalog database.
//!
//! - Traits define the store contract per collection
//! - SQLite implementations use sqlx for async access and a watch channel
//!   as the change notifier behind live observation
//! - `observe_all` streams re-emit the full collection after every
//!   committed write and end when the owning store is dropped

use std::future::Future;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

use crate::error::Result;

pub mod character;
pub mod episode;

pub use character::{CharacterStore, SqliteCharacterStore};
pub use episode::{EpisodeStore, SqliteEpisodeStore};

/// Build a live snapshot stream over a change-counter subscription: one
/// immediate emission, then a fresh query after every notification.
///
/// The current version is marked seen before each query, so a write racing
/// with the query still triggers another emission afterwards. Coalesced
/// notifications are fine: observers always converge on the latest
/// snapshot. The stream ends when the notifying store is dropped.
pub(crate) fn snapshot_stream<T, F, Fut>(
    rx: watch::Receiver<u64>,
    query: F,
) -> BoxStream<'static, Result<Vec<T>>>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    stream::unfold((rx, query, false), |(mut rx, query, primed)| async move {
        if primed {
            rx.changed().await.ok()?;
        }
        let _ = rx.borrow_and_update();
        let snapshot = query().await;
        Some((snapshot, (rx, query, true)))
    })
    .boxed()
}
