//! Character store trait and SQLite implementation

use async_trait::async_trait;
use futures::stream::BoxStream;
use sqlx::{FromRow, SqlitePool};
use tokio::sync::watch;
use tracing::debug;

use crate::entities::CharacterEntity;
use crate::error::{Result, StoreError};
use crate::stores::snapshot_stream;

/// Character store interface: a persistent collection keyed by id
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Point lookup by id
    ///
    /// # Returns
    /// - `Ok(Some(entity))` if a row with the id exists
    /// - `Ok(None)` if not
    async fn get_by_id(&self, id: i64) -> Result<Option<CharacterEntity>>;

    /// Insert the row if the id is absent, otherwise overwrite all fields.
    /// Each call runs in its own write transaction.
    async fn upsert(&self, entity: &CharacterEntity) -> Result<()>;

    /// Upsert each element in order. There is no atomicity across the
    /// batch: a failure part-way leaves earlier rows persisted.
    async fn upsert_all(&self, entities: &[CharacterEntity]) -> Result<()>;

    /// Live sequence of full snapshots, ordered by the primary key.
    ///
    /// Emits the current snapshot immediately and again after every
    /// committed write. Dropping the stream releases the subscription.
    fn observe_all(&self) -> BoxStream<'static, Result<Vec<CharacterEntity>>>;
}

/// Database row representation of a character
#[derive(Debug, FromRow)]
struct CharacterRow {
    id: i64,
    name: String,
    status: String,
    species: String,
    kind: String,
    gender: String,
    origin_name: String,
    origin_url: String,
    location_name: String,
    location_url: String,
    image: String,
    episodes: String,
    url: String,
    created: String,
}

impl TryFrom<CharacterRow> for CharacterEntity {
    type Error = StoreError;

    fn try_from(row: CharacterRow) -> Result<Self> {
        let episodes: Vec<String> = serde_json::from_str(&row.episodes).map_err(|e| {
            StoreError::InvalidRow(format!("character {}: bad episodes column: {}", row.id, e))
        })?;

        Ok(CharacterEntity {
            id: row.id,
            name: row.name,
            status: row.status,
            species: row.species,
            kind: row.kind,
            gender: row.gender,
            origin_name: row.origin_name,
            origin_url: row.origin_url,
            location_name: row.location_name,
            location_url: row.location_url,
            image: row.image,
            episodes,
            url: row.url,
            created: row.created,
        })
    }
}

/// SQLite implementation of `CharacterStore`
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    changes: watch::Sender<u64>,
}

impl SqliteCharacterStore {
    /// Create a new store over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = watch::channel(0);
        Self { pool, changes }
    }

    async fn fetch_all(pool: &SqlitePool) -> Result<Vec<CharacterEntity>> {
        let rows = sqlx::query_as::<_, CharacterRow>("SELECT * FROM characters ORDER BY id")
            .fetch_all(pool)
            .await?;

        rows.into_iter().map(CharacterEntity::try_from).collect()
    }

    /// Execute one upsert statement and bump the change counter.
    async fn write(&self, entity: &CharacterEntity) -> Result<()> {
        let episodes = serde_json::to_string(&entity.episodes).map_err(|e| {
            StoreError::InvalidRow(format!("character {}: episodes: {}", entity.id, e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO characters (
                id, name, status, species, kind, gender,
                origin_name, origin_url, location_name, location_url,
                image, episodes, url, created
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                status = excluded.status,
                species = excluded.species,
                kind = excluded.kind,
                gender = excluded.gender,
                origin_name = excluded.origin_name,
                origin_url = excluded.origin_url,
                location_name = excluded.location_name,
                location_url = excluded.location_url,
                image = excluded.image,
                episodes = excluded.episodes,
                url = excluded.url,
                created = excluded.created
            "#,
        )
        .bind(entity.id)
        .bind(&entity.name)
        .bind(&entity.status)
        .bind(&entity.species)
        .bind(&entity.kind)
        .bind(&entity.gender)
        .bind(&entity.origin_name)
        .bind(&entity.origin_url)
        .bind(&entity.location_name)
        .bind(&entity.location_url)
        .bind(&entity.image)
        .bind(episodes)
        .bind(&entity.url)
        .bind(&entity.created)
        .execute(&self.pool)
        .await?;

        self.changes.send_modify(|version| *version += 1);
        Ok(())
    }
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<CharacterEntity>> {
        let row = sqlx::query_as::<_, CharacterRow>("SELECT * FROM characters WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CharacterEntity::try_from).transpose()
    }

    async fn upsert(&self, entity: &CharacterEntity) -> Result<()> {
        self.write(entity).await
    }

    async fn upsert_all(&self, entities: &[CharacterEntity]) -> Result<()> {
        for entity in entities {
            self.write(entity).await?;
        }

        debug!(count = entities.len(), "Upserted characters");
        Ok(())
    }

    fn observe_all(&self) -> BoxStream<'static, Result<Vec<CharacterEntity>>> {
        let pool = self.pool.clone();
        snapshot_stream(self.changes.subscribe(), move || {
            let pool = pool.clone();
            async move { Self::fetch_all(&pool).await }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use futures::StreamExt;
    use std::time::Duration;

    fn test_character(id: i64) -> CharacterEntity {
        CharacterEntity {
            id,
            name: format!("Character {}", id),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            kind: String::new(),
            gender: "Male".to_string(),
            origin_name: "Earth (C-137)".to_string(),
            origin_url: "https://rickandmortyapi.com/api/location/1".to_string(),
            location_name: "Citadel of Ricks".to_string(),
            location_url: "https://rickandmortyapi.com/api/location/3".to_string(),
            image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
            episodes: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
            url: format!("https://rickandmortyapi.com/api/character/{}", id),
            created: "2017-11-04T18:48:46.250Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get_by_id() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool);

        let entity = test_character(1);
        store.upsert(&entity).await.unwrap();

        let found = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(found, entity);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool);

        assert!(store.get_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_all_fields() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool);

        store.upsert(&test_character(2)).await.unwrap();

        let mut updated = test_character(2);
        updated.name = "Updated".to_string();
        updated.status = "Dead".to_string();
        updated.episodes = vec![
            "https://rickandmortyapi.com/api/episode/1".to_string(),
            "https://rickandmortyapi.com/api/episode/2".to_string(),
        ];
        store.upsert(&updated).await.unwrap();

        let found = store.get_by_id(2).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_upsert_all_is_idempotent() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool.clone());

        let entities: Vec<_> = (1..=3).map(test_character).collect();
        store.upsert_all(&entities).await.unwrap();
        store.upsert_all(&entities).await.unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM characters")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 3);
    }

    #[tokio::test]
    async fn test_observe_all_emits_initial_and_updated_snapshots() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool);

        store.upsert(&test_character(1)).await.unwrap();

        let mut snapshots = store.observe_all();

        let first = tokio::time::timeout(Duration::from_secs(5), snapshots.next())
            .await
            .expect("stream stalled")
            .expect("stream ended")
            .unwrap();
        assert_eq!(first.len(), 1);

        store.upsert(&test_character(2)).await.unwrap();

        let second = tokio::time::timeout(Duration::from_secs(5), snapshots.next())
            .await
            .expect("stream stalled")
            .expect("stream ended")
            .unwrap();
        assert_eq!(second.len(), 2);
        // Snapshots come back in primary key order
        assert_eq!(second[0].id, 1);
        assert_eq!(second[1].id, 2);
    }

    #[tokio::test]
    async fn test_observe_all_ends_when_store_dropped() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteCharacterStore::new(pool);

        let mut snapshots = store.observe_all();
        let _ = snapshots.next().await.expect("initial snapshot").unwrap();

        drop(store);

        let end = tokio::time::timeout(Duration::from_secs(5), snapshots.next())
            .await
            .expect("stream stalled");
        assert!(end.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_episodes_column_is_an_explicit_error() {
        let pool = create_test_pool().await.unwrap();

        sqlx::query(
            r#"
            INSERT INTO characters (
                id, name, status, species, kind, gender,
                origin_name, origin_url, location_name, location_url,
                image, episodes, url, created
            ) VALUES (9, 'Broken', 'Alive', 'Human', '', 'Male', '', '', '', '', '', 'not json', '', '')
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let store = SqliteCharacterStore::new(pool);
        let result = store.get_by_id(9).await;
        assert!(matches!(result, Err(StoreError::InvalidRow(_))));
    }
}
