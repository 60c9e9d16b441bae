//! Episode store trait and SQLite implementation

use async_trait::async_trait;
use futures::stream::BoxStream;
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::debug;

use crate::entities::EpisodeEntity;
use crate::error::Result;
use crate::stores::snapshot_stream;

/// Episode store interface: a persistent collection keyed by id
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    /// Point lookup by id
    async fn get_by_id(&self, id: i64) -> Result<Option<EpisodeEntity>>;

    /// Insert the row if the id is absent, otherwise overwrite all fields.
    /// Each call runs in its own write transaction.
    async fn upsert(&self, entity: &EpisodeEntity) -> Result<()>;

    /// Upsert each element in order. There is no atomicity across the
    /// batch: a failure part-way leaves earlier rows persisted.
    async fn upsert_all(&self, entities: &[EpisodeEntity]) -> Result<()>;

    /// Live sequence of full snapshots, ordered by the primary key.
    ///
    /// Emits the current snapshot immediately and again after every
    /// committed write. Dropping the stream releases the subscription.
    fn observe_all(&self) -> BoxStream<'static, Result<Vec<EpisodeEntity>>>;
}

/// SQLite implementation of `EpisodeStore`
pub struct SqliteEpisodeStore {
    pool: SqlitePool,
    changes: watch::Sender<u64>,
}

impl SqliteEpisodeStore {
    /// Create a new store over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = watch::channel(0);
        Self { pool, changes }
    }

    async fn fetch_all(pool: &SqlitePool) -> Result<Vec<EpisodeEntity>> {
        let rows = sqlx::query_as::<_, EpisodeEntity>("SELECT * FROM episodes ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    /// Execute one upsert statement and bump the change counter.
    async fn write(&self, entity: &EpisodeEntity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO episodes (id, name, air_date, episode, url, created)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                air_date = excluded.air_date,
                episode = excluded.episode,
                url = excluded.url,
                created = excluded.created
            "#,
        )
        .bind(entity.id)
        .bind(&entity.name)
        .bind(&entity.air_date)
        .bind(&entity.episode)
        .bind(&entity.url)
        .bind(&entity.created)
        .execute(&self.pool)
        .await?;

        self.changes.send_modify(|version| *version += 1);
        Ok(())
    }
}

#[async_trait]
impl EpisodeStore for SqliteEpisodeStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<EpisodeEntity>> {
        let row = sqlx::query_as::<_, EpisodeEntity>("SELECT * FROM episodes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn upsert(&self, entity: &EpisodeEntity) -> Result<()> {
        self.write(entity).await
    }

    async fn upsert_all(&self, entities: &[EpisodeEntity]) -> Result<()> {
        for entity in entities {
            self.write(entity).await?;
        }

        debug!(count = entities.len(), "Upserted episodes");
        Ok(())
    }

    fn observe_all(&self) -> BoxStream<'static, Result<Vec<EpisodeEntity>>> {
        let pool = self.pool.clone();
        snapshot_stream(self.changes.subscribe(), move || {
            let pool = pool.clone();
            async move { Self::fetch_all(&pool).await }
        })
    }
}
