//! SQLite store backend.
//!
//! Persists escape rooms and stages with sqlx. The schema is created on
//! connect. Timestamps are stored as RFC 3339 text with microsecond
//! precision, and listings are returned in insertion (`rowid`) order.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use roomkit_core::{
    EscapeRoom, EscapeRoomId, EscapeRoomLabel, NewEscapeRoom, NewStage, RemovedStage, Stage,
    StageId, StageStore, StageWithRoom, UserId,
};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{FromRow, Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, StoreError};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS escape_rooms (
        id TEXT PRIMARY KEY NOT NULL,
        label TEXT NOT NULL,
        description TEXT,
        created_by_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS stages (
        id TEXT PRIMARY KEY NOT NULL,
        label TEXT NOT NULL,
        description TEXT,
        background TEXT,
        "order" INTEGER NOT NULL DEFAULT 0,
        time_limit INTEGER,
        created_by_id TEXT NOT NULL,
        escape_room_id TEXT NOT NULL REFERENCES escape_rooms(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_stages_room_owner ON stages (escape_room_id, created_by_id)",
];

const STAGE_COLUMNS: &str = r#"s.id, s.label, s.description, s.background, s."order" AS "order",
    s.time_limit, s.created_by_id, s.escape_room_id, s.created_at, s.updated_at"#;

/// Connection settings for [`SqliteStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreOptions {
    /// sqlx connection URL, e.g. `sqlite://roomkit.db` or `sqlite::memory:`
    pub url: String,
    /// Pool size for file databases (in-memory databases always use one)
    pub max_connections: u32,
    /// How long a statement waits on a locked database
    pub busy_timeout: Duration,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            url: "sqlite://roomkit.db".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl SqliteStoreOptions {
    /// Options for the given URL with default pool settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// SQLite-backed [`StageStore`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

#[derive(Debug, FromRow)]
struct StageRow {
    id: String,
    label: String,
    description: Option<String>,
    background: Option<String>,
    order: i32,
    time_limit: Option<i32>,
    created_by_id: String,
    escape_room_id: String,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, FromRow)]
struct StageWithRoomRow {
    #[sqlx(flatten)]
    stage: StageRow,
    escape_room_label: String,
}

impl TryFrom<StageRow> for Stage {
    type Error = StoreError;

    fn try_from(row: StageRow) -> Result<Self> {
        Ok(Stage {
            id: StageId::from(row.id),
            label: row.label,
            description: row.description,
            background: row.background,
            order: row.order,
            time_limit: row.time_limit,
            created_by_id: UserId::from(row.created_by_id),
            escape_room_id: EscapeRoomId::from(row.escape_room_id),
            created_at: parse_timestamp("created_at", &row.created_at)?,
            updated_at: parse_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

fn parse_timestamp(column: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| StoreError::Corrupt {
            column,
            value: value.to_string(),
        })
}

fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time at the precision the schema stores.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl SqliteStore {
    /// Connect to a database and ensure the schema exists.
    pub async fn connect(options: &SqliteStoreOptions) -> Result<Self> {
        let in_memory = options.is_in_memory();

        let mut connect = SqliteConnectOptions::from_str(&options.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(options.busy_timeout);

        let mut pool = SqlitePoolOptions::new();
        if in_memory {
            // Every connection to :memory: is its own database.
            pool = pool
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            let parent = connect.get_filename().parent().map(|p| p.to_path_buf());
            if let Some(parent) = parent
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(&parent)?;
            }
            connect = connect
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
            pool = pool.max_connections(options.max_connections.max(1));
        }

        let pool = pool.connect_with(connect).await?;
        let store = Self { pool };
        store.migrate().await?;

        log::info!("Connected to SQLite store at {}", options.url);
        Ok(store)
    }

    /// Open a private in-memory database.
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&SqliteStoreOptions::new("sqlite::memory:")).await
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Migration(e.to_string()))?;
        }
        Ok(())
    }

    async fn select_room_owner(&self, id: &EscapeRoomId) -> Result<Option<UserId>> {
        let owner: Option<String> =
            sqlx::query_scalar("SELECT created_by_id FROM escape_rooms WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(owner.map(UserId::from))
    }

    async fn insert_room(&self, room: NewEscapeRoom) -> Result<EscapeRoom> {
        let created = now();
        let room = EscapeRoom {
            id: EscapeRoomId::generate(),
            label: room.label,
            description: room.description,
            created_by_id: room.created_by_id,
            created_at: created,
            updated_at: created,
        };
        log::debug!("sqlite: insert escape room {}", room.id);
        sqlx::query(
            "INSERT INTO escape_rooms (id, label, description, created_by_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(room.id.as_str())
        .bind(&room.label)
        .bind(room.description.as_deref())
        .bind(room.created_by_id.as_str())
        .bind(format_timestamp(&room.created_at))
        .bind(format_timestamp(&room.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(room)
    }

    async fn select_stages(
        &self,
        escape_room_id: &EscapeRoomId,
        owner: &UserId,
    ) -> Result<Vec<Stage>> {
        let sql = format!(
            "SELECT {STAGE_COLUMNS} FROM stages s \
             WHERE s.escape_room_id = ? AND s.created_by_id = ? ORDER BY s.rowid"
        );
        let rows = sqlx::query_as::<_, StageRow>(&sql)
            .bind(escape_room_id.as_str())
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Stage::try_from).collect()
    }

    async fn select_stage_with_room(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> Result<Option<StageWithRoom>> {
        let sql = format!(
            "SELECT {STAGE_COLUMNS}, r.label AS escape_room_label FROM stages s \
             JOIN escape_rooms r ON r.id = s.escape_room_id \
             WHERE s.id = ? AND s.created_by_id = ?"
        );
        let row = sqlx::query_as::<_, StageWithRoomRow>(&sql)
            .bind(id.as_str())
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| {
            Ok(StageWithRoom {
                stage: Stage::try_from(row.stage)?,
                escape_room: EscapeRoomLabel {
                    label: row.escape_room_label,
                },
            })
        })
        .transpose()
    }

    async fn select_stage_id(&self, id: &StageId, owner: &UserId) -> Result<Option<StageId>> {
        let found: Option<String> =
            sqlx::query_scalar("SELECT id FROM stages WHERE id = ? AND created_by_id = ?")
                .bind(id.as_str())
                .bind(owner.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.map(StageId::from))
    }

    async fn insert_stage(&self, stage: NewStage) -> Result<Stage> {
        let stage = stage.into_stage(StageId::generate(), now());
        log::debug!(
            "sqlite: insert stage {} into room {}",
            stage.id,
            stage.escape_room_id
        );
        sqlx::query(
            r#"INSERT INTO stages (id, label, description, background, "order", time_limit,
                created_by_id, escape_room_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(stage.id.as_str())
        .bind(&stage.label)
        .bind(stage.description.as_deref())
        .bind(stage.background.as_deref())
        .bind(stage.order)
        .bind(stage.time_limit)
        .bind(stage.created_by_id.as_str())
        .bind(stage.escape_room_id.as_str())
        .bind(format_timestamp(&stage.created_at))
        .bind(format_timestamp(&stage.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(stage)
    }

    async fn delete_where(
        &self,
        id: &StageId,
        owner: Option<&UserId>,
    ) -> Result<Option<RemovedStage>> {
        let row: Option<(String, String)> = match owner {
            Some(owner) => {
                sqlx::query_as(
                    "DELETE FROM stages WHERE id = ? AND created_by_id = ? \
                     RETURNING id, escape_room_id",
                )
                .bind(id.as_str())
                .bind(owner.as_str())
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("DELETE FROM stages WHERE id = ? RETURNING id, escape_room_id")
                    .bind(id.as_str())
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        if row.is_some() {
            log::debug!("sqlite: deleted stage {id}");
        }
        Ok(row.map(|(id, escape_room_id)| RemovedStage {
            id: StageId::from(id),
            escape_room_id: EscapeRoomId::from(escape_room_id),
        }))
    }
}

#[async_trait]
impl StageStore for SqliteStore {
    async fn find_escape_room_owner(
        &self,
        id: &EscapeRoomId,
    ) -> roomkit_core::Result<Option<UserId>> {
        Ok(self.select_room_owner(id).await?)
    }

    async fn create_escape_room(&self, room: NewEscapeRoom) -> roomkit_core::Result<EscapeRoom> {
        Ok(self.insert_room(room).await?)
    }

    async fn find_stages(
        &self,
        escape_room_id: &EscapeRoomId,
        owner: &UserId,
    ) -> roomkit_core::Result<Vec<Stage>> {
        Ok(self.select_stages(escape_room_id, owner).await?)
    }

    async fn find_stage_with_room(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> roomkit_core::Result<Option<StageWithRoom>> {
        Ok(self.select_stage_with_room(id, owner).await?)
    }

    async fn find_stage_id(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> roomkit_core::Result<Option<StageId>> {
        Ok(self.select_stage_id(id, owner).await?)
    }

    async fn create_stage(&self, stage: NewStage) -> roomkit_core::Result<Stage> {
        Ok(self.insert_stage(stage).await?)
    }

    async fn delete_stage(&self, id: &StageId) -> roomkit_core::Result<Option<RemovedStage>> {
        Ok(self.delete_where(id, None).await?)
    }

    async fn delete_owned_stage(
        &self,
        id: &StageId,
        owner: &UserId,
    ) -> roomkit_core::Result<Option<RemovedStage>> {
        Ok(self.delete_where(id, Some(owner)).await?)
    }

    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> roomkit_core::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }
}
