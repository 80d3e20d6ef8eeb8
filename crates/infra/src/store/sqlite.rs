use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Executor, Row, Sqlite, SqlitePool, Transaction};
use tracing::{Span, instrument};

use super::schema::ensure_schema;
use super::{DEFAULT_STATUS, StoreError, StoreResult, Stored, StoredDocument, map_sqlx_error};

/// Shared handle to the document tables.
///
/// Reads go straight to the pool. Writes open a [`UnitOfWork`] with
/// [`DocumentStore::begin`].
#[derive(Debug, Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `url` and ensure the schema.
    ///
    /// In-memory databases live only as long as their connection, so they get a
    /// single connection that is never recycled.
    #[instrument(skip(url), err)]
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("parse_database_url", e))?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start an all-or-nothing write.
    pub async fn begin(&self) -> StoreResult<UnitOfWork> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;
        Ok(UnitOfWork { tx })
    }

    #[instrument(skip_all, fields(table = D::TABLE, id = %id), err)]
    pub async fn get<D: StoredDocument>(&self, id: D::Id) -> StoreResult<Stored<D>> {
        fetch_by_id(&self.pool, id).await
    }

    /// Every record of one type, newest (highest id) first.
    #[instrument(skip_all, fields(table = D::TABLE, count = tracing::field::Empty), err)]
    pub async fn list<D: StoredDocument>(&self) -> StoreResult<Vec<Stored<D>>> {
        let rows = sqlx::query(&format!(
            "SELECT id, status, document, created_at, updated_at FROM {} ORDER BY id DESC",
            D::TABLE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        Span::current().record("count", rows.len());
        rows.iter().map(decode_row::<D>).collect()
    }
}

/// An open write transaction.
///
/// Nothing is visible to other connections until [`UnitOfWork::commit`];
/// dropping the unit without committing rolls everything back.
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    #[instrument(skip_all, fields(table = D::TABLE), err)]
    pub async fn insert<D: StoredDocument>(&mut self, document: D) -> StoreResult<Stored<D>> {
        let now = Utc::now();
        let body = serde_json::to_string(&document)?;

        let result = sqlx::query(&format!(
            r#"
            INSERT INTO {} (reference, status, document, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
            D::TABLE
        ))
        .bind(document.reference())
        .bind(DEFAULT_STATUS)
        .bind(&body)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(Stored {
            id: D::Id::from(result.last_insert_rowid()),
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
            document,
        })
    }

    /// Load a record inside this transaction (e.g. before updating it).
    #[instrument(skip_all, fields(table = D::TABLE, id = %id), err)]
    pub async fn load<D: StoredDocument>(&mut self, id: D::Id) -> StoreResult<Stored<D>> {
        fetch_by_id(&mut *self.tx, id).await
    }

    /// Persist `stored`'s document and status, bumping `updated_at`.
    #[instrument(skip_all, fields(table = D::TABLE, id = %stored.id), err)]
    pub async fn save<D: StoredDocument>(&mut self, stored: &mut Stored<D>) -> StoreResult<()> {
        let now = Utc::now();
        let body = serde_json::to_string(&stored.document)?;

        let result = sqlx::query(&format!(
            r#"
            UPDATE {}
            SET reference = ?, status = ?, document = ?, updated_at = ?
            WHERE id = ?
            "#,
            D::TABLE
        ))
        .bind(stored.document.reference())
        .bind(&stored.status)
        .bind(&body)
        .bind(now)
        .bind(Into::<i64>::into(stored.id))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        stored.updated_at = now;
        Ok(())
    }

    pub async fn commit(self) -> StoreResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))
    }

    pub async fn rollback(self) -> StoreResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| map_sqlx_error("rollback", e))
    }
}

async fn fetch_by_id<'e, E, D>(executor: E, id: D::Id) -> StoreResult<Stored<D>>
where
    E: Executor<'e, Database = Sqlite>,
    D: StoredDocument,
{
    let row = sqlx::query(&format!(
        "SELECT id, status, document, created_at, updated_at FROM {} WHERE id = ?",
        D::TABLE
    ))
    .bind(Into::<i64>::into(id))
    .fetch_optional(executor)
    .await
    .map_err(|e| map_sqlx_error("get", e))?
    .ok_or(StoreError::NotFound)?;

    decode_row(&row)
}

fn decode_row<D: StoredDocument>(row: &SqliteRow) -> StoreResult<Stored<D>> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode_row", e);
    let id: i64 = row.try_get("id").map_err(decode)?;
    let body: String = row.try_get("document").map_err(decode)?;
    Ok(Stored {
        id: D::Id::from(id),
        status: row.try_get("status").map_err(decode)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(decode)?,
        document: serde_json::from_str(&body)?,
    })
}
