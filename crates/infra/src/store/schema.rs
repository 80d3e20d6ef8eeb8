use sqlx::SqlitePool;
use tracing::instrument;

use super::{StoreResult, map_sqlx_error};

const TABLES: [&str; 3] = ["packing_lists", "proforma_invoices", "export_invoices"];

/// Create every document table that does not exist yet.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &SqlitePool) -> StoreResult<()> {
    for table in TABLES {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                reference   TEXT NULL,
                status      TEXT NOT NULL DEFAULT 'Completed',
                document    TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            )
            "#
        ))
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("create_table", e))?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_reference ON {table} (reference)"
        ))
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("create_index", e))?;
    }
    Ok(())
}
