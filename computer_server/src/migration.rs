//! Schema migration for the catalog tables.

use diesel_async::AsyncPgConnection;
use diesel_async::SimpleAsyncConnection;

/// SQL migration for the catalog.
///
/// Idempotent, safe to run on every start-up.
pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS company (
    id              BIGSERIAL PRIMARY KEY,
    name            VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS computer (
    id              BIGSERIAL PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    introduced      DATE,
    discontinued    DATE,
    company_id      BIGINT REFERENCES company(id)
);

CREATE INDEX IF NOT EXISTS idx_computer_name ON computer (name);
CREATE INDEX IF NOT EXISTS idx_computer_company ON computer (company_id);
"#;

/// Run the catalog migration.
pub async fn run_migration(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    conn.batch_execute(MIGRATION_SQL)
        .await
        .map_err(|e| anyhow::anyhow!("catalog migration failed: {e}"))?;
    Ok(())
}
