use anyhow::Result;
use rusqlite::Connection;

pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Version tracking
        CREATE TABLE IF NOT EXISTS vfxspec_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- Specification documents, stored as JSON
        CREATE TABLE IF NOT EXISTS specs (
            id TEXT PRIMARY KEY,
            name TEXT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        -- Reusable record templates
        CREATE TABLE IF NOT EXISTS templates (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        -- Listings are newest-first
        CREATE INDEX IF NOT EXISTS idx_specs_updated ON specs(updated_at);
        CREATE INDEX IF NOT EXISTS idx_templates_created ON templates(created_at);
        ",
    )?;

    // Set schema version
    conn.execute(
        "INSERT OR REPLACE INTO vfxspec_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
