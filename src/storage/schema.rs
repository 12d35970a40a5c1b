//! Database schema definitions
//!
//! This module contains the SQL schema for the site model store.

/// Current schema version, recorded in `PRAGMA user_version`
pub const SCHEMA_VERSION: u32 = 1;

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per crawled site; the model itself is stored as JSON
CREATE TABLE IF NOT EXISTS site_models (
    site_id TEXT PRIMARY KEY,
    domain TEXT NOT NULL,
    total_pages INTEGER NOT NULL,
    last_crawl TEXT NOT NULL,
    stored_at TEXT NOT NULL,
    model_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_site_models_domain ON site_models(domain);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

/// Reads the schema version stored in the database
pub fn schema_version(conn: &rusqlite::Connection) -> Result<u32, rusqlite::Error> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}
