//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SiteModelStore
//! trait. Each site is one row holding a few summary columns and the full
//! model serialized as JSON.

use crate::model::SiteModel;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SiteModelStore, SiteSummary, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates a store at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl SiteModelStore for SqliteStore {
    fn store(&mut self, site_id: &str, model: &SiteModel) -> StorageResult<()> {
        let json = serde_json::to_string(model)?;

        self.conn.execute(
            "INSERT INTO site_models (site_id, domain, total_pages, last_crawl, stored_at, model_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(site_id) DO UPDATE SET
                domain = excluded.domain,
                total_pages = excluded.total_pages,
                last_crawl = excluded.last_crawl,
                stored_at = excluded.stored_at,
                model_json = excluded.model_json",
            params![
                site_id,
                model.domain,
                model.total_pages as i64,
                model.last_full_crawl.to_rfc3339(),
                Utc::now().to_rfc3339(),
                json,
            ],
        )?;

        tracing::debug!("Stored site model {} ({} pages)", site_id, model.total_pages);
        Ok(())
    }

    fn load(&self, site_id: &str) -> StorageResult<Option<SiteModel>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT model_json FROM site_models WHERE site_id = ?1",
                params![site_id],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn delete(&mut self, site_id: &str) -> StorageResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM site_models WHERE site_id = ?1",
            params![site_id],
        )?;
        Ok(deleted > 0)
    }

    fn list_sites(&self) -> StorageResult<Vec<SiteSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT site_id, domain, total_pages, last_crawl FROM site_models ORDER BY site_id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut sites = Vec::new();
        for row in rows {
            let (site_id, domain, total_pages, last_crawl) = row?;
            let last_crawl = DateTime::parse_from_rfc3339(&last_crawl)
                .map_err(|e| StorageError::Database(format!("bad timestamp for {}: {}", site_id, e)))?
                .with_timezone(&Utc);

            sites.push(SiteSummary {
                site_id,
                domain,
                total_pages: total_pages.max(0) as usize,
                last_crawl,
            });
        }

        Ok(sites)
    }
}
