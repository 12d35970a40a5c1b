//! Storage traits and error types
//!
//! This module defines the trait interface for site model persistence and
//! its error type.

use crate::model::SiteModel;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Summary row for one stored site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub site_id: String,
    pub domain: String,
    pub total_pages: usize,
    pub last_crawl: DateTime<Utc>,
}

/// Trait for site model persistence backends
///
/// A site id maps to at most one model. Storing a model replaces whatever
/// was stored for that id before; nothing is merged.
pub trait SiteModelStore {
    /// Stores `model` under `site_id`, replacing any previous model
    fn store(&mut self, site_id: &str, model: &SiteModel) -> StorageResult<()>;

    /// Loads the model stored under `site_id`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(SiteModel))` - The stored model
    /// * `Ok(None)` - Nothing stored under that id
    fn load(&self, site_id: &str) -> StorageResult<Option<SiteModel>>;

    /// Deletes the model stored under `site_id`
    ///
    /// # Returns
    ///
    /// `true` if a model was deleted
    fn delete(&mut self, site_id: &str) -> StorageResult<bool>;

    /// Lists stored sites ordered by site id
    fn list_sites(&self) -> StorageResult<Vec<SiteSummary>>;
}
