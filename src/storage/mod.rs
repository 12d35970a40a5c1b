//! Storage module for persisting site models
//!
//! This module is the persistence collaborator for finished crawls:
//! - SQLite database initialization and schema management
//! - Storing, loading and deleting site models by site id
//! - Listing stored sites

mod schema;
mod sqlite;
mod traits;

pub use schema::{schema_version, SCHEMA_VERSION};
pub use sqlite::SqliteStore;
pub use traits::{SiteModelStore, SiteSummary, StorageError, StorageResult};

use std::path::Path;

/// Opens or creates the site model store at `path`
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_store(path: &Path) -> StorageResult<SqliteStore> {
    SqliteStore::new(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build_site_model;
    use crate::model::testing::fixed_time;

    #[test]
    fn test_open_store_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.db");

        {
            let mut store = open_store(&path).unwrap();
            let model = build_site_model("example.com", Vec::new(), 2, fixed_time());
            store.store("example", &model).unwrap();
        }

        let store = open_store(&path).unwrap();
        let loaded = store.load("example").unwrap().unwrap();
        assert_eq!(loaded.domain, "example.com");
        assert_eq!(loaded.crawl_depth, 2);
    }
}
