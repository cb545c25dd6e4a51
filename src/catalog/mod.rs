//! Startup catalog
//!
//! The collection of records the search engine runs over. Records come from
//! a JSON file written by the persistence side, from the built-in demo set,
//! or both. The catalog is read-only once built.

pub mod records;
pub mod store;

pub use records::{ContactInfo, Project, StartupRecord, TeamMember};
pub use store::{default_catalog_path, CatalogError};

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Sample startups shown when nothing has been stored yet
const DEMO_CATALOG: &str = include_str!("../../data/demo_startups.json");

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// An immutable collection of startup records.
///
/// Each catalog gets a distinct generation number at construction, which
/// caches use to tell one catalog's contents from another's.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<StartupRecord>,
    generation: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Catalog {
    pub fn new(records: Vec<StartupRecord>) -> Self {
        Self {
            records,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Parse a catalog from JSON: either a bare array of records or an
    /// object with a `startups` array.
    ///
    /// Entries that are not records with a string `id` are skipped with a
    /// warning; a bad entry never costs the rest of the catalog.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries = match serde_json::from_str::<Value>(json)? {
            Value::Array(entries) => entries,
            Value::Object(mut document) => match document.remove("startups") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(CatalogError::Shape),
            },
            _ => return Err(CatalogError::Shape),
        };

        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match StartupRecord::deserialize(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping catalog entry {}: {}", index, e);
                    None
                }
            })
            .collect();
        Ok(Self::new(records))
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = store::read_locked(path)?;
        let catalog = Self::from_json_str(&json)?;
        debug!("Loaded {} startups from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The built-in demo catalog
    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_json_str(DEMO_CATALOG)
    }

    /// Stored records first, then every `extra` record. Ids are not
    /// deduplicated, so a stored copy of a demo startup is listed twice.
    pub fn merged(stored: Catalog, extra: Catalog) -> Self {
        let mut records = stored.records;
        records.extend(extra.records);
        Self::new(records)
    }

    /// Build the catalog a caller asked for.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file counts as an empty store. The demo records
    /// are appended when requested or when the store is empty.
    pub fn resolve(path: Option<&Path>, include_demo: bool) -> Result<Self, CatalogError> {
        let stored = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = default_catalog_path();
                if default_path.exists() {
                    Self::load(&default_path)?
                } else {
                    debug!("No catalog at {}", default_path.display());
                    Self::default()
                }
            }
        };

        if include_demo || stored.is_empty() {
            if stored.is_empty() && !include_demo {
                warn!("Catalog is empty, falling back to demo startups");
            }
            return Ok(Self::merged(stored, Self::demo()?));
        }

        Ok(stored)
    }

    pub fn records(&self) -> &[StartupRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StartupRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_demo_catalog_parses() {
        let catalog = Catalog::demo().unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.records()[0].name, "AI Workflow Solutions");
        assert_eq!(catalog.get("startup_2").unwrap().team_size, 8);
    }

    #[test]
    fn test_from_json_list_and_wrapped() {
        let list = Catalog::from_json_str(r#"[{"id":"a","name":"A"}]"#).unwrap();
        assert_eq!(list.len(), 1);

        let wrapped = Catalog::from_json_str(r#"{"startups":[{"id":"a"},{"id":"b"}]}"#).unwrap();
        assert_eq!(wrapped.len(), 2);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_from_json_wrong_shape() {
        for json in [r#"{"items": []}"#, r#"{"startups": {}}"#, "42"] {
            let err = Catalog::from_json_str(json).unwrap_err();
            assert!(matches!(err, CatalogError::Shape));
        }
    }

    #[test]
    fn test_malformed_fields_do_not_reject_catalog() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"id": "a", "name": "Alpha", "teamSize": 12, "rating": 4.1},
                {"id": "b", "name": "Beta", "teamSize": -3},
                {"id": "c", "name": "Gamma", "rating": "4.5"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("a").unwrap().team_size, 12);
        assert_eq!(catalog.get("b").unwrap().team_size, 0);
        assert!((catalog.get("c").unwrap().rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let catalog =
            Catalog::from_json_str(r#"[{"name": "No Id"}, "junk", {"id": "k", "name": "Kept"}]"#)
                .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].id, "k");
    }

    #[test]
    fn test_generations_are_distinct() {
        let a = Catalog::default();
        let b = Catalog::default();
        assert_ne!(a.generation(), b.generation());
        // clones share contents and therefore the generation
        assert_eq!(a.clone().generation(), a.generation());
    }

    #[test]
    fn test_merged_lists_stored_then_every_demo_record() {
        let stored = Catalog::new(vec![
            StartupRecord::new("startup_1", "Renamed Workflow"),
            StartupRecord::new("mine", "My Startup"),
        ]);
        let merged = Catalog::merged(stored, Catalog::demo().unwrap());
        assert_eq!(merged.len(), 7);
        assert_eq!(merged.records()[0].name, "Renamed Workflow");
        assert_eq!(merged.records()[1].id, "mine");
        assert_eq!(merged.records()[2].id, "startup_1");
        assert_eq!(merged.records()[2].name, "AI Workflow Solutions");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("startups.json");
        fs::write(&path, r#"[{"id":"x","name":"Xylo","tags":["music"]}]"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].tags, vec!["music"]);
    }

    #[test]
    fn test_resolve_explicit_missing_path_errors() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::resolve(Some(&dir.path().join("missing.json")), false).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_resolve_explicit_path_with_demo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("startups.json");
        fs::write(&path, r#"[{"id":"x","name":"Xylo"}]"#).unwrap();

        let without = Catalog::resolve(Some(&path), false).unwrap();
        assert_eq!(without.len(), 1);

        let with = Catalog::resolve(Some(&path), true).unwrap();
        assert_eq!(with.len(), 6);
        assert_eq!(with.records()[0].id, "x");
    }

    #[test]
    fn test_resolve_empty_store_falls_back_to_demo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("startups.json");
        fs::write(&path, "[]").unwrap();

        let catalog = Catalog::resolve(Some(&path), false).unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
