//! Facet cache
//!
//! Memoizes filter facets and search suggestions for a catalog. Entries are
//! keyed by catalog generation: a different catalog is a miss and the entry
//! is recomputed under the write lock, while hits only take the read lock.

use crate::catalog::Catalog;
use crate::search::{get_filter_options, get_search_suggestions, FilterFacets};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Derived data for one catalog generation
#[derive(Debug, Clone)]
struct CachedFacets {
    generation: u64,
    facets: FilterFacets,
    suggestions: Vec<String>,
}

/// Read-mostly cache of facet derivations
#[derive(Debug, Default)]
pub struct FacetCache {
    entry: RwLock<Option<CachedFacets>>,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct filter values for `catalog`
    pub fn filter_options(&self, catalog: &Catalog) -> FilterFacets {
        self.with_entry(catalog, |entry| entry.facets.clone())
    }

    /// Search suggestions for `catalog`
    pub fn suggestions(&self, catalog: &Catalog) -> Vec<String> {
        self.with_entry(catalog, |entry| entry.suggestions.clone())
    }

    /// Drop the cached entry
    pub fn invalidate(&self) {
        *self.write() = None;
    }

    /// Generation currently cached, if any
    pub fn cached_generation(&self) -> Option<u64> {
        self.read().as_ref().map(|e| e.generation)
    }

    fn with_entry<R>(&self, catalog: &Catalog, f: impl Fn(&CachedFacets) -> R) -> R {
        {
            let guard = self.read();
            if let Some(entry) = guard.as_ref().filter(|e| e.generation == catalog.generation()) {
                return f(entry);
            }
        }

        let mut guard = self.write();
        // Another writer may have filled it while we waited
        if let Some(entry) = guard.as_ref().filter(|e| e.generation == catalog.generation()) {
            return f(entry);
        }

        debug!(
            "Computing facets for catalog generation {} ({} startups)",
            catalog.generation(),
            catalog.len()
        );
        let entry = CachedFacets {
            generation: catalog.generation(),
            facets: get_filter_options(catalog.records()),
            suggestions: get_search_suggestions(catalog.records()),
        };
        let result = f(&entry);
        *guard = Some(entry);
        result
    }

    // Entries are swapped in whole, so a poisoned lock still holds a
    // consistent value.
    fn read(&self) -> RwLockReadGuard<'_, Option<CachedFacets>> {
        self.entry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<CachedFacets>> {
        self.entry.write().unwrap_or_else(|e| e.into_inner())
    }
}
