//! Category query facade
//!
//! The externally consumed API: four retrieval operations plus the
//! composed `find_tree`. Fetch conditions are delegated to the category
//! store; the locale overlay and tree assembly are layered on top where
//! relevant. The active locale and storage scope are explicit parameters
//! sourced by the caller at the request boundary, never ambient state.

use std::sync::Arc;

use tracing::debug;

use crate::application::overlay::{LocaleOverlay, OverlayMode};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    parse_id_list, Category, CategoryFilter, CategoryForest, CategoryId, FetchOrdering,
    LocaleId, Predicate, ScopeId, TreeAssembler,
};
use crate::infrastructure::traits::{CategoryStore, DescendantResolver};

/// Read-side service over category records.
///
/// Every call is synchronous and owns its intermediate state; the service
/// itself holds no mutable state and may be shared across threads.
pub struct CategoryQueryService {
    store: Arc<dyn CategoryStore>,
    resolver: Arc<dyn DescendantResolver>,
    overlay: LocaleOverlay,
}

impl CategoryQueryService {
    pub fn new(
        store: Arc<dyn CategoryStore>,
        resolver: Arc<dyn DescendantResolver>,
        overlay_mode: OverlayMode,
    ) -> Self {
        let overlay = LocaleOverlay::new(store.clone(), overlay_mode);
        Self {
            store,
            resolver,
            overlay,
        }
    }

    /// Look up the single record matching an external import key.
    ///
    /// Administrative lookup: ignores storage scope and locale. A missing
    /// record is an empty result, never an error.
    pub fn find_by_import_key(
        &self,
        source: &str,
        import_id: &str,
    ) -> ApplicationResult<Option<Category>> {
        debug!("find_by_import_key: {source}:{import_id}");
        let filter = CategoryFilter::new().and(Predicate::ImportKeyIs {
            source: source.to_string(),
            import_id: import_id.to_string(),
        });
        let matches = self.store.fetch(&filter, FetchOrdering::Unordered)?;
        Ok(matches.into_iter().next())
    }

    /// Categories stored under `pid` that are roots of their own tree.
    pub fn find_root_categories(&self, pid: ScopeId) -> ApplicationResult<Vec<Category>> {
        debug!("find_root_categories: pid={pid}");
        let filter = CategoryFilter::new()
            .and(Predicate::ScopeIn(vec![pid]))
            .and(Predicate::ParentIs(0));
        Ok(self.store.fetch(&filter, FetchOrdering::SortOrderAscending)?)
    }

    /// Fetch the records for an id list, locale-overlaid, optionally
    /// restricted to a comma-joined storage-scope list.
    ///
    /// An empty id list is a caller error (`InvalidInput`).
    pub fn find_by_id_list(
        &self,
        ids: &[CategoryId],
        ordering: FetchOrdering,
        scope: Option<&str>,
        locale: LocaleId,
    ) -> ApplicationResult<Vec<Category>> {
        if ids.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "category id list must not be empty".to_string(),
            ));
        }
        debug!("find_by_id_list: {} id(s), locale={locale}", ids.len());

        let resolved = self.overlay.apply(ids, locale)?;

        let mut filter = CategoryFilter::new().and(Predicate::IdIn(resolved));
        if let Some(scope) = scope {
            filter = filter.and(Predicate::ScopeIn(parse_id_list(scope)));
        }
        Ok(self.store.fetch(&filter, ordering)?)
    }

    /// Direct children of a category, sort-order ascending.
    pub fn find_children(&self, parent: CategoryId) -> ApplicationResult<Vec<Category>> {
        debug!("find_children: parent={parent}");
        let filter = CategoryFilter::new().and(Predicate::ParentIs(parent));
        Ok(self.store.fetch(&filter, FetchOrdering::SortOrderAscending)?)
    }

    /// Expand the given roots to all descendants, fetch the records valid
    /// in `locale`, and assemble them into a forest.
    ///
    /// A descendant whose ancestor is excluded (by scope or by the root
    /// selection) is promoted to a top-level entry rather than dropped.
    /// An empty expansion yields an empty forest without touching the
    /// store.
    pub fn find_tree(
        &self,
        root_ids: &[CategoryId],
        scope: Option<&str>,
        locale: LocaleId,
    ) -> ApplicationResult<CategoryForest> {
        let expanded = self.resolver.expand(root_ids)?;
        let ids = parse_id_list(&expanded);
        debug!(
            "find_tree: {} root(s) expanded to {} id(s)",
            root_ids.len(),
            ids.len()
        );
        if ids.is_empty() {
            return Ok(CategoryForest::new());
        }

        let records =
            self.find_by_id_list(&ids, FetchOrdering::SortOrderAscending, scope, locale)?;
        Ok(TreeAssembler::assemble(records))
    }
}
