//! Service container for dependency injection
//!
//! Wires up the query service with its collaborators. The active locale
//! and storage scope stay per-call parameters; the container only fixes
//! which store and resolver a process talks to.

use std::sync::Arc;

use crate::application::CategoryQueryService;
use crate::config::Settings;
use crate::domain::Category;
use crate::infrastructure::traits::{
    BreadthFirstResolver, CategoryStore, DescendantResolver, InMemoryCategoryStore,
};

/// Container holding the wired application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Persistence collaborator
    pub store: Arc<dyn CategoryStore>,

    /// Hierarchy-expansion collaborator
    pub resolver: Arc<dyn DescendantResolver>,

    /// Category query facade
    pub categories: CategoryQueryService,
}

impl ServiceContainer {
    /// Create a container over an in-memory store of the given records.
    pub fn new(settings: Settings, records: Vec<Category>) -> Self {
        let store: Arc<dyn CategoryStore> = Arc::new(InMemoryCategoryStore::new(records));
        let resolver: Arc<dyn DescendantResolver> =
            Arc::new(BreadthFirstResolver::new(store.clone()));
        Self::with_deps(settings, store, resolver)
    }

    /// Create a container with custom collaborators (for testing).
    pub fn with_deps(
        settings: Settings,
        store: Arc<dyn CategoryStore>,
        resolver: Arc<dyn DescendantResolver>,
    ) -> Self {
        let settings = Arc::new(settings);
        let categories =
            CategoryQueryService::new(store.clone(), resolver.clone(), settings.overlay_mode);

        Self {
            settings,
            store,
            resolver,
            categories,
        }
    }
}
