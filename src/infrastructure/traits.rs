//! Collaborator boundary traits for testability
//!
//! These traits abstract the persistence and hierarchy-expansion
//! collaborators, allowing the services to be tested with in-memory
//! implementations. Implementations must be safe to share across
//! independent callers; no call here spawns work of its own.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::domain::{
    Category, CategoryFilter, CategoryId, FetchOrdering, LocaleId, LocaleVariant, Predicate,
};

/// Failure of the persistence collaborator. Propagates unchanged through
/// the application layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),
}

/// Result type for store and resolver operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence abstraction for category records.
pub trait CategoryStore: Send + Sync {
    /// Filtered, ordered read.
    fn fetch(&self, filter: &CategoryFilter, ordering: FetchOrdering)
        -> StoreResult<Vec<Category>>;

    /// Variant rows for the given locale whose source id is in `parent_ids`.
    fn fetch_locale_variants(
        &self,
        locale: LocaleId,
        parent_ids: &[CategoryId],
    ) -> StoreResult<Vec<LocaleVariant>>;
}

/// Transitive closure over the parent relation.
///
/// Returns a comma-joined id list that includes the given roots
/// themselves. The output format is opaque to callers; they split it
/// with [`crate::domain::parse_id_list`].
pub trait DescendantResolver: Send + Sync {
    fn expand(&self, root_ids: &[CategoryId]) -> StoreResult<String>;
}

// ============================================================
// IN-MEMORY IMPLEMENTATIONS
// ============================================================

/// Record-vector store backing the CLI and the test suite.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    records: Vec<Category>,
}

impl InMemoryCategoryStore {
    pub fn new(records: Vec<Category>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn fetch(
        &self,
        filter: &CategoryFilter,
        ordering: FetchOrdering,
    ) -> StoreResult<Vec<Category>> {
        let mut out: Vec<Category> = self
            .records
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        if ordering == FetchOrdering::SortOrderAscending {
            // Stable sort keeps record order for equal sort keys
            out.sort_by_key(|c| c.sort_order);
        }
        trace!("fetch: {} record(s)", out.len());
        Ok(out)
    }

    fn fetch_locale_variants(
        &self,
        locale: LocaleId,
        parent_ids: &[CategoryId],
    ) -> StoreResult<Vec<LocaleVariant>> {
        Ok(self
            .records
            .iter()
            .filter(|c| {
                c.locale == locale
                    && c.locale_parent != 0
                    && parent_ids.contains(&c.locale_parent)
            })
            .map(|c| LocaleVariant {
                locale_parent: c.locale_parent,
                id: c.id,
            })
            .collect())
    }
}

/// Descendant expansion by breadth-first walk over the parent relation.
///
/// A visited set makes the walk terminate on cyclic parent data; each id
/// appears at most once in the output.
pub struct BreadthFirstResolver {
    store: Arc<dyn CategoryStore>,
}

impl BreadthFirstResolver {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }
}

impl DescendantResolver for BreadthFirstResolver {
    fn expand(&self, root_ids: &[CategoryId]) -> StoreResult<String> {
        let mut visited: HashSet<CategoryId> = HashSet::new();
        let mut queue: VecDeque<CategoryId> = root_ids.iter().copied().collect();
        let mut expanded: Vec<CategoryId> = Vec::new();

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            expanded.push(id);

            let children = self.store.fetch(
                &CategoryFilter::new().and(Predicate::ParentIs(id)),
                FetchOrdering::SortOrderAscending,
            )?;
            for child in children {
                if !visited.contains(&child.id) {
                    queue.push_back(child.id);
                }
            }
        }

        Ok(expanded.iter().join(","))
    }
}

// ============================================================
// INTERACTIVE SELECTION
// ============================================================

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (the category id)
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector: Send + Sync {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug, Default)]
pub struct SkimSelector;

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some("50%"))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        let output = Skim::run_with(&options, Some(items_arc));

        match output {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => {
                if let Some(selected) = out.selected_items.first() {
                    let display = selected.output().to_string();
                    let item = items.iter().find(|i| i.display == display).cloned();
                    Ok(item)
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }
}
