//! Domain entities: category records and fetch conditions

use serde::{Deserialize, Serialize};

/// Identifier of a category record, unique within one locale context.
pub type CategoryId = u64;

/// Identifier of the storage scope (container/partition) a record is filed
/// under, independent of tree parentage.
pub type ScopeId = u64;

/// Identifier of a locale. 0 is the default locale.
pub type LocaleId = u64;

/// The default locale. Overlay substitution is a no-op for it.
pub const DEFAULT_LOCALE: LocaleId = 0;

/// A category record as read from the store.
///
/// `parent == 0` marks a root within its own storage scope;
/// `locale_parent == 0` marks a default-locale record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: CategoryId,
    /// Tree parent id, 0 = root
    pub parent: CategoryId,
    /// Ascending sort key within one parent
    #[serde(rename = "sort")]
    pub sort_order: i64,
    /// Display label
    pub title: String,
    /// Storage scope the record lives in
    pub pid: ScopeId,
    /// Locale of this record, 0 = default locale
    pub locale: LocaleId,
    /// Default-locale record this is a variant of, 0 = none
    pub locale_parent: CategoryId,
    /// External-system correlation key, unique as a pair when both present
    pub import_source: Option<String>,
    pub import_id: Option<String>,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            id: 0,
            parent: 0,
            sort_order: 0,
            title: String::new(),
            pid: 0,
            locale: DEFAULT_LOCALE,
            locale_parent: 0,
            import_source: None,
            import_id: None,
        }
    }
}

impl Category {
    /// Tree parent of this record, None for roots.
    pub fn tree_parent(&self) -> Option<CategoryId> {
        (self.parent != 0).then_some(self.parent)
    }

    /// External correlation key, present only when both halves are set.
    pub fn import_key(&self) -> Option<(&str, &str)> {
        match (self.import_source.as_deref(), self.import_id.as_deref()) {
            (Some(source), Some(id)) => Some((source, id)),
            _ => None,
        }
    }

    /// Whether this record is a locale-specific variant.
    pub fn is_localized(&self) -> bool {
        self.locale != DEFAULT_LOCALE
    }
}

/// One row of the locale-variant lookup: the default-locale id a variant
/// substitutes, and the variant's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleVariant {
    pub locale_parent: CategoryId,
    pub id: CategoryId,
}

/// A single fetch condition evaluated against one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Record id is a member of the given set
    IdIn(Vec<CategoryId>),
    /// Tree parent equals the given id (0 selects roots)
    ParentIs(CategoryId),
    /// Storage scope is a member of the given set
    ScopeIn(Vec<ScopeId>),
    /// Import key equals the given pair
    ImportKeyIs { source: String, import_id: String },
}

impl Predicate {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Predicate::IdIn(ids) => ids.contains(&category.id),
            Predicate::ParentIs(parent) => category.parent == *parent,
            Predicate::ScopeIn(scopes) => scopes.contains(&category.pid),
            Predicate::ImportKeyIs { source, import_id } => {
                category.import_key() == Some((source.as_str(), import_id.as_str()))
            }
        }
    }
}

/// Conjunction of predicates. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    predicates: Vec<Predicate>,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition; all conditions must hold.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn matches(&self, category: &Category) -> bool {
        self.predicates.iter().all(|p| p.matches(category))
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

/// Ordering applied by the store to a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOrdering {
    #[default]
    Unordered,
    SortOrderAscending,
}

/// Parse a comma-joined id list, dropping empty and non-numeric segments.
///
/// Descendant-resolver output and storage-scope arguments both arrive in
/// this form.
pub fn parse_id_list(list: &str) -> Vec<CategoryId> {
    list.split(',')
        .filter_map(|segment| segment.trim().parse().ok())
        .collect()
}
