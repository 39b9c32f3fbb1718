//! Tree assembler: flat category records to an orphan-promoting forest.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::arena::CategoryForest;
use crate::domain::entities::Category;

/// Converts a flat, pre-sorted sequence of categories into a forest.
///
/// Callers supply the records already ordered (usually sort-order
/// ascending); the assembler preserves that order and never re-sorts.
pub struct TreeAssembler;

impl TreeAssembler {
    /// Assemble a forest from flat records.
    ///
    /// Three passes over an id-addressed arena:
    /// 1. insert every record with its declared parent reference,
    /// 2. promote orphans: a node whose parent id is absent from the
    ///    record set becomes a root instead of being dropped,
    /// 3. link each node into its parent's children or the root list,
    ///    in input order.
    ///
    /// Total: an empty input yields an empty forest. Records with
    /// duplicate ids are a caller error and the result is unspecified.
    pub fn assemble(records: Vec<Category>) -> CategoryForest {
        let mut forest = CategoryForest::with_capacity(records.len());

        let mut present: HashSet<_> = HashSet::with_capacity(records.len());
        let mut indices = Vec::with_capacity(records.len());
        for record in records {
            present.insert(record.id);
            let parent_ref = record.tree_parent();
            indices.push(forest.insert_node(record, parent_ref));
        }

        // Orphan promotion: unresolvable parent references become None
        for &idx in &indices {
            let orphaned = forest
                .get(idx)
                .and_then(|node| node.parent_ref)
                .is_some_and(|parent| !present.contains(&parent));
            if orphaned {
                trace!("promoting orphan node to root");
                forest.set_parent_ref(idx, None);
            }
        }

        // Linking: every parent_ref now resolves or is None, so this
        // pass cannot fail
        for &idx in &indices {
            match forest.get(idx).and_then(|node| node.parent_ref) {
                None => forest.push_root(idx),
                Some(parent) => {
                    if let Some(parent_idx) = forest.index_of(parent) {
                        forest.attach_child(parent_idx, idx);
                    }
                }
            }
        }

        forest
    }
}
