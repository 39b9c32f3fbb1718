use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};

use crate::domain::entities::{Category, CategoryId};

/// Tree node in the arena-based forest structure.
#[derive(Debug)]
pub struct TreeNode {
    /// The category record this node wraps
    pub item: Category,
    /// Id of the tree parent, None for roots
    pub parent_ref: Option<CategoryId>,
    /// Indices of child nodes, in discovery order
    pub children: Vec<Index>,
}

/// Arena-based forest of category trees.
///
/// Nodes live in a generational arena and are addressed by category id
/// through an id map, so lookups are O(1) and no node is aliased. Roots
/// and children keep insertion order.
#[derive(Debug, Default)]
pub struct CategoryForest {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
    by_id: HashMap<CategoryId, Index>,
    /// All node indices in insertion order
    order: Vec<Index>,
}

impl CategoryForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            roots: Vec::new(),
            by_id: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Insert a node without attaching it anywhere yet.
    ///
    /// Linking into roots/children happens in a later pass; see
    /// [`crate::domain::assembler::TreeAssembler`].
    pub(crate) fn insert_node(
        &mut self,
        item: Category,
        parent_ref: Option<CategoryId>,
    ) -> Index {
        let id = item.id;
        let idx = self.arena.insert(TreeNode {
            item,
            parent_ref,
            children: Vec::new(),
        });
        self.by_id.insert(id, idx);
        self.order.push(idx);
        idx
    }

    pub(crate) fn set_parent_ref(&mut self, idx: Index, parent_ref: Option<CategoryId>) {
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent_ref = parent_ref;
        }
    }

    pub(crate) fn push_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    pub(crate) fn attach_child(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of nodes in the whole forest.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Arena index of the node carrying the given category id.
    pub fn index_of(&self, id: CategoryId) -> Option<Index> {
        self.by_id.get(&id).copied()
    }

    pub fn node_by_id(&self, id: CategoryId) -> Option<&TreeNode> {
        self.index_of(id).and_then(|idx| self.arena.get(idx))
    }

    /// Root nodes in discovery order.
    pub fn roots(&self) -> impl Iterator<Item = (Index, &TreeNode)> {
        self.roots
            .iter()
            .filter_map(|&idx| self.arena.get(idx).map(|node| (idx, node)))
    }

    /// Ids of the root nodes, in discovery order.
    pub fn root_ids(&self) -> Vec<CategoryId> {
        self.roots().map(|(_, node)| node.item.id).collect()
    }

    /// Child ids of a node, in discovery order.
    pub fn child_ids(&self, id: CategoryId) -> Vec<CategoryId> {
        self.node_by_id(id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&idx| self.arena.get(idx).map(|child| child.item.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nodes in insertion (flat input) order.
    pub fn iter_flat(&self) -> impl Iterator<Item = &TreeNode> {
        self.order.iter().filter_map(|&idx| self.arena.get(idx))
    }

    /// Depth-first preorder traversal over all trees, roots first.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    /// Maximum depth over all trees; an empty forest has depth 0.
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.depth_below(root))
            .max()
            .unwrap_or(0)
    }

    fn depth_below(&self, idx: Index) -> usize {
        match self.arena.get(idx) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.depth_below(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.item.id, self.item.title)
    }
}

pub struct ForestIterator<'a> {
    forest: &'a CategoryForest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a CategoryForest) -> Self {
        // Roots pushed in reverse so the first root is popped first
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.forest.arena.get(current) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
