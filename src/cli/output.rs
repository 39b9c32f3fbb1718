//! Terminal output formatting with colors and tree rendering
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use generational_arena::Index;
use termtree::Tree;

use crate::domain::{Category, CategoryForest};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line summary of a category record.
pub fn category_line(category: &Category) -> String {
    let mut line = format!("{} {}", category.id, category.title);
    if let Some((source, id)) = category.import_key() {
        line.push_str(&format!(" [{source}:{id}]"));
    }
    if category.is_localized() {
        line.push_str(&format!(" (locale {})", category.locale));
    }
    line
}

/// Render a forest as indented trees, one per root, in discovery order.
pub fn render_forest(forest: &CategoryForest) -> String {
    let mut out = String::new();
    for (idx, _) in forest.roots() {
        if let Some(tree) = branch(forest, idx) {
            out.push_str(&tree.to_string());
        }
    }
    out
}

fn branch(forest: &CategoryForest, idx: Index) -> Option<Tree<String>> {
    let node = forest.get(idx)?;
    let mut tree = Tree::new(category_line(&node.item));
    for &child in &node.children {
        if let Some(subtree) = branch(forest, child) {
            tree.push(subtree);
        }
    }
    Some(tree)
}
