//! rscat: hierarchical category retrieval and tree assembly
//!
//! Retrieves category records from a store collaborator, rewrites ids for
//! the active locale, expands root ids to their descendants, and
//! assembles the fetched records into a parent/child forest in which a
//! category whose parent was not selected is promoted to a root.
//!
//! Layering, leaf to root:
//! - [`domain`]: records, the arena-backed forest, the tree assembler
//! - [`application`]: locale overlay and the category query facade
//! - [`infrastructure`]: collaborator traits, in-memory implementations,
//!   catalog loading, DI container
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
