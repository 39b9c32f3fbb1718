//! Domain layer: entities and tree assembly
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading). Assembly is a total function over its input, so the
//! layer defines no error type.

pub mod arena;
pub mod assembler;
pub mod entities;

pub use arena::{CategoryForest, ForestIterator, TreeNode};
pub use assembler::TreeAssembler;
pub use entities::*;
