//! Infrastructure layer: collaborator implementations and DI container
//!
//! This layer implements the collaborator boundary traits and wires up
//! services.

pub mod catalog;
pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
