//! Category catalog: TOML-backed record loading
//!
//! The CLI (and the test suite) source category records from a TOML file
//! of `[[category]]` tables. Loading validates what the tree assembler
//! only treats as a precondition: ids must be non-zero and unique within
//! one locale.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::Category;

#[derive(Debug, Deserialize, Default)]
struct CatalogFile {
    #[serde(default, rename = "category")]
    categories: Vec<Category>,
}

/// Error loading or validating a catalog file.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("cannot read catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("category id 0 is reserved (title: {title:?})")]
    MissingId { title: String },

    #[error("duplicate category id {id} in locale {locale}")]
    DuplicateId { id: u64, locale: u64 },
}

/// Read and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<Category>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_catalog(&content, path)
}

/// Parse catalog content; `origin` is only used for error messages.
pub fn parse_catalog(content: &str, origin: &Path) -> Result<Vec<Category>, CatalogError> {
    let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::Parse {
        path: origin.to_path_buf(),
        source: e,
    })?;

    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    for category in &file.categories {
        if category.id == 0 {
            return Err(CatalogError::MissingId {
                title: category.title.clone(),
            });
        }
        if !seen.insert((category.locale, category.id)) {
            return Err(CatalogError::DuplicateId {
                id: category.id,
                locale: category.locale,
            });
        }
    }

    debug!(
        "catalog {}: {} record(s)",
        origin.display(),
        file.categories.len()
    );
    Ok(file.categories)
}
