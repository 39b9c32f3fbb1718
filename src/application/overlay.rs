//! Locale overlay: id substitution for the active locale
//!
//! Rewrites an id list so that each id with a locale-specific variant in
//! the active locale is replaced by the variant's id. Ids without a
//! variant pass through unchanged; list order is preserved.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CategoryId, LocaleId, DEFAULT_LOCALE};
use crate::infrastructure::traits::CategoryStore;

/// How duplicate occurrences of an id are substituted.
///
/// The store's historical behavior replaces only the first occurrence of
/// a variant's source id. `AllOccurrences` rewrites every occurrence and
/// is the semantic most callers expect with duplicate-bearing lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayMode {
    #[default]
    FirstOccurrence,
    AllOccurrences,
}

impl OverlayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstOccurrence => "first-occurrence",
            Self::AllOccurrences => "all-occurrences",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first-occurrence" => Some(Self::FirstOccurrence),
            "all-occurrences" => Some(Self::AllOccurrences),
            _ => None,
        }
    }
}

/// Service substituting default-locale ids with their locale variants.
pub struct LocaleOverlay {
    store: Arc<dyn CategoryStore>,
    mode: OverlayMode,
}

impl LocaleOverlay {
    pub fn new(store: Arc<dyn CategoryStore>, mode: OverlayMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    /// Rewrite `ids` for the active locale.
    ///
    /// The default locale (and an empty list) is a no-op and does not
    /// touch the store. Duplicates are allowed in the input; how they are
    /// substituted depends on [`OverlayMode`]. The substitution never
    /// changes list length or order.
    pub fn apply(
        &self,
        ids: &[CategoryId],
        locale: LocaleId,
    ) -> ApplicationResult<Vec<CategoryId>> {
        if locale == DEFAULT_LOCALE || ids.is_empty() {
            return Ok(ids.to_vec());
        }

        let variants = self.store.fetch_locale_variants(locale, ids)?;
        debug!(
            "overlay: {} variant(s) for locale {} over {} id(s)",
            variants.len(),
            locale,
            ids.len()
        );

        let mut resolved = ids.to_vec();
        for variant in &variants {
            match self.mode {
                OverlayMode::FirstOccurrence => {
                    // Search the already-rewritten list: a slot that was
                    // substituted no longer matches, so a later variant
                    // with the same source lands on the next occurrence
                    if let Some(pos) =
                        resolved.iter().position(|&id| id == variant.locale_parent)
                    {
                        resolved[pos] = variant.id;
                    }
                }
                OverlayMode::AllOccurrences => {
                    for slot in resolved.iter_mut() {
                        if *slot == variant.locale_parent {
                            *slot = variant.id;
                        }
                    }
                }
            }
        }

        Ok(resolved)
    }
}

impl std::str::FromStr for OverlayMode {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ApplicationError::Config {
            message: format!("unknown overlay mode: {value}"),
        })
    }
}
