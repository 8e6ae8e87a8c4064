//! Committed selections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::path::CatalogPath;

/// Separator for the joined display string of a selection.
pub const SELECTION_SEPARATOR: &str = " → ";

/// An immutable record of a committed path.
///
/// Labels are resolved once, at commit time. Later tree edits or deletes do
/// not retroactively update or invalidate a selection; segments that could
/// not be resolved when committing carry the raw key instead, so a
/// selection never fails to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub path: CatalogPath,
    /// One display label per path segment.
    pub labels: Vec<String>,
    /// Labels joined with [`SELECTION_SEPARATOR`].
    pub display: String,
    pub committed_at: DateTime<Utc>,
}

impl Selection {
    pub fn new(path: CatalogPath, labels: Vec<String>) -> Self {
        debug_assert_eq!(path.len(), labels.len());
        let display = labels.join(SELECTION_SEPARATOR);
        Self {
            path,
            labels,
            display,
            committed_at: Utc::now(),
        }
    }

    /// Key of the depth-0 category this selection belongs to.
    pub fn root_key(&self) -> Option<&str> {
        self.path.first()
    }
}
