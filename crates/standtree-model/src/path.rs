//! Path addressing for catalog nodes.
//!
//! A [`CatalogPath`] is an ordered key sequence descending from the root.
//! Because sibling keys are unique only within their parent, a full path is
//! the only unambiguous address a node has; mutations must never be
//! addressed by bare key.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Key;

/// Separator for the canonical textual form.
pub const PATH_SEPARATOR: &str = "/";

/// An ordered key sequence addressing a node from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogPath(Vec<Key>);

#[derive(Debug, Error)]
pub enum PathParseError {
    #[error("path segment {index} is empty")]
    EmptySegment { index: usize },
}

impl CatalogPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Key>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse the canonical `/`-joined form. The empty string is the root.
    pub fn parse(text: &str) -> Result<Self, PathParseError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for (index, segment) in text.split(PATH_SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(PathParseError::EmptySegment { index });
            }
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[Key] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// New path truncated to `level` entries with `value` appended at that
    /// level. This is the single rule enforcing descendant invalidation on
    /// ancestor change: picking a new key at level `i` discards everything
    /// deeper.
    pub fn set_at(&self, level: usize, value: impl Into<Key>) -> Self {
        let mut segments: Vec<Key> = self.0.iter().take(level).cloned().collect();
        segments.push(value.into());
        Self(segments)
    }

    /// New path keeping only the first `level` entries.
    pub fn truncated(&self, level: usize) -> Self {
        Self(self.0.iter().take(level).cloned().collect())
    }

    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    /// Split into the parent path and the addressed key. `None` for the
    /// root path, which addresses no node.
    pub fn split_last(&self) -> Option<(CatalogPath, &str)> {
        let (last, parent) = self.0.split_last()?;
        Some((Self(parent.to_vec()), last.as_str()))
    }
}

impl fmt::Display for CatalogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(PATH_SEPARATOR))
    }
}

impl From<Vec<Key>> for CatalogPath {
    fn from(segments: Vec<Key>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a CatalogPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
