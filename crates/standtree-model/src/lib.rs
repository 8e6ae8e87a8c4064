//! Standtree catalog model
//!
//! This crate defines the typed data model shared by the engine and the
//! backend client:
//!
//! - [`CategoryNode`]: one entry in the recursive stand-element catalog,
//!   with an ordered children mapping (sibling order is display order)
//! - [`CatalogPath`]: an ordered key sequence addressing a node from the
//!   root, with the truncate-then-extend rule used by cascading selection
//! - [`Selection`]: a committed, user-confirmed path with cached display
//!   labels, independent of later tree changes
//! - key derivation for administrator-created nodes
//!
//! The backend wire format is normalized here as well: the legacy payload
//! names the depth-0 children attribute differently from deeper levels, and
//! that split is kept strictly as an input adapter concern.

pub mod catalog;
pub mod keygen;
pub mod path;
pub mod selection;

pub use catalog::{catalog_from_wire, CategoryNode, ChildOption, WireNode};
pub use keygen::{derive_key, KeyDerivationError, DERIVED_KEY_MAX_LEN, KEY_STEM_MAX_LEN};
pub use path::{CatalogPath, PathParseError, PATH_SEPARATOR};
pub use selection::{Selection, SELECTION_SEPARATOR};

/// A node key: unique only among siblings, never globally.
pub type Key = String;
