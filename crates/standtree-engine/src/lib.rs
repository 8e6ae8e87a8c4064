//! Standtree selection engine
//!
//! Everything between the raw catalog model and the backend client:
//!
//! - [`TreeSnapshot`]: the immutable-per-fetch view of the full catalog
//! - [`PathNavigator`]: resolves paths into selectable children and
//!   breadcrumb labels for the cascading dropdowns
//! - [`NavigationState`]: the one-active-path-at-a-time cursor used while
//!   the operator builds a selection level by level
//! - [`SelectionAccumulator`]: the ordered list of committed selections,
//!   independent of navigation state
//! - requirement coverage checking for wizard progression
//! - pre-order flattening and session-local reordering for the admin view
//! - [`SnapshotStore`]: generation-guarded installer so a superseded fetch
//!   response never overwrites a newer snapshot
//!
//! All navigation and accumulation operations are synchronous and never
//! suspend; only the client crate talks to the network.

pub mod flatten;
pub mod navigate;
pub mod requirements;
pub mod selection;
pub mod snapshot;
pub mod store;

pub use flatten::{flatten, reorder, FlatEntry};
pub use navigate::{NavPhase, NavigationState, PathNavigator};
pub use requirements::{requirement_coverage, RequirementReport};
pub use selection::{CommitOutcome, SelectionAccumulator};
pub use snapshot::TreeSnapshot;
pub use store::{RefreshTicket, SnapshotStore};
