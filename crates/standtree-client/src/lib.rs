//! Standtree backend client
//!
//! The stand-element catalog is owned by the CRM backend; this crate
//! consumes its HTTP contract and nothing more:
//!
//! - [`ClientConfig`]: base URL, auth token, timeout (env or explicit)
//! - [`CatalogTransport`]: the request/response surface, with a real
//!   [`HttpTransport`] and an in-memory [`MockTransport`] for tests
//! - [`TreeMutationGateway`]: path-addressed create/update/delete with a
//!   wholesale snapshot refetch after every successful mutation, and a
//!   two-step confirmation for subtree deletion
//!
//! There are no automatic retries anywhere: a failed call surfaces a typed
//! error and the operator re-issues the action.

pub mod config;
pub mod gateway;
pub mod transport;

pub use config::{ClientConfig, ConfigError};
pub use gateway::{NodeMetadata, PendingDelete, TreeMutationGateway};
pub use transport::{
    CatalogTransport, GatewayError, HttpTransport, MockTransport, NodeDeleteRequest,
    NodeWriteRequest,
};
