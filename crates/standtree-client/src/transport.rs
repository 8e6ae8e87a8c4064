//! The collaborator HTTP contract.
//!
//! One endpoint family owns the whole catalog: fetch returns the full root
//! mapping, and create/update/delete are addressed by `(key, parentPath)`.
//! Sibling keys are unique only within their parent, so the parent path is
//! required for disambiguation; a bare key is never a valid address.

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use standtree_model::{derive_key, Key, WireNode};

use crate::config::ClientConfig;

// ============================================================================
// Wire requests
// ============================================================================

/// Body for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeWriteRequest {
    /// Sibling key. Optional on the wire; the gateway always fills it in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Key>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// `/`-joined parent path; `null` addresses the root level.
    pub parent_path: Option<String>,
}

/// Body for delete calls. Deletes the node and its entire subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDeleteRequest {
    pub key: Key,
    pub parent_path: Option<String>,
}

/// Error payload the backend returns on rejected mutations.
#[derive(Debug, Clone, Deserialize)]
struct BackendErrorBody {
    detail: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client-side or backend-reported validation failure; the message is
    /// the backend's own `detail` where one exists.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The backend rejected a create because the key already exists under
    /// the addressed parent.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("backend error ({status}): {detail}")]
    Api { status: u16, detail: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Map a non-success response to the error taxonomy. Beyond the non-empty
/// label check, validation is the backend's job; its message is surfaced
/// verbatim.
fn error_for_status(status: u16, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<BackendErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.to_string());
    match status {
        409 => GatewayError::DuplicateKey(detail),
        400 | 422 => GatewayError::Validation(detail),
        _ => GatewayError::Api { status, detail },
    }
}

// ============================================================================
// Transport trait
// ============================================================================

/// Request/response surface of the backend collaborator.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch the full tree: mapping from root key to recursive wire node.
    async fn fetch_tree(&self) -> Result<IndexMap<Key, WireNode>, GatewayError>;

    async fn create_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError>;

    async fn update_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError>;

    async fn delete_node(&self, request: &NodeDeleteRequest) -> Result<(), GatewayError>;
}

// ============================================================================
// HTTP transport
// ============================================================================

pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/stand-elements", self.config.base_url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status.as_u16(), &body))
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn fetch_tree(&self) -> Result<IndexMap<Key, WireNode>, GatewayError> {
        let response = self
            .authorized(self.client.get(self.endpoint()))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn create_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.post(self.endpoint()))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        // the response echoes the created node; the follow-up refetch is the
        // source of truth, so the echo is not consumed
        Self::check(response).await.map(|_| ())
    }

    async fn update_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.put(self.endpoint()))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }

    async fn delete_node(&self, request: &NodeDeleteRequest) -> Result<(), GatewayError> {
        let response = self
            .authorized(self.client.delete(self.endpoint()))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }
}

// ============================================================================
// Mock transport for testing
// ============================================================================

/// In-memory backend honoring the same contract, for tests and demos. The
/// tree actually mutates, so refetch-after-mutation behaves like the real
/// collaborator.
pub struct MockTransport {
    tree: parking_lot::Mutex<IndexMap<Key, WireNode>>,
    calls: parking_lot::Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new(initial: IndexMap<Key, WireNode>) -> Self {
        Self {
            tree: parking_lot::Mutex::new(initial),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(IndexMap::new())
    }

    /// Methods invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn children_mut<'a>(
        tree: &'a mut IndexMap<Key, WireNode>,
        parent_path: Option<&str>,
    ) -> Result<&'a mut IndexMap<Key, WireNode>, GatewayError> {
        let Some(path) = parent_path.filter(|p| !p.is_empty()) else {
            return Ok(tree);
        };
        let mut current = tree;
        for segment in path.split('/') {
            current = match current.get_mut(segment) {
                Some(node) => &mut node.children,
                None => {
                    return Err(GatewayError::Api {
                        status: 404,
                        detail: format!("no element at path {path:?}"),
                    })
                }
            };
        }
        Ok(current)
    }
}

#[async_trait]
impl CatalogTransport for MockTransport {
    async fn fetch_tree(&self) -> Result<IndexMap<Key, WireNode>, GatewayError> {
        self.record("fetch_tree");
        Ok(self.tree.lock().clone())
    }

    async fn create_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError> {
        self.record(format!("create_node key={:?}", request.key));
        let key = match &request.key {
            Some(key) => key.clone(),
            // the backend derives a key when the client omits one
            None => derive_key(&request.label)
                .map_err(|e| GatewayError::Validation(e.to_string()))?,
        };

        let mut tree = self.tree.lock();
        let siblings = Self::children_mut(&mut tree, request.parent_path.as_deref())?;
        if siblings.contains_key(&key) {
            return Err(GatewayError::DuplicateKey(format!(
                "an element with key '{key}' already exists at this level"
            )));
        }
        siblings.insert(
            key,
            WireNode {
                label: request.label.clone(),
                icon: None,
                required: false,
                element_type: request.element_type.clone(),
                input_type: request.input_type.clone(),
                children: IndexMap::new(),
            },
        );
        Ok(())
    }

    async fn update_node(&self, request: &NodeWriteRequest) -> Result<(), GatewayError> {
        self.record(format!("update_node key={:?}", request.key));
        let key = request
            .key
            .as_deref()
            .ok_or_else(|| GatewayError::Validation("update requires a key".to_string()))?;

        let mut tree = self.tree.lock();
        let siblings = Self::children_mut(&mut tree, request.parent_path.as_deref())?;
        let node = siblings.get_mut(key).ok_or_else(|| GatewayError::Api {
            status: 404,
            detail: format!("no element with key '{key}' at this level"),
        })?;
        node.label = request.label.clone();
        node.element_type = request.element_type.clone();
        node.input_type = request.input_type.clone();
        Ok(())
    }

    async fn delete_node(&self, request: &NodeDeleteRequest) -> Result<(), GatewayError> {
        self.record(format!("delete_node key={:?}", request.key));
        let mut tree = self.tree.lock();
        let siblings = Self::children_mut(&mut tree, request.parent_path.as_deref())?;
        // shift_remove keeps the surviving siblings in order
        siblings
            .shift_remove(&request.key)
            .ok_or_else(|| GatewayError::Api {
                status: 404,
                detail: format!("no element with key '{}' at this level", request.key),
            })?;
        Ok(())
    }
}
