//! Gateway Layer - Backend Contracts
//!
//! Abstract interfaces the controllers talk to. `HttpGateway` implements
//! them against the REST backend; tests use in-memory fakes.
//!
//! Futures are not `Send`: the browser build runs on a single event loop and
//! its fetch futures can't leave it.

mod config;
mod envelope;
mod http;
mod session;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{GatewayResult, MapLogEntry, MindMap, NodeId, TreeNode};

pub use config::GatewayConfig;
pub use envelope::unwrap_envelope;
pub use http::HttpGateway;
pub use session::SessionContext;

// ========================
// Request Structs
// ========================

/// Create a child node under `parent_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateNode {
    #[serde(rename = "mindMapId")]
    pub tree_id: NodeId,
    #[serde(rename = "parentId")]
    pub parent_id: NodeId,
    pub name: String,
}

/// Rename a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateNode {
    #[serde(rename = "id")]
    pub node_id: NodeId,
    pub name: String,
}

/// Timeline page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    #[serde(rename = "pageNo")]
    pub page_no: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page_no: 1, page_size: 15 }
    }
}

// ========================
// Contracts
// ========================

/// Mind-map tree operations
#[async_trait(?Send)]
pub trait TreeGateway {
    /// Fetch the whole tree of a map, root included
    async fn fetch_tree(&self, tree_id: &NodeId) -> GatewayResult<TreeNode>;

    /// Create a node, returning the id the backend assigned
    async fn create_node(&self, request: &CreateNode) -> GatewayResult<NodeId>;

    /// Rename a node
    async fn update_node(&self, request: &UpdateNode) -> GatewayResult<()>;

    /// Delete a node and its subtree
    async fn delete_node(&self, node_id: &NodeId) -> GatewayResult<()>;
}

/// Map catalog operations
#[async_trait(?Send)]
pub trait MapGateway {
    /// Top-level maps of the current user
    async fn list_maps(&self) -> GatewayResult<Vec<MindMap>>;

    /// One page of the map timeline
    async fn map_log(&self, page: PageRequest) -> GatewayResult<Vec<MapLogEntry>>;

    async fn create_map(&self, name: &str) -> GatewayResult<()>;

    async fn rename_map(&self, map_id: &NodeId, name: &str) -> GatewayResult<()>;

    async fn delete_map(&self, map_id: &NodeId) -> GatewayResult<()>;
}
