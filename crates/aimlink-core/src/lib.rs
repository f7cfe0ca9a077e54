//! Aim.Link Mind-Map Core
//!
//! Layered the same way as the app backend:
//! - domain: wire entities (tree nodes, maps, timeline) and gateway errors
//! - gateway: backend contracts plus the HTTP implementation
//! - tree: expansion state, row renderer and the tree controller
//! - catalog: the mind-map list controller

pub mod domain;
pub mod gateway;
pub mod tree;
pub mod catalog;
mod status;

pub use domain::{
    GatewayError, GatewayResult, MapLogEntry, MindMap, NodeId, NodeKind, TreeNode,
};
pub use gateway::{
    CreateNode, GatewayConfig, HttpGateway, MapGateway, PageRequest, SessionContext, TreeGateway,
    UpdateNode,
};
pub use tree::{
    outline, render_rows, EditorMode, ExpansionState, NodeEditor, Toggle, TreeController,
    TreeRow, TreeSnapshot,
};
pub use catalog::{CatalogSnapshot, MapCatalog};
pub use status::{Notice, NoticeLevel, Outcome, Phase, Rejection};
