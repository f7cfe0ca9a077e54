//! Domain Layer
//!
//! Entities as the Aim.Link backend delivers them, plus the error taxonomy
//! shared by every gateway. Only serde and thiserror are used here.

mod error;
mod id;
mod map;
mod node;
mod text;

pub use error::{GatewayError, GatewayResult};
pub use id::NodeId;
pub use map::{MapLogEntry, MindMap};
pub(crate) use map::MapLogPage;
pub use node::{NodeKind, TreeNode};
