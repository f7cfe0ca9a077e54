//! Opaque backend identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the backend.
///
/// The backend mixes JSON numbers and strings for ids. The received form is
/// kept so the id is sent back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Number(n) => write!(f, "{}", n),
            NodeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Number(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}
