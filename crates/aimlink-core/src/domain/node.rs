//! Mind-Map Tree Node
//!
//! One entry of a work-breakdown tree, decoded from the
//! `mind/node/getMindMapTree` payload.

use log::warn;
use serde::{Deserialize, Serialize};

use super::id::NodeId;
use super::text::label_or;

/// Label used when the backend sends neither `name` nor `title`
pub const PLACEHOLDER_LABEL: &str = "Branch";

/// Node kind decides icon and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Container of other nodes
    Folder,
    /// Terminal work item
    #[default]
    Leaf,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Leaf => "leaf",
        }
    }

    /// Unknown or missing wire kinds are leaves
    pub fn from_wire(s: Option<&str>) -> Self {
        match s {
            Some("folder") => NodeKind::Folder,
            _ => NodeKind::Leaf,
        }
    }
}

/// A node with its full subtree, in server order
///
/// A child the backend sent without an id is dropped (with its subtree) and
/// logged; a root without an id fails to decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireNode")]
pub struct TreeNode {
    /// Backend identifier, never changes
    pub id: NodeId,
    /// Display label (after the name/title/placeholder fallback)
    pub name: String,
    pub kind: NodeKind,
    /// Responsible person's display name
    pub assignee: Option<String>,
    /// Children in the order the server returned them
    pub children: Vec<TreeNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireNode {
    #[serde(default)]
    id: Option<NodeId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    executor_name: Option<String>,
    #[serde(default)]
    children: Option<Vec<WireNode>>,
}

impl WireNode {
    fn into_node(self) -> Option<TreeNode> {
        let name = label_or([self.name, self.title], PLACEHOLDER_LABEL);
        let Some(id) = self.id else {
            warn!("Skipping node \"{}\" without id", name);
            return None;
        };
        Some(TreeNode {
            id,
            name,
            kind: NodeKind::from_wire(self.kind.as_deref()),
            assignee: self.executor_name.filter(|s| !s.is_empty()),
            children: self
                .children
                .unwrap_or_default()
                .into_iter()
                .filter_map(WireNode::into_node)
                .collect(),
        })
    }
}

impl TryFrom<WireNode> for TreeNode {
    type Error = String;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        wire.into_node().ok_or_else(|| "tree root has no id".to_string())
    }
}

impl TreeNode {
    /// Create a leaf without children
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Leaf,
            assignee: None,
            children: Vec::new(),
        }
    }

    /// Create a folder with the given children
    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            kind: NodeKind::Folder,
            children,
            ..Self::new(id, name)
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a node anywhere in this subtree
    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Depth of a node relative to this one (self = 0)
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        if &self.id == id {
            return Some(0);
        }
        self.children
            .iter()
            .find_map(|child| child.depth_of(id))
            .map(|depth| depth + 1)
    }

    /// Number of nodes in this subtree, self included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_node() {
        let node: TreeNode = serde_json::from_value(json!({
            "id": 1,
            "name": "Root",
            "type": "folder",
            "executorName": "Lin",
            "children": [{ "id": "2", "title": "Phase 1", "children": [] }]
        }))
        .unwrap();

        assert_eq!(node.id, NodeId::from(1));
        assert_eq!(node.name, "Root");
        assert_eq!(node.kind, NodeKind::Folder);
        assert_eq!(node.assignee.as_deref(), Some("Lin"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].id, NodeId::from("2"));
        assert_eq!(node.children[0].name, "Phase 1");
        assert_eq!(node.children[0].kind, NodeKind::Leaf);
    }

    #[test]
    fn test_label_falls_back_to_placeholder() {
        let node: TreeNode = serde_json::from_value(json!({ "id": 3, "name": "" })).unwrap();
        assert_eq!(node.name, PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_null_children_are_empty() {
        let node: TreeNode =
            serde_json::from_value(json!({ "id": 3, "name": "x", "children": null })).unwrap();
        assert!(!node.has_children());
    }

    #[test]
    fn test_server_order_is_kept() {
        let node: TreeNode = serde_json::from_value(json!({
            "id": 1,
            "children": [{ "id": 9, "name": "z" }, { "id": 4, "name": "a" }, { "id": 6, "name": "m" }]
        }))
        .unwrap();
        let names: Vec<_> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_find_and_depth() {
        let tree = TreeNode::folder(
            1,
            "Root",
            vec![TreeNode::folder(2, "Phase 1", vec![TreeNode::new(3, "Task")]), TreeNode::new(4, "Phase 2")],
        );

        assert_eq!(tree.depth_of(&NodeId::from(1)), Some(0));
        assert_eq!(tree.depth_of(&NodeId::from(3)), Some(2));
        assert_eq!(tree.depth_of(&NodeId::from(4)), Some(1));
        assert_eq!(tree.depth_of(&NodeId::from(99)), None);
        assert_eq!(tree.find(&NodeId::from(3)).map(|n| n.name.as_str()), Some("Task"));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_child_without_id_is_dropped() {
        let node: TreeNode = serde_json::from_value(json!({
            "id": 1,
            "name": "Root",
            "children": [
                { "id": 2, "name": "Phase 1" },
                { "name": "Broken", "children": [{ "id": 5, "name": "Orphan" }] },
                { "id": null, "name": "Also broken" },
                { "id": 4, "name": "Phase 2" }
            ]
        }))
        .unwrap();

        let names: Vec<_> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Phase 1", "Phase 2"]);
        assert_eq!(node.len(), 3);
    }

    #[test]
    fn test_root_without_id_fails() {
        let result = serde_json::from_value::<TreeNode>(json!({ "name": "Root", "children": [] }));
        assert!(result.is_err());
    }
}
