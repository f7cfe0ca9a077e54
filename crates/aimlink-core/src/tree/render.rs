//! Tree Renderer
//!
//! Turns a tree plus expansion flags into display rows. Pure: same input,
//! same rows.

use crate::domain::{NodeId, NodeKind, TreeNode};

use super::expansion::ExpansionState;

/// Left padding of the root row, in px
pub const INDENT_BASE: usize = 16;
/// Extra padding per depth level, in px
pub const INDENT_STEP: usize = 16;

/// Expand/collapse affordance of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Expanded,
    Collapsed,
    /// No children: fixed-width blank keeps labels aligned
    Spacer,
}

/// One visible node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeRow {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    pub assignee: Option<String>,
    pub depth: usize,
    pub toggle: Toggle,
}

impl TreeRow {
    pub fn indent_px(&self) -> usize {
        INDENT_BASE + self.depth * INDENT_STEP
    }

    /// Add child is offered at every depth
    pub fn can_add(&self) -> bool {
        true
    }

    /// Rename is offered at every depth
    pub fn can_edit(&self) -> bool {
        true
    }

    /// The root is never deletable
    pub fn can_delete(&self) -> bool {
        self.depth > 0
    }

    pub fn has_toggle(&self) -> bool {
        self.toggle != Toggle::Spacer
    }
}

/// Rows of a whole tree, root at depth 0
pub fn render_rows(root: &TreeNode, expansion: &ExpansionState) -> Vec<TreeRow> {
    render_subtree(root, 0, expansion)
}

/// Rows of `node` and its visible descendants in pre-order
pub fn render_subtree(node: &TreeNode, depth: usize, expansion: &ExpansionState) -> Vec<TreeRow> {
    fn collect(
        node: &TreeNode,
        depth: usize,
        expansion: &ExpansionState,
        result: &mut Vec<TreeRow>,
    ) {
        let expanded = node.has_children() && expansion.is_expanded(&node.id, depth);
        let toggle = match (node.has_children(), expanded) {
            (false, _) => Toggle::Spacer,
            (true, true) => Toggle::Expanded,
            (true, false) => Toggle::Collapsed,
        };
        result.push(TreeRow {
            id: node.id.clone(),
            label: node.name.clone(),
            kind: node.kind,
            assignee: node.assignee.clone(),
            depth,
            toggle,
        });
        if expanded {
            for child in &node.children {
                collect(child, depth + 1, expansion, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(node, depth, expansion, &mut result);
    result
}

/// Plain-text outline of rendered rows, one line per row
///
/// ```text
/// ▼ [F] Root [+][~]
///       · Phase 1 (Lin) [+][~][x]
/// ```
pub fn outline(rows: &[TreeRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let toggle = match row.toggle {
            Toggle::Expanded => "▼",
            Toggle::Collapsed => "▶",
            Toggle::Spacer => " ",
        };
        let icon = match row.kind {
            NodeKind::Folder => "[F]",
            NodeKind::Leaf => "·",
        };
        out.push_str(&"    ".repeat(row.depth));
        out.push_str(&format!("{} {} {}", toggle, icon, row.label));
        if let Some(assignee) = &row.assignee {
            out.push_str(&format!(" ({})", assignee));
        }
        if row.can_add() {
            out.push_str(" [+]");
        }
        if row.can_edit() {
            out.push_str("[~]");
        }
        if row.can_delete() {
            out.push_str("[x]");
        }
        out.push('\n');
    }
    out
}
