//! Tree State Controller
//!
//! Owns the tree of one open map: fetches it, forwards add/rename/delete to
//! the gateway and re-fetches the whole tree after every successful change.
//! Nothing is patched locally, so a failed call leaves the tree as it was.
//!
//! The controller is a cheap `Rc` handle. Clones share state, which lets UI
//! callbacks each hold one. Borrows of the state never span an `.await`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::domain::{GatewayResult, NodeId, TreeNode};
use crate::gateway::{CreateNode, TreeGateway, UpdateNode};
use crate::status::{Notice, Notices, Outcome, Phase, Rejection};

use super::expansion::ExpansionState;
use super::render::{render_rows, TreeRow};

const NODE_ADDED: &str = "Node added";
const NODE_UPDATED: &str = "Node updated";
const NODE_DELETED: &str = "Node deleted";
const ACTION_FAILED: &str = "Action failed";
const DELETE_FAILED: &str = "Delete failed";
const LOAD_FAILED: &str = "Failed to load map";
const NODE_MISSING: &str = "Node not found";

/// What the open editor will do on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    AddChild,
    Rename,
}

/// The add/rename input surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEditor {
    pub mode: EditorMode,
    /// Parent for `AddChild`, renamed node for `Rename`
    pub target: NodeId,
    pub input: String,
}

/// Everything a view needs to draw the editor screen
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSnapshot {
    pub phase: Phase,
    pub rows: Vec<TreeRow>,
    pub editor: Option<NodeEditor>,
}

impl TreeSnapshot {
    /// True once a tree has been loaded (even if a later reload failed)
    pub fn has_tree(&self) -> bool {
        !self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
struct TreeState {
    tree: Option<TreeNode>,
    expansion: ExpansionState,
    phase: Phase,
    editor: Option<NodeEditor>,
    notices: Notices,
    /// Bumped by every load; only the newest load may apply its result
    load_generation: u64,
}

pub struct TreeController<G> {
    tree_id: NodeId,
    gateway: Rc<G>,
    state: Rc<RefCell<TreeState>>,
}

impl<G> Clone for TreeController<G> {
    fn clone(&self) -> Self {
        Self {
            tree_id: self.tree_id.clone(),
            gateway: Rc::clone(&self.gateway),
            state: Rc::clone(&self.state),
        }
    }
}

impl<G: TreeGateway> TreeController<G> {
    /// Controller for the map `tree_id`; nothing is fetched until `load_tree`
    pub fn new(tree_id: impl Into<NodeId>, gateway: G) -> Self {
        Self::with_shared_gateway(tree_id, Rc::new(gateway))
    }

    pub fn with_shared_gateway(tree_id: impl Into<NodeId>, gateway: Rc<G>) -> Self {
        Self {
            tree_id: tree_id.into(),
            gateway,
            state: Rc::new(RefCell::new(TreeState::default())),
        }
    }

    pub fn tree_id(&self) -> &NodeId {
        &self.tree_id
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ========================
    // Queries
    // ========================

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn tree(&self) -> Option<TreeNode> {
        self.state.borrow().tree.clone()
    }

    pub fn editor(&self) -> Option<NodeEditor> {
        self.state.borrow().editor.clone()
    }

    /// Visible rows for the current tree and flags
    pub fn rows(&self) -> Vec<TreeRow> {
        let state = self.state.borrow();
        state
            .tree
            .as_ref()
            .map(|tree| render_rows(tree, &state.expansion))
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            phase: self.phase(),
            rows: self.rows(),
            editor: self.editor(),
        }
    }

    /// Take the notices queued since the last call
    pub fn drain_notices(&self) -> Vec<Notice> {
        self.state.borrow_mut().notices.drain()
    }

    // ========================
    // Local Operations
    // ========================

    /// Flip a node's expanded flag. Returns the new flag, or `None` when the
    /// node isn't in the tree.
    pub fn toggle_expansion(&self, node_id: &NodeId) -> Option<bool> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let depth = state.tree.as_ref()?.depth_of(node_id)?;
        Some(state.expansion.toggle(node_id, depth))
    }

    /// Open the editor to add a child under `parent_id`, input cleared
    pub fn open_add(&self, parent_id: &NodeId) {
        self.state.borrow_mut().editor = Some(NodeEditor {
            mode: EditorMode::AddChild,
            target: parent_id.clone(),
            input: String::new(),
        });
    }

    /// Open the editor to rename a node, prefilled with its label
    pub fn open_rename(&self, node_id: &NodeId) {
        let mut state = self.state.borrow_mut();
        let Some(label) = state
            .tree
            .as_ref()
            .and_then(|tree| tree.find(node_id))
            .map(|node| node.name.clone())
        else {
            return;
        };
        state.editor = Some(NodeEditor {
            mode: EditorMode::Rename,
            target: node_id.clone(),
            input: label,
        });
    }

    pub fn set_editor_input(&self, input: impl Into<String>) {
        if let Some(editor) = self.state.borrow_mut().editor.as_mut() {
            editor.input = input.into();
        }
    }

    pub fn close_editor(&self) {
        self.state.borrow_mut().editor = None;
    }

    // ========================
    // Remote Operations
    // ========================

    /// Fetch the whole tree and replace the current one.
    ///
    /// On failure the previous tree stays and one error notice is queued.
    /// When a newer load starts meanwhile, this result is dropped.
    pub async fn load_tree(&self) -> Outcome {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.load_generation += 1;
            if state.phase != Phase::Mutating {
                state.phase = Phase::Loading;
            }
            state.load_generation
        };

        let result = self.gateway.fetch_tree(&self.tree_id).await;

        let mut state = self.state.borrow_mut();
        if state.load_generation != generation {
            return Outcome::Superseded;
        }
        if state.phase == Phase::Loading {
            state.phase = Phase::Ready;
        }
        match result {
            Ok(tree) => {
                info!("Loaded mind map {} ({} nodes)", self.tree_id, tree.len());
                state.expansion.reset();
                state.tree = Some(tree);
                Outcome::Applied
            }
            Err(e) => {
                warn!("Loading mind map {} failed: {}", self.tree_id, e);
                state.notices.push(Notice::error(LOAD_FAILED));
                Outcome::Failed(e)
            }
        }
    }

    /// Create a child named `name` under `parent_id`, then reload
    pub async fn add_child(&self, parent_id: &NodeId, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::Rejected(Rejection::EmptyName);
        }
        if let Err(rejection) = self.require_node(parent_id) {
            return Outcome::Rejected(rejection);
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }

        let request = CreateNode {
            tree_id: self.tree_id.clone(),
            parent_id: parent_id.clone(),
            name: name.to_string(),
        };
        let result = self.gateway.create_node(&request).await.map(|id| {
            info!("Created node {} under {}", id, parent_id);
        });
        self.finish_mutation(result, NODE_ADDED, ACTION_FAILED).await
    }

    /// Rename a node, then reload
    pub async fn rename_node(&self, node_id: &NodeId, new_name: &str) -> Outcome {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Outcome::Rejected(Rejection::EmptyName);
        }
        if let Err(rejection) = self.require_node(node_id) {
            return Outcome::Rejected(rejection);
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }

        let request = UpdateNode {
            node_id: node_id.clone(),
            name: new_name.to_string(),
        };
        let result = self.gateway.update_node(&request).await;
        self.finish_mutation(result, NODE_UPDATED, ACTION_FAILED).await
    }

    /// Delete a non-root node, then reload
    pub async fn delete_node(&self, node_id: &NodeId) -> Outcome {
        match self.require_node(node_id) {
            Err(rejection) => return Outcome::Rejected(rejection),
            Ok(0) => return Outcome::Rejected(Rejection::RootNotDeletable),
            Ok(_) => {}
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }

        let result = self.gateway.delete_node(node_id).await;
        self.finish_mutation(result, NODE_DELETED, DELETE_FAILED).await
    }

    /// Submit the open editor as an add or a rename
    pub async fn submit_editor(&self) -> Outcome {
        let Some(editor) = self.editor() else {
            return Outcome::Rejected(Rejection::EditorClosed);
        };
        match editor.mode {
            EditorMode::AddChild => self.add_child(&editor.target, &editor.input).await,
            EditorMode::Rename => self.rename_node(&editor.target, &editor.input).await,
        }
    }

    // ========================
    // Helpers
    // ========================

    /// Depth of a node that must be in the current tree; a stale id is
    /// reported to the user
    fn require_node(&self, node_id: &NodeId) -> Result<usize, Rejection> {
        let mut state = self.state.borrow_mut();
        let depth = state.tree.as_ref().and_then(|tree| tree.depth_of(node_id));
        depth.ok_or_else(|| {
            warn!("Node {} is not in map {}", node_id, self.tree_id);
            state.notices.push(Notice::error(NODE_MISSING));
            Rejection::UnknownNode(node_id.clone())
        })
    }

    /// Enter `Mutating` unless a mutation is already in flight
    fn begin_mutation(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase == Phase::Mutating {
            warn!("Ignoring mutation on map {}: another one is in flight", self.tree_id);
            return false;
        }
        state.phase = Phase::Mutating;
        true
    }

    /// Report the mutation result. On success the tree is reloaded while
    /// still `Mutating`, so nothing else can be submitted against the old
    /// tree; the phase returns to `Ready` only after that reload.
    async fn finish_mutation(
        &self,
        result: GatewayResult<()>,
        success: &str,
        failure: &str,
    ) -> Outcome {
        match result {
            Ok(()) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.editor = None;
                    state.notices.push(Notice::info(success));
                }
                self.load_tree().await;
                self.state.borrow_mut().phase = Phase::Ready;
                Outcome::Applied
            }
            Err(e) => {
                warn!("Mutation on map {} failed ({}): {}", self.tree_id, e.kind(), e);
                let mut state = self.state.borrow_mut();
                state.phase = Phase::Ready;
                state.notices.push(Notice::error(failure));
                Outcome::Failed(e)
            }
        }
    }
}
