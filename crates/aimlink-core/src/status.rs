//! Controller Status Types
//!
//! Phase machine, operation outcomes and the transient notices shown to the
//! user. Shared by the tree controller and the map catalog.

use std::collections::VecDeque;

use crate::domain::{GatewayError, NodeId};

/// Loading phase of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Data (or the lack of it) is on screen
    Ready,
    /// An add/edit/delete is in flight
    Mutating,
}

/// Why an operation never reached the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Name empty or whitespace only
    EmptyName,
    /// Node is not part of the current tree
    UnknownNode(NodeId),
    /// The root can't be deleted
    RootNotDeletable,
    /// Submit without an open editor
    EditorClosed,
}

/// Result of a controller operation
///
/// Gateway errors stop here; callers only decide what to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Gateway call succeeded and local state was replaced
    Applied,
    /// Precondition failed, no gateway call was made
    Rejected(Rejection),
    /// Another mutation is in flight, no gateway call was made
    Busy,
    /// A newer load started while this one was in flight
    Superseded,
    /// Gateway call failed, local state is untouched
    Failed(GatewayError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Short-lived user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// FIFO of notices waiting for the UI
#[derive(Debug, Default)]
pub(crate) struct Notices(VecDeque<Notice>);

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.0.push_back(notice);
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.0.drain(..).collect()
    }
}
