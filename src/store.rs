//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use aimlink_core::{Notice, NoticeLevel, NodeId};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

/// How long a toast stays on screen
const TOAST_MS: u32 = 2500;

/// Which screen is showing
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Screen {
    #[default]
    Maps,
    Editor { map_id: NodeId, map_name: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub screen: Screen,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_show_screen(store: &AppStore, screen: Screen) {
    *store.screen().write() = screen;
}

/// Show notices as toasts, each removed after a short delay
pub fn store_push_notices(store: &AppStore, notices: Vec<Notice>) {
    for notice in notices {
        let id = {
            let next_field = store.next_toast_id();
            let mut next = next_field.write();
            *next += 1;
            *next
        };
        store.toasts().write().push(Toast {
            id,
            level: notice.level,
            message: notice.message,
        });

        let store = *store;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            store_dismiss_toast(&store, id);
        });
    }
}

pub fn store_dismiss_toast(store: &AppStore, toast_id: u64) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
