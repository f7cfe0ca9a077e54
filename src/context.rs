//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use aimlink_core::{HttpGateway, NodeId};
use leptos::prelude::*;

use crate::store::{store_show_screen, AppStore, Screen};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Backend client shared by every controller; the HTTP client is !Send
    gateway: StoredValue<Rc<HttpGateway>, LocalStorage>,
    store: AppStore,
}

impl AppContext {
    pub fn new(gateway: HttpGateway, store: AppStore) -> Self {
        Self {
            gateway: StoredValue::new_local(Rc::new(gateway)),
            store,
        }
    }

    pub fn gateway(&self) -> Rc<HttpGateway> {
        self.gateway.get_value()
    }

    /// Open a map in the tree editor
    pub fn open_map(&self, map_id: NodeId, map_name: String) {
        log::info!("Opening mind map {}", map_id);
        store_show_screen(&self.store, Screen::Editor { map_id, map_name });
    }

    /// Back to the map list
    pub fn show_maps(&self) {
        store_show_screen(&self.store, Screen::Maps);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
