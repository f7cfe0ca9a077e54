//! Aim.Link Mind-Map Frontend App
//!
//! Map list and tree editor screens, with a toast stack on top.

use aimlink_core::{GatewayConfig, HttpGateway};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{MapEditor, MapList, ToastStack};
use crate::context::AppContext;
use crate::session::load_session;
use crate::store::{AppState, AppStateStoreFields, Screen};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let session = load_session();
    if session.token.is_none() {
        log::warn!("No login token found, requests will be anonymous");
    }

    let gateway = match HttpGateway::new(GatewayConfig::default(), session) {
        Ok(gateway) => gateway,
        Err(e) => {
            log::error!("Failed to set up the backend client: {}", e);
            return view! {
                <div class="app-error">
                    <h2>"Unable to start"</h2>
                    <p>{e.to_string()}</p>
                </div>
            }
            .into_any();
        }
    };
    log::info!("Backend at {}", gateway.config().base_url());
    provide_context(AppContext::new(gateway, store));

    view! {
        <div class="app-layout">
            {move || match store.screen().get() {
                Screen::Maps => view! { <MapList /> }.into_any(),
                Screen::Editor { map_id, map_name } => {
                    view! { <MapEditor map_id=map_id map_name=map_name /> }.into_any()
                }
            }}
            <ToastStack />
        </div>
    }
    .into_any()
}
