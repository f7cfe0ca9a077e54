//! Toast Stack Component

use aimlink_core::NoticeLevel;
use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

/// Transient notices, newest at the bottom; click to dismiss early
#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.level {
                        NoticeLevel::Info => "toast toast-info",
                        NoticeLevel::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
