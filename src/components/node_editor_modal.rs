//! Node Editor Modal Component
//!
//! Single text input used both to add a child and to rename a node.

use aimlink_core::{EditorMode, NodeEditor};
use leptos::prelude::*;

#[component]
pub fn NodeEditorModal(
    #[prop(into)] editor: Signal<Option<NodeEditor>>,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_submit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let title = move || match editor.get().map(|e| e.mode) {
        Some(EditorMode::Rename) => "Edit Node",
        _ => "Add Child Node",
    };
    let value = move || editor.get().map(|e| e.input).unwrap_or_default();
    let blank = move || value().trim().is_empty();

    view! {
        <Show when=move || editor.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
                <form
                    class="modal"
                    on:click=|ev| ev.stop_propagation()
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    <h3>{title}</h3>
                    <input
                        type="text"
                        placeholder="Node name"
                        autofocus=true
                        prop:value=value
                        on:input=move |ev| on_input.run(event_target_value(&ev))
                    />
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="confirm-btn" disabled=move || busy.get() || blank()>
                            {move || if busy.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
