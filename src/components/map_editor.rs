//! Map Editor Component
//!
//! Tree screen of one mind map. All state lives in a `TreeController`;
//! this component mirrors its snapshot into a signal after every step.

use aimlink_core::{HttpGateway, NodeId, Phase, TreeController, TreeSnapshot};
use leptos::prelude::*;

use crate::components::{NodeEditorModal, TreeNodeRow};
use crate::context::use_app_context;
use crate::store::{store_push_notices, use_app_store};
use crate::tasks::drive;

type Controller = StoredValue<TreeController<HttpGateway>, LocalStorage>;

#[component]
pub fn MapEditor(map_id: NodeId, map_name: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let controller: Controller =
        StoredValue::new_local(TreeController::with_shared_gateway(map_id, ctx.gateway()));
    let snapshot = RwSignal::new(controller.with_value(TreeController::snapshot));

    // Copy the controller state into the view and surface queued notices.
    // The screen may be gone by the time a request finishes.
    let sync = move || {
        controller.try_with_value(|c| {
            snapshot.set(c.snapshot());
            store_push_notices(&store, c.drain_notices());
        });
    };

    let reload = move || {
        let c = controller.get_value();
        drive(async move { c.load_tree().await }, sync, |_| {});
    };
    reload();

    let on_toggle = move |id: NodeId| {
        controller.with_value(|c| c.toggle_expansion(&id));
        sync();
    };
    let on_add = move |id: NodeId| {
        controller.with_value(|c| c.open_add(&id));
        sync();
    };
    let on_edit = move |id: NodeId| {
        controller.with_value(|c| c.open_rename(&id));
        sync();
    };
    let on_delete = move |id: NodeId| {
        let c = controller.get_value();
        drive(async move { c.delete_node(&id).await }, sync, |_| {});
    };
    let on_input = move |input: String| {
        controller.with_value(|c| c.set_editor_input(input));
        sync();
    };
    let on_submit = move |_: ()| {
        let c = controller.get_value();
        drive(async move { c.submit_editor().await }, sync, |_| {});
    };
    let on_cancel = move |_: ()| {
        controller.with_value(|c| c.close_editor());
        sync();
    };

    let phase = move || snapshot.with(|s| s.phase);
    let busy = Signal::derive(move || phase() == Phase::Mutating);
    let editor = Signal::derive(move || snapshot.with(|s| s.editor.clone()));

    view! {
        <div class="map-editor">
            <header class="editor-header">
                <button class="back-btn" on:click=move |_| ctx.show_maps()>"← Maps"</button>
                <h2 class="editor-title">{map_name}</h2>
                <button
                    class="refresh-btn"
                    disabled=move || phase() == Phase::Loading
                    on:click=move |_| reload()
                >
                    "↻"
                </button>
            </header>

            <Show when=move || phase() == Phase::Loading>
                <div class="spinner">"Loading..."</div>
            </Show>
            <Show when=move || phase() == Phase::Ready && !snapshot.with(TreeSnapshot::has_tree)>
                <p class="empty-state">"No data found"</p>
            </Show>

            <div class="tree">
                <For
                    each=move || snapshot.with(|s| s.rows.clone())
                    key=|row| row.clone()
                    children=move |row| {
                        view! {
                            <TreeNodeRow
                                row=row
                                busy=busy
                                on_toggle=on_toggle
                                on_add=on_add
                                on_edit=on_edit
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>

            <NodeEditorModal
                editor=editor
                busy=busy
                on_input=on_input
                on_submit=on_submit
                on_cancel=on_cancel
            />
        </div>
    }
}
