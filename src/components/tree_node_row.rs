//! Tree Node Row Component
//!
//! One rendered row of the mind-map tree: toggle, icon, label, assignee and
//! the add / edit / delete buttons.

use aimlink_core::{NodeId, NodeKind, Toggle, TreeRow};
use leptos::prelude::*;

use crate::components::DeleteConfirmButton;

#[component]
pub fn TreeNodeRow(
    row: TreeRow,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_toggle: Callback<NodeId>,
    #[prop(into)] on_add: Callback<NodeId>,
    #[prop(into)] on_edit: Callback<NodeId>,
    #[prop(into)] on_delete: Callback<NodeId>,
) -> impl IntoView {
    let indent = format!("padding-left: {}px", row.indent_px());
    let (icon, kind_class) = match row.kind {
        NodeKind::Folder => ("📁", "node-label folder"),
        NodeKind::Leaf => ("📄", "node-label leaf"),
    };

    let toggle_view = {
        let id = row.id.clone();
        match row.toggle {
            Toggle::Spacer => view! { <span class="node-toggle-spacer">"·"</span> }.into_any(),
            toggle => {
                let glyph = if toggle == Toggle::Expanded { "▼" } else { "▶" };
                view! {
                    <span
                        class="node-toggle"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_toggle.run(id.clone());
                        }
                    >
                        {glyph}
                    </span>
                }
                .into_any()
            }
        }
    };

    let can_add = row.can_add();
    let can_edit = row.can_edit();
    let can_delete = row.can_delete();
    let TreeRow { id, label, assignee, .. } = row;
    let (add_id, edit_id, delete_id) = (id.clone(), id.clone(), id);

    view! {
        <div class="tree-row" style=indent>
            {toggle_view}
            <span class="node-icon">{icon}</span>
            <span class=kind_class>{label}</span>
            {assignee.map(|name| view! { <span class="node-assignee">{name}</span> })}
            <span class="node-actions">
                {can_add.then(|| view! {
                    <button
                        class="node-btn add"
                        title="Add child"
                        disabled=move || busy.get()
                        on:click=move |_| on_add.run(add_id.clone())
                    >
                        "+"
                    </button>
                })}
                {can_edit.then(|| view! {
                    <button
                        class="node-btn edit"
                        title="Rename"
                        disabled=move || busy.get()
                        on:click=move |_| on_edit.run(edit_id.clone())
                    >
                        "✎"
                    </button>
                })}
                {can_delete.then(|| view! {
                    <DeleteConfirmButton
                        button_class="node-btn delete"
                        disabled=busy
                        on_confirm=move |_: ()| on_delete.run(delete_id.clone())
                    />
                })}
            </span>
        </div>
    }
}
