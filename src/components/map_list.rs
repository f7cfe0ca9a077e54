//! Map List Component
//!
//! The user's mind maps with create / rename / delete, plus the recent
//! timeline of map changes.

use aimlink_core::{CatalogSnapshot, HttpGateway, MapCatalog, MindMap, NodeId, Phase};
use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::{store_push_notices, use_app_store};
use crate::tasks::drive;

type Catalog = StoredValue<MapCatalog<HttpGateway>, LocalStorage>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Maps,
    Timeline,
}

#[component]
pub fn MapList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let catalog: Catalog = StoredValue::new_local(MapCatalog::with_shared_gateway(ctx.gateway()));
    let snapshot = RwSignal::new(CatalogSnapshot::default());
    let (tab, set_tab) = signal(Tab::Maps);
    let (new_name, set_new_name) = signal(String::new());
    // Map being renamed and the draft name
    let renaming = RwSignal::new(None::<(NodeId, String)>);

    let sync = move || {
        // The screen may be gone by the time a request finishes
        catalog.try_with_value(|c| {
            snapshot.set(c.snapshot());
            store_push_notices(&store, c.drain_notices());
        });
    };

    let refresh = move || {
        let c = catalog.get_value();
        drive(async move { c.refresh().await }, sync, |_| {});
    };
    refresh();

    let create_map = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        let c = catalog.get_value();
        drive(async move { c.create_map(&name).await }, sync, move |outcome| {
            if outcome.is_applied() {
                set_new_name.set(String::new());
            }
        });
    };

    let save_rename = move || {
        let Some((id, name)) = renaming.get() else { return };
        let c = catalog.get_value();
        drive(async move { c.rename_map(&id, &name).await }, sync, move |outcome| {
            if outcome.is_applied() {
                renaming.set(None);
            }
        });
    };

    let delete_map = move |id: NodeId| {
        let c = catalog.get_value();
        drive(async move { c.delete_map(&id).await }, sync, |_| {});
    };

    let phase = move || snapshot.with(|s| s.phase);
    let busy = Signal::derive(move || phase() == Phase::Mutating);

    let map_row = move |map: MindMap| {
        let MindMap { id, name, created_at } = map;
        let (open_id, rename_id, edit_id, delete_id) = (id.clone(), id.clone(), id.clone(), id);
        let open_name = name.clone();
        let is_renaming = move || {
            renaming.with(|r| r.as_ref().map(|(id, _)| id == &rename_id).unwrap_or(false))
        };

        view! {
            <li class="map-row">
                <Show
                    when=is_renaming
                    fallback=move || {
                        let (open_id, open_name) = (open_id.clone(), open_name.clone());
                        view! {
                            <span
                                class="map-name"
                                on:click=move |_| ctx.open_map(open_id.clone(), open_name.clone())
                            >
                                {open_name.clone()}
                            </span>
                        }
                    }
                >
                    <form
                        class="map-rename-form"
                        on:submit=move |ev: web_sys::SubmitEvent| {
                            ev.prevent_default();
                            save_rename();
                        }
                    >
                        <input
                            type="text"
                            prop:value=move || renaming.get().map(|(_, n)| n).unwrap_or_default()
                            on:input=move |ev| {
                                let draft = event_target_value(&ev);
                                renaming.update(|r| {
                                    if let Some((_, name)) = r {
                                        *name = draft;
                                    }
                                });
                            }
                        />
                        <button type="submit" class="confirm-btn" disabled=move || busy.get()>"✓"</button>
                        <button type="button" class="cancel-btn" on:click=move |_| renaming.set(None)>"✗"</button>
                    </form>
                </Show>
                <span class="map-created">{created_at.unwrap_or_default()}</span>
                <button
                    class="map-edit-btn"
                    title="Rename"
                    disabled=move || busy.get()
                    on:click=move |_| renaming.set(Some((edit_id.clone(), name.clone())))
                >
                    "✎"
                </button>
                <DeleteConfirmButton
                    button_class="map-delete-btn"
                    disabled=busy
                    on_confirm=move |_: ()| delete_map(delete_id.clone())
                />
            </li>
        }
    };

    view! {
        <div class="map-list">
            <header class="map-list-header">
                <h1>"Mind Maps"</h1>
                <div class="tab-bar">
                    <button
                        class=move || if tab.get() == Tab::Maps { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(Tab::Maps)
                    >
                        "Maps"
                    </button>
                    <button
                        class=move || if tab.get() == Tab::Timeline { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(Tab::Timeline)
                    >
                        "Timeline"
                    </button>
                </div>
                <button
                    class="refresh-btn"
                    disabled=move || phase() == Phase::Loading
                    on:click=move |_| refresh()
                >
                    "↻"
                </button>
            </header>

            <Show when=move || phase() == Phase::Loading>
                <div class="spinner">"Loading..."</div>
            </Show>

            <Show
                when=move || tab.get() == Tab::Maps
                fallback=move || view! {
                    <ul class="timeline">
                        <For
                            each=move || snapshot.with(|s| s.timeline.clone().into_iter().enumerate().collect::<Vec<_>>())
                            key=|(index, entry)| (*index, entry.content.clone())
                            children=move |(_, entry)| {
                                view! {
                                    <li class="timeline-entry">
                                        <span class="timeline-time">{entry.created_at.unwrap_or_default()}</span>
                                        <span class="timeline-operator">{entry.operator}</span>
                                        <span class="timeline-content">{entry.content}</span>
                                    </li>
                                }
                            }
                        />
                    </ul>
                }
            >
                <form class="new-map-form" on:submit=create_map>
                    <input
                        type="text"
                        placeholder="New mind map..."
                        prop:value=move || new_name.get()
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || busy.get()>"Create"</button>
                </form>
                <Show when=move || phase() == Phase::Ready && snapshot.with(|s| s.maps.is_empty())>
                    <p class="empty-state">"No mind maps yet"</p>
                </Show>
                <ul class="maps">
                    <For
                        each=move || snapshot.with(|s| s.maps.clone())
                        key=|map| (map.id.clone(), map.name.clone())
                        children=map_row
                    />
                </ul>
            </Show>
        </div>
    }
}
