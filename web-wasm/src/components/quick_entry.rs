//! クイック入力（1件を作成して即分類）

use autoledger_common::actions::{self, prepare_quick_entry};
use autoledger_common::{Notice, Tab, UserAction};
use gloo::console;
use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_app_state;

#[component]
pub fn QuickEntry() -> impl IntoView {
    let state = use_app_state();
    let (text, set_text) = signal(String::new());
    let (running, set_running) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if running.get_untracked() {
            return;
        }
        let Some(entry) = prepare_quick_entry(&text.get_untracked()) else {
            return;
        };

        set_running.set(true);
        state.notify(Notice::info("Classifying..."));

        let backend = state.backend();
        spawn_local(async move {
            match actions::quick_entry(&backend, &entry).await {
                Ok(_) => {
                    state.notify(Notice::success("Classification complete!"));
                    set_text.set(String::new());
                    state.load_dashboard();
                    state.switch_tab(Tab::Results);
                }
                Err(e) => {
                    if let Some(id) = e.orphaned_transaction() {
                        console::warn!(format!("transaction {} was created but not classified", id));
                    }
                    state.notify(UserAction::QuickEntry.failure_notice(e.source_error()));
                }
            }
            set_running.set(false);
            if let Some(input) = input_ref.get_untracked() {
                let _ = input.focus();
            }
        });
    };

    view! {
        <div class="panel">
            <h3>"Quick Entry"</h3>
            <p class="text-muted">"Describe a transaction, e.g. \"$50 office supplies from Staples\""</p>
            <form id="quickForm" class="quick-entry" on:submit=on_submit>
                <input
                    id="quickInput"
                    node_ref=input_ref
                    type="text"
                    placeholder="Transaction description"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                    disabled=move || running.get()
                />
                <button type="submit" class="btn btn-primary" disabled=move || running.get()>
                    "Classify"
                </button>
            </form>
        </div>
    }
}
