//! アップロードエリアコンポーネント
//!
//! ファイルのドロップ/選択 → アップロード → 一括分類。

use autoledger_common::actions;
use autoledger_common::view::{classify_summary, UPLOAD_RESULT_DELAY_MS};
use autoledger_common::{ClassifyResponse, Notice, UploadResponse, UserAction};
use gloo::timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, File};

use crate::app::{use_app_state, AppState};
use crate::components::progress_bar::ProgressBar;

/// アップロード中の表示状態
#[derive(Clone, Copy)]
struct UploadView {
    show_progress: RwSignal<bool>,
    progress: RwSignal<f32>,
    status_text: RwSignal<String>,
    uploading: RwSignal<bool>,
    result: RwSignal<Option<UploadResponse>>,
    classify_result: RwSignal<Option<ClassifyResponse>>,
}

impl UploadView {
    fn new() -> Self {
        Self {
            show_progress: RwSignal::new(false),
            progress: RwSignal::new(0.0),
            status_text: RwSignal::new(String::new()),
            uploading: RwSignal::new(false),
            result: RwSignal::new(None),
            classify_result: RwSignal::new(None),
        }
    }
}

fn upload_file(state: AppState, ui: UploadView, file: File) {
    ui.show_progress.set(true);
    ui.result.set(None);
    ui.classify_result.set(None);
    ui.uploading.set(true);
    ui.progress.set(0.3);
    ui.status_text.set(format!("Uploading {}...", file.name()));

    let backend = state.backend();
    spawn_local(async move {
        ui.progress.set(0.6);
        match actions::upload_file(&backend, file).await {
            Ok(resp) => {
                ui.progress.set(1.0);
                ui.status_text.set("Upload complete!".to_string());
                // バッチIDを更新するのはここだけ
                state.batch.update(|b| b.record_upload(&resp));
                state.notify(Notice::success(format!(
                    "{} transactions uploaded",
                    resp.total_transactions
                )));

                Timeout::new(UPLOAD_RESULT_DELAY_MS, move || {
                    ui.show_progress.set(false);
                    ui.result.set(Some(resp));
                })
                .forget();
            }
            Err(e) => {
                ui.progress.set(0.0);
                ui.status_text.set("Upload failed".to_string());
                state.notify(UserAction::Upload.failure_notice(&e));
            }
        }
        ui.uploading.set(false);
    });
}

fn classify_all(state: AppState, ui: UploadView) {
    state.notify(Notice::info("Classifying transactions..."));

    let scope = state.batch.get_untracked().scope();
    let backend = state.backend();
    spawn_local(async move {
        match actions::classify(&backend, &scope).await {
            Ok(resp) => {
                state.notify(Notice::success(format!(
                    "Classified {} transactions",
                    resp.total_classified
                )));
                ui.classify_result.set(Some(resp));
                state.load_dashboard();
            }
            Err(e) => state.notify(UserAction::ClassifyAll.failure_notice(&e)),
        }
    });
}

#[component]
pub fn UploadArea() -> impl IntoView {
    let state = use_app_state();
    let ui = UploadView::new();
    let (is_dragover, set_is_dragover) = signal(false);
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if ui.uploading.get_untracked() {
            return;
        }
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            upload_file(state, ui, file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if ui.uploading.get_untracked() {
            return;
        }
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_file_selected = move |_| {
        let Some(input) = file_input.get() else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            upload_file(state, ui, file);
        }
        // 同じファイルを再選択できるようにする
        input.set_value("");
    };

    view! {
        <div class="panel">
            <div
                id="dropZone"
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if ui.uploading.get() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <div class="upload-icon">"📄"</div>
                <p>"Drop a CSV or Excel file here, or click to browse"</p>
                <p class="text-muted">"Required columns: description, amount"</p>
                <input
                    node_ref=file_input
                    type="file"
                    accept=".csv,.xlsx,.xls"
                    class="hidden"
                    on:change=on_file_selected
                />
            </div>

            <Show when=move || ui.show_progress.get()>
                <ProgressBar progress=ui.progress.read_only() status_text=ui.status_text.read_only() />
            </Show>

            {move || ui.result.get().map(|resp| view! {
                <div id="uploadResult" class="upload-result">
                    <p id="uploadResultText">{resp.message.clone()}</p>
                    <p id="uploadBatchId" class="text-muted">{format!("Batch ID: {}", resp.batch_id)}</p>
                    <button class="btn btn-primary" on:click=move |_| classify_all(state, ui)>
                        "Classify All"
                    </button>
                </div>
            })}

            {move || ui.classify_result.get().map(|resp| view! {
                <div id="classifyResult" class="classify-result">
                    <div id="classifyDetails">
                        {classify_summary(&resp)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div class="flex justify-between">
                                    <span class="text-gray-400">{label}</span>
                                    <span class="font-semibold">{value}</span>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            })}
        </div>
    }
}
