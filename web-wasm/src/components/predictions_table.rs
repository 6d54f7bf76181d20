//! 分類結果テーブル

use autoledger_common::format_status;
use autoledger_common::view::PredictionRow;
use autoledger_common::PredictionStatus;
use leptos::prelude::*;

use crate::app::use_app_state;
use crate::components::badge::Badge;

#[component]
pub fn PredictionsTable() -> impl IntoView {
    let state = use_app_state();

    let on_filter = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        state.status_filter.set(PredictionStatus::parse(&value));
        state.load_predictions();
    };

    let rows = move || {
        state.predictions.with(|s| {
            s.data
                .as_ref()
                .map(|items| items.iter().map(PredictionRow::from_prediction).collect::<Vec<_>>())
        })
    };

    view! {
        <div class="panel">
            <div class="flex justify-between">
                <h3>"Classification Results"</h3>
                <select id="statusFilter" on:change=on_filter>
                    <option value="">"All Statuses"</option>
                    {PredictionStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{format_status(s.as_str())}</option> })
                        .collect_view()}
                </select>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Txn"</th>
                        <th>"Description"</th>
                        <th>"Amount"</th>
                        <th>"GL Code"</th>
                        <th>"Confidence"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody id="predictionsBody">
                    {move || match rows() {
                        None => ().into_any(),
                        Some(rows) if rows.is_empty() => view! {
                            <tr>
                                <td colspan="6" class="empty-state">"No predictions yet"</td>
                            </tr>
                        }
                        .into_any(),
                        Some(rows) => rows
                            .into_iter()
                            .map(|row| view! { <PredictionRowView row=row /> })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn PredictionRowView(row: PredictionRow) -> impl IntoView {
    let conf = row.confidence;
    view! {
        <tr>
            <td class="text-muted">{row.transaction_ref}</td>
            <td class="truncate" title=row.description.clone()>{row.description.clone()}</td>
            <td class="font-mono">{row.amount}</td>
            <td>
                <span class="font-mono">{row.gl_code}</span>
                <span class="text-muted">{row.gl_name}</span>
            </td>
            <td>
                <div class="flex items-center gap-2">
                    <div class="conf-bar">
                        <div
                            class=format!("conf-bar-fill {}", conf.level.bar_class())
                            style=format!("width:{}%", conf.bar_width)
                        />
                    </div>
                    <span class=conf.level.text_class()>{conf.text}</span>
                </div>
            </td>
            <td>
                <Badge class=row.badge text=row.status_text />
            </td>
        </tr>
    }
}
