//! ダッシュボード（KPI・分類内訳・再学習）

use autoledger_common::actions;
use autoledger_common::format::format_count;
use autoledger_common::view::{breakdown, KpiView};
use autoledger_common::{Notice, UserAction};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_app_state;

#[component]
fn KpiCard(id: &'static str, label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <p class="kpi-label">{label}</p>
            <p id=id class="kpi-value">{move || value.get()}</p>
        </div>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_app_state();

    let kpi = Memo::new(move |_| {
        state
            .dashboard
            .with(|d| d.data.as_ref().map(|snap| KpiView::from_stats(&snap.stats)))
    });
    let field = move |pick: fn(&KpiView) -> String| {
        Signal::derive(move || {
            kpi.with(|k| k.as_ref().map(pick).unwrap_or_else(|| "–".to_string()))
        })
    };

    let vectors = Signal::derive(move || {
        state.dashboard.with(|d| {
            d.data
                .as_ref()
                .and_then(|snap| snap.ml.as_ref())
                .map(|ml| format_count(ml.total_vectors))
                .unwrap_or_else(|| "–".to_string())
        })
    });

    let rows = move || {
        state
            .dashboard
            .with(|d| d.data.as_ref().map(|snap| breakdown(&snap.stats)).unwrap_or_default())
    };

    let (retraining, set_retraining) = signal(false);
    let on_retrain = move |_| {
        state.notify(Notice::info("Starting retraining..."));
        set_retraining.set(true);
        let backend = state.backend();
        spawn_local(async move {
            match actions::retrain(&backend).await {
                Ok(resp) => {
                    state.notify(Notice::success(resp.message));
                    state.load_dashboard();
                }
                Err(e) => state.notify(UserAction::Retrain.failure_notice(&e)),
            }
            set_retraining.set(false);
        });
    };

    view! {
        <div class="dashboard">
            <div class="kpi-grid">
                <KpiCard id="kpi-total-txn" label="Total Transactions" value=field(|k| k.total_transactions.clone()) />
                <KpiCard id="kpi-auto-posted" label="Auto-Posted" value=field(|k| k.auto_posted.clone()) />
                <KpiCard id="kpi-pending" label="Pending Review" value=field(|k| k.pending_review.clone()) />
                <KpiCard id="kpi-manual" label="Manual Required" value=field(|k| k.manual_required.clone()) />
                <KpiCard id="kpi-avg-conf" label="Avg Confidence" value=field(|k| k.avg_confidence.clone()) />
                <KpiCard id="kpi-erp" label="ERP Postings" value=field(|k| k.erp_postings.clone()) />
                <KpiCard id="kpi-corrections" label="Corrections" value=field(|k| k.corrections.clone()) />
                <KpiCard id="kpi-corr-rate" label="Correction Rate" value=field(|k| k.correction_rate.clone()) />
                <KpiCard id="kpi-vectors" label="Knowledge Vectors" value=vectors />
            </div>

            <div class="panel">
                <h3>"Classification Breakdown"</h3>
                <div id="classificationBreakdown" class="breakdown">
                    {move || {
                        rows()
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <div>
                                        <div class="flex justify-between text-sm mb-1">
                                            <span class="text-gray-400">{row.label}</span>
                                            <span class="font-medium text-gray-300">
                                                {format!("{} ({}%)", row.count, row.pct)}
                                            </span>
                                        </div>
                                        <div class="conf-bar">
                                            <div
                                                class=format!("conf-bar-fill {}", row.color)
                                                style=format!("width:{}%", row.pct)
                                            />
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>

            <button class="btn btn-primary" disabled=move || retraining.get() on:click=on_retrain>
                "Retrain Model"
            </button>
        </div>
    }
}
