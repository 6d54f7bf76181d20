//! ヘッダー・タブナビゲーション

use autoledger_common::view::ml_status_text;
use autoledger_common::Tab;
use leptos::prelude::*;

use crate::app::use_app_state;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();

    let ml_status = move || {
        state.dashboard.with(|d| {
            d.data
                .as_ref()
                .and_then(|snap| snap.ml.as_ref())
                .map(ml_status_text)
                .unwrap_or_default()
        })
    };

    // レビュー待ち + 手動分類（0件なら非表示）
    let review_count = move || {
        state.dashboard.with(|d| {
            d.data
                .as_ref()
                .map(|snap| snap.stats.review_count())
                .unwrap_or(0)
        })
    };

    view! {
        <header class="header">
            <div class="header-title">
                <h1>"AutoLedger AI"</h1>
                <span id="mlStatus" class="text-muted">{ml_status}</span>
            </div>
            <nav class="tab-nav">
                {Tab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="tab-btn"
                                class:active=move || state.active_tab.get() == tab
                                data-tab=tab.id()
                                on:click=move |_| state.switch_tab(tab)
                            >
                                {tab.label()}
                                {(tab == Tab::Review).then(|| view! {
                                    <span
                                        id="reviewBadge"
                                        class="nav-badge"
                                        class:hidden=move || review_count() == 0
                                    >
                                        {review_count}
                                    </span>
                                })}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}
