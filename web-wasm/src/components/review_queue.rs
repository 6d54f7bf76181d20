//! レビューキュー
//!
//! カードごとに承認/却下。処理済みのカードはその場で取り除く。

use autoledger_common::actions;
use autoledger_common::view::ReviewCardView;
use autoledger_common::{Notice, UserAction};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_app_state;
use crate::components::badge::Badge;

#[component]
pub fn ReviewQueue() -> impl IntoView {
    let state = use_app_state();

    let cards = move || {
        state.review.with(|s| {
            s.data
                .as_ref()
                .map(|items| items.iter().map(ReviewCardView::from_prediction).collect::<Vec<_>>())
        })
    };

    view! {
        <div class="panel">
            <h3>"Review Queue"</h3>
            <div id="reviewQueue" class="review-list">
                {move || {
                    let empty = state.review.with(|s| s.data.as_ref().is_some_and(|d| d.is_empty()));
                    empty.then(|| view! {
                        <div class="empty-state">
                            <p class="text-2xl">"🎉"</p>
                            <p>"All caught up! No items need review."</p>
                        </div>
                    })
                }}
                <For
                    each=move || cards().unwrap_or_default()
                    key=|card| card.prediction_id
                    children=|card| view! { <ReviewCard card=card /> }
                />
            </div>
        </div>
    }
}

#[component]
fn ReviewCard(card: ReviewCardView) -> impl IntoView {
    let state = use_app_state();
    let id = card.prediction_id;
    let (gl_code, set_gl_code) = signal(String::new());
    let (reason, set_reason) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_approve = move |_| {
        set_busy.set(true);
        let backend = state.backend();
        spawn_local(async move {
            match actions::approve(&backend, id).await {
                Ok(_) => {
                    state.notify(Notice::success("Prediction approved & posted to ERP"));
                    state.remove_review_card(id);
                    state.load_dashboard();
                }
                Err(e) => {
                    state.notify(UserAction::Approve.failure_notice(&e));
                    set_busy.set(false);
                }
            }
        });
    };

    let on_reject = move |_| {
        // GLコード未入力ならリクエストを出さない
        let action = match actions::rejection(&gl_code.get_untracked(), &reason.get_untracked()) {
            Ok(action) => action,
            Err(e) => {
                state.notify(UserAction::Reject.failure_notice(&e));
                return;
            }
        };

        set_busy.set(true);
        let backend = state.backend();
        spawn_local(async move {
            match actions::reject(&backend, id, &action).await {
                Ok(_) => {
                    state.notify(Notice::success("Correction saved & posted to ERP"));
                    state.remove_review_card(id);
                    state.load_dashboard();
                }
                Err(e) => {
                    state.notify(UserAction::Reject.failure_notice(&e));
                    set_busy.set(false);
                }
            }
        });
    };

    let conf = card.confidence;
    let candidates = card.candidates;

    view! {
        <div class="review-card" id=format!("review-{}", id)>
            <div class="flex justify-between">
                <div>
                    <Badge class=card.badge text=card.status_text />
                    <span class="text-muted">{card.transaction_ref}</span>
                </div>
                <span class=conf.level.text_class()>{conf.text}</span>
            </div>

            <p class="font-medium">{card.description}</p>
            <div class="grid grid-cols-3 text-sm">
                <div>
                    <span class="text-muted">"Amount: "</span>
                    <span>{card.amount}</span>
                </div>
                <div>
                    <span class="text-muted">"Vendor: "</span>
                    <span>{card.vendor}</span>
                </div>
                <div>
                    <span class="text-muted">"Dept: "</span>
                    <span>{card.department}</span>
                </div>
            </div>

            <div class="predicted">
                <span class="text-muted">"Predicted: "</span>
                <span class="font-mono">{card.gl_code}</span>
                " "
                <span>{card.gl_name}</span>
            </div>

            {(!candidates.is_empty()).then(|| view! {
                <div class="candidates">
                    <span class="text-muted">"Alternatives: "</span>
                    {candidates
                        .iter()
                        .map(|c| view! {
                            <span class="candidate">
                                <span class="font-mono">{c.gl_code.clone()}</span>
                                " "
                                {c.gl_name.clone()}
                                " "
                                <span class="text-muted">{c.score.clone()}</span>
                            </span>
                        })
                        .collect_view()}
                </div>
            })}

            <div class="review-actions">
                <button class="btn btn-success" disabled=move || busy.get() on:click=on_approve>
                    "✓ Approve"
                </button>
                <input
                    type="text"
                    id=format!("gl-{}", id)
                    placeholder="Correct GL code"
                    prop:value=move || gl_code.get()
                    on:input=move |ev| set_gl_code.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    id=format!("reason-{}", id)
                    placeholder="Reason (optional)"
                    prop:value=move || reason.get()
                    on:input=move |ev| set_reason.set(event_target_value(&ev))
                />
                <button class="btn btn-danger" disabled=move || busy.get() on:click=on_reject>
                    "✗ Reject"
                </button>
            </div>
        </div>
    }
}
