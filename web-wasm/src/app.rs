//! メインアプリケーションコンポーネント

use autoledger_common::loaders::{self, DashboardSnapshot};
use autoledger_common::endpoints::{AUDIT_LIMIT, PREDICTION_LIMIT, REVIEW_LIMIT};
use autoledger_common::view::{TOAST_DURATION_MS, TOAST_EXIT_MS};
use autoledger_common::{
    AuditAction, AuditLogEntry, BatchContext, ChartOfAccountsEntry, LoadState, Notice, Prediction,
    PredictionStatus, Tab,
};
use gloo::console;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::FetchBackend;
use crate::components::{
    audit_log::AuditLog, coa_table::CoaTable, dashboard::Dashboard, header::Header,
    predictions_table::PredictionsTable, quick_entry::QuickEntry, review_queue::ReviewQueue,
    toasts::ToastContainer, upload_area::UploadArea,
};

/// 表示中のトースト
#[derive(Clone, Debug, PartialEq)]
pub struct ToastItem {
    pub id: u64,
    pub notice: Notice,
    pub exiting: bool,
}

/// アプリケーションの状態
///
/// すべてシグナルなので `Copy`。コンテキスト経由で各コンポーネントに配る。
#[derive(Clone, Copy)]
pub struct AppState {
    pub backend: StoredValue<FetchBackend>,
    pub active_tab: RwSignal<Tab>,
    pub toasts: RwSignal<Vec<ToastItem>>,
    next_toast_id: StoredValue<u64>,
    /// 直近アップロードのバッチ（アップロード成功時のみ更新）
    pub batch: RwSignal<BatchContext>,
    pub dashboard: RwSignal<LoadState<DashboardSnapshot>>,
    pub predictions: RwSignal<LoadState<Vec<Prediction>>>,
    pub status_filter: RwSignal<Option<PredictionStatus>>,
    pub review: RwSignal<LoadState<Vec<Prediction>>>,
    pub audit: RwSignal<LoadState<Vec<AuditLogEntry>>>,
    pub audit_filter: RwSignal<Option<AuditAction>>,
    pub coa: RwSignal<LoadState<Vec<ChartOfAccountsEntry>>>,
}

impl AppState {
    pub fn new(backend: FetchBackend) -> Self {
        Self {
            backend: StoredValue::new(backend),
            active_tab: RwSignal::new(Tab::Dashboard),
            toasts: RwSignal::new(Vec::new()),
            next_toast_id: StoredValue::new(0),
            batch: RwSignal::new(BatchContext::new()),
            dashboard: RwSignal::new(LoadState::default()),
            predictions: RwSignal::new(LoadState::default()),
            status_filter: RwSignal::new(None),
            review: RwSignal::new(LoadState::default()),
            audit: RwSignal::new(LoadState::default()),
            audit_filter: RwSignal::new(None),
            coa: RwSignal::new(LoadState::default()),
        }
    }

    pub fn backend(&self) -> FetchBackend {
        self.backend.get_value()
    }

    /// タブを切り替えて、そのタブのデータを読み込む
    pub fn switch_tab(&self, tab: Tab) {
        self.active_tab.set(tab);
        self.load_tab(tab);
    }

    pub fn load_tab(&self, tab: Tab) {
        match tab {
            Tab::Dashboard => self.load_dashboard(),
            Tab::Results => self.load_predictions(),
            Tab::Review => self.load_review_queue(),
            Tab::Audit => self.load_audit_logs(),
            Tab::Coa => self.load_chart_of_accounts(),
            Tab::Upload => {}
        }
    }

    pub fn load_dashboard(&self) {
        let backend = self.backend();
        let target = self.dashboard;
        spawn_local(async move {
            let result = loaders::load_dashboard(&backend).await;
            record(target, "dashboard", result);
        });
    }

    pub fn load_predictions(&self) {
        let backend = self.backend();
        let target = self.predictions;
        let status = self.status_filter.get_untracked();
        spawn_local(async move {
            let result = loaders::load_predictions(&backend, status, PREDICTION_LIMIT).await;
            record(target, "predictions", result);
        });
    }

    pub fn load_review_queue(&self) {
        let backend = self.backend();
        let target = self.review;
        spawn_local(async move {
            let result = loaders::load_review_queue(&backend, REVIEW_LIMIT).await;
            record(target, "review queue", result);
        });
    }

    pub fn load_audit_logs(&self) {
        let backend = self.backend();
        let target = self.audit;
        let action = self.audit_filter.get_untracked();
        spawn_local(async move {
            let result = loaders::load_audit_logs(&backend, action, AUDIT_LIMIT).await;
            record(target, "audit logs", result);
        });
    }

    pub fn load_chart_of_accounts(&self) {
        let backend = self.backend();
        let target = self.coa;
        spawn_local(async move {
            let result = loaders::load_chart_of_accounts(&backend).await;
            record(target, "chart of accounts", result);
        });
    }

    /// 承認/却下済みのカードをキューから外す
    pub fn remove_review_card(&self, prediction_id: i64) {
        self.review.update(|state| {
            if let Some(items) = state.data.as_mut() {
                items.retain(|p| p.id != prediction_id);
            }
        });
    }

    /// トーストを表示（4秒後に退場、さらに300ms後に削除）
    pub fn notify(&self, notice: Notice) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);
        self.toasts.update(|t| t.push(ToastItem { id, notice, exiting: false }));

        let toasts = self.toasts;
        Timeout::new(TOAST_DURATION_MS, move || {
            toasts.update(|t| {
                if let Some(item) = t.iter_mut().find(|item| item.id == id) {
                    item.exiting = true;
                }
            });
            Timeout::new(TOAST_EXIT_MS, move || {
                toasts.update(|t| t.retain(|item| item.id != id));
            })
            .forget();
        })
        .forget();
    }
}

/// 受動的な読み込み結果を記録（失敗は通知せずコンソールにだけ残す）
fn record<T: Send + Sync + 'static>(
    target: RwSignal<LoadState<T>>,
    label: &str,
    result: autoledger_common::Result<T>,
) {
    if let Err(e) = &result {
        console::warn!(format!("failed to load {}: {}", label, e));
    }
    target.update(|state| state.apply(result));
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(FetchBackend::from_location());
    provide_context(state);

    // 初期表示はダッシュボード
    state.load_dashboard();

    let tab_class = move |tab: Tab| {
        move || {
            if state.active_tab.get() == tab {
                "tab-content"
            } else {
                "tab-content hidden"
            }
        }
    };

    view! {
        <div class="container">
            <Header />

            <main>
                <section id="tab-dashboard" class=tab_class(Tab::Dashboard)>
                    <Dashboard />
                </section>
                <section id="tab-upload" class=tab_class(Tab::Upload)>
                    <UploadArea />
                    <QuickEntry />
                </section>
                <section id="tab-results" class=tab_class(Tab::Results)>
                    <PredictionsTable />
                </section>
                <section id="tab-review" class=tab_class(Tab::Review)>
                    <ReviewQueue />
                </section>
                <section id="tab-audit" class=tab_class(Tab::Audit)>
                    <AuditLog />
                </section>
                <section id="tab-coa" class=tab_class(Tab::Coa)>
                    <CoaTable />
                </section>
            </main>

            <ToastContainer />
        </div>
    }
}

/// コンテキストからアプリ状態を取得
pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
