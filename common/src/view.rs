//! 画面表示用のモデル
//!
//! APIレスポンスを表示行に変換する（Web/CLI共通）。
//! 描画そのものはWeb側のLeptosコンポーネントとCLI側のテーブル出力が担当する。

use crate::error::{Error, UNREACHABLE_MESSAGE};
use crate::format::{
    action_badge, category_badge, confidence_bar_width, format_avg_confidence, format_count,
    format_currency, format_status, format_timestamp, or_placeholder, percentage, status_badge,
    ConfidenceLevel, PLACEHOLDER,
};
use crate::types::{
    AuditLogEntry, ChartOfAccountsEntry, ClassifyResponse, DashboardStats, MlStatus, Prediction,
};

/// トースト表示時間（ミリ秒）
pub const TOAST_DURATION_MS: u32 = 4000;
/// トーストの退場アニメーション（ミリ秒）
pub const TOAST_EXIT_MS: u32 = 300;
/// アップロード完了から結果表示までの待ち（ミリ秒）
pub const UPLOAD_RESULT_DELAY_MS: u32 = 500;

/// タブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    Upload,
    Results,
    Review,
    Audit,
    Coa,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Upload,
        Tab::Results,
        Tab::Review,
        Tab::Audit,
        Tab::Coa,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Upload => "upload",
            Tab::Results => "results",
            Tab::Review => "review",
            Tab::Audit => "audit",
            Tab::Coa => "coa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Upload => "Upload",
            Tab::Results => "Results",
            Tab::Review => "Review Queue",
            Tab::Audit => "Audit Log",
            Tab::Coa => "Chart of Accounts",
        }
    }

    /// 切り替え時にデータ読み込みを走らせるか（Uploadだけ読み込みなし）
    pub fn loads_data(&self) -> bool {
        !matches!(self, Tab::Upload)
    }
}

/// トーストの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-emerald-500/90 text-white",
            ToastKind::Error => "bg-red-500/90 text-white",
            ToastKind::Info => "bg-brand-500/90 text-white",
            ToastKind::Warning => "bg-amber-500/90 text-white",
        }
    }
}

/// ユーザーへの通知
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }
}

/// ユーザー操作（失敗時はトーストで通知して中断する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Upload,
    ClassifyAll,
    QuickEntry,
    Approve,
    Reject,
    Retrain,
}

impl UserAction {
    /// 失敗時の通知
    ///
    /// 到達不可は操作に関わらず専用メッセージ、クライアント側チェックは警告。
    pub fn failure_notice(&self, err: &Error) -> Notice {
        match err {
            Error::Unreachable => Notice::error(UNREACHABLE_MESSAGE),
            Error::Validation(msg) => Notice::warning(msg.clone()),
            _ => {
                let message = match self {
                    UserAction::Upload => format!("Upload failed: {}", err),
                    UserAction::ClassifyAll => "Classification failed".to_string(),
                    UserAction::QuickEntry => format!("Failed to classify: {}", err),
                    UserAction::Approve => format!("Approval failed: {}", err),
                    UserAction::Reject => format!("Rejection failed: {}", err),
                    UserAction::Retrain => "Retraining failed".to_string(),
                };
                Notice::error(message)
            }
        }
    }
}

/// 受動的な読み込みの状態
///
/// 失敗しても直前のデータは残し、エラーだけを記録する（トーストは出さない）。
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState<T> {
    pub data: Option<T>,
    pub last_error: Option<String>,
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self { data: None, last_error: None }
    }
}

impl<T> LoadState<T> {
    pub fn apply(&mut self, result: crate::Result<T>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.last_error.is_some()
    }
}

// =============================================
// ダッシュボード
// =============================================

/// KPIカード
#[derive(Debug, Clone, PartialEq)]
pub struct KpiView {
    pub total_transactions: String,
    pub auto_posted: String,
    pub pending_review: String,
    pub manual_required: String,
    pub avg_confidence: String,
    pub erp_postings: String,
    pub corrections: String,
    pub correction_rate: String,
    /// レビュー件数バッジ（0件ならNone＝非表示）
    pub review_badge: Option<u64>,
}

impl KpiView {
    pub fn from_stats(stats: &DashboardStats) -> Self {
        let review_count = stats.review_count();
        Self {
            total_transactions: format_count(stats.total_transactions),
            auto_posted: format_count(stats.auto_posted_count),
            pending_review: format_count(stats.pending_review_count),
            manual_required: format_count(stats.manual_required_count),
            avg_confidence: format_avg_confidence(stats.avg_confidence),
            erp_postings: format_count(stats.total_erp_postings),
            corrections: format_count(stats.rejected_count),
            correction_rate: format!("{}%", stats.correction_rate),
            review_badge: (review_count > 0).then_some(review_count),
        }
    }
}

/// 分類内訳の1行
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub count: u64,
    pub color: &'static str,
    pub pct: String,
}

/// 分類内訳（予測0件なら空）
pub fn breakdown(stats: &DashboardStats) -> Vec<BreakdownRow> {
    let total = stats.total_predictions;
    if total == 0 {
        return Vec::new();
    }

    [
        ("Auto-Posted", stats.auto_posted_count, "bg-emerald-400"),
        ("Pending Review", stats.pending_review_count, "bg-amber-400"),
        ("Manual Required", stats.manual_required_count, "bg-red-400"),
        ("Approved", stats.approved_count, "bg-blue-400"),
        ("Rejected", stats.rejected_count, "bg-purple-400"),
    ]
    .into_iter()
    .map(|(label, count, color)| BreakdownRow {
        label,
        count,
        color,
        pct: percentage(count, total).unwrap_or_default(),
    })
    .collect()
}

/// ML状態の表示（`Vectors: 1234`）
pub fn ml_status_text(ml: &MlStatus) -> String {
    format!("Vectors: {}", ml.total_vectors)
}

// =============================================
// 分類結果
// =============================================

/// 信頼度の表示
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceView {
    pub text: String,
    pub level: ConfidenceLevel,
    pub bar_width: f64,
}

impl ConfidenceView {
    pub fn new(score: f64) -> Self {
        Self {
            text: format!("{}%", score),
            level: ConfidenceLevel::from_score(score),
            bar_width: confidence_bar_width(score),
        }
    }
}

/// 予測テーブルの1行
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub id: i64,
    pub transaction_ref: String,
    pub description: String,
    pub amount: String,
    pub gl_code: String,
    pub gl_name: String,
    pub confidence: ConfidenceView,
    pub badge: &'static str,
    pub status_text: String,
}

impl PredictionRow {
    pub fn from_prediction(p: &Prediction) -> Self {
        let txn = p.transaction.as_ref();
        Self {
            id: p.id,
            transaction_ref: format!("#{}", p.transaction_id),
            description: or_placeholder(txn.map(|t| t.description.as_str())),
            amount: format_currency(txn.map(|t| t.amount)),
            gl_code: p.predicted_gl_code.clone(),
            gl_name: p.predicted_gl_name.clone().unwrap_or_default(),
            confidence: ConfidenceView::new(p.confidence_score),
            badge: status_badge(&p.status),
            status_text: format_status(&p.status),
        }
    }
}

/// 候補GLコードの表示
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateView {
    pub gl_code: String,
    pub gl_name: String,
    pub score: String,
}

/// レビューカード
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCardView {
    pub prediction_id: i64,
    pub badge: &'static str,
    pub status_text: String,
    pub transaction_ref: String,
    pub description: String,
    pub amount: String,
    pub vendor: String,
    pub department: String,
    pub gl_code: String,
    pub gl_name: String,
    pub confidence: ConfidenceView,
    pub candidates: Vec<CandidateView>,
}

impl ReviewCardView {
    pub fn from_prediction(p: &Prediction) -> Self {
        let txn = p.transaction.as_ref();
        Self {
            prediction_id: p.id,
            badge: status_badge(&p.status),
            status_text: format_status(&p.status),
            transaction_ref: format!("TXN #{}", p.transaction_id),
            description: or_placeholder(txn.map(|t| t.description.as_str())),
            amount: format_currency(txn.map(|t| t.amount)),
            vendor: or_placeholder(txn.and_then(|t| t.vendor.as_deref())),
            department: or_placeholder(txn.and_then(|t| t.department.as_deref())),
            gl_code: p.predicted_gl_code.clone(),
            gl_name: p.predicted_gl_name.clone().unwrap_or_default(),
            confidence: ConfidenceView::new(p.confidence_score),
            candidates: p
                .candidates()
                .iter()
                .map(|c| CandidateView {
                    gl_code: c.gl_code.clone(),
                    gl_name: c.gl_name.clone(),
                    score: format!("({}%)", c.score),
                })
                .collect(),
        }
    }
}

/// 一括分類結果の表示行（レスポンスの値をそのまま使う）
pub fn classify_summary(resp: &ClassifyResponse) -> [(&'static str, u64); 4] {
    [
        ("Total Classified", resp.total_classified),
        ("✓ Auto-Posted", resp.auto_posted),
        ("⏳ Pending Review", resp.pending_review),
        ("✋ Manual Required", resp.manual_required),
    ]
}

// =============================================
// 監査ログ・勘定科目
// =============================================

/// 監査ログの1行
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRow {
    pub id: i64,
    pub timestamp: String,
    pub badge: &'static str,
    pub action_text: String,
    pub actor: String,
    pub transaction_ref: String,
    pub details: String,
}

impl AuditRow {
    pub fn from_entry(entry: &AuditLogEntry) -> Self {
        Self {
            id: entry.id,
            timestamp: format_timestamp(&entry.timestamp),
            badge: action_badge(&entry.action),
            action_text: format_status(&entry.action),
            actor: entry.actor.clone(),
            transaction_ref: entry
                .transaction_id
                .map(|id| format!("#{}", id))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            details: or_placeholder(entry.details.as_deref()),
        }
    }
}

/// 勘定科目表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct CoaRow {
    pub gl_code: String,
    pub gl_name: String,
    pub category: String,
    pub badge: &'static str,
    pub sub_category: String,
}

impl CoaRow {
    pub fn from_entry(entry: &ChartOfAccountsEntry) -> Self {
        Self {
            gl_code: entry.gl_code.clone(),
            gl_name: entry.gl_name.clone(),
            category: entry.category.clone(),
            badge: category_badge(&entry.category),
            sub_category: or_placeholder(entry.sub_category.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateGl, Transaction};

    fn sample_stats() -> DashboardStats {
        DashboardStats {
            total_transactions: 1500,
            total_predictions: 200,
            auto_posted_count: 120,
            pending_review_count: 40,
            manual_required_count: 20,
            approved_count: 15,
            rejected_count: 5,
            avg_confidence: 81.25,
            correction_rate: 2.5,
            total_erp_postings: 1350,
        }
    }

    fn sample_prediction() -> Prediction {
        Prediction {
            id: 9,
            transaction_id: 42,
            predicted_gl_code: "6100".to_string(),
            predicted_gl_name: Some("Office Supplies".to_string()),
            confidence_score: 64.25,
            status: "pending_review".to_string(),
            top_candidates: Some(vec![CandidateGl {
                gl_code: "6200".to_string(),
                gl_name: "Software".to_string(),
                score: 20.5,
            }]),
            transaction: Some(Transaction {
                id: 42,
                description: "Staples order".to_string(),
                amount: 1299.9,
                vendor: Some("Staples".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_tab_loaders() {
        let loading: Vec<_> = Tab::ALL.iter().filter(|t| t.loads_data()).map(|t| t.id()).collect();
        assert_eq!(loading, vec!["dashboard", "results", "review", "audit", "coa"]);
    }

    #[test]
    fn test_failure_notice_unreachable() {
        let notice = UserAction::Upload.failure_notice(&Error::Unreachable);
        assert_eq!(notice.kind, ToastKind::Error);
        assert_eq!(notice.message, UNREACHABLE_MESSAGE);
    }

    #[test]
    fn test_failure_notice_per_action() {
        let err = Error::Http { status: 400, message: "Only CSV and Excel files are supported".to_string() };
        assert_eq!(
            UserAction::Upload.failure_notice(&err).message,
            "Upload failed: Only CSV and Excel files are supported"
        );
        assert_eq!(UserAction::ClassifyAll.failure_notice(&err).message, "Classification failed");
        assert_eq!(UserAction::Retrain.failure_notice(&err).message, "Retraining failed");
        assert!(UserAction::Approve.failure_notice(&err).message.starts_with("Approval failed: "));
    }

    #[test]
    fn test_failure_notice_validation_is_warning() {
        let err = Error::Validation("Please enter the corrected GL code".to_string());
        let notice = UserAction::Reject.failure_notice(&err);
        assert_eq!(notice.kind, ToastKind::Warning);
        assert_eq!(notice.message, "Please enter the corrected GL code");
    }

    #[test]
    fn test_load_state_keeps_stale_data_on_failure() {
        let mut state = LoadState::default();
        state.apply(Ok(vec![1, 2, 3]));
        assert!(!state.is_failed());

        state.apply(Err(Error::Unreachable));
        assert!(state.is_failed());
        assert_eq!(state.data, Some(vec![1, 2, 3]));

        state.apply(Ok(vec![4]));
        assert!(!state.is_failed());
        assert_eq!(state.data, Some(vec![4]));
    }

    #[test]
    fn test_kpi_view() {
        let kpi = KpiView::from_stats(&sample_stats());
        assert_eq!(kpi.total_transactions, "1,500");
        assert_eq!(kpi.avg_confidence, "81.25%");
        assert_eq!(kpi.erp_postings, "1,350");
        assert_eq!(kpi.corrections, "5");
        assert_eq!(kpi.correction_rate, "2.5%");
        assert_eq!(kpi.review_badge, Some(60));
    }

    #[test]
    fn test_kpi_view_hides_empty_review_badge() {
        let kpi = KpiView::from_stats(&DashboardStats::default());
        assert_eq!(kpi.review_badge, None);
        assert_eq!(kpi.avg_confidence, "–");
        assert_eq!(kpi.correction_rate, "0%");
    }

    #[test]
    fn test_breakdown() {
        let rows = breakdown(&sample_stats());
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].label, "Auto-Posted");
        assert_eq!(rows[0].pct, "60.0");
        assert_eq!(rows[4].label, "Rejected");
        assert_eq!(rows[4].pct, "2.5");
    }

    #[test]
    fn test_breakdown_skipped_without_predictions() {
        let stats = DashboardStats { total_transactions: 10, ..Default::default() };
        assert!(breakdown(&stats).is_empty());
    }

    #[test]
    fn test_prediction_row() {
        let row = PredictionRow::from_prediction(&sample_prediction());
        assert_eq!(row.transaction_ref, "#42");
        assert_eq!(row.amount, "$1,299.90");
        assert_eq!(row.confidence.text, "64.25%");
        assert_eq!(row.confidence.level, ConfidenceLevel::Medium);
        assert_eq!(row.badge, "badge-review");
        assert_eq!(row.status_text, "Pending Review");
    }

    #[test]
    fn test_prediction_row_without_transaction() {
        let p = Prediction { transaction: None, ..sample_prediction() };
        let row = PredictionRow::from_prediction(&p);
        assert_eq!(row.description, "–");
        assert_eq!(row.amount, "$0.00");
    }

    #[test]
    fn test_review_card_view() {
        let card = ReviewCardView::from_prediction(&sample_prediction());
        assert_eq!(card.transaction_ref, "TXN #42");
        assert_eq!(card.vendor, "Staples");
        assert_eq!(card.department, "–");
        assert_eq!(card.candidates.len(), 1);
        assert_eq!(card.candidates[0].score, "(20.5%)");
    }

    #[test]
    fn test_classify_summary_uses_response_as_is() {
        let resp = ClassifyResponse {
            total_classified: 10,
            auto_posted: 6,
            pending_review: 3,
            manual_required: 1,
        };
        let values: Vec<u64> = classify_summary(&resp).iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![10, 6, 3, 1]);
    }

    #[test]
    fn test_audit_row() {
        let entry = AuditLogEntry {
            id: 3,
            transaction_id: None,
            action: "sent_for_review".to_string(),
            actor: "system".to_string(),
            details: None,
            timestamp: "2025-03-01T09:15:00.5".to_string(),
        };
        let row = AuditRow::from_entry(&entry);
        assert_eq!(row.timestamp, "2025-03-01 09:15:00");
        assert_eq!(row.badge, "badge-review");
        assert_eq!(row.action_text, "Sent For Review");
        assert_eq!(row.transaction_ref, "–");
        assert_eq!(row.details, "–");
    }

    #[test]
    fn test_coa_row() {
        let entry = ChartOfAccountsEntry {
            id: 1,
            gl_code: "6100".to_string(),
            gl_name: "Office Supplies".to_string(),
            category: "Expenses".to_string(),
            sub_category: None,
        };
        let row = CoaRow::from_entry(&entry);
        assert_eq!(row.badge, "badge-manual");
        assert_eq!(row.sub_category, "–");
    }
}
