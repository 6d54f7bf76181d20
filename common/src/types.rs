//! バックエンドAPIの型定義
//!
//! CLIとWeb(WASM)で共有されるビューモデル。
//! すべてレスポンスから都度デシリアライズされ、クライアント側では保持しない。
//! - DashboardStats / MlStatus: ダッシュボード
//! - Prediction / Transaction: 分類結果とレビューキュー
//! - AuditLogEntry / ChartOfAccountsEntry: 監査ログと勘定科目表

use serde::{Deserialize, Serialize};

/// 予測ステータス（閉じた列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    AutoPosted,
    PendingReview,
    ManualRequired,
    Approved,
    Rejected,
}

impl PredictionStatus {
    pub const ALL: [PredictionStatus; 5] = [
        PredictionStatus::AutoPosted,
        PredictionStatus::PendingReview,
        PredictionStatus::ManualRequired,
        PredictionStatus::Approved,
        PredictionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::AutoPosted => "auto_posted",
            PredictionStatus::PendingReview => "pending_review",
            PredictionStatus::ManualRequired => "manual_required",
            PredictionStatus::Approved => "approved",
            PredictionStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// レビュー待ち（承認/却下の対象）か
    pub fn is_reviewable(&self) -> bool {
        matches!(self, PredictionStatus::PendingReview | PredictionStatus::ManualRequired)
    }
}

impl std::str::FromStr for PredictionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.to_lowercase().replace('-', "_")).ok_or_else(|| {
            format!(
                "Unknown status: {}. Use auto_posted, pending_review, manual_required, approved, or rejected",
                s
            )
        })
    }
}

impl std::fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 監査ログのアクション（閉じた列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Uploaded,
    Predicted,
    AutoPosted,
    SentForReview,
    Approved,
    Rejected,
    Corrected,
    Retrained,
}

impl AuditAction {
    pub const ALL: [AuditAction; 8] = [
        AuditAction::Uploaded,
        AuditAction::Predicted,
        AuditAction::AutoPosted,
        AuditAction::SentForReview,
        AuditAction::Approved,
        AuditAction::Rejected,
        AuditAction::Corrected,
        AuditAction::Retrained,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Uploaded => "uploaded",
            AuditAction::Predicted => "predicted",
            AuditAction::AutoPosted => "auto_posted",
            AuditAction::SentForReview => "sent_for_review",
            AuditAction::Approved => "approved",
            AuditAction::Rejected => "rejected",
            AuditAction::Corrected => "corrected",
            AuditAction::Retrained => "retrained",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.to_lowercase().replace('-', "_"))
            .ok_or_else(|| format!("Unknown audit action: {}", s))
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 勘定科目のカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountCategory {
    Assets,
    Liabilities,
    Equity,
    Revenue,
    Expenses,
}

impl AccountCategory {
    pub const ALL: [AccountCategory; 5] = [
        AccountCategory::Assets,
        AccountCategory::Liabilities,
        AccountCategory::Equity,
        AccountCategory::Revenue,
        AccountCategory::Expenses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountCategory::Assets => "Assets",
            AccountCategory::Liabilities => "Liabilities",
            AccountCategory::Equity => "Equity",
            AccountCategory::Revenue => "Revenue",
            AccountCategory::Expenses => "Expenses",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// ダッシュボード集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_transactions: u64,
    pub total_predictions: u64,
    pub auto_posted_count: u64,
    pub pending_review_count: u64,
    pub manual_required_count: u64,
    pub approved_count: u64,
    pub rejected_count: u64,
    pub avg_confidence: f64,
    pub correction_rate: f64,
    pub total_erp_postings: u64,
}

impl DashboardStats {
    /// レビューバッジに出す件数（レビュー待ち + 手動分類）
    pub fn review_count(&self) -> u64 {
        self.pending_review_count + self.manual_required_count
    }
}

/// ベクトルストアの状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MlStatus {
    #[serde(default)]
    pub total_vectors: u64,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub embedding_dimension: Option<u32>,
}

/// 取引
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// クイック入力で作成する取引
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub description: String,
    pub amount: f64,
}

/// 候補GLコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateGl {
    pub gl_code: String,
    #[serde(default)]
    pub gl_name: String,
    #[serde(default)]
    pub score: f64,
}

/// 分類結果（予測）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: i64,
    pub transaction_id: i64,
    pub predicted_gl_code: String,
    #[serde(default)]
    pub predicted_gl_name: Option<String>,
    #[serde(default)]
    pub confidence_score: f64,
    /// 未知の値も受け付けるため文字列のまま保持する
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub routed_action: Option<String>,
    #[serde(default)]
    pub top_candidates: Option<Vec<CandidateGl>>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub transaction: Option<Transaction>,
}

impl Prediction {
    pub fn status_kind(&self) -> Option<PredictionStatus> {
        PredictionStatus::parse(&self.status)
    }

    pub fn candidates(&self) -> &[CandidateGl] {
        self.top_candidates.as_deref().unwrap_or(&[])
    }
}

/// 監査ログ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    #[serde(default)]
    pub transaction_id: Option<i64>,
    pub action: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

/// 勘定科目表の1行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOfAccountsEntry {
    #[serde(default)]
    pub id: i64,
    pub gl_code: String,
    pub gl_name: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
}

/// アップロード結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub batch_id: String,
    pub total_transactions: u64,
    #[serde(default)]
    pub message: String,
}

/// 分類リクエスト（両方Noneなら未分類すべてが対象）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
}

/// 分類結果の集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub total_classified: u64,
    pub auto_posted: u64,
    pub pending_review: u64,
    pub manual_required: u64,
}

/// 却下（修正）リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAction {
    pub corrected_gl_code: String,
    pub reason: Option<String>,
    pub corrected_by: String,
}

/// ERP転記結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErpResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub erp_response_code: String,
    #[serde(default)]
    pub erp_response_message: String,
    #[serde(default)]
    pub posting_id: Option<i64>,
}

/// 承認/却下のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub correction_id: Option<i64>,
    #[serde(default)]
    pub erp_result: Option<ErpResult>,
}

/// 再学習結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrainResponse {
    pub message: String,
    #[serde(default)]
    pub corrections_used: u64,
    #[serde(default)]
    pub new_vectors_added: u64,
}

/// ヘルスチェック
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_status_parse() {
        assert_eq!(PredictionStatus::parse("pending_review"), Some(PredictionStatus::PendingReview));
        assert_eq!(PredictionStatus::parse("auto_posted"), Some(PredictionStatus::AutoPosted));
        assert_eq!(PredictionStatus::parse("posted"), None);
        assert_eq!(PredictionStatus::parse(""), None);
    }

    #[test]
    fn test_prediction_status_from_str_accepts_dashes() {
        let status: PredictionStatus = "Manual-Required".parse().expect("パース失敗");
        assert_eq!(status, PredictionStatus::ManualRequired);
        assert!("bogus".parse::<PredictionStatus>().is_err());
    }

    #[test]
    fn test_reviewable_statuses() {
        let reviewable: Vec<_> = PredictionStatus::ALL
            .into_iter()
            .filter(|s| s.is_reviewable())
            .collect();
        assert_eq!(
            reviewable,
            vec![PredictionStatus::PendingReview, PredictionStatus::ManualRequired]
        );
    }

    #[test]
    fn test_audit_action_parse() {
        assert_eq!(AuditAction::parse("sent_for_review"), Some(AuditAction::SentForReview));
        assert_eq!(AuditAction::parse("deleted"), None);
        assert_eq!(AuditAction::Retrained.to_string(), "retrained");
    }

    #[test]
    fn test_account_category_parse() {
        assert_eq!(AccountCategory::parse("Expenses"), Some(AccountCategory::Expenses));
        // カテゴリは大文字始まりで送られてくる
        assert_eq!(AccountCategory::parse("expenses"), None);
    }

    #[test]
    fn test_dashboard_stats_deserialize() {
        let json = r#"{
            "total_transactions": 120,
            "total_predictions": 100,
            "auto_posted_count": 60,
            "pending_review_count": 25,
            "manual_required_count": 10,
            "approved_count": 3,
            "rejected_count": 2,
            "avg_confidence": 78.4,
            "correction_rate": 2.0,
            "total_erp_postings": 65
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(stats.total_transactions, 120);
        assert_eq!(stats.review_count(), 35);
        assert_eq!(stats.avg_confidence, 78.4);
    }

    #[test]
    fn test_dashboard_stats_missing_fields_default_to_zero() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"total_transactions": 4}"#).expect("デシリアライズ失敗");
        assert_eq!(stats.total_transactions, 4);
        assert_eq!(stats.rejected_count, 0);
        assert_eq!(stats.review_count(), 0);
    }

    #[test]
    fn test_prediction_deserialize_with_transaction() {
        let json = r#"{
            "id": 7,
            "transaction_id": 42,
            "predicted_gl_code": "6100",
            "predicted_gl_name": "Office Supplies",
            "confidence_score": 64.25,
            "status": "pending_review",
            "routed_action": "human_review",
            "top_candidates": [
                {"gl_code": "6100", "gl_name": "Office Supplies", "score": 64.25},
                {"gl_code": "6200", "gl_name": "Software", "score": 20.0}
            ],
            "created_at": "2025-03-01T09:15:00.123456",
            "transaction": {
                "id": 42,
                "description": "Staples order",
                "amount": 129.99,
                "vendor": "Staples",
                "department": null,
                "created_at": "2025-03-01T09:14:59"
            }
        }"#;

        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(prediction.status_kind(), Some(PredictionStatus::PendingReview));
        assert_eq!(prediction.candidates().len(), 2);
        let txn = prediction.transaction.as_ref().expect("取引がない");
        assert_eq!(txn.vendor.as_deref(), Some("Staples"));
        assert_eq!(txn.department, None);
    }

    #[test]
    fn test_prediction_unknown_status_is_kept() {
        let json = r#"{"id": 1, "transaction_id": 2, "predicted_gl_code": "0000", "status": "archived"}"#;
        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(prediction.status, "archived");
        assert_eq!(prediction.status_kind(), None);
        assert!(prediction.candidates().is_empty());
    }

    #[test]
    fn test_classify_request_omits_empty_scope() {
        let json = serde_json::to_string(&ClassifyRequest::default()).expect("シリアライズ失敗");
        assert_eq!(json, "{}");

        let batch = ClassifyRequest {
            batch_id: Some("BATCH-1A2B3C4D".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&batch).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"batch_id":"BATCH-1A2B3C4D"}"#);
    }

    #[test]
    fn test_review_action_serializes_null_reason() {
        let action = ReviewAction {
            corrected_gl_code: "6200".to_string(),
            reason: None,
            corrected_by: "analyst".to_string(),
        };
        let value = serde_json::to_value(&action).expect("シリアライズ失敗");
        assert_eq!(value["reason"], serde_json::Value::Null);
        assert_eq!(value["corrected_by"], "analyst");
    }
}
