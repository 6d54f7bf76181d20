//! APIエンドポイント定義
//!
//! ベースURLの決定とパス/クエリの組み立て。送受信そのものは [`crate::backend::Backend`] 側。

use crate::types::{AuditAction, PredictionStatus};

/// ローカル開発時のAPIベースURL
pub const LOCAL_API_BASE: &str = "http://localhost:8000/api";
/// デプロイ環境のAPIベースURL
pub const REMOTE_API_BASE: &str = "https://autoledger-backend.onrender.com/api";

/// 予測一覧の既定件数
pub const PREDICTION_LIMIT: u32 = 100;
/// レビューキューの既定件数
pub const REVIEW_LIMIT: u32 = 50;
/// 監査ログの既定件数
pub const AUDIT_LIMIT: u32 = 100;

/// ホスト名がループバックか
pub fn is_loopback_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

/// ページのホスト名からAPIベースURLを決める（起動時に一度だけ）
pub fn api_base_for_host(hostname: &str) -> &'static str {
    if is_loopback_host(hostname) {
        LOCAL_API_BASE
    } else {
        REMOTE_API_BASE
    }
}

/// ベースURLとパスを結合（末尾スラッシュは吸収）
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// ヘルスチェックのURL（`/api` プレフィックスの外側）
pub fn health_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    let root = base.strip_suffix("/api").unwrap_or(base);
    format!("{}/health", root)
}

pub const DASHBOARD_STATS: &str = "/dashboard/stats";
pub const ML_STATUS: &str = "/ml/status";
pub const ML_RETRAIN: &str = "/ml/retrain";
pub const TRANSACTIONS: &str = "/transactions";
pub const TRANSACTIONS_UPLOAD: &str = "/transactions/upload";
pub const CHART_OF_ACCOUNTS: &str = "/transactions/coa";
pub const CLASSIFY: &str = "/predictions/classify";

/// 予測一覧（`?status=...&limit=...`）
pub fn predictions(status: Option<PredictionStatus>, limit: u32) -> String {
    match status {
        Some(status) => format!("/predictions?status={}&limit={}", status.as_str(), limit),
        None => format!("/predictions?limit={}", limit),
    }
}

/// レビューキュー
pub fn review_queue(limit: u32) -> String {
    format!("/reviews/queue?limit={}", limit)
}

/// 承認
pub fn approve(prediction_id: i64) -> String {
    format!("/reviews/{}/approve", prediction_id)
}

/// 却下（修正）
pub fn reject(prediction_id: i64) -> String {
    format!("/reviews/{}/reject", prediction_id)
}

/// 監査ログ（`?action=...&limit=...`）
pub fn audit_logs(action: Option<AuditAction>, limit: u32) -> String {
    match action {
        Some(action) => format!("/audit/logs?action={}&limit={}", action.as_str(), limit),
        None => format!("/audit/logs?limit={}", limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_for_loopback_hosts() {
        assert_eq!(api_base_for_host("localhost"), LOCAL_API_BASE);
        assert_eq!(api_base_for_host("127.0.0.1"), LOCAL_API_BASE);
    }

    #[test]
    fn test_api_base_for_other_hosts() {
        assert_eq!(api_base_for_host("autoledger.onrender.com"), REMOTE_API_BASE);
        assert_eq!(api_base_for_host("192.168.1.10"), REMOTE_API_BASE);
        assert_eq!(api_base_for_host(""), REMOTE_API_BASE);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url(LOCAL_API_BASE, DASHBOARD_STATS), "http://localhost:8000/api/dashboard/stats");
        assert_eq!(join_url("http://host/api/", "/ml/status"), "http://host/api/ml/status");
    }

    #[test]
    fn test_health_url_strips_api_prefix() {
        assert_eq!(health_url(LOCAL_API_BASE), "http://localhost:8000/health");
        assert_eq!(health_url("http://host:9000/"), "http://host:9000/health");
    }

    #[test]
    fn test_predictions_path() {
        assert_eq!(predictions(None, 100), "/predictions?limit=100");
        assert_eq!(
            predictions(Some(PredictionStatus::PendingReview), 100),
            "/predictions?status=pending_review&limit=100"
        );
    }

    #[test]
    fn test_review_paths() {
        assert_eq!(review_queue(REVIEW_LIMIT), "/reviews/queue?limit=50");
        assert_eq!(approve(12), "/reviews/12/approve");
        assert_eq!(reject(12), "/reviews/12/reject");
    }

    #[test]
    fn test_audit_logs_path() {
        assert_eq!(audit_logs(None, AUDIT_LIMIT), "/audit/logs?limit=100");
        assert_eq!(
            audit_logs(Some(AuditAction::SentForReview), 20),
            "/audit/logs?action=sent_for_review&limit=20"
        );
    }
}
