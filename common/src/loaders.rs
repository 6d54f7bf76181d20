//! タブごとのデータ読み込み
//!
//! 失敗はそのまま `Err` で返す。通知せずに古い表示を残すかどうかは呼び出し側
//! （[`crate::view::LoadState`]）が決める。

use crate::backend::Backend;
use crate::endpoints;
use crate::error::Result;
use crate::types::{
    AuditAction, AuditLogEntry, ChartOfAccountsEntry, DashboardStats, MlStatus, Prediction,
    PredictionStatus,
};

/// ダッシュボードの読み込み結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    /// ML状態の取得に失敗した場合はNone（ダッシュボード自体は成功扱い）
    pub ml: Option<MlStatus>,
}

/// 集計とML状態を読み込む
pub async fn load_dashboard<B: Backend>(backend: &B) -> Result<DashboardSnapshot> {
    let stats: DashboardStats = backend.get(endpoints::DASHBOARD_STATS).await?;
    let ml = backend.get::<MlStatus>(endpoints::ML_STATUS).await.ok();
    Ok(DashboardSnapshot { stats, ml })
}

pub async fn load_predictions<B: Backend>(
    backend: &B,
    status: Option<PredictionStatus>,
    limit: u32,
) -> Result<Vec<Prediction>> {
    backend.get(&endpoints::predictions(status, limit)).await
}

/// レビュー待ち（pending_review / manual_required）の予測
pub async fn load_review_queue<B: Backend>(backend: &B, limit: u32) -> Result<Vec<Prediction>> {
    backend.get(&endpoints::review_queue(limit)).await
}

pub async fn load_audit_logs<B: Backend>(
    backend: &B,
    action: Option<AuditAction>,
    limit: u32,
) -> Result<Vec<AuditLogEntry>> {
    backend.get(&endpoints::audit_logs(action, limit)).await
}

pub async fn load_chart_of_accounts<B: Backend>(backend: &B) -> Result<Vec<ChartOfAccountsEntry>> {
    backend.get(endpoints::CHART_OF_ACCOUNTS).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{Reply, StubBackend};
    use crate::view::LoadState;
    use futures::executor::block_on;
    use serde_json::json;

    fn stats_json() -> serde_json::Value {
        json!({
            "total_transactions": 10,
            "total_predictions": 8,
            "auto_posted_count": 5,
            "pending_review_count": 2,
            "manual_required_count": 1,
            "approved_count": 0,
            "rejected_count": 0,
            "avg_confidence": 74.1,
            "correction_rate": 0.0,
            "total_erp_postings": 5
        })
    }

    #[test]
    fn test_load_dashboard_with_ml_status() {
        let backend = StubBackend::new()
            .on("GET", "/dashboard/stats", Reply::Json(stats_json()))
            .on("GET", "/ml/status", Reply::Json(json!({"total_vectors": 512, "model": "all-MiniLM-L6-v2"})));

        let snapshot = block_on(load_dashboard(&backend)).expect("読み込み失敗");
        assert_eq!(snapshot.stats.total_predictions, 8);
        assert_eq!(snapshot.ml.map(|m| m.total_vectors), Some(512));
    }

    #[test]
    fn test_load_dashboard_tolerates_ml_failure() {
        let backend = StubBackend::new()
            .on("GET", "/dashboard/stats", Reply::Json(stats_json()))
            .on("GET", "/ml/status", Reply::Status(503, "{}".to_string()));

        let snapshot = block_on(load_dashboard(&backend)).expect("読み込み失敗");
        assert_eq!(snapshot.stats.review_count(), 3);
        assert!(snapshot.ml.is_none());
    }

    #[test]
    fn test_load_dashboard_failure_skips_ml() {
        let backend = StubBackend::new().on("GET", "/dashboard/stats", Reply::Unreachable);

        let result = block_on(load_dashboard(&backend));
        assert!(result.unwrap_err().is_unreachable());
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_load_predictions_with_filter() {
        let backend = StubBackend::new().on(
            "GET",
            "/predictions?status=approved&limit=100",
            Reply::Json(json!([
                {"id": 1, "transaction_id": 10, "predicted_gl_code": "6100", "confidence_score": 91.0, "status": "approved"}
            ])),
        );

        let predictions =
            block_on(load_predictions(&backend, Some(PredictionStatus::Approved), endpoints::PREDICTION_LIMIT))
                .expect("読み込み失敗");
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].confidence_score, 91.0);
    }

    #[test]
    fn test_failed_loader_is_recorded_without_losing_rows() {
        let ok = StubBackend::new().on("GET", "/reviews/queue?limit=50", Reply::Json(json!([
            {"id": 3, "transaction_id": 30, "predicted_gl_code": "6200", "status": "manual_required"}
        ])));
        let down = StubBackend::new().on("GET", "/reviews/queue?limit=50", Reply::Unreachable);

        let mut state = LoadState::default();
        state.apply(block_on(load_review_queue(&ok, endpoints::REVIEW_LIMIT)));
        state.apply(block_on(load_review_queue(&down, endpoints::REVIEW_LIMIT)));

        assert!(state.is_failed());
        assert_eq!(state.data.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_load_audit_logs_and_coa() {
        let backend = StubBackend::new()
            .on(
                "GET",
                "/audit/logs?action=retrained&limit=100",
                Reply::Json(json!([
                    {"id": 8, "action": "retrained", "actor": "system", "timestamp": "2025-03-02T10:00:00"}
                ])),
            )
            .on(
                "GET",
                "/transactions/coa",
                Reply::Json(json!([
                    {"id": 1, "gl_code": "1000", "gl_name": "Cash", "category": "Assets", "sub_category": "Current Assets"}
                ])),
            );

        let logs = block_on(load_audit_logs(&backend, Some(AuditAction::Retrained), endpoints::AUDIT_LIMIT))
            .expect("読み込み失敗");
        assert_eq!(logs[0].transaction_id, None);

        let coa = block_on(load_chart_of_accounts(&backend)).expect("読み込み失敗");
        assert_eq!(coa[0].sub_category.as_deref(), Some("Current Assets"));
    }

    #[test]
    fn test_health_is_outside_api_prefix() {
        let backend = StubBackend::new().on("GET", "http://stub/health", Reply::Json(json!({"status": "healthy"})));

        let health = block_on(backend.health()).expect("ヘルスチェック失敗");
        assert_eq!(health.status, "healthy");
    }
}
