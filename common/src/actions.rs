//! ユーザー操作（アップロード・分類・クイック入力・承認・却下・再学習）
//!
//! 各操作は1往復（クイック入力のみ2往復）で、リトライはしない。
//! 直近のバッチIDは [`BatchContext`] として呼び出し側が明示的に保持する。

use crate::amount::extract_amount;
use crate::backend::Backend;
use crate::endpoints;
use crate::error::{Error, Result};
use crate::types::{
    ClassifyRequest, ClassifyResponse, RetrainResponse, ReviewAction, ReviewResult, Transaction,
    TransactionCreate, UploadResponse,
};

/// 却下時に送る固定の担当者ラベル
pub const ANALYST: &str = "analyst";

/// 修正GLコード未入力時の警告
pub const MISSING_GL_CODE: &str = "Please enter the corrected GL code";

/// 直近のアップロードで得たバッチID
///
/// アップロード成功時にだけ更新する。失敗しても前の値は変わらない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchContext {
    batch_id: Option<String>,
}

impl BatchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_id(&self) -> Option<&str> {
        self.batch_id.as_deref()
    }

    pub fn record_upload(&mut self, upload: &UploadResponse) {
        self.batch_id = Some(upload.batch_id.clone());
    }

    /// 一括分類の対象（バッチがあればそのバッチ、なければ未分類すべて）
    pub fn scope(&self) -> ClassifyScope {
        match &self.batch_id {
            Some(id) => ClassifyScope::Batch(id.clone()),
            None => ClassifyScope::Unscoped,
        }
    }
}

/// 分類の対象範囲
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyScope {
    /// 未分類すべて
    Unscoped,
    Batch(String),
    Transactions(Vec<i64>),
}

impl ClassifyScope {
    pub fn request(&self) -> ClassifyRequest {
        match self {
            ClassifyScope::Unscoped => ClassifyRequest::default(),
            ClassifyScope::Batch(id) => ClassifyRequest {
                batch_id: Some(id.clone()),
                ..Default::default()
            },
            ClassifyScope::Transactions(ids) => ClassifyRequest {
                transaction_ids: Some(ids.clone()),
                ..Default::default()
            },
        }
    }
}

/// ファイルをアップロード
///
/// 成功時の [`UploadResponse`] を `BatchContext::record_upload` に渡すのは呼び出し側。
pub async fn upload_file<B: Backend>(backend: &B, file: B::Upload) -> Result<UploadResponse> {
    backend.upload(endpoints::TRANSACTIONS_UPLOAD, file).await
}

/// 分類を実行
pub async fn classify<B: Backend>(backend: &B, scope: &ClassifyScope) -> Result<ClassifyResponse> {
    let body = serde_json::to_value(scope.request())?;
    backend.post(endpoints::CLASSIFY, Some(body)).await
}

/// クイック入力の内容を作る（空なら何もしない）
pub fn prepare_quick_entry(text: &str) -> Option<TransactionCreate> {
    let description = text.trim();
    if description.is_empty() {
        return None;
    }
    Some(TransactionCreate {
        description: description.to_string(),
        amount: extract_amount(description),
    })
}

/// クイック入力の成功結果
#[derive(Debug, Clone, PartialEq)]
pub struct QuickEntryOutcome {
    pub transaction: Transaction,
    pub summary: ClassifyResponse,
}

/// クイック入力の失敗（どの段階で失敗したか）
#[derive(thiserror::Error, Debug)]
pub enum QuickEntryError {
    /// 取引の作成に失敗（何も作られていない）
    #[error("{0}")]
    Create(Error),

    /// 取引は作成済みだが分類に失敗（ロールバックしない）
    #[error("{source}")]
    Classify { transaction_id: i64, source: Error },
}

impl QuickEntryError {
    pub fn source_error(&self) -> &Error {
        match self {
            QuickEntryError::Create(e) => e,
            QuickEntryError::Classify { source, .. } => source,
        }
    }

    /// 分類されないまま残った取引のID
    pub fn orphaned_transaction(&self) -> Option<i64> {
        match self {
            QuickEntryError::Create(_) => None,
            QuickEntryError::Classify { transaction_id, .. } => Some(*transaction_id),
        }
    }
}

/// クイック入力: 取引を作成してからそのIDで分類する（非アトミック）
pub async fn quick_entry<B: Backend>(
    backend: &B,
    entry: &TransactionCreate,
) -> std::result::Result<QuickEntryOutcome, QuickEntryError> {
    let body = serde_json::to_value(entry).map_err(|e| QuickEntryError::Create(e.into()))?;
    let transaction: Transaction = backend
        .post(endpoints::TRANSACTIONS, Some(body))
        .await
        .map_err(QuickEntryError::Create)?;

    let scope = ClassifyScope::Transactions(vec![transaction.id]);
    match classify(backend, &scope).await {
        Ok(summary) => Ok(QuickEntryOutcome { transaction, summary }),
        Err(source) => Err(QuickEntryError::Classify {
            transaction_id: transaction.id,
            source,
        }),
    }
}

/// 却下リクエストを作る
///
/// 修正GLコードが空なら [`Error::Validation`]（リクエストは発行しない）。
/// 理由が空なら `null` で送る。
pub fn rejection(corrected_gl_code: &str, reason: &str) -> Result<ReviewAction> {
    let gl_code = corrected_gl_code.trim();
    if gl_code.is_empty() {
        return Err(Error::Validation(MISSING_GL_CODE.to_string()));
    }
    let reason = reason.trim();
    Ok(ReviewAction {
        corrected_gl_code: gl_code.to_string(),
        reason: (!reason.is_empty()).then(|| reason.to_string()),
        corrected_by: ANALYST.to_string(),
    })
}

/// 予測を承認（ERPへ転記）
pub async fn approve<B: Backend>(backend: &B, prediction_id: i64) -> Result<ReviewResult> {
    backend.post(&endpoints::approve(prediction_id), None).await
}

/// 予測を却下して修正GLコードで転記
pub async fn reject<B: Backend>(
    backend: &B,
    prediction_id: i64,
    action: &ReviewAction,
) -> Result<ReviewResult> {
    let body = serde_json::to_value(action)?;
    backend.post(&endpoints::reject(prediction_id), Some(body)).await
}

/// 入力値から検証して却下する（空のGLコードは送信しない）
pub async fn reject_with_input<B: Backend>(
    backend: &B,
    prediction_id: i64,
    corrected_gl_code: &str,
    reason: &str,
) -> Result<ReviewResult> {
    let action = rejection(corrected_gl_code, reason)?;
    reject(backend, prediction_id, &action).await
}

/// 再学習を実行（完了待ちのポーリングはしない）
pub async fn retrain<B: Backend>(backend: &B) -> Result<RetrainResponse> {
    backend.post(endpoints::ML_RETRAIN, None).await
}
