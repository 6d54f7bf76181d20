//! AutoLedger Common Library
//!
//! CLIとWeb(WASM)で共有される型・表示ルール・バックエンド操作

pub mod types;
pub mod error;
pub mod amount;
pub mod format;
pub mod endpoints;
pub mod backend;
pub mod actions;
pub mod loaders;
pub mod view;

#[cfg(test)]
mod stub;

pub use types::{
    AccountCategory, AuditAction, AuditLogEntry, CandidateGl, ChartOfAccountsEntry,
    ClassifyRequest, ClassifyResponse, DashboardStats, HealthStatus, MlStatus, Prediction,
    PredictionStatus, RetrainResponse, ReviewAction, ReviewResult, Transaction, TransactionCreate,
    UploadResponse,
};
pub use error::{Error, Result, UNREACHABLE_MESSAGE};
pub use amount::extract_amount;
pub use format::{format_status, status_badge, ConfidenceLevel};
pub use backend::{http_error, Backend};
pub use actions::{BatchContext, ClassifyScope, QuickEntryError, QuickEntryOutcome};
pub use loaders::DashboardSnapshot;
pub use view::{LoadState, Notice, Tab, ToastKind, UserAction};
