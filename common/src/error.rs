//! エラー型定義

use thiserror::Error;

/// バックエンドに到達できなかった時の表示文言
pub const UNREACHABLE_MESSAGE: &str = "Cannot connect to backend. Is the server running?";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// レスポンス自体が得られなかった（ネットワーク到達不可）
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    /// 2xx以外のレスポンス（`detail` または `HTTP <status>`）
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 送信前のクライアント側チェックで弾いた（リクエストは発行されていない）
    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable)
    }

    /// HTTPステータス（Http以外はNone）
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
