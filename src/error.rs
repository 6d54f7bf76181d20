use autoledger_common::UserAction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoLedgerError {
    /// バックエンドとの通信エラー（表示文言は共通のものをそのまま使う）
    #[error("{0}")]
    Backend(#[from] autoledger_common::Error),

    /// ユーザー操作の失敗（通知文言をそのまま表示する）
    #[error("{0}")]
    Action(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl AutoLedgerError {
    /// 操作ごとの失敗文言に変換
    pub fn action(action: UserAction, err: &autoledger_common::Error) -> Self {
        AutoLedgerError::Action(action.failure_notice(err).message)
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, AutoLedgerError::Backend(e) if e.is_unreachable())
    }
}

pub type Result<T> = std::result::Result<T, AutoLedgerError>;
