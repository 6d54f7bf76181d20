//! クイック入力（作成して即分類）

use crate::error::{AutoLedgerError, Result};
use crate::render;
use autoledger_common::actions::{self, prepare_quick_entry};
use autoledger_common::{Backend, Notice, UserAction};

/// 説明文から取引を作成して分類する。空白だけの入力は何もせず `Ok(false)`
pub async fn run_quick_entry<B: Backend>(backend: &B, text: &str) -> Result<bool> {
    let Some(entry) = prepare_quick_entry(text) else {
        log::debug!("quick entry skipped: empty description");
        return Ok(false);
    };
    log::debug!("quick entry amount: {}", entry.amount);
    println!("{}", render::notice_line(&Notice::info("Classifying...")));

    match actions::quick_entry(backend, &entry).await {
        Ok(outcome) => {
            println!("{}", render::notice_line(&Notice::success("Classification complete!")));
            println!("  Transaction #{}", outcome.transaction.id);
            println!("{}", render::classify_table(&outcome.summary));
            Ok(true)
        }
        Err(e) => {
            if let Some(id) = e.orphaned_transaction() {
                log::warn!("transaction {} was created but not classified", id);
            }
            Err(AutoLedgerError::action(UserAction::QuickEntry, e.source_error()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpBackend;

    // ポート9には何も待ち受けていないので、送信すればエラーになる
    fn dead_backend() -> HttpBackend {
        HttpBackend::new("http://127.0.0.1:9/api")
    }

    #[tokio::test]
    async fn test_blank_description_is_noop() {
        let backend = dead_backend();
        assert!(!run_quick_entry(&backend, "").await.unwrap());
        assert!(!run_quick_entry(&backend, "   ").await.unwrap());
    }

    #[tokio::test]
    async fn test_description_is_sent() {
        let backend = dead_backend();
        let err = run_quick_entry(&backend, "Lunch 12.50").await.unwrap_err();
        assert!(matches!(err, AutoLedgerError::Action(_)));
    }
}
