//! 対話式レビュー
//!
//! レビューキューを1件ずつ表示して承認/却下/スキップを選ぶ。

use crate::client::HttpBackend;
use crate::config::Config;
use crate::error::{AutoLedgerError, Result};
use crate::render;
use autoledger_common::actions;
use autoledger_common::loaders::load_review_queue;
use autoledger_common::view::ReviewCardView;
use autoledger_common::{Notice, UserAction};
use dialoguer::Input;

/// 1件ごとの操作
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewDecision {
    Approve,
    Reject,
    Skip,
    Quit,
}

impl ReviewDecision {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "a" | "A" => Some(ReviewDecision::Approve),
            "r" | "R" => Some(ReviewDecision::Reject),
            "" | "s" | "S" => Some(ReviewDecision::Skip),
            "q" | "Q" => Some(ReviewDecision::Quit),
            _ => None,
        }
    }
}

/// レビューの集計
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReviewTally {
    pub approved: usize,
    pub rejected: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub async fn run_interactive_review(backend: &HttpBackend, config: &Config, limit: u32) -> Result<()> {
    let queue = load_review_queue(backend, limit).await?;

    if queue.is_empty() {
        println!("{}", render::notice_line(&Notice::success("All caught up! No items need review.")));
        return Ok(());
    }

    println!("📋 レビュー待ち: {}件", queue.len());
    println!("---");
    println!("操作: [a]承認 [r]却下 [s/Enter]スキップ [q]終了");
    println!("---\n");

    let mut tally = ReviewTally::default();

    for (count, prediction) in queue.iter().enumerate() {
        let card = ReviewCardView::from_prediction(prediction);
        println!("[{}/{}]", count + 1, queue.len());
        println!("{}\n", render::review_card(&card));

        let decision = prompt_decision()?;
        let outcome = match decision {
            ReviewDecision::Quit => {
                println!("終了します...");
                break;
            }
            ReviewDecision::Skip => {
                tally.skipped += 1;
                println!("  → スキップ\n");
                continue;
            }
            ReviewDecision::Approve => actions::approve(backend, card.prediction_id)
                .await
                .map(|_| Notice::success("Prediction approved & posted to ERP"))
                .map_err(|e| UserAction::Approve.failure_notice(&e)),
            ReviewDecision::Reject => {
                let gl_code = prompt_text("修正GLコード", false)?;
                let reason = prompt_text("理由（任意）", true)?;
                reject(backend, config, card.prediction_id, &gl_code, &reason).await
            }
        };

        match outcome {
            Ok(notice) => {
                match decision {
                    ReviewDecision::Approve => tally.approved += 1,
                    _ => tally.rejected += 1,
                }
                println!("  {}\n", render::notice_line(&notice));
            }
            Err(notice) => {
                tally.failed += 1;
                println!("  {}\n", render::notice_line(&notice));
            }
        }
    }

    println!(
        "\n✓ 承認 {} / 却下 {} / スキップ {} / 失敗 {}",
        tally.approved, tally.rejected, tally.skipped, tally.failed
    );
    Ok(())
}

/// 却下（GLコード未入力なら送信せず警告）
pub async fn reject(
    backend: &HttpBackend,
    config: &Config,
    prediction_id: i64,
    gl_code: &str,
    reason: &str,
) -> std::result::Result<Notice, Notice> {
    let mut action = actions::rejection(gl_code, reason).map_err(|e| UserAction::Reject.failure_notice(&e))?;
    action.corrected_by = config.actor.clone();

    actions::reject(backend, prediction_id, &action)
        .await
        .map(|_| Notice::success("Correction saved & posted to ERP"))
        .map_err(|e| UserAction::Reject.failure_notice(&e))
}

fn prompt_decision() -> Result<ReviewDecision> {
    loop {
        let input = prompt_text("操作 (a:承認 r:却下 s:スキップ q:終了)", true)?;
        match ReviewDecision::parse(&input) {
            Some(decision) => return Ok(decision),
            None => println!("  a / r / s / q のいずれかを入力してください"),
        }
    }
}

fn prompt_text(prompt: &str, allow_empty: bool) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()
        .map_err(|e| AutoLedgerError::Prompt(e.to_string()))
}
