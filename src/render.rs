//! ターミナル表示（comfy-table + colored）
//!
//! 行の中身は `autoledger_common::view` の表示モデルをそのまま使う。

use autoledger_common::format::{format_count, ConfidenceLevel};
use autoledger_common::view::{
    breakdown, classify_summary, ml_status_text, AuditRow, CoaRow, ConfidenceView, KpiView,
    PredictionRow, ReviewCardView,
};
use autoledger_common::{
    AuditLogEntry, ChartOfAccountsEntry, ClassifyResponse, DashboardSnapshot, Notice, Prediction,
    ToastKind,
};
use colored::Colorize;
use comfy_table::{Cell, Color, Table};

fn level_color(level: ConfidenceLevel) -> Color {
    match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    }
}

fn confidence_cell(conf: &ConfidenceView) -> Cell {
    Cell::new(&conf.text).fg(level_color(conf.level))
}

/// 通知を1行で（種類ごとに色分け）
pub fn notice_line(notice: &Notice) -> String {
    let message = notice.message.as_str();
    match notice.kind {
        ToastKind::Success => format!("✔ {}", message).green().to_string(),
        ToastKind::Error => format!("✘ {}", message).red().to_string(),
        ToastKind::Info => format!("- {}", message).cyan().to_string(),
        ToastKind::Warning => format!("! {}", message).yellow().to_string(),
    }
}

pub fn kpi_table(snapshot: &DashboardSnapshot) -> Table {
    let kpi = KpiView::from_stats(&snapshot.stats);
    let vectors = snapshot
        .ml
        .as_ref()
        .map(|ml| format_count(ml.total_vectors))
        .unwrap_or_else(|| "–".to_string());

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for (label, value) in [
        ("Total Transactions", kpi.total_transactions),
        ("Auto-Posted", kpi.auto_posted),
        ("Pending Review", kpi.pending_review),
        ("Manual Required", kpi.manual_required),
        ("Avg Confidence", kpi.avg_confidence),
        ("ERP Postings", kpi.erp_postings),
        ("Corrections", kpi.corrections),
        ("Correction Rate", kpi.correction_rate),
        ("Knowledge Vectors", vectors),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// 分類内訳（予測0件ならNone）
pub fn breakdown_table(snapshot: &DashboardSnapshot) -> Option<Table> {
    let rows = breakdown(&snapshot.stats);
    if rows.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_header(vec!["Status", "Count", "Share"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.count),
            Cell::new(format!("{}%", row.pct)),
        ]);
    }
    Some(table)
}

/// ML状態とレビュー待ち件数のヘッダ行
pub fn status_line(snapshot: &DashboardSnapshot) -> String {
    let ml = snapshot
        .ml
        .as_ref()
        .map(ml_status_text)
        .unwrap_or_else(|| "ML: unavailable".to_string());
    match KpiView::from_stats(&snapshot.stats).review_badge {
        Some(n) => format!("{}  |  {}", ml, format!("{} awaiting review", n).yellow()),
        None => ml,
    }
}

pub fn predictions_table(predictions: &[Prediction]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Txn", "Description", "Amount", "GL Code", "Confidence", "Status"]);
    for p in predictions {
        let row = PredictionRow::from_prediction(p);
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.transaction_ref),
            Cell::new(truncate(&row.description, 40)),
            Cell::new(row.amount),
            Cell::new(format!("{} {}", row.gl_code, row.gl_name).trim_end()),
            confidence_cell(&row.confidence),
            Cell::new(row.status_text),
        ]);
    }
    table
}

/// レビューカード1枚分のテキスト
pub fn review_card(card: &ReviewCardView) -> String {
    let conf = &card.confidence;
    let conf_text = match conf.level {
        ConfidenceLevel::High => conf.text.green(),
        ConfidenceLevel::Medium => conf.text.yellow(),
        ConfidenceLevel::Low => conf.text.red(),
    };

    let mut lines = vec![
        format!(
            "{}  [{}]  #{}  {}",
            card.transaction_ref.bold(),
            card.status_text,
            card.prediction_id,
            conf_text
        ),
        format!("  Description: {}", card.description),
        format!("  Amount:      {}", card.amount),
        format!("  Vendor:      {}", card.vendor),
        format!("  Dept:        {}", card.department),
        format!("  Predicted:   {} {}", card.gl_code, card.gl_name),
    ];
    if !card.candidates.is_empty() {
        let alternatives: Vec<String> = card
            .candidates
            .iter()
            .map(|c| format!("{} {} {}", c.gl_code, c.gl_name, c.score))
            .collect();
        lines.push(format!("  Alternatives: {}", alternatives.join(", ")));
    }
    lines.join("\n")
}

pub fn classify_table(resp: &ClassifyResponse) -> Table {
    let mut table = Table::new();
    for (label, value) in classify_summary(resp) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn audit_table(entries: &[AuditLogEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Time", "Action", "Actor", "Txn", "Details"]);
    for entry in entries {
        let row = AuditRow::from_entry(entry);
        table.add_row(vec![
            Cell::new(row.timestamp),
            Cell::new(row.action_text),
            Cell::new(row.actor),
            Cell::new(row.transaction_ref),
            Cell::new(truncate(&row.details, 60)),
        ]);
    }
    table
}

pub fn coa_table(entries: &[ChartOfAccountsEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["GL Code", "Name", "Category", "Sub-Category"]);
    for entry in entries {
        let row = CoaRow::from_entry(entry);
        table.add_row(vec![
            Cell::new(row.gl_code),
            Cell::new(row.gl_name),
            Cell::new(row.category),
            Cell::new(row.sub_category),
        ]);
    }
    table
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoledger_common::{DashboardStats, MlStatus, Transaction};

    fn snapshot(total_predictions: u64) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: DashboardStats {
                total_transactions: 1200,
                total_predictions,
                auto_posted_count: total_predictions / 2,
                pending_review_count: total_predictions / 4,
                ..Default::default()
            },
            ml: Some(MlStatus { total_vectors: 4321, ..Default::default() }),
        }
    }

    #[test]
    fn test_kpi_table_formats_counts() {
        let text = kpi_table(&snapshot(100)).to_string();
        assert!(text.contains("1,200"));
        assert!(text.contains("4,321"));
    }

    #[test]
    fn test_breakdown_table_skipped_without_predictions() {
        assert!(breakdown_table(&snapshot(0)).is_none());
        let text = breakdown_table(&snapshot(100)).unwrap().to_string();
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_status_line_without_ml() {
        let snap = DashboardSnapshot { ml: None, ..snapshot(0) };
        assert_eq!(status_line(&snap), "ML: unavailable");
    }

    #[test]
    fn test_predictions_table_truncates_long_descriptions() {
        let p = Prediction {
            id: 1,
            transaction_id: 7,
            predicted_gl_code: "6100".into(),
            confidence_score: 91.0,
            status: "auto_posted".into(),
            transaction: Some(Transaction {
                id: 7,
                description: "x".repeat(80),
                amount: 10.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let text = predictions_table(&[p]).to_string();
        assert!(text.contains("Auto Posted"));
        assert!(!text.contains(&"x".repeat(41)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
