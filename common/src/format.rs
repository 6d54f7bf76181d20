//! 表示用フォーマット
//!
//! 信頼度の色分け、ステータス/アクション/カテゴリのバッジ、数値・金額・日時の整形。
//! CSSクラス名はWeb側のスタイルシートと対応している。

use chrono::{DateTime, NaiveDateTime};

/// 自動転記とみなす信頼度の下限
pub const HIGH_CONFIDENCE: f64 = 80.0;
/// レビュー対象とみなす信頼度の下限
pub const MEDIUM_CONFIDENCE: f64 = 50.0;

/// 欠損値の表示
pub const PLACEHOLDER: &str = "–";

/// 信頼度の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    /// 80以上（緑）
    High,
    /// 50以上80未満（琥珀）
    Medium,
    /// 50未満（赤）
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE {
            ConfidenceLevel::High
        } else if score >= MEDIUM_CONFIDENCE {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }

    /// 数値テキストの色クラス
    pub fn text_class(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "text-emerald-400",
            ConfidenceLevel::Medium => "text-amber-400",
            ConfidenceLevel::Low => "text-red-400",
        }
    }

    /// バーの色クラス
    pub fn bar_class(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "bg-emerald-400",
            ConfidenceLevel::Medium => "bg-amber-400",
            ConfidenceLevel::Low => "bg-red-400",
        }
    }
}

/// バー幅（%）。100で頭打ち
pub fn confidence_bar_width(score: f64) -> f64 {
    score.min(100.0)
}

/// 予測ステータス → バッジクラス（未知のステータスは空文字）
pub fn status_badge(status: &str) -> &'static str {
    match status {
        "auto_posted" => "badge-auto",
        "pending_review" => "badge-review",
        "manual_required" => "badge-manual",
        "approved" => "badge-approved",
        "rejected" => "badge-rejected",
        _ => "",
    }
}

/// 監査アクション → バッジクラス
pub fn action_badge(action: &str) -> &'static str {
    match action {
        "uploaded" => "badge-approved",
        "predicted" => "badge-review",
        "auto_posted" => "badge-auto",
        "sent_for_review" => "badge-review",
        "approved" => "badge-approved",
        "rejected" => "badge-rejected",
        "corrected" => "badge-rejected",
        "retrained" => "badge-auto",
        _ => "",
    }
}

/// 勘定科目カテゴリ → バッジクラス
pub fn category_badge(category: &str) -> &'static str {
    match category {
        "Assets" => "badge-approved",
        "Liabilities" => "badge-review",
        "Equity" => "badge-rejected",
        "Revenue" => "badge-auto",
        "Expenses" => "badge-manual",
        _ => "",
    }
}

/// `pending_review` → `Pending Review`
///
/// アンダースコアを空白にし、各単語の先頭だけ大文字にする（残りはそのまま）。
pub fn format_status(status: &str) -> String {
    let mut out = String::with_capacity(status.len());
    let mut prev_is_word = false;
    for c in status.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// 整数部に3桁区切りのカンマを入れる
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// 件数表示（`1234` → `1,234`）
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// 金額の数値部分（小数2〜3桁、3桁区切り）
///
/// `1234.5` → `1,234.50`、`0.1234` → `0.123`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.3}", round_half_up(amount.abs(), 1000.0));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "000"));
    let frac = frac_part.strip_suffix('0').unwrap_or(frac_part);
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, group_thousands(int_part), frac)
}

/// 通貨表示（欠損は `$0.00`）
pub fn format_currency(amount: Option<f64>) -> String {
    format!("${}", format_amount(amount.unwrap_or(0.0)))
}

/// 平均信頼度のKPI（0以下は `–`）
pub fn format_avg_confidence(avg: f64) -> String {
    if avg > 0.0 {
        format!("{}%", avg)
    } else {
        PLACEHOLDER.to_string()
    }
}

/// 百分率（小数1桁）。分母0はNone
pub fn percentage(count: u64, total: u64) -> Option<String> {
    if total == 0 {
        return None;
    }
    Some(format!("{:.1}", round_half_up(count as f64 / total as f64 * 100.0, 10.0)))
}

/// 0.5ちょうどは切り上げる（`{:.N}` は偶数丸めになるため先に丸めておく）
fn round_half_up(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}

/// 空・欠損テキストを `–` に置き換える
pub fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// 監査ログのタイムスタンプ整形（`YYYY-MM-DD HH:MM:SS`）
///
/// RFC3339とタイムゾーンなし（バックエンドのUTC naive）の両方を受け付ける。
/// 解釈できなければ元の文字列を返す。
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}
