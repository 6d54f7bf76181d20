//! 自由入力テキストからの金額抽出
//!
//! クイック入力（"$50 office supplies", "lunch 15.50"）用の簡易ヒューリスティック。
//! 最初にマッチした数値トークンを採用する。桁区切りと符号は扱わない。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 任意の `$` + 数字 + 任意の小数1〜2桁（ASCIIの単語境界で区切る。"1200円" も拾う）
    static ref AMOUNT_RE: Regex =
        Regex::new(r"\$?(?-u:\b)([0-9]+(?:\.[0-9]{1,2})?)(?-u:\b)").unwrap();
}

/// 説明文から金額を抽出（見つからなければ0）
///
/// # Examples
/// ```
/// use autoledger_common::extract_amount;
///
/// assert_eq!(extract_amount("lunch 15.50"), 15.5);
/// assert_eq!(extract_amount("no numbers here"), 0.0);
/// ```
pub fn extract_amount(description: &str) -> f64 {
    AMOUNT_RE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
