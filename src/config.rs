use crate::error::{AutoLedgerError, Result};
use autoledger_common::actions::ANALYST;
use autoledger_common::endpoints::{AUDIT_LIMIT, LOCAL_API_BASE, PREDICTION_LIMIT, REVIEW_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIベースURLを上書きする環境変数
pub const API_BASE_ENV: &str = "AUTOLEDGER_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Option<String>,
    /// 却下時に `corrected_by` として送る名前
    pub actor: String,
    pub prediction_limit: u32,
    pub review_limit: u32,
    pub audit_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            actor: ANALYST.into(),
            prediction_limit: PREDICTION_LIMIT,
            review_limit: REVIEW_LIMIT,
            audit_limit: AUDIT_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（ファイルがなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AutoLedgerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("autoledger").join("config.json"))
    }

    /// 使用するAPIベースURL（環境変数 → 設定ファイル → ローカル既定値）
    pub fn resolve_api_base(&self) -> String {
        let from_env = std::env::var(API_BASE_ENV).ok();
        self.api_base_with_override(from_env.as_deref())
    }

    pub fn api_base_with_override(&self, env_value: Option<&str>) -> String {
        env_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| self.api_base.clone())
            .unwrap_or_else(|| LOCAL_API_BASE.to_string())
    }

    pub fn set_api_base(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AutoLedgerError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.api_base = Some(url);
        Ok(())
    }

    pub fn clear_api_base(&mut self) {
        self.api_base = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let config = Config {
            api_base: Some("http://ledger.internal/api".into()),
            ..Default::default()
        };
        assert_eq!(
            config.api_base_with_override(Some("http://10.0.0.5:8000/api")),
            "http://10.0.0.5:8000/api"
        );
        assert_eq!(config.api_base_with_override(Some("  ")), "http://ledger.internal/api");
        assert_eq!(Config::default().api_base_with_override(None), LOCAL_API_BASE);
    }

    #[test]
    fn test_set_api_base_rejects_bare_host() {
        let mut config = Config::default();
        assert!(config.set_api_base("ledger.internal/api".into()).is_err());
        assert_eq!(config.api_base, None);

        config.set_api_base("https://ledger.internal/api/".into()).unwrap();
        assert_eq!(config.api_base.as_deref(), Some("https://ledger.internal/api"));
    }
}
