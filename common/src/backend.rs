//! バックエンド通信の抽象
//!
//! Web(fetch)とCLI(reqwest)でそれぞれ実装する。どちらもJSONのみを扱い、
//! 2xx以外は [`http_error`] で `detail` を取り出してエラーにする。

use crate::endpoints::{health_url, join_url};
use crate::error::{Error, Result};
use crate::types::HealthStatus;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// 2xx以外のレスポンスボディ
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// 2xx以外のレスポンスからエラーを作る
///
/// `detail` が文字列ならそれを、なければ `HTTP <status>` をメッセージにする。
/// FastAPIのバリデーションエラー（`detail` が配列）もフォールバック扱い。
pub fn http_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| d.as_str().map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));
    Error::Http { status, message }
}

/// JSON API クライアント
///
/// Webは単一スレッドで `Send` を要求しないため、非同期メソッドは素の `async fn` にしている。
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// アップロードするファイルの表現（Webは `web_sys::File`、CLIはファイル名+バイト列）
    type Upload;

    /// APIベースURL（例: `http://localhost:8000/api`）
    fn api_base(&self) -> &str;

    async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T>;

    async fn post_url<T: DeserializeOwned>(&self, url: &str, body: Option<Value>) -> Result<T>;

    /// multipart/form-data の `file` フィールドで送信
    async fn upload_url<T: DeserializeOwned>(&self, url: &str, file: Self::Upload) -> Result<T>;

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_url(&join_url(self.api_base(), path)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T> {
        self.post_url(&join_url(self.api_base(), path), body).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: Self::Upload) -> Result<T> {
        self.upload_url(&join_url(self.api_base(), path), file).await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_url(&health_url(self.api_base())).await
    }
}
