//! reqwestによるバックエンド実装

use crate::error::{AutoLedgerError, Result as CliResult};
use autoledger_common::{http_error, Backend, Error, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// アップロードするファイル
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        if !path.is_file() {
            return Err(AutoLedgerError::FileNotFound(path.display().to_string()));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { file_name, bytes })
    }
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: Client::new(),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        // ステータス行は届いているので、本文の読み込み失敗は到達不可ではない
        let text = resp.text().await.map_err(|e| Error::Transport(e.to_string()))?;
        log::debug!("HTTP {} ({} bytes)", status.as_u16(), text.len());

        if !status.is_success() {
            return Err(http_error(status.as_u16(), &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// リクエスト組み立ての失敗以外はレスポンスなし＝到達不可
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_builder() {
        Error::Transport(e.to_string())
    } else {
        log::debug!("transport failure: {}", e);
        Error::Unreachable
    }
}

impl Backend for HttpBackend {
    type Upload = UploadFile;

    fn api_base(&self) -> &str {
        &self.base
    }

    async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn post_url<T: DeserializeOwned>(&self, url: &str, body: Option<Value>) -> Result<T> {
        log::debug!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        self.send(request).await
    }

    async fn upload_url<T: DeserializeOwned>(&self, url: &str, file: UploadFile) -> Result<T> {
        log::debug!("POST {} (multipart: {})", url, file.file_name);
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part("file", part);
        self.send(self.client.post(url).multipart(form)).await
    }
}
