//! テスト用のスタブバックエンド
//!
//! パスごとに応答を登録し、発行されたリクエストを記録する。

use crate::backend::{http_error, Backend};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) const STUB_BASE: &str = "http://stub/api";

#[derive(Clone)]
pub(crate) enum Reply {
    Json(Value),
    Status(u16, String),
    Unreachable,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub(crate) struct StubBackend {
    replies: RefCell<HashMap<String, Reply>>,
    pub calls: RefCell<Vec<Call>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: &str, path: &str, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .insert(format!("{} {}", method, path), reply);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn respond<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let path = url.strip_prefix(STUB_BASE).unwrap_or(url).to_string();
        self.calls.borrow_mut().push(Call { method, path: path.clone(), body });

        let reply = self
            .replies
            .borrow()
            .get(&format!("{} {}", method, path))
            .cloned()
            .unwrap_or(Reply::Status(404, r#"{"detail": "Not Found"}"#.to_string()));

        match reply {
            Reply::Json(value) => Ok(serde_json::from_value(value)?),
            Reply::Status(status, body) => Err(http_error(status, &body)),
            Reply::Unreachable => Err(Error::Unreachable),
        }
    }
}

impl Backend for StubBackend {
    /// ファイル名だけを送る
    type Upload = String;

    fn api_base(&self) -> &str {
        STUB_BASE
    }

    async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.respond("GET", url, None)
    }

    async fn post_url<T: DeserializeOwned>(&self, url: &str, body: Option<Value>) -> Result<T> {
        self.respond("POST", url, body)
    }

    async fn upload_url<T: DeserializeOwned>(&self, url: &str, file: String) -> Result<T> {
        self.respond("POST", url, Some(Value::String(file)))
    }
}
