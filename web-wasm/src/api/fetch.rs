//! fetch APIによるバックエンド実装
//!
//! ベースURLはページのホスト名から起動時に一度だけ決める。
//! タイムアウトとキャンセルは設定しない（ブラウザ既定のまま）。

use autoledger_common::endpoints::api_base_for_host;
use autoledger_common::{http_error, Backend, Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// ブラウザのfetchで通信するバックエンド
#[derive(Clone, Debug)]
pub struct FetchBackend {
    base: String,
}

impl FetchBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// `window.location.hostname` からベースURLを選ぶ
    pub fn from_location() -> Self {
        let hostname = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        Self::new(api_base_for_host(&hostname))
    }

    async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let window = web_sys::window().ok_or_else(|| Error::Transport("window is not available".into()))?;

        // fetch自体の失敗（TypeError: Failed to fetch）はレスポンスなし＝到達不可
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|_| Error::Unreachable)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            return Err(http_error(resp.status(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// JsValueのエラーを共通エラーへ
fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

fn request_init(method: &str) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    opts
}

impl Backend for FetchBackend {
    type Upload = File;

    fn api_base(&self) -> &str {
        &self.base
    }

    async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let opts = request_init("GET");
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        self.send(request).await
    }

    async fn post_url<T: DeserializeOwned>(&self, url: &str, body: Option<Value>) -> Result<T> {
        let opts = request_init("POST");
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(&serde_json::to_string(body)?));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }
        self.send(request).await
    }

    async fn upload_url<T: DeserializeOwned>(&self, url: &str, file: File) -> Result<T> {
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &file, &file.name())
            .map_err(js_error)?;

        // Content-Typeはブラウザがboundary付きで設定する
        let opts = request_init("POST");
        opts.set_body(&form);
        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        self.send(request).await
    }
}
