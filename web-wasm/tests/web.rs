//! ブラウザ上でのバックエンド接続テスト
//!
//! 実行: wasm-pack test --headless --firefox web-wasm

use autoledger_common::endpoints::LOCAL_API_BASE;
use autoledger_common::{Backend, DashboardStats, Error};
use autoledger_web::api::FetchBackend;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_backend_from_location_uses_local_api() {
    // テストランナーはlocalhostで配信される
    let backend = FetchBackend::from_location();
    assert_eq!(backend.api_base(), LOCAL_API_BASE);
}

#[wasm_bindgen_test]
async fn test_refused_connection_is_unreachable() {
    // ポート9(discard)には何も待ち受けていない前提
    let backend = FetchBackend::new("http://127.0.0.1:9/api");
    let result: Result<DashboardStats, Error> = backend.get("/dashboard/stats").await;

    match result {
        Err(e) => assert!(e.is_unreachable(), "unexpected error: {}", e),
        Ok(_) => panic!("should not connect"),
    }
}
