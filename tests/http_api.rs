use std::sync::Arc;

use sel2pw::server::{router, AppState};
use sel2pw::{ConversionEngine, EngineConfig, OutputStore};

async fn spawn_api(config: &EngineConfig) -> String {
    let state = AppState {
        engine: Arc::new(ConversionEngine::from_config(config)),
        store: Arc::new(OutputStore::new(config.output_dir.clone())),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });
    format!("http://{}", addr)
}

fn offline_config(output_dir: &std::path::Path) -> EngineConfig {
    EngineConfig {
        ollama_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 5,
        output_dir: output_dir.to_path_buf(),
        ..EngineConfig::default()
    }
}

#[tokio::test]
async fn test_convert_deterministic() {
    let tmp = tempfile::tempdir().unwrap();
    let base = spawn_api(&offline_config(tmp.path())).await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/convert", base))
        .json(&serde_json::json!({ "code": "Assert.assertEquals(a, b);", "strategy": "deterministic" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["strategy"], "deterministic");
    assert!(body["code"].as_str().unwrap().contains("expect(a).toBe(b);"));
}

#[tokio::test]
async fn test_convert_missing_code_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let base = spawn_api(&offline_config(tmp.path())).await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/convert", base))
        .json(&serde_json::json!({ "model": "codellama" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorKind"], "missing_input");
}

#[tokio::test]
async fn test_convert_generative_defaults_and_reports_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let base = spawn_api(&offline_config(tmp.path())).await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/convert", base))
        .json(&serde_json::json!({ "code": "Thread.sleep(1);" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 503);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorKind"], "backend_unavailable");
    assert!(body["error"].as_str().unwrap().contains("127.0.0.1:1"));
}

#[tokio::test]
async fn test_save_writes_into_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let base = spawn_api(&offline_config(tmp.path())).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/save", base))
        .json(&serde_json::json!({ "code": "await page.goto('/');", "filename": "ConvertedTest.ts" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("ConvertedTest.ts")).unwrap(),
        "await page.goto('/');"
    );

    let res = client
        .post(format!("{}/api/save", base))
        .json(&serde_json::json!({ "code": "x", "filename": "../escape.ts" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_health_reports_default_model() {
    let tmp = tempfile::tempdir().unwrap();
    let base = spawn_api(&offline_config(tmp.path())).await;

    let body: serde_json::Value = reqwest::get(format!("{}/api/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["default_model"], "codellama");
}
