use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use forecast_report::core::ObjectStore;
use forecast_report::{
    create_router, AppState, ConfiguredStore, GcsObjectStore, ReportError, ServerConfig,
};
use httpmock::prelude::*;
use tempfile::TempDir;
use tower::ServiceExt;

const BUCKET: &str = "retail-processed";

#[tokio::test]
async fn test_download_sends_credentials() {
    let server = MockServer::start_async().await;
    let download = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/storage/v1/b/retail-processed/o/forecast.csv")
                .query_param("alt", "media")
                .header("authorization", "Bearer secret-token")
                .header("x-goog-user-project", "retail-forecasting");
            then.status(200).body("store_id,rev_fcst\nA,1\n");
        })
        .await;

    let store = GcsObjectStore::new(
        &server.base_url(),
        Some("secret-token".to_string()),
        Some("retail-forecasting".to_string()),
    )
    .unwrap();
    let scratch = TempDir::new().unwrap();
    let destination = scratch.path().join("forecast.csv");

    store
        .download(BUCKET, "forecast.csv", &destination)
        .await
        .unwrap();

    download.assert_async().await;
    assert_eq!(
        std::fs::read_to_string(&destination).unwrap(),
        "store_id,rev_fcst\nA,1\n"
    );
}

#[tokio::test]
async fn test_configured_store_carries_project_and_token() {
    let server = MockServer::start_async().await;
    let download = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/storage/v1/b/retail-processed/o/forecast.csv")
                .header("authorization", "Bearer from-config")
                .header("x-goog-user-project", "retail-forecasting");
            then.status(200).body("store_id,rev_fcst\n");
        })
        .await;

    let mut config = ServerConfig::for_bucket(BUCKET);
    config.gcs_endpoint = server.base_url();
    config.gcs_access_token = Some("from-config".to_string());
    config.project_id = Some("retail-forecasting".to_string());

    let store = ConfiguredStore::from_config(&config).await.unwrap();
    let scratch = TempDir::new().unwrap();

    store
        .download(BUCKET, "forecast.csv", &scratch.path().join("forecast.csv"))
        .await
        .unwrap();

    download.assert_async().await;
}

#[tokio::test]
async fn test_download_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/storage/v1/b/retail-processed/o/missing.csv");
            then.status(404).body("No such object");
        })
        .await;

    let store = GcsObjectStore::new(&server.base_url(), None, None).unwrap();
    let scratch = TempDir::new().unwrap();

    let err = store
        .download(BUCKET, "missing.csv", &scratch.path().join("x.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::ObjectNotFound { .. }));
}

#[tokio::test]
async fn test_download_permission_denied() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/storage/v1/b/retail-processed/o/forecast.csv");
            then.status(403).body("denied");
        })
        .await;

    let store = GcsObjectStore::new(&server.base_url(), None, None).unwrap();
    let scratch = TempDir::new().unwrap();

    let err = store
        .download(BUCKET, "forecast.csv", &scratch.path().join("x.csv"))
        .await
        .unwrap_err();

    match err {
        ReportError::StoreError { message } => {
            assert!(message.contains("403"));
            assert!(message.contains("denied"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_report_round_trip_through_gcs_api() {
    let server = MockServer::start_async().await;
    let download = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/storage/v1/b/retail-processed/o/forecast.csv")
                .query_param("alt", "media");
            then.status(200)
                .body("store_id,rev_fcst\nA,10.005\nA,5.00\nB,2.50\n");
        })
        .await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/upload/storage/v1/b/retail-processed/o")
                .query_param("uploadType", "media")
                .query_param("name", "summary.json")
                .header("content-type", "application/json")
                .body_contains("\"grand_total_forecast\":17.51");
            then.status(200)
                .json_body(serde_json::json!({ "name": "summary.json" }));
        })
        .await;

    let store = GcsObjectStore::new(&server.base_url(), None, None).unwrap();
    let app = create_router(AppState::new(store, ServerConfig::for_bucket(BUCKET)));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/report?forecast_csv_blob=forecast.csv&summary_blob=summary.json")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    download.assert_async().await;
    upload.assert_async().await;
}

#[tokio::test]
async fn test_report_not_found_skips_upload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/storage/v1/b/retail-processed/o/forecast.csv");
            then.status(404);
        })
        .await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let store = GcsObjectStore::new(&server.base_url(), None, None).unwrap();
    let app = create_router(AppState::new(store, ServerConfig::for_bucket(BUCKET)));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/report?forecast_csv_blob=forecast.csv")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(upload.hits_async().await, 0);
}

#[tokio::test]
async fn test_upload_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/upload/storage/v1/b/retail-processed/o");
            then.status(500).body("backend error");
        })
        .await;

    let store = GcsObjectStore::new(&server.base_url(), None, None).unwrap();
    let err = store
        .upload(BUCKET, "summary.json", b"{}", "application/json")
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::StoreError { .. }));
}
