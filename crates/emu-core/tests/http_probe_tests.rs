//! Integration tests for the HTTP readiness probe

use emu_core::{HttpProbe, ReadinessProbe};

use std::time::Duration;

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_probe_success_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vnc.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
    let endpoint = format!("{}/vnc.html", mock_server.uri());

    assert!(probe.probe(&endpoint).await.is_ok());
}

#[tokio::test]
async fn test_probe_any_status_counts_as_reachable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();
    let endpoint = format!("{}/vnc.html", mock_server.uri());

    assert!(probe.probe(&endpoint).await.is_ok());
}

#[tokio::test]
async fn test_probe_connection_refused() {
    let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();

    assert!(probe.probe("http://127.0.0.1:1/vnc.html").await.is_err());
}

#[tokio::test]
async fn test_probe_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let probe = HttpProbe::new(Duration::from_millis(100)).unwrap();
    let endpoint = format!("{}/vnc.html", mock_server.uri());

    assert!(probe.probe(&endpoint).await.is_err());
}
