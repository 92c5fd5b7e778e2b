use room_telemetry::monitor::{exceeds_capacity, Monitor};
use room_telemetry::{build_router, AppState};
use serde_json::json;
use std::time::Duration;

/// serve the router on an ephemeral port, returning its base url
async fn spawn_server() -> String {
    let app = build_router(AppState::new(2000, false));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn push(base: &str, body: serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/update", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
}

#[tokio::test]
async fn capacity_alert_follows_threshold() {
    let base = spawn_server().await;
    let mut monitor = Monitor::new(&base, Duration::from_millis(50)).unwrap();

    push(&base, json!({"peopleCount": 6, "temperature": 22.5})).await;
    let reading = monitor.poll_once().await.unwrap();
    assert!(exceeds_capacity(&reading));

    push(&base, json!({"peopleCount": 5, "temperature": 22.5})).await;
    let reading = monitor.poll_once().await.unwrap();
    assert!(!exceeds_capacity(&reading));
}

#[tokio::test]
async fn twelve_polls_keep_the_last_ten_temperatures() {
    let base = spawn_server().await;
    let mut monitor = Monitor::new(&base, Duration::from_millis(50)).unwrap();

    for i in 0..12 {
        push(&base, json!({"peopleCount": 1, "temperature": 20 + i})).await;
        monitor.poll_once().await.unwrap();
    }

    let temps: Vec<i64> = monitor
        .samples()
        .iter()
        .map(|s| s.temperature.as_i64().unwrap())
        .collect();
    assert_eq!(temps, (22..32).collect::<Vec<_>>());
}

#[tokio::test]
async fn failed_poll_leaves_the_window_alone() {
    // nothing listens here once the listener is dropped
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let mut monitor = Monitor::new(&format!("http://{}", addr), Duration::from_millis(50)).unwrap();

    assert!(monitor.poll_once().await.is_err());
    assert!(monitor.samples().is_empty());
}
