use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_server::{create_router, services::InMemoryMessageStore, AppState, Mode};

fn app() -> Router {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        Mode::Moderate,
        Arc::new(InMemoryMessageStore::new()),
    ));
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn initial_timer_snapshot() {
    let app = app();
    let (status, timer) = send(&app, Method::GET, "/timer", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["mode"], "moderate");
    assert_eq!(timer["period"], "work");
    assert_eq!(timer["display_label"], "Focus Time");
    assert_eq!(timer["clock"], "15:00");
    assert_eq!(timer["running"], false);
    assert_eq!(timer["completed_work_cycles"], 0);
    assert_eq!(timer["preset_summary"], "15-5-10");
}

#[tokio::test]
async fn toggle_starts_and_pauses() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/timer/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["running"], true);

    let (_, body) = send(&app, Method::POST, "/timer/toggle", None).await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["running"], false);
}

#[tokio::test]
async fn skip_cycles_through_periods() {
    let app = app();
    for _ in 0..3 {
        send(&app, Method::POST, "/timer/skip", None).await;
        send(&app, Method::POST, "/timer/skip", None).await;
    }
    let (_, body) = send(&app, Method::POST, "/timer/skip", None).await;
    assert_eq!(body["timer"]["period"], "longBreak");
    assert_eq!(body["timer"]["display_label"], "Long Break");
    assert_eq!(body["timer"]["completed_work_cycles"], 4);
    assert_eq!(body["timer"]["clock"], "10:00");

    let (_, body) = send(&app, Method::POST, "/timer/cycles/reset", None).await;
    assert_eq!(body["timer"]["completed_work_cycles"], 0);
    assert_eq!(body["timer"]["period"], "longBreak");
}

#[tokio::test]
async fn mode_change_recomputes_work_period() {
    let app = app();
    send(&app, Method::POST, "/timer/skip", None).await;

    let (status, body) = send(&app, Method::POST, "/timer/mode", Some(json!({ "mode": "severe" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["mode"], "severe");
    assert_eq!(body["timer"]["mode_label"], "Severe ADHD");
    assert_eq!(body["timer"]["period"], "work");
    assert_eq!(body["timer"]["remaining_seconds"], 600);
    assert_eq!(body["timer"]["custom_inputs"]["short_break"], "3");

    let (status, _) = send(&app, Method::POST, "/timer/mode", Some(json!({ "mode": "turbo" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn custom_durations_clamp_and_apply() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/timer/custom",
        Some(json!({ "period": "work", "minutes": "30" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "rejected");

    let (_, body) = send(&app, Method::POST, "/timer/mode", Some(json!({ "mode": "custom" }))).await;
    assert_eq!(body["timer"]["editing_custom"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/timer/custom",
        Some(json!({ "period": "shortBreak", "minutes": "45" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["custom"]["short_break"], 30);

    let (_, body) = send(
        &app,
        Method::POST,
        "/timer/custom",
        Some(json!({ "period": "work", "minutes": "forty" })),
    )
    .await;
    assert_eq!(body["timer"]["custom"]["work"], 1);
    assert_eq!(body["timer"]["custom_inputs"]["work"], "1");
    assert_eq!(body["timer"]["clock"], "25:00");

    let (_, body) = send(&app, Method::POST, "/timer/custom/apply", None).await;
    assert_eq!(body["timer"]["editing_custom"], false);
    assert_eq!(body["timer"]["clock"], "01:00");
    assert_eq!(body["timer"]["preset_summary"], "1-30-15");
}

#[tokio::test]
async fn reset_keeps_period_and_pauses() {
    let app = app();
    send(&app, Method::POST, "/timer/skip", None).await;
    send(&app, Method::POST, "/timer/toggle", None).await;

    let (_, body) = send(&app, Method::POST, "/timer/reset", None).await;
    assert_eq!(body["timer"]["period"], "shortBreak");
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["timer"]["clock"], "05:00");
}

#[tokio::test]
async fn message_gateway_round_trip() {
    let app = app();
    let (status, latest) = send(&app, Method::GET, "/messages/latest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest, Value::Null);

    let (status, stored) = send(&app, Method::POST, "/messages", Some(json!({ "message": "focus up" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["message"], "focus up");
    assert!(stored["time"].as_i64().unwrap() > 0);

    let (_, latest) = send(&app, Method::GET, "/messages/latest", None).await;
    assert_eq!(latest, stored);
}

#[tokio::test]
async fn status_reports_last_action() {
    let app = app();
    send(&app, Method::POST, "/timer/skip", None).await;

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "skip");
    assert_eq!(body["port"], 20554);
    assert_eq!(body["timer"]["period"], "shortBreak");

    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
}
