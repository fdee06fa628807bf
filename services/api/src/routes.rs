use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use onboarding::gateway::{ErrorBody, WebhookPayload};
use onboarding::OnboardingGateway;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Inbound header carrying the caller's session token for score lookups.
pub(crate) const TOKEN_HEADER: &str = "x-token";

#[derive(Debug, Deserialize)]
pub(crate) struct InterviewQuery {
    #[serde(rename = "interviewId")]
    pub(crate) interview_id: String,
}

/// Router exposing the frontend-facing onboarding endpoints. Any origin may
/// call them.
pub fn gateway_router(gateway: Arc<OnboardingGateway>) -> Router {
    Router::new()
        .route("/start", get(start_session))
        .route("/onboarding-url", get(onboarding_url))
        .route("/fetch-score", get(fetch_score))
        .route("/onboarding-status", get(onboarding_status))
        .route("/webhook", post(webhook))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(gateway)
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn start_session(State(gateway): State<Arc<OnboardingGateway>>) -> Response {
    gateway.start_session().await.into_response()
}

pub(crate) async fn onboarding_url(State(gateway): State<Arc<OnboardingGateway>>) -> Response {
    gateway
        .create_session_with_onboarding_url()
        .await
        .into_response()
}

pub(crate) async fn fetch_score(
    State(gateway): State<Arc<OnboardingGateway>>,
    headers: HeaderMap,
    Query(query): Query<InterviewQuery>,
) -> Response {
    let token = match headers.get(TOKEN_HEADER).map(|value| value.to_str()) {
        Some(Ok(token)) => token,
        Some(Err(_)) => {
            let body = ErrorBody::new("invalid X-Token header");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
        None => {
            let body = ErrorBody::new("missing X-Token header");
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    gateway
        .fetch_score(&query.interview_id, token)
        .await
        .into_response()
}

pub(crate) async fn onboarding_status(
    State(gateway): State<Arc<OnboardingGateway>>,
    Query(query): Query<InterviewQuery>,
) -> Response {
    gateway
        .fetch_onboarding_status(&query.interview_id)
        .await
        .into_response()
}

/// Takes the body as bytes so the payload is echoed exactly as sent.
pub(crate) async fn webhook(
    State(gateway): State<Arc<OnboardingGateway>>,
    body: Bytes,
) -> Response {
    let payload = match WebhookPayload::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            let body = ErrorBody::new(format!("invalid webhook payload: {err}"));
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };
    let echo = gateway.handle_webhook(payload);
    (StatusCode::OK, Json(echo)).into_response()
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
