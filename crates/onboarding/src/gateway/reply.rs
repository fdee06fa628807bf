use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Identifiers of a freshly created verification session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    pub interview_id: String,
    pub token: String,
}

/// A new session together with the hosted onboarding link for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSession {
    pub interview_id: String,
    pub token: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScore {
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub onboarding_status: String,
}

/// Wraps a payload with `"success": true` appended after its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledged<T> {
    #[serde(flatten)]
    pub body: T,
    success: bool,
}

impl<T> Acknowledged<T> {
    pub fn new(body: T) -> Self {
        Self {
            body,
            success: true,
        }
    }
}

/// The `{"error": .., "success": false}` body every caught failure maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    success: bool,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}

/// Outcome of a gateway operation as the frontend sees it.
///
/// Both variants are delivered with `200 OK`; callers branch on the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Success(T),
    Failure(ErrorBody),
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Reply::Success(body) => Reply::Success(f(body)),
            Reply::Failure(error) => Reply::Failure(error),
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
