//! The five operations the frontend can ask of the onboarding gateway.
//!
//! Every proxying operation returns a [`Reply`]: the reshaped provider data
//! on success, or the normalized `{"error", "success": false}` body when any
//! upstream call in its chain fails. Nothing is retried and nothing is kept
//! between requests.

mod reply;
mod webhook;

pub use reply::{
    Acknowledged, ErrorBody, OnboardingSession, OnboardingStatus, Reply, SessionScore,
    SessionStart,
};
pub use webhook::{WebhookEcho, WebhookPayload, TIMESTAMP_FORMAT, WEBHOOK_LOG_TARGET};

use chrono::Local;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::incode::{IncodeClient, UpstreamError};

pub struct OnboardingGateway {
    client: IncodeClient,
    admin_token: String,
}

impl OnboardingGateway {
    pub fn new(client: IncodeClient, admin_token: impl Into<String>) -> Self {
        Self {
            client,
            admin_token: admin_token.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, UpstreamError> {
        let client = IncodeClient::new(config)?;
        Ok(Self::new(client, config.admin_token.clone()))
    }

    /// Opens a session and returns its identifiers untouched.
    pub async fn start_session(&self) -> Reply<SessionStart> {
        normalize("start_session", self.open_session().await)
    }

    /// Opens a session, then asks for the hosted onboarding link using the
    /// new session's own token.
    pub async fn create_session_with_onboarding_url(
        &self,
    ) -> Reply<Acknowledged<OnboardingSession>> {
        let result: Result<OnboardingSession, UpstreamError> = async {
            let session = self.open_session().await?;
            let link = self.client.onboarding_url(&session.token).await?;
            Ok(OnboardingSession {
                interview_id: session.interview_id,
                token: session.token,
                url: link.url,
            })
        }
        .await;

        normalize("create_session_with_onboarding_url", result).map(Acknowledged::new)
    }

    /// Fetches the overall score of `interview_id` with the caller's token.
    pub async fn fetch_score(
        &self,
        interview_id: &str,
        token: &str,
    ) -> Reply<Acknowledged<SessionScore>> {
        let result = self
            .client
            .score(interview_id, token)
            .await
            .map(|score| SessionScore {
                score: score.overall.status,
            });

        normalize("fetch_score", result).map(Acknowledged::new)
    }

    /// Fetches onboarding status of `interview_id`. Always authorised with
    /// the admin token, never with a caller-supplied one.
    pub async fn fetch_onboarding_status(
        &self,
        interview_id: &str,
    ) -> Reply<Acknowledged<OnboardingStatus>> {
        let result = self
            .client
            .onboarding_status(interview_id, &self.admin_token)
            .await
            .map(|status| OnboardingStatus {
                onboarding_status: status.onboarding_status,
            });

        normalize("fetch_onboarding_status", result).map(Acknowledged::new)
    }

    /// Stamps an inbound webhook with the local receive time and logs it.
    ///
    /// The payload is not validated and the sender is not authenticated.
    pub fn handle_webhook(&self, payload: WebhookPayload) -> WebhookEcho {
        let echo = WebhookEcho::stamp(payload, Local::now());
        let rendered = serde_json::to_string(&echo).unwrap_or_default();
        info!(target: WEBHOOK_LOG_TARGET, webhook = %rendered, "webhook received");
        echo
    }

    async fn open_session(&self) -> Result<SessionStart, UpstreamError> {
        let started = self.client.start_session().await?;
        Ok(SessionStart {
            interview_id: started.interview_id,
            token: started.token,
        })
    }
}

fn normalize<T>(operation: &'static str, result: Result<T, UpstreamError>) -> Reply<T> {
    match result {
        Ok(body) => Reply::Success(body),
        Err(err) => {
            warn!(
                operation,
                status = ?err.status(),
                timeout = err.is_timeout(),
                error = %err,
                "upstream call failed"
            );
            Reply::Failure(ErrorBody::new(err.to_string()))
        }
    }
}
