use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::value::RawValue;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log target for received webhooks; kept at info whatever the global filter.
pub const WEBHOOK_LOG_TARGET: &str = "onboarding::webhook";

/// Arbitrary JSON object posted by the provider's webhook.
///
/// Kept as the exact text received so numbers, spacing and key order are
/// echoed back untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct WebhookPayload(Box<RawValue>);

impl WebhookPayload {
    /// Accepts any well-formed JSON whose top level is an object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: Box<RawValue> = serde_json::from_slice(body)?;
        if !raw.get().starts_with('{') {
            return Err(serde::de::Error::custom(
                "webhook payload must be a JSON object",
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for WebhookPayload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Received webhook echoed back with the time the gateway saw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookEcho {
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    pub data: WebhookPayload,
}

impl WebhookEcho {
    pub fn stamp(payload: WebhookPayload, received_at: DateTime<Local>) -> Self {
        Self {
            time_stamp: received_at.format(TIMESTAMP_FORMAT).to_string(),
            data: payload,
        }
    }
}
