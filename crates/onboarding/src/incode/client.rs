use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::UpstreamError;
use super::models::{
    OmniStartRequest, OmniStartResponse, OnboardingStatusResponse, OnboardingUrlResponse,
    ScoreResponse,
};
use crate::config::ProviderConfig;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_VERSION_HEADER: &str = "api-version";
pub const API_VERSION: &str = "1.0";
pub const HARDWARE_ID_HEADER: &str = "X-Incode-Hardware-Id";

const START_PATH: &str = "/omni/start";
const ONBOARDING_URL_PATH: &str = "/omni/onboarding-url";
const SCORE_PATH: &str = "/omni/get/score";
const ONBOARDING_STATUS_PATH: &str = "/omni/get/onboarding/status";

const WILDCARD_COUNTRY: &str = "ALL";
const SESSION_LANGUAGE: &str = "en-US";

/// Typed client for the four Omni endpoints the gateway proxies.
///
/// The API key and version headers are installed as client defaults; the
/// identity header is chosen per call by the caller.
#[derive(Debug, Clone)]
pub struct IncodeClient {
    http: Client,
    base_url: String,
    flow_id: String,
    client_id: String,
}

impl IncodeClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            UpstreamError::InvalidHeader {
                header: API_KEY_HEADER,
            }
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            flow_id: config.flow_id.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// `POST /omni/start` for the configured flow.
    pub async fn start_session(&self) -> Result<OmniStartResponse, UpstreamError> {
        let endpoint = self.endpoint(START_PATH);
        let body = OmniStartRequest {
            configuration_id: &self.flow_id,
            country_code: WILDCARD_COUNTRY,
            language: SESSION_LANGUAGE,
        };
        let request = self.http.post(&endpoint).json(&body);
        self.execute(Method::POST, endpoint, request).await
    }

    /// `GET /omni/onboarding-url` on behalf of the session owning `token`.
    pub async fn onboarding_url(&self, token: &str) -> Result<OnboardingUrlResponse, UpstreamError> {
        let endpoint = self.endpoint(ONBOARDING_URL_PATH);
        let request = self
            .http
            .get(&endpoint)
            .query(&[("clientId", self.client_id.as_str())])
            .header(HARDWARE_ID_HEADER, token);
        self.execute(Method::GET, endpoint, request).await
    }

    /// `GET /omni/get/score` for `interview_id`, authorised by `token`.
    pub async fn score(
        &self,
        interview_id: &str,
        token: &str,
    ) -> Result<ScoreResponse, UpstreamError> {
        let endpoint = self.endpoint(SCORE_PATH);
        let request = self
            .http
            .get(&endpoint)
            .query(&[("id", interview_id)])
            .header(HARDWARE_ID_HEADER, token);
        self.execute(Method::GET, endpoint, request).await
    }

    /// `GET /omni/get/onboarding/status` for `interview_id`, authorised by `token`.
    pub async fn onboarding_status(
        &self,
        interview_id: &str,
        token: &str,
    ) -> Result<OnboardingStatusResponse, UpstreamError> {
        let endpoint = self.endpoint(ONBOARDING_STATUS_PATH);
        let request = self
            .http
            .get(&endpoint)
            .query(&[("id", interview_id)])
            .header(HARDWARE_ID_HEADER, token);
        self.execute(Method::GET, endpoint, request).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T>(
        &self,
        method: Method,
        endpoint: String,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        info!(%method, %endpoint, "calling incode");

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => {
                return Err(UpstreamError::Transport {
                    method,
                    endpoint,
                    source,
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, %endpoint, %body, "incode rejected request");
            return Err(UpstreamError::Status {
                method,
                endpoint,
                status,
                body,
            });
        }

        match response.json::<T>().await {
            Ok(parsed) => Ok(parsed),
            Err(source) => Err(UpstreamError::Decode {
                method,
                endpoint,
                source,
            }),
        }
    }
}
