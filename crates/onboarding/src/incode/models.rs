//! Wire shapes for the Omni endpoints. Only the fields the gateway reads are
//! modelled; everything else in the provider's bodies is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OmniStartRequest<'a> {
    pub configuration_id: &'a str,
    pub country_code: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmniStartResponse {
    pub interview_id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnboardingUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreResponse {
    pub overall: OverallScore,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverallScore {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatusResponse {
    pub onboarding_status: String,
}
