#![allow(dead_code)]

use std::time::Duration;

use onboarding::config::ProviderConfig;
use onboarding::incode::IncodeClient;
use onboarding::OnboardingGateway;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const FLOW_ID: &str = "flow-0001";
pub const CLIENT_ID: &str = "demo-client";
pub const ADMIN_TOKEN: &str = "admin-token-xyz";

pub fn provider_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig {
        api_url: format!("{}/", server.uri()),
        api_key: API_KEY.to_string(),
        flow_id: FLOW_ID.to_string(),
        client_id: CLIENT_ID.to_string(),
        admin_token: ADMIN_TOKEN.to_string(),
        timeout: None,
    }
}

pub fn client(server: &MockServer) -> IncodeClient {
    IncodeClient::new(&provider_config(server)).expect("client builds")
}

pub fn gateway(server: &MockServer) -> OnboardingGateway {
    OnboardingGateway::from_config(&provider_config(server)).expect("gateway builds")
}

pub fn gateway_with_timeout(server: &MockServer, timeout: Duration) -> OnboardingGateway {
    let mut config = provider_config(server);
    config.timeout = Some(timeout);
    OnboardingGateway::from_config(&config).expect("gateway builds")
}
