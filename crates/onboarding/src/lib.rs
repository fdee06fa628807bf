//! Core of the onboarding gateway: configuration, the Incode Omni client and
//! the request/response reshaping the HTTP service exposes.

pub mod config;
pub mod error;
pub mod gateway;
pub mod incode;
pub mod telemetry;

pub use gateway::OnboardingGateway;
