//! HTTP client for the Incode Omni onboarding API.

mod client;
mod error;
pub mod models;

pub use client::{
    IncodeClient, API_KEY_HEADER, API_VERSION, API_VERSION_HEADER, HARDWARE_ID_HEADER,
};
pub use error::UpstreamError;
