//! Process-wide tracing setup.
//!
//! Everything is written to stdout. Received webhooks are always logged:
//! their target is pinned at `info` on top of whatever filter applies.

use crate::config::TelemetryConfig;
use crate::gateway::WEBHOOK_LOG_TARGET;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("unable to install subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// `RUST_LOG` wins when it parses; otherwise the configured level is used.
pub(crate) fn build_filter(
    rust_log: Option<&str>,
    log_level: &str,
) -> Result<EnvFilter, TelemetryError> {
    let base = match rust_log.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => EnvFilter::try_new(value).ok(),
        None => None,
    };
    let base = match base {
        Some(filter) => filter,
        None => EnvFilter::try_new(log_level).map_err(|source| TelemetryError::Filter {
            value: log_level.to_string(),
            source,
        })?,
    };

    let webhook = format!("{WEBHOOK_LOG_TARGET}=info");
    let directive: Directive = webhook
        .parse()
        .map_err(|source| TelemetryError::Filter {
            value: webhook.clone(),
            source,
        })?;
    Ok(base.add_directive(directive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn webhook_target_survives_a_strict_level() {
        let filter = build_filter(None, "warn").expect("filter builds");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn rust_log_takes_precedence_over_configured_level() {
        let filter = build_filter(Some("debug"), "error").expect("filter builds");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
