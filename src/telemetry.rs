//! Tracing subscriber setup
//!
//! The crate only emits `tracing` events; installing a subscriber is the
//! host application's call. This helper covers the common case.
//!
//! ```rust,ignore
//! use llm_providers::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! init_subscriber(SubscriberConfig {
//!     log_level: tracing::Level::DEBUG,
//!     output_format: OutputFormat::Json,
//! });
//! ```

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
        }
    }
}

/// Install a global `fmt` subscriber filtered to this crate's events.
///
/// Returns `false` when a subscriber (or `log` logger) was already installed,
/// in which case the existing one is left in place.
pub fn init_subscriber(config: SubscriberConfig) -> bool {
    let filter = filter_directive(&config);

    let init_result = match config.output_format {
        OutputFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init(),
        OutputFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    init_result.is_ok()
}

/// `EnvFilter` directive limiting output to this crate at the configured level.
fn filter_directive(config: &SubscriberConfig) -> String {
    format!(
        "llm_providers={}",
        config.log_level.as_str().to_lowercase()
    )
}

// Installing a global subscriber here would race `#[traced_test]` tests in the
// same binary; `tests/telemetry_test.rs` covers `init_subscriber` on its own.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_targets_this_crate() {
        assert_eq!(
            filter_directive(&SubscriberConfig::default()),
            "llm_providers=info"
        );
        let debug = SubscriberConfig {
            log_level: tracing::Level::DEBUG,
            output_format: OutputFormat::Json,
        };
        assert_eq!(filter_directive(&debug), "llm_providers=debug");
    }
}
