//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; binaries and test harnesses
//! call [`init_tracing`] once to decide where they go.

use std::str::FromStr;

use slotwise_domain::SlotwiseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, compact lines for terminals.
    #[default]
    Pretty,
    /// One JSON object per line, span fields flattened.
    Json,
}

impl FromStr for LogFormat {
    type Err = SlotwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(SlotwiseError::Config(format!("Unknown log format: {other}"))),
        }
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed, in which case
/// the existing one is left untouched.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = match format {
        LogFormat::Pretty => fmt::layer().with_target(false).compact().boxed(),
        LogFormat::Json => fmt::layer().json().flatten_event(true).with_current_span(true).boxed(),
    };

    tracing_subscriber::registry().with(layer.with_filter(filter)).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_known_names() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!(matches!("xml".parse::<LogFormat>(), Err(SlotwiseError::Config(_))));
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_tracing(LogFormat::Pretty);
        assert!(!init_tracing(LogFormat::Json));
    }
}
