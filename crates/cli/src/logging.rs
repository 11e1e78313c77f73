//! Tracing setup for the CLI.
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.
//! The level comes from `RUST_LOG` and defaults to `warn`.

use std::sync::Once;

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize the global tracing subscriber. Subsequent calls are ignored.
pub fn init_tracing(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        match format {
            LogFormat::Text => {
                let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
                tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
            }
            LogFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true);
                tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
            }
        }

        tracing::debug!(?format, "tracing initialized");
    });
}
