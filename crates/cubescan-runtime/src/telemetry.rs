//! Tracing initialisation for the scan pipeline.
//!
//! Call [`init_tracing`] once at process startup.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `CUBESCAN_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global `tracing` subscriber.
///
/// Uses a compact console formatter by default and newline-delimited JSON
/// when `CUBESCAN_LOG_FORMAT=json` is set.  Calling this more than once per
/// process panics in `tracing-subscriber`; call it exactly once from `main`.
pub fn init_tracing() {
    let env_filter = build_filter();
    if use_json() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

fn build_filter() -> EnvFilter {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn use_json() -> bool {
    std::env::var("CUBESCAN_LOG_FORMAT").as_deref() == Ok("json")
}
