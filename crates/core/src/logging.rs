//! Logging and observability
//!
//! Structured logging via tracing, with either text or JSON output selected
//! at runtime. All output goes to stderr so stdout stays reserved for report
//! output.
//!
//! Environment variables:
//!
//! * `KILN_LOG` - logging filter (e.g. `debug`, `kiln_core=trace`)
//! * `RUST_LOG` - standard fallback filter
//! * `KILN_LOG_FORMAT` - `json` for structured output, anything else for text

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// `format` may be `Some("json")` for structured output; `None` falls back to
/// the `KILN_LOG_FORMAT` environment variable and then to text. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init(format: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter();

        let env_format = std::env::var("KILN_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter from `KILN_LOG`, falling back to `RUST_LOG`, then `info`
fn create_env_filter() -> EnvFilter {
    if let Ok(kiln_log) = std::env::var("KILN_LOG") {
        EnvFilter::try_new(&kiln_log).unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid KILN_LOG specification '{}', using default 'info'",
                kiln_log
            );
            EnvFilter::new("info")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Check if logging has been initialized
///
/// Primarily useful for tests that need to know whether the subscriber has
/// already been set up.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize tests that touch the global subscriber and env vars.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_init_multiple_calls_safe() {
        let _guard = TEST_MUTEX.lock().unwrap();

        assert!(init(None).is_ok());
        assert!(init(Some("json")).is_ok());
        assert!(init(Some("text")).is_ok());
    }

    #[test]
    fn test_is_initialized_after_init() {
        let _guard = TEST_MUTEX.lock().unwrap();

        let _ = init(None);
        assert!(is_initialized());
    }

    #[test]
    fn test_env_filter_with_env_vars() {
        let _guard = TEST_MUTEX.lock().unwrap();

        std::env::set_var("KILN_LOG", "trace");
        let _filter = create_env_filter();
        std::env::remove_var("KILN_LOG");

        std::env::set_var("KILN_LOG", "not a valid ((filter");
        let _filter = create_env_filter();
        std::env::remove_var("KILN_LOG");
    }
}
