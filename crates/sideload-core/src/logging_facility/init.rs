//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level
    Development,
    /// JSON lines, info level
    Production,
    /// Registry only; tests attach a capture layer instead
    Test,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "sideload=debug,sideload_core=debug",
            Profile::Production | Profile::Test => "sideload=info,sideload_core=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call installs a subscriber; later calls are no-ops.
/// `RUST_LOG` takes precedence over the profile's default filter.
///
/// ```
/// use sideload_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .ok();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .try_init()
                    .ok();
            }
            Profile::Test => {
                tracing_subscriber::registry().try_init().ok();
            }
        }
    });
}
