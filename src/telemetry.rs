use tracing_subscriber::EnvFilter;

use crate::config::AzMonConfig;

/// Installs the fmt subscriber. `RUST_LOG` wins over the configured filter.
///
/// Returns false when a global subscriber was already installed.
pub fn init_tracing(config: &AzMonConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_target(false)
        .try_init()
        .is_ok()
}
