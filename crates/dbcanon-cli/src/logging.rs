//! Logging setup
//!
//! Logs go to stderr so that scripts and snapshots written to stdout stay
//! machine-readable. `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn,dbcanon=info,dbcanon_core=info,dbcanon_driver_mysql=info";
const VERBOSE_FILTER: &str = "info,dbcanon=debug,dbcanon_core=debug,dbcanon_driver_mysql=debug";

fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

pub fn init(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()?;

    tracing::debug!(verbose, "logging initialized");
    Ok(())
}
