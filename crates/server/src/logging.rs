use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "profit_api_server=info,profit_api_core=info";
const DEBUG_FILTER: &str = "profit_api_server=debug,profit_api_core=debug,rocket=info";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> &'static str {
    if debug { DEBUG_FILTER } else { DEFAULT_FILTER }
}

/// Installs the global subscriber. `RUST_LOG` wins over the `debug` default.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    // A subscriber may already be installed by an embedding test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .try_init();
}
