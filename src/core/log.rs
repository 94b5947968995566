use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().compact())
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}

/// Filter from explicit `RUST_LOG` directives, falling back to the
/// verbosity-based default when they are absent or unparseable.
fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if verbose { "info,nbrates=debug" } else { "info" };

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}
