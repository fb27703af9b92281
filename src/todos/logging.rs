use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies, raised to
/// `debug` for this crate when `verbose` is on. Calling it twice is harmless.
pub fn init(default_filter: &str, verbose: bool) {
    let fallback = if verbose {
        format!("{},todos=debug", default_filter)
    } else {
        default_filter.to_string()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
