use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "dialogcurator=info";

/// Installs the stderr subscriber for the binaries. `RUST_LOG` overrides the
/// default filter; `verbose` raises the crate to debug.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "dialogcurator=debug"
    } else {
        DEFAULT_FILTER
    };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
