//! Console logging for the binaries, filtered by `RUST_LOG`.

use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "refract=info";

/// Install the global tracing subscriber. Call once, at the start of `main`.
pub fn init() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console_layer = fmt::layer()
        .with_ansi(!cfg!(windows))
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true);

    let collector = tracing_subscriber::registry().with(console_layer).with(filter);
    tracing::subscriber::set_global_default(collector)?;

    let log_var = match std::env::var("RUST_LOG") {
        Ok(var) => format!(" with RUST_LOG=\"{}\".", var),
        Err(_) => ".".to_string(),
    };
    tracing::debug!("Logging initiated to console{log_var}");

    Ok(())
}
