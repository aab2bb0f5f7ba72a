use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("failed to create log filter")?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}
