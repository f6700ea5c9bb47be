//! Logging configuration using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// HTTP internals are only interesting when something is broken
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// Initialize the logging system. Logs go to stderr so stdout stays usable
/// for `--json` output.
pub fn init(verbose: bool, json: bool) -> anyhow::Result<()> {
    let filter = build_filter(verbose, std::env::var("RUST_LOG").ok().as_deref())?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

/// `--verbose` wins over `RUST_LOG`, which wins over the `info` default
fn build_filter(verbose: bool, env: Option<&str>) -> anyhow::Result<EnvFilter> {
    let directives = match env {
        _ if verbose => format!("debug,{QUIET_DEPENDENCIES}"),
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => format!("info,{QUIET_DEPENDENCIES}"),
    };

    Ok(EnvFilter::try_new(directives)?)
}
