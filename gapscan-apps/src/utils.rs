use std::path::{Path, PathBuf};

use tracing::{debug, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Targets, fmt, prelude::*, EnvFilter};

use crate::{Error, NodeConfig};

const GAPSCAN_NODE_CONFIG_ENV_NAME: &str = "GAPSCAN_NODE_CONFIG_PATH";

/// Get node config path from input or env GAPSCAN_NODE_CONFIG_PATH
pub fn get_node_config_path(config: Option<PathBuf>) -> Option<PathBuf> {
    if config.is_some() {
        config
    } else {
        std::env::var(GAPSCAN_NODE_CONFIG_ENV_NAME)
            .map(|s| {
                warn!("### ENV VAR {} is used ###", s);
                PathBuf::from(s)
            })
            .ok()
    }
}

/// Loads the config at `path`, or the default config if there is none.
pub fn resolve_node_config(path: Option<&Path>) -> Result<NodeConfig, Error> {
    let config = match path {
        Some(path) => NodeConfig::new(path)?,
        None => NodeConfig::default(),
    };
    debug!(?config);
    Ok(config)
}

/// Logs to stderr, filtered by `RUST_LOG` (`info` if unset).
///
/// With `trace_dir`, hardware trace events are also written as JSON to daily
/// `trace.*` files there. Keep the returned guard alive until exit, dropping
/// it flushes the file.
pub fn init_tracing(trace_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file, guard) = match trace_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "trace"));
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(false)
                .with_filter(Targets::new().with_target("gapscan_tracing", Level::TRACE));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(stderr).with(file).init();
    guard
}
