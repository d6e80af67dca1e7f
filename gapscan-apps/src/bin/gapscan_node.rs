use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gapscan_apps::{spawn_detection_listener, utils, NodeConfig, ReportNode, SweepNode};
use gapscan_hal::DetectionFlag;
use schemars::schema_for;
use tracing::{error, info};

/// Simulated gapscan sentry node.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Args {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[clap(long)]
    show_default_config: bool,
    /// Camera link to read person detection messages from.
    #[clap(long, value_parser)]
    detection_input: Option<PathBuf>,
    /// Directory for the JSON trace of hardware calls.
    #[clap(long, value_parser)]
    trace_dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep and send one packet per sweep (default).
    Sweep {
        /// Stop after this many sweeps.
        #[clap(long)]
        sweeps: Option<u32>,
    },
    /// Send single readings as JSON.
    Report {
        /// Stop after this many readings.
        #[clap(long)]
        count: Option<u32>,
    },
    /// Prints the JSON schema of the setting file.
    Schema,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = utils::init_tracing(args.trace_dir.as_deref());
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&NodeConfig::default())?);
        return Ok(());
    }

    let config_path = utils::get_node_config_path(args.config_path);
    let config = utils::resolve_node_config(config_path.as_deref())?;

    let detection = DetectionFlag::new();
    if let Some(path) = &args.detection_input {
        // Detached, the link is followed until EOF or exit.
        let _handle = spawn_detection_listener(path, detection.clone())?;
    }

    match args.command.unwrap_or(Command::Sweep { sweeps: None }) {
        Command::Sweep { sweeps } => {
            let mut node = SweepNode::new(&config, detection).inspect_err(|e| {
                error!("initialization failed: {e}");
            })?;
            node.run(sweeps);
        }
        Command::Report { count } => {
            let mut node = ReportNode::new(&config).inspect_err(|e| {
                error!("initialization failed: {e}");
            })?;
            node.run(count);
        }
        Command::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&schema_for!(NodeConfig))?
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let bin = env!("CARGO_BIN_NAME");
        assert!(Args::try_parse_from([bin]).is_ok());
        assert!(Args::try_parse_from([bin, "--show-default-config"]).is_ok());
        assert!(
            Args::try_parse_from([bin, "--config-path", "path", "sweep", "--sweeps", "3"]).is_ok()
        );
        assert!(Args::try_parse_from([bin, "report", "--count", "1"]).is_ok());
        assert!(Args::try_parse_from([bin, "schema"]).is_ok());
        assert!(Args::try_parse_from([bin, "sweep", "--sweeps", "x"]).is_err());
    }
}
