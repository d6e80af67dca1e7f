// ```
// cargo run -p gapscan-apps --bin gapscan-node -- --trace-dir ./logs \
//     --config-path ./gapscan-apps/config/fine_sweep_config.toml sweep --sweeps 2
// cargo run -p gapscan-apps --bin gapscan-replay -- ./logs
// ```

use std::{ffi::OsStr, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use fs_err as fs;
use gapscan_tracing::de::TracingLog;

/// Summarizes the hardware trace written by gapscan-node --trace-dir.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"))]
struct Opt {
    /// Directory holding the trace.* files.
    #[clap(value_parser)]
    log_dir: PathBuf,
}

#[derive(Debug, Default)]
struct Replay {
    distance_reads: usize,
    inertial_reads: usize,
    servo_writes: usize,
    transmissions: usize,
    failed_transmissions: usize,
    bytes_sent: usize,
}

impl Replay {
    fn push(&mut self, log: &TracingLog) {
        match log {
            TracingLog::ReadDistance(_) => self.distance_reads += 1,
            TracingLog::ReadInertial(_) => self.inertial_reads += 1,
            TracingLog::WriteAngle(_) => self.servo_writes += 1,
            TracingLog::Transmit(log) => {
                self.transmissions += 1;
                if log.ok {
                    self.bytes_sent += log.len;
                } else {
                    self.failed_transmissions += 1;
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let opt = Opt::parse();

    let mut replay = Replay::default();
    for e in fs::read_dir(&opt.log_dir)?.filter_map(Result::ok) {
        let p = e.path();
        let Some(name) = p.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        if !name.starts_with("trace.") {
            continue;
        }
        for log in gapscan_tracing::de::from_str(&fs::read_to_string(&p)?)? {
            replay.push(&log);
        }
    }
    println!("{replay:#?}");
    Ok(())
}
