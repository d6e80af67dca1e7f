//! Person detection messages from the camera node.
//!
//! The camera writes one JSON object per line over a serial link, e.g.
//! `{"detected":1,"personTimestamp":1700000000}`.

use std::io::{self, BufRead};

use gapscan_hal::DetectionFlag;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{codec::PacketCodec, error::DecodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionMessage {
    /// Non-zero when a person is in view.
    pub detected: u8,
    #[serde(rename = "personTimestamp")]
    pub person_timestamp: u64,
}

impl DetectionMessage {
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        PacketCodec::decode_json(line.trim().as_bytes())
    }

    pub fn is_detected(&self) -> bool {
        self.detected != 0
    }
}

/// Keeps a [`DetectionFlag`] up to date from the camera link.
#[derive(Debug, Clone)]
pub struct DetectionListener {
    flag: DetectionFlag,
}

impl DetectionListener {
    pub fn new(flag: DetectionFlag) -> Self {
        Self { flag }
    }

    /// Reads messages until EOF and returns how many were applied.
    ///
    /// Malformed lines are logged and skipped.
    pub fn run<R: BufRead>(&self, reader: R) -> io::Result<usize> {
        let mut applied = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match DetectionMessage::parse(&line) {
                Ok(message) => {
                    debug!(
                        "person detected {} at {}",
                        message.is_detected(),
                        message.person_timestamp
                    );
                    self.flag.set(message.is_detected());
                    applied += 1;
                }
                Err(e) => warn!("ignoring detection line {line:?}: {e}"),
            }
        }
        Ok(applied)
    }
}
