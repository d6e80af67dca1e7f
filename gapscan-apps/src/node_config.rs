use std::path::{Path, PathBuf};

use gapscan_sweep::SweepConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Section of the arc where the simulated sensor sees further than the wall.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Doorway {
    /// Servo degrees, inclusive.
    pub from: i16,
    /// Servo degrees, inclusive.
    pub to: i16,
    /// Distance (in cm) seen through the doorway.
    pub distance: i16,
}

/// Room seen by the simulated distance sensor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    /// Distance (in cm) to the wall outside doorways.
    #[serde(default = "default_wall_distance")]
    pub wall_distance: i16,
    /// Readings vary uniformly by up to this many cm.
    #[serde(default = "default_noise")]
    pub noise: i16,
    /// Chance that a read is not acknowledged.
    #[serde(default)]
    pub dropout_probability: f64,
    /// Constant yaw rate (in rad/s) of the chassis.
    #[serde(default)]
    pub yaw_rate: f32,
    #[serde(default = "default_doorways")]
    pub doorways: Vec<Doorway>,
}

fn default_wall_distance() -> i16 {
    150
}

fn default_noise() -> i16 {
    2
}

fn default_doorways() -> Vec<Doorway> {
    vec![Doorway {
        from: 60,
        to: 85,
        distance: 320,
    }]
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            wall_distance: default_wall_distance(),
            noise: default_noise(),
            dropout_probability: 0.0,
            yaw_rate: 0.0,
            doorways: default_doorways(),
        }
    }
}

impl RoomConfig {
    /// Noise-free distance at `angle`.
    pub fn distance_at(&self, angle: i16) -> i16 {
        self.doorways
            .iter()
            .find(|d| (d.from..=d.to).contains(&angle))
            .map_or(self.wall_distance, |d| d.distance)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Seed of the simulated sensor noise.
    #[serde(default)]
    pub seed: u64,
    /// Advance a simulated clock instead of sleeping.
    #[serde(default)]
    pub simulated_time: bool,
    /// Emit a trace event for every hardware call.
    #[serde(default)]
    pub trace_hardware: bool,
    /// Pause between two readings in report mode.
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
    /// Largest packet the radio link carries.
    #[serde(default = "default_max_packet_len")]
    pub max_packet_len: usize,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub room: RoomConfig,
}

fn default_report_interval_ms() -> u64 {
    1000
}

fn default_max_packet_len() -> usize {
    gapscan_hal::DEFAULT_MAX_PACKET_LEN
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            simulated_time: false,
            trace_hardware: false,
            report_interval_ms: default_report_interval_ms(),
            max_packet_len: default_max_packet_len(),
            sweep: SweepConfig::default(),
            room: RoomConfig::default(),
        }
    }
}

impl NodeConfig {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        Self::from_str(
            &fs_err::read_to_string(path).map_err(|e| Error::NoFile(path.to_owned(), e))?,
            path,
        )
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.sweep.validate()?;
        if self.max_packet_len == 0 {
            return Err(Error::InvalidConfig("max_packet_len must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.room.dropout_probability) {
            return Err(Error::InvalidConfig(format!(
                "room.dropout_probability must be in 0.0..=1.0, got {}",
                self.room.dropout_probability
            )));
        }
        if self.room.noise < 0 || self.room.wall_distance <= 0 {
            return Err(Error::InvalidConfig(format!(
                "room.noise must not be negative and room.wall_distance must be positive, got {} and {}",
                self.room.noise, self.room.wall_distance
            )));
        }
        if let Some(d) = self.room.doorways.iter().find(|d| d.from > d.to) {
            return Err(Error::InvalidConfig(format!(
                "doorway from {} to {} is empty",
                d.from, d.to
            )));
        }
        Ok(())
    }
}
