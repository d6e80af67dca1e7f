use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{codec::BinaryLayout, gap::GapDetector, Error};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Identifies this node in transmitted packets.
    #[serde(default = "default_device_id")]
    pub device_id: i8,
    /// Degrees between two regular steps.
    #[serde(default = "default_angle_step")]
    pub angle_step: i16,
    /// The sweep ends once the servo would move to this angle or beyond.
    #[serde(default = "default_max_angle")]
    pub max_angle: i16,
    /// Slots in the sweep buffer, retrace samples included.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Distance jumps (in cm) larger than this are treated as edges.
    #[serde(default = "default_min_passable_gap")]
    pub min_passable_gap: i16,
    /// Smallest retrace correction (in degrees) worth moving the servo for.
    #[serde(default = "default_min_angle_change")]
    pub min_angle_change: i16,
    /// Time given to the servo to reach a commanded angle.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Pacing of the scheduler loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Sea level pressure (in hPa) used for altitude.
    #[serde(default = "default_sea_level_hpa")]
    pub sea_level_hpa: f32,
    #[serde(default = "default_true")]
    pub read_altitude: bool,
    #[serde(default)]
    pub layout: BinaryLayout,
}

fn default_device_id() -> i8 {
    1
}

fn default_angle_step() -> i16 {
    5
}

fn default_max_angle() -> i16 {
    180
}

fn default_capacity() -> usize {
    45
}

fn default_min_passable_gap() -> i16 {
    20
}

fn default_min_angle_change() -> i16 {
    2
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_tick_interval_ms() -> u64 {
    20
}

fn default_sea_level_hpa() -> f32 {
    1013.25
}

fn default_true() -> bool {
    true
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            angle_step: default_angle_step(),
            max_angle: default_max_angle(),
            capacity: default_capacity(),
            min_passable_gap: default_min_passable_gap(),
            min_angle_change: default_min_angle_change(),
            settle_delay_ms: default_settle_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            sea_level_hpa: default_sea_level_hpa(),
            read_altitude: default_true(),
            layout: BinaryLayout::default(),
        }
    }
}

impl SweepConfig {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let s = fs_err::read_to_string(path)
            .map_err(|e| Error::NoFile(path.to_owned(), e))?;
        Self::from_toml_str(&s, path)
    }

    /// `path` is only used in error messages.
    pub fn from_toml_str(s: &str, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.angle_step <= 0 {
            return Err(Error::InvalidConfig(format!(
                "angle_step must be positive, got {}",
                self.angle_step
            )));
        }
        if !(1..=360).contains(&self.max_angle) {
            return Err(Error::InvalidConfig(format!(
                "max_angle must be in 1..=360, got {}",
                self.max_angle
            )));
        }
        if self.capacity == 0 || self.capacity > usize::from(u16::MAX) {
            return Err(Error::InvalidConfig(format!(
                "capacity must be in 1..={}, got {}",
                u16::MAX,
                self.capacity
            )));
        }
        if self.min_passable_gap < 0 || self.min_angle_change < 0 {
            return Err(Error::InvalidConfig(format!(
                "thresholds must not be negative, got gap {} and angle change {}",
                self.min_passable_gap, self.min_angle_change
            )));
        }
        if !(self.sea_level_hpa.is_finite() && self.sea_level_hpa > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "sea_level_hpa must be positive, got {}",
                self.sea_level_hpa
            )));
        }
        Ok(())
    }

    /// Regular steps of a full sweep.
    pub fn steps_per_sweep(&self) -> usize {
        let step = i32::from(self.angle_step.max(1));
        ((i32::from(self.max_angle) + step - 1) / step) as usize
    }

    pub fn gap_detector(&self) -> GapDetector {
        GapDetector::new(self.min_passable_gap, self.min_angle_change)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
