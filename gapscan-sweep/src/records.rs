//! JSON records exchanged by the reporting nodes.
//!
//! Key names are part of the wire format and match what the ground station
//! tooling reads.

use serde::{Deserialize, Serialize};

use crate::sample::SweepSample;

/// One instantaneous reading of every sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(rename = "Distance")]
    pub distance: i16,
    #[serde(rename = "Temperature")]
    pub temperature: f32,
    /// Pascal.
    #[serde(rename = "Pressure")]
    pub pressure: f32,
    #[serde(rename = "Altitude")]
    pub altitude: f32,
    #[serde(rename = "Acceleration_X")]
    pub acceleration_x: f32,
    #[serde(rename = "Acceleration_Y")]
    pub acceleration_y: f32,
    #[serde(rename = "Acceleration_Z")]
    pub acceleration_z: f32,
    #[serde(rename = "Rotation_X")]
    pub rotation_x: f32,
    #[serde(rename = "Rotation_Y")]
    pub rotation_y: f32,
    #[serde(rename = "Rotation_Z")]
    pub rotation_z: f32,
}

/// One sweep sample together with its sweep context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: u32,
    #[serde(rename = "Distance")]
    pub distance: i16,
    #[serde(rename = "Temp")]
    pub temperature: f32,
    #[serde(rename = "Pressure")]
    pub pressure: f32,
    #[serde(rename = "Alti")]
    pub altitude: f32,
    #[serde(rename = "Accel_X")]
    pub accel_x: f32,
    #[serde(rename = "Accel_Y")]
    pub accel_y: f32,
    #[serde(rename = "Accel_Z")]
    pub accel_z: f32,
    #[serde(rename = "Rotat_X")]
    pub rotation_x: f32,
    #[serde(rename = "Rotat_Y")]
    pub rotation_y: f32,
    #[serde(rename = "Rotat_Z")]
    pub rotation_z: f32,
    #[serde(rename = "Angle")]
    pub angle: i16,
    /// Sequence number of the sweep the sample belongs to.
    #[serde(rename = "Sweep")]
    pub sweep: u32,
    #[serde(rename = "Human")]
    pub human: bool,
}

/// Sweep-wide values attached to every [`SampleRecord`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleContext {
    pub timestamp: u32,
    pub temperature: f32,
    pub pressure: f32,
    pub sweep: u32,
    pub human: bool,
}

impl SampleRecord {
    pub fn new(sample: &SweepSample, context: SampleContext) -> Self {
        Self {
            timestamp: context.timestamp,
            distance: sample.distance,
            temperature: context.temperature,
            pressure: context.pressure,
            altitude: sample.altitude,
            accel_x: sample.accel[0],
            accel_y: sample.accel[1],
            accel_z: sample.accel[2],
            rotation_x: sample.gyro[0],
            rotation_y: sample.gyro[1],
            rotation_z: sample.gyro[2],
            angle: sample.angle,
            sweep: context.sweep,
            human: context.human,
        }
    }
}
