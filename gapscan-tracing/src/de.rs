//! Deserialize tracing log in JSON format

use serde::Deserialize;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Collects the events emitted by [`Tracing`](crate::Tracing) from a log
/// written by `tracing_subscriber::fmt().json()`.
///
/// Lines of other targets and methods without a log type are skipped.
pub fn from_str(lines: &str) -> Result<Vec<TracingLog>, gapscan_hal::Error> {
    let mut res = vec![];
    for line in lines.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| gapscan_hal::Error::Other(e.into()))?;
        if !matches!(value.get("target"), Some(target) if target == "gapscan_tracing") {
            continue;
        }
        let Some(method) = value
            .get("fields")
            .and_then(|fields| fields.get("method"))
            .and_then(|method| method.as_str())
            .map(str::to_owned)
        else {
            continue;
        };
        let log = match method.as_str() {
            "gapscan_hal::DistanceSensor::read_distance" => {
                TracingLog::ReadDistance(parse(value)?)
            }
            "gapscan_hal::InertialSensor::read_inertial" => {
                TracingLog::ReadInertial(parse(value)?)
            }
            "gapscan_hal::Servo::write_angle" => TracingLog::WriteAngle(parse(value)?),
            "gapscan_hal::RadioTransport::transmit" => TracingLog::Transmit(parse(value)?),
            _ => continue,
        };
        res.push(log);
    }
    Ok(res)
}

fn parse<T: for<'de> Deserialize<'de>>(
    value: serde_json::Value,
) -> Result<T, gapscan_hal::Error> {
    serde_json::from_value(value).map_err(|e| gapscan_hal::Error::Other(e.into()))
}

#[derive(Debug)]
#[non_exhaustive]
pub enum TracingLog {
    /// [`gapscan_hal::DistanceSensor::read_distance`]
    ReadDistance(ReadDistanceLog),
    /// [`gapscan_hal::InertialSensor::read_inertial`]
    ReadInertial(ReadInertialLog),
    /// [`gapscan_hal::Servo::write_angle`]
    WriteAngle(WriteAngleLog),
    /// [`gapscan_hal::RadioTransport::transmit`]
    Transmit(TransmitLog),
}

#[derive(Deserialize)]
struct RawTracingLog<Fields> {
    timestamp: Timestamp,
    fields: Fields,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct ReadDistanceLog {
    pub timestamp: Timestamp,
    pub distance: i16,
}

impl<'de> Deserialize<'de> for ReadDistanceLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            distance: i16,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            distance: v.fields.distance,
        })
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct ReadInertialLog {
    pub timestamp: Timestamp,
    pub reading: gapscan_hal::InertialReading,
}

impl<'de> Deserialize<'de> for ReadInertialLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            accel_x: f32,
            accel_y: f32,
            accel_z: f32,
            gyro_x: f32,
            gyro_y: f32,
            gyro_z: f32,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        let f = v.fields;
        Ok(Self {
            timestamp: v.timestamp,
            reading: gapscan_hal::InertialReading::new(
                [f.accel_x, f.accel_y, f.accel_z],
                [f.gyro_x, f.gyro_y, f.gyro_z],
            ),
        })
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct WriteAngleLog {
    pub timestamp: Timestamp,
    pub degrees: i16,
}

impl<'de> Deserialize<'de> for WriteAngleLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            degrees: i16,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            degrees: v.fields.degrees,
        })
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct TransmitLog {
    pub timestamp: Timestamp,
    pub len: usize,
    pub ok: bool,
}

impl<'de> Deserialize<'de> for TransmitLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            len: usize,
            ok: bool,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            len: v.fields.len,
            ok: v.fields.ok,
        })
    }
}
