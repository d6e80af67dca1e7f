use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("gapscan-hal: Sensor {} is unavailable", sensor)]
    SensorUnavailable { sensor: String },
    #[error("gapscan-hal: Radio failed, code {}", code)]
    Radio { code: i16 },
    #[error("gapscan-hal: Failed to initialize {} : {}", device, message)]
    Initialization { device: String, message: String },
    #[error("gapscan-hal: Transmit: {}", .0)]
    Transmit(#[from] TransmitError),
    #[error("gapscan-hal: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn sensor_unavailable(sensor: impl Into<String>) -> Self {
        Self::SensorUnavailable {
            sensor: sensor.into(),
        }
    }

    pub fn initialization(device: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Initialization {
            device: device.into(),
            message: message.into(),
        }
    }
}

/// Why a radio transmission did not go out.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    #[error("packet of {} bytes is longer than {} bytes", len, max)]
    TooLong { len: usize, max: usize },
    #[error("timeout while transmitting")]
    Timeout,
    #[error("failed, code {}", .0)]
    Other(i16),
}
