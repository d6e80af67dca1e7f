use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("gapscan-sweep: gapscan-hal: {:?}", .0)]
    Hal(#[from] gapscan_hal::Error),
    #[error("gapscan-sweep: {}", .0)]
    Decode(#[from] DecodeError),
    #[error("gapscan-sweep: {}", .0)]
    Codec(#[from] CodecError),
    #[error("gapscan-sweep: Invalid config: {}", .0)]
    InvalidConfig(String),
    #[error("gapscan-sweep: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("gapscan-sweep: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
}

/// A received packet that cannot be turned back into a sweep or a reading.
///
/// Nothing of a packet that fails to decode is applied.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("packet of {} bytes is shorter than the {} byte header", actual, header)]
    TooShort { header: usize, actual: usize },
    #[error("bad magic {:02x?}", .0)]
    BadMagic([u8; 2]),
    #[error("unsupported packet version {}", .0)]
    UnsupportedVersion(u8),
    #[error("unknown layout {}", .0)]
    UnknownLayout(u8),
    #[error("capacity 0 in header")]
    ZeroCapacity,
    #[error("packet is {} bytes, {} expected for its header", actual, expected)]
    LengthMismatch { expected: usize, actual: usize },
    #[error("byte {:#04x} at offset {} is not a bool", value, offset)]
    InvalidBool { offset: usize, value: u8 },
    #[error("valid count {} is larger than capacity {}", valid_count, capacity)]
    ValidCountOutOfRange { valid_count: usize, capacity: usize },
    #[error("json: {}", .0)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    #[error("buffer holds {} of {} slots, pad it before encoding", len, capacity)]
    NotPadded { len: usize, capacity: usize },
    #[error("capacity {} does not fit the header", .0)]
    CapacityTooLarge(usize),
    #[error("json: {}", .0)]
    Json(String),
}
