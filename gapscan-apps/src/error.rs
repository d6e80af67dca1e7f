use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("gapscan-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("gapscan-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("gapscan-apps: Invalid config: {}", .0)]
    InvalidConfig(String),
    #[error("gapscan-apps: gapscan-sweep: {:?}", .0)]
    Sweep(#[from] gapscan_sweep::Error),
    #[error("gapscan-apps: gapscan-hal: {:?}", .0)]
    Hal(#[from] gapscan_hal::Error),
}
