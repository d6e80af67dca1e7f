//! Interfaces to the hardware a gapscan node talks to.
//!
//! Every sensor, actuator, and radio is reached through one of the traits in
//! this crate, so the sweep logic can run against real drivers, the dummies
//! below, or the [`LoopbackRadio`] pair in simulation.

mod clients;
mod clocks;
mod detection_flag;
mod error;
mod signal;
mod traits;

pub use clients::*;
pub use clocks::*;
pub use detection_flag::*;
pub use error::*;
pub use signal::*;
pub use traits::*;
