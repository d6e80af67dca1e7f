//! Sweep-and-retrace scanning for a gapscan node.
//!
//! [`SweepController`] moves a distance sensor across an arc one step per
//! tick, retraces distance edges, and sends each finished sweep as one
//! [`PacketCodec`] packet. [`SweepReceiver`] is the other end of the link.

mod buffer;
mod codec;
mod config;
mod controller;
mod detection;
mod error;
mod fusion;
mod gap;
mod hardware;
mod reading;
mod receiver;
mod records;
mod sample;

pub use buffer::*;
pub use codec::*;
pub use config::*;
pub use controller::*;
pub use detection::*;
pub use error::*;
pub use fusion::*;
pub use gap::*;
pub use hardware::*;
pub use reading::*;
pub use receiver::*;
pub use records::*;
pub use sample::*;
