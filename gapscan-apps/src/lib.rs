//! Configuration and wiring of the gapscan node binaries.

mod error;
mod node;
mod node_config;
mod sim;
pub mod utils;

pub use error::*;
pub use node::*;
pub use node_config::*;
pub use sim::*;
