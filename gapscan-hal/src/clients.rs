mod dummy_barometer;
mod dummy_distance_sensor;
mod dummy_inertial_sensor;
mod dummy_radio;
mod dummy_servo;
mod loopback_radio;

pub use dummy_barometer::*;
pub use dummy_distance_sensor::*;
pub use dummy_inertial_sensor::*;
pub use dummy_radio::*;
pub use dummy_servo::*;
pub use loopback_radio::*;

/// Largest payload a LoRa packet carries.
pub const DEFAULT_MAX_PACKET_LEN: usize = 255;
/// Data rate reported by the simulated radios.
pub const DEFAULT_BITS_PER_SECOND: f32 = 5469.0;
