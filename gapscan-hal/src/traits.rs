mod barometer;
mod clock;
mod distance_sensor;
mod inertial_sensor;
mod radio_transport;
mod servo;

pub use barometer::*;
pub use clock::*;
pub use distance_sensor::*;
pub use inertial_sensor::*;
pub use radio_transport::*;
pub use servo::*;
