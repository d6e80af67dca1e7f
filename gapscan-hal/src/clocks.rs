mod dummy_clock;
mod system_clock;

pub use dummy_clock::*;
pub use system_clock::*;
