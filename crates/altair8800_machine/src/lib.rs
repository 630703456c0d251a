//! Altair 8800 machine layer.
//!
//! Wraps the `altair8800_cpu` core with the hardware a minimal Altair
//! needs to talk to the world: one channel of the 88-2SIO serial board
//! as the console, and the front-panel sense switches. Guest images
//! (a monitor, CP/M pieces, test programs) are loaded as raw bytes and
//! exchange console traffic as byte streams.

pub mod machine;
pub mod sio;

pub use machine::{Altair, AltairIo, SENSE_SWITCH_PORT};
pub use sio::{Sio, SIO_DATA_PORT, SIO_STATUS_PORT};
