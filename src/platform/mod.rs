//! Platform abstraction layer
//!
//! Host-facing glue that keeps the simulation free of platform details:
//! - Frame timestamps to elapsed time
//! - Key events to per-tick input

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Key, Keyboard};
