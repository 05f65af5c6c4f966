//! Peripheral Drivers
//!
//! High-level driver for the RDA5807 FM receiver.
//! Builds on the register image and the I2C bus wrapper.

pub mod rda5807;

pub use rda5807::{Rda5807, RdsLink};
