//! Hardware Abstraction Layer
//!
//! Thin wrappers over `embedded-hal` traits.

pub mod i2c;
