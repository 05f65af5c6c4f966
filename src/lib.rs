//! RDA5807 FM Receiver Library
//!
//! This library drives the RDA5807 family of single-chip FM broadcast
//! receivers over I2C and decodes the RDS/RBDS data they deliver. It is
//! `no_std` and works with any blocking [`embedded_hal::i2c::I2c`] bus.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DRIVER LAYER                            │
//! │  Rda5807: sync engine  │  tune sequence  │  RdsLink          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PURE CORE                                │
//! │  RegisterImage / Shadow  │  Tuning math  │  RDS decoder      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         HAL                                  │
//! │  RdaBus: 0x10 sequential block  │  0x11 random access        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   embedded-hal 1.0 I2C                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Local first**: setters change the register image only; explicit
//!   sync operations move data over the bus
//! - **Type-driven design**: field encodings are enums and newtypes
//! - **No unsafe code**
//! - **Functional core, imperative shell**: tuning arithmetic and RDS
//!   decoding never touch the bus
//! - **Explicit error handling**: all bus operations return `Result`

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

/// Hardware Abstraction Layer
///
/// I2C access paths of the RDA5807.
pub mod hal;

/// Peripheral Drivers
///
/// The RDA5807 driver and its RDS handle.
pub mod drivers;

/// Register image, named bitfields and the shadow image
pub mod registers;

/// Radio Control Logic
///
/// Frequency resolution and seek/tune status.
pub mod radio;

/// Radio Data System decoding
pub mod rds;

/// Driver errors
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use config::Config;
pub use drivers::{Rda5807, RdsLink};
pub use error::{DriverResult, Error};

/// Prelude module for common imports
pub mod prelude {

    pub use crate::config::Config;
    pub use crate::drivers::{Rda5807, RdsLink};
    pub use crate::error::{DriverResult, Error};
    pub use crate::radio::tuning::{SeekStatus, TuneTarget};
    pub use crate::rds::{GroupType, GroupVersion, RdsDecoder, RdsGroup};
    pub use crate::registers::Register;
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::i2c::I2c;
}
