//! Driver configuration and hardware constants
//!
//! This module defines compile-time constants for the RDA5807 bus interface
//! and the runtime [`Config`] handed to the driver at construction.

/// I2C address used for sequential access (register block 02..08 on write,
/// 0A..0F on read)
pub const SEQUENTIAL_I2C_ADDR: u8 = 0x10;

/// I2C address used for random access (register index byte, then data)
pub const RANDOM_ACCESS_I2C_ADDR: u8 = 0x11;

/// Maximum I2C clock supported by the receiver, for configuring the
/// platform bus before handing it to the driver
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Number of writable control registers (02..08)
pub const WRITE_REGISTER_COUNT: usize = 7;

/// Number of readable status registers (0A..0F)
pub const READ_REGISTER_COUNT: usize = 6;

/// Bytes transferred by a full control block write
pub const WRITE_BLOCK_LEN: usize = WRITE_REGISTER_COUNT * 2;

/// Bytes expected from a full status burst read
pub const READ_BLOCK_LEN: usize = READ_REGISTER_COUNT * 2;

/// Default upper bound on tune-complete polls before giving up
pub const DEFAULT_MAX_TUNE_POLLS: u16 = 500;

/// Power-on reset values of the receiver registers
pub mod defaults {

    /// Chip identification (register 00)
    pub const CHIP_ID: u16 = 0x5804;

    /// Control registers 02..08 in transmission order
    pub const WRITE: [u16; super::WRITE_REGISTER_COUNT] =
        [0x0000, 0x4FC0, 0x0400, 0x888B, 0x0000, 0x4202, 0x0000];

    /// Status registers 0A..0F in read order
    pub const READ: [u16; super::READ_REGISTER_COUNT] =
        [0x0400, 0x0000, 0x5803, 0x5804, 0x5808, 0x5804];
}

/// Runtime driver configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Construct the RDS decoder alongside the driver
    pub rds: bool,
    /// Maximum number of tune pulse / status read rounds in standard mode,
    /// at least one round always runs
    pub max_tune_polls: u16,
    /// Read the status block once while constructing the driver
    pub read_on_init: bool,
}

impl Config {
    /// Create the default configuration (no RDS, default poll bound)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rds: false,
            max_tune_polls: DEFAULT_MAX_TUNE_POLLS,
            read_on_init: false,
        }
    }

    /// Enable or disable the RDS decoder
    #[must_use]
    pub const fn with_rds(self, rds: bool) -> Self {
        Self { rds, ..self }
    }

    /// Set the tune-complete poll bound (0 is treated as 1)
    #[must_use]
    pub const fn with_max_tune_polls(self, polls: u16) -> Self {
        let max_tune_polls = if polls == 0 { 1 } else { polls };
        Self {
            max_tune_polls,
            ..self
        }
    }

    /// Read status registers during construction
    #[must_use]
    pub const fn with_read_on_init(self, read_on_init: bool) -> Self {
        Self {
            read_on_init,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Config {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Config(rds={}, max_polls={}, read_on_init={})",
            self.rds,
            self.max_tune_polls,
            self.read_on_init
        );
    }
}
