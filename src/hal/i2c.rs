//! I2C Bus Abstractions
//!
//! Provides the two RDA5807 access paths over any blocking
//! [`embedded_hal::i2c::I2c`] implementation: sequential block access at
//! 0x10 and per-register random access at 0x11. Register values travel
//! MSB first.

use embedded_hal::i2c::I2c;

use crate::config::{
    RANDOM_ACCESS_I2C_ADDR, READ_BLOCK_LEN, READ_REGISTER_COUNT, SEQUENTIAL_I2C_ADDR,
    WRITE_BLOCK_LEN, WRITE_REGISTER_COUNT,
};

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Sequential access: control block writes and status block reads
    pub const SEQUENTIAL: Self = Self(SEQUENTIAL_I2C_ADDR);

    /// Random access: register index followed by data
    pub const RANDOM_ACCESS: Self = Self(RANDOM_ACCESS_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Bus wrapper owning the I2C peripheral
pub struct RdaBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> RdaBus<I2C> {
    /// Create a new bus wrapper
    #[must_use]
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the underlying peripheral
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Write the whole control block (registers 02..08) in one transaction
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transfer fails.
    pub fn write_block(&mut self, values: &[u16; WRITE_REGISTER_COUNT]) -> Result<(), I2C::Error> {
        let mut buf = [0u8; WRITE_BLOCK_LEN];
        for (chunk, value) in buf.chunks_exact_mut(2).zip(values) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        self.i2c.write(I2cAddress::SEQUENTIAL.addr(), &buf)
    }

    /// Burst-read the whole status block (registers 0A..0F)
    ///
    /// Nothing is returned unless all bytes arrived.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transfer fails.
    pub fn read_block(&mut self) -> Result<[u16; READ_REGISTER_COUNT], I2C::Error> {
        let mut buf = [0u8; READ_BLOCK_LEN];
        self.i2c.read(I2cAddress::SEQUENTIAL.addr(), &mut buf)?;

        let mut values = [0u16; READ_REGISTER_COUNT];
        for (value, chunk) in values.iter_mut().zip(buf.chunks_exact(2)) {
            *value = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        Ok(values)
    }

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transfer fails.
    pub fn write_reg(&mut self, reg: u8, value: u16) -> Result<(), I2C::Error> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(I2cAddress::RANDOM_ACCESS.addr(), &[reg, hi, lo])
    }

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns the bus error if the transfer fails.
    pub fn read_reg(&mut self, reg: u8) -> Result<u16, I2C::Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(I2cAddress::RANDOM_ACCESS.addr(), &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}
