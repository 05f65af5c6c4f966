//! Shared test fixtures
//!
//! `MockRda` stands in for the chip on an `embedded_hal::i2c::I2c` bus.
//! It keeps a device-side register file, logs every transfer and can be
//! told to fail or delay STC.

#![allow(dead_code)]

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Sequential access address
pub const SEQ: u8 = 0x10;
/// Random access address
pub const RAND: u8 = 0x11;

/// One logged bus transfer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Control block write to 0x10
    Block(Vec<u16>),
    /// Status block read from 0x10
    Status,
    /// Addressed register write to 0x11
    WriteReg(u8, u16),
    /// Addressed register read from 0x11
    ReadReg(u8),
}

/// Simulated RDA5807
pub struct MockRda {
    /// Device-side registers, indexed by address
    pub regs: [u16; 16],
    /// Transfer log, failed attempts included
    pub log: Vec<Transfer>,
    /// STC shows up on this many-th read of 0A (None: never)
    pub stc_after: Option<u32>,
    /// Report SF together with STC
    pub seek_fail: bool,
    /// RDSR bit in 0A
    pub rds_ready: bool,
    /// Register addresses whose addressed writes fail
    pub fail_writes: Vec<u8>,
    /// Fail every block write
    pub fail_block_write: bool,
    /// Fail every read
    pub fail_reads: bool,
    /// Status block read stops early
    pub short_read: bool,
    reads_0a: u32,
}

impl MockRda {
    /// Device in power-on state
    pub fn new() -> Self {
        let mut regs = [0u16; 16];
        regs[0x00] = 0x5804;
        regs[0x03] = 0x4FC0;
        regs[0x04] = 0x0400;
        regs[0x05] = 0x888B;
        regs[0x07] = 0x4202;
        regs[0x0C] = 0x5803;
        regs[0x0D] = 0x5804;
        regs[0x0E] = 0x5808;
        regs[0x0F] = 0x5804;
        Self {
            regs,
            log: Vec::new(),
            stc_after: Some(1),
            seek_fail: false,
            rds_ready: false,
            fail_writes: Vec::new(),
            fail_block_write: false,
            fail_reads: false,
            short_read: false,
            reads_0a: 0,
        }
    }

    /// Load RDS blocks A..D into 0C..0F
    pub fn set_group(&mut self, blocks: [u16; 4]) {
        self.regs[0x0C..=0x0F].copy_from_slice(&blocks);
    }

    /// Addressed writes in order
    pub fn reg_writes(&self) -> Vec<(u8, u16)> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transfer::WriteReg(r, v) => Some((*r, *v)),
                _ => None,
            })
            .collect()
    }

    /// Count logged transfers matching `t`
    pub fn count(&self, t: &Transfer) -> usize {
        self.log.iter().filter(|x| *x == t).count()
    }

    /// Register 0A as seen by the host, advancing the STC counter
    fn status_0a(&mut self) -> u16 {
        self.reads_0a += 1;
        let stc = self.stc_after.is_some_and(|n| self.reads_0a >= n);
        let mut value = (self.regs[0x03] >> 6) & 0x03FF;
        if stc {
            value |= 1 << 14;
            if self.seek_fail {
                value |= 1 << 13;
            }
        }
        if self.rds_ready {
            value |= 1 << 15;
        }
        self.regs[0x0A] = value;
        value
    }

    fn register_value(&mut self, reg: u8) -> u16 {
        if reg == 0x0A {
            self.status_0a()
        } else {
            self.regs[usize::from(reg & 0x0F)]
        }
    }
}

impl Default for MockRda {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for MockRda {
    type Error = ErrorKind;
}

impl I2c for MockRda {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        match (address, operations) {
            (SEQ, [Operation::Write(bytes)]) => {
                let values: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                self.log.push(Transfer::Block(values.clone()));
                if self.fail_block_write {
                    return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
                }
                for (i, v) in values.into_iter().enumerate() {
                    self.regs[0x02 + i] = v;
                }
                Ok(())
            }
            (SEQ, [Operation::Read(buf)]) => {
                self.log.push(Transfer::Status);
                if self.fail_reads || self.short_read {
                    return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                }
                for (i, chunk) in buf.chunks_exact_mut(2).enumerate() {
                    let value = self.register_value(0x0A + i as u8);
                    chunk.copy_from_slice(&value.to_be_bytes());
                }
                Ok(())
            }
            (RAND, [Operation::Write(&[reg, hi, lo])]) => {
                let value = u16::from_be_bytes([hi, lo]);
                self.log.push(Transfer::WriteReg(reg, value));
                if self.fail_writes.contains(&reg) {
                    return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                }
                self.regs[usize::from(reg & 0x0F)] = value;
                Ok(())
            }
            (RAND, [Operation::Write(&[reg]), Operation::Read(buf)]) => {
                self.log.push(Transfer::ReadReg(reg));
                if self.fail_reads {
                    return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                }
                let value = self.register_value(reg);
                buf.copy_from_slice(&value.to_be_bytes());
                Ok(())
            }
            _ => Err(ErrorKind::Other),
        }
    }
}
