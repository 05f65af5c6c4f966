//! Driver Errors

use core::fmt;

use crate::radio::tuning::TuneError;
use crate::registers::Register;
use crate::types::Frequency;

/// Error returned by driver operations, generic over the bus error `E`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// I2C transfer failed (NACK, arbitration loss, short read, ...)
    Bus(E),
    /// Frequency cannot be tuned with the current band settings
    FrequencyOutOfRange {
        /// Requested frequency
        frequency: Frequency,
    },
    /// STC was not reported within the configured number of polls
    TuneTimeout {
        /// Number of tune pulse / status read rounds performed
        polls: u16,
    },
    /// Register is not part of the writable control block
    NotWritable {
        /// Offending register
        register: Register,
    },
}

/// Result alias for driver operations
pub type DriverResult<T, E> = Result<T, Error<E>>;

impl<E> From<TuneError> for Error<E> {
    fn from(err: TuneError) -> Self {
        match err {
            TuneError::OutOfRange { frequency } => Self::FrequencyOutOfRange { frequency },
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "I2C bus error: {e:?}"),
            Self::FrequencyOutOfRange { frequency } => {
                write!(f, "{frequency} is outside the selected band")
            }
            Self::TuneTimeout { polls } => {
                write!(f, "tune not complete after {polls} polls")
            }
            Self::NotWritable { register } => {
                write!(f, "register 0x{:02X} is read-only", register.address())
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(feature = "embedded")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(e) => defmt::write!(f, "Bus({})", e),
            Self::FrequencyOutOfRange { frequency } => {
                defmt::write!(f, "FrequencyOutOfRange({})", frequency);
            }
            Self::TuneTimeout { polls } => defmt::write!(f, "TuneTimeout({})", polls),
            Self::NotWritable { register } => defmt::write!(f, "NotWritable({})", register),
        }
    }
}
