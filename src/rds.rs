//! Radio Data System
//!
//! Group classification, code tables, clock-time conversion and the
//! accumulating group decoder.

pub mod codes;
pub mod date;
pub mod decoder;
pub mod group;

pub use codes::{
    CoverageArea, DecoderIdentification, ExtendedCountryCode, ProgrammeIdentification,
    ProgrammeItemNumber, ProgrammeType,
};
pub use date::{ClockTime, Date};
pub use decoder::RdsDecoder;
pub use group::{GroupType, GroupVersion, RdsGroup};
