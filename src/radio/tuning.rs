//! Frequency to channel resolution
//!
//! Pure arithmetic behind tuning: validates a [`Frequency`] against the
//! selected band and converts it into either a channel index (standard mode)
//! or a kHz offset from the band minimum (direct mode). No bus access here;
//! the driver applies the result and drives the tune sequence.

use crate::registers::{field, RegisterImage};
use crate::types::{Band, ChannelSpacing, Frequency, FrequencyMode};

/// Largest value the 10-bit CHAN field can hold
pub const MAX_CHANNEL: u16 = 0x3FF;

/// Resolved tuning value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuneTarget {
    /// Channel index for register 03
    Channel(u16),
    /// Offset from the band minimum in kHz for register 08
    Direct(u16),
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuneTarget {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Channel(ch) => defmt::write!(f, "CH{}", ch),
            Self::Direct(khz) => defmt::write!(f, "+{}kHz", khz),
        }
    }
}

/// Tuning arithmetic failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuneError {
    /// Frequency cannot be reached with the current band settings
    OutOfRange {
        /// Requested frequency
        frequency: Frequency,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuneError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::OutOfRange { frequency } => defmt::write!(f, "{} out of range", frequency),
        }
    }
}

/// Frequency plus the band settings it is resolved against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TuningRequest {
    /// Requested frequency
    pub frequency: Frequency,
    /// Selected band
    pub band: Band,
    /// Selected channel spacing
    pub spacing: ChannelSpacing,
    /// Standard or direct frequency setting
    pub mode: FrequencyMode,
    /// `65M_50M_MODE` bit (East Europe band only)
    pub east_europe_65m: bool,
}

impl TuningRequest {
    /// Build a request using the band settings currently held in `image`
    #[must_use]
    pub fn from_image(frequency: Frequency, image: &RegisterImage) -> Self {
        Self {
            frequency,
            band: Band::from_bits(image.field(field::BAND)),
            spacing: ChannelSpacing::from_bits(image.field(field::SPACE)),
            mode: if image.flag(field::FREQ_MODE) {
                FrequencyMode::Direct
            } else {
                FrequencyMode::Standard
            },
            east_europe_65m: image.flag(field::MODE_65M_50M),
        }
    }

    /// Offset from the band minimum in kHz, None if outside the band
    #[must_use]
    pub fn offset_khz(&self) -> Option<u16> {
        let limits = self.band.limits(self.east_europe_65m);
        let freq = self.frequency.as_100khz();
        if freq < limits.min {
            return None;
        }
        let offset = u32::from(freq - limits.min) * 100;
        if offset > u32::from(limits.max_offset_khz) {
            return None;
        }
        u16::try_from(offset).ok()
    }

    /// Resolve to a register value
    ///
    /// # Errors
    ///
    /// [`TuneError::OutOfRange`] if the frequency lies outside the band or
    /// its channel index does not fit the CHAN field.
    pub fn resolve(&self) -> Result<TuneTarget, TuneError> {
        let out_of_range = TuneError::OutOfRange {
            frequency: self.frequency,
        };
        let offset = self.offset_khz().ok_or(out_of_range)?;
        match self.mode {
            FrequencyMode::Direct => Ok(TuneTarget::Direct(offset)),
            FrequencyMode::Standard => {
                let channel = offset / self.spacing.khz();
                if channel > MAX_CHANNEL {
                    return Err(out_of_range);
                }
                Ok(TuneTarget::Channel(channel))
            }
        }
    }
}

impl TuneTarget {
    /// Store the value in the register image (local only)
    pub fn apply(self, image: &mut RegisterImage) {
        match self {
            Self::Channel(channel) => image.set_field(field::CHAN, channel),
            Self::Direct(offset) => image.set_field(field::FREQ_DIRECT, offset),
        }
    }
}

/// Frequency in kHz of `channel` for the given band settings
#[must_use]
pub fn channel_to_khz(
    channel: u16,
    band: Band,
    spacing: ChannelSpacing,
    east_europe_65m: bool,
) -> u32 {
    let min = u32::from(band.limits(east_europe_65m).min) * 100;
    min + u32::from(channel) * u32::from(spacing.khz())
}

/// Frequency in kHz of a direct-mode offset
#[must_use]
pub fn direct_to_khz(offset_khz: u16, band: Band, east_europe_65m: bool) -> u32 {
    u32::from(band.limits(east_europe_65m).min) * 100 + u32::from(offset_khz)
}

/// Seek/tune progress as reported by register 0A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekStatus {
    /// Operation still running
    Busy,
    /// Finished on the given channel
    Complete {
        /// Channel reported by READCHAN
        channel: u16,
    },
    /// Seek ended without finding a station
    Failed {
        /// Channel reported by READCHAN
        channel: u16,
    },
}

impl SeekStatus {
    /// Decode from the status registers held in `image`
    #[must_use]
    pub fn from_image(image: &RegisterImage) -> Self {
        let channel = image.field(field::READCHAN);
        if !image.flag(field::STC) {
            Self::Busy
        } else if image.flag(field::SF) {
            Self::Failed { channel }
        } else {
            Self::Complete { channel }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(freq: u16, band: Band, spacing: ChannelSpacing) -> TuningRequest {
        TuningRequest {
            frequency: Frequency::from_100khz(freq).unwrap(),
            band,
            spacing,
            mode: FrequencyMode::Standard,
            east_europe_65m: false,
        }
    }

    #[test]
    fn us_europe_channels() {
        let r = request(919, Band::UsEurope, ChannelSpacing::Khz100);
        assert_eq!(r.resolve(), Ok(TuneTarget::Channel(49)));
        let r = request(870, Band::UsEurope, ChannelSpacing::Khz100);
        assert_eq!(r.resolve(), Ok(TuneTarget::Channel(0)));
        let r = request(1080, Band::UsEurope, ChannelSpacing::Khz200);
        assert_eq!(r.resolve(), Ok(TuneTarget::Channel(105)));
    }

    #[test]
    fn below_band_minimum_rejected() {
        let r = request(869, Band::UsEurope, ChannelSpacing::Khz100);
        assert!(r.resolve().is_err());
    }

    #[test]
    fn above_band_maximum_rejected() {
        let r = request(911, Band::Japan, ChannelSpacing::Khz100);
        assert!(r.resolve().is_err());
        let r = request(910, Band::Japan, ChannelSpacing::Khz100);
        assert_eq!(r.resolve(), Ok(TuneTarget::Channel(150)));
    }

    #[test]
    fn channel_field_overflow_rejected() {
        // 32 MHz at 25 kHz needs 1280 channels
        let r = request(1080, Band::WorldWide, ChannelSpacing::Khz25);
        assert!(r.resolve().is_err());
    }

    #[test]
    fn direct_mode_offset() {
        let mut r = request(1015, Band::UsEurope, ChannelSpacing::Khz25);
        r.mode = FrequencyMode::Direct;
        assert_eq!(r.resolve(), Ok(TuneTarget::Direct(14_500)));
    }

    #[test]
    fn channel_back_to_khz() {
        assert_eq!(channel_to_khz(49, Band::UsEurope, ChannelSpacing::Khz100, false), 91_900);
        assert_eq!(channel_to_khz(2, Band::EastEurope, ChannelSpacing::Khz50, true), 65_100);
        assert_eq!(direct_to_khz(14_500, Band::UsEurope, false), 101_500);
    }
}
