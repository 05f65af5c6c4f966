//! Shared types used across the driver
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and map one-to-one onto register field encodings.

use core::fmt;

/// Receive frequency in units of 100 kHz (919 = 91.9 MHz)
///
/// Represents a frequency within the receiver's overall working range.
/// Whether a frequency is usable also depends on the selected [`Band`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u16);

impl Frequency {
    /// Lowest frequency of any band (50.0 MHz)
    pub const MIN: u16 = 500;

    /// Highest frequency of any band (108.0 MHz)
    pub const MAX: u16 = 1080;

    /// Create from a value in 100 kHz units, returns None if out of range
    #[must_use]
    pub const fn from_100khz(value: u16) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create from kHz, truncating to 100 kHz resolution
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        let value = khz / 100;
        if value > u16::MAX as u32 {
            return None;
        }
        Self::from_100khz(value as u16)
    }

    /// Get the value in 100 kHz units
    #[must_use]
    pub const fn as_100khz(self) -> u16 {
        self.0
    }

    /// Get the frequency in kHz
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 as u32 * 100
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({}.{} MHz)", self.0 / 10, self.0 % 10)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} MHz", self.0 / 10, self.0 % 10)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{} MHz", self.0 / 10, self.0 % 10);
    }
}

/// Frequency band (register 03, BAND field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Band {
    /// 87–108 MHz (US/Europe)
    #[default]
    UsEurope,
    /// 76–91 MHz (Japan)
    Japan,
    /// 76–108 MHz (world wide)
    WorldWide,
    /// 65–76 MHz or 50–76 MHz (East Europe), see [`BandLimits`]
    EastEurope,
}

/// Lower edge and width of a band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandLimits {
    /// Lowest frequency of the band
    pub min: u16,
    /// Largest offset from `min` in kHz
    pub max_offset_khz: u16,
}

impl BandLimits {
    /// Highest frequency of the band in 100 kHz units
    #[must_use]
    pub const fn max(self) -> u16 {
        self.min + self.max_offset_khz / 100
    }
}

impl Band {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::UsEurope,
            1 => Self::Japan,
            2 => Self::WorldWide,
            _ => Self::EastEurope,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::UsEurope => 0,
            Self::Japan => 1,
            Self::WorldWide => 2,
            Self::EastEurope => 3,
        }
    }

    /// Band limits; `east_europe_65m` mirrors register 07's `65M_50M_MODE` bit
    /// and only affects [`Band::EastEurope`]
    #[must_use]
    pub const fn limits(self, east_europe_65m: bool) -> BandLimits {
        match self {
            Self::UsEurope => BandLimits {
                min: 870,
                max_offset_khz: 21_000,
            },
            Self::Japan => BandLimits {
                min: 760,
                max_offset_khz: 15_000,
            },
            Self::WorldWide => BandLimits {
                min: 760,
                max_offset_khz: 32_000,
            },
            Self::EastEurope if east_europe_65m => BandLimits {
                min: 650,
                max_offset_khz: 11_000,
            },
            Self::EastEurope => BandLimits {
                min: 500,
                max_offset_khz: 26_000,
            },
        }
    }

    /// Tunable frequencies in 100 kHz units
    #[must_use]
    pub const fn frequency_range(self, east_europe_65m: bool) -> core::ops::RangeInclusive<u16> {
        let limits = self.limits(east_europe_65m);
        limits.min..=limits.max()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UsEurope => defmt::write!(f, "US/Europe"),
            Self::Japan => defmt::write!(f, "Japan"),
            Self::WorldWide => defmt::write!(f, "World"),
            Self::EastEurope => defmt::write!(f, "East Europe"),
        }
    }
}

/// Channel spacing (register 03, SPACE field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChannelSpacing {
    /// 100 kHz
    #[default]
    Khz100,
    /// 200 kHz
    Khz200,
    /// 50 kHz
    Khz50,
    /// 25 kHz
    Khz25,
}

impl ChannelSpacing {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Khz100,
            1 => Self::Khz200,
            2 => Self::Khz50,
            _ => Self::Khz25,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Khz100 => 0,
            Self::Khz200 => 1,
            Self::Khz50 => 2,
            Self::Khz25 => 3,
        }
    }

    /// Spacing in kHz
    #[must_use]
    pub const fn khz(self) -> u16 {
        match self {
            Self::Khz100 => 100,
            Self::Khz200 => 200,
            Self::Khz50 => 50,
            Self::Khz25 => 25,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelSpacing {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} kHz", self.khz());
    }
}

/// Frequency setting mode (register 07, `FREQ_MODE` bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FrequencyMode {
    /// Channel index written to register 03
    #[default]
    Standard,
    /// kHz offset from the band minimum written to register 08
    Direct,
}

/// Reference clock frequency (register 02, `CLK_MODE` field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// 32.768 kHz
    #[default]
    Khz32_768,
    /// 12 MHz
    Mhz12,
    /// 13 MHz
    Mhz13,
    /// 19.2 MHz
    Mhz19_2,
    /// 24 MHz
    Mhz24,
    /// 26 MHz
    Mhz26,
    /// 38.4 MHz
    Mhz38_4,
}

impl ClockMode {
    /// Decode from the 3-bit register field (code 4 is reserved)
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits & 0b111 {
            0 => Some(Self::Khz32_768),
            1 => Some(Self::Mhz12),
            2 => Some(Self::Mhz13),
            3 => Some(Self::Mhz19_2),
            5 => Some(Self::Mhz24),
            6 => Some(Self::Mhz26),
            7 => Some(Self::Mhz38_4),
            _ => None,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Khz32_768 => 0,
            Self::Mhz12 => 1,
            Self::Mhz13 => 2,
            Self::Mhz19_2 => 3,
            Self::Mhz24 => 5,
            Self::Mhz26 => 6,
            Self::Mhz38_4 => 7,
        }
    }
}

/// GPIO pin function (register 04, GPIO1..GPIO3 fields)
///
/// The second code means something different on each pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GpioMode {
    /// High impedance
    #[default]
    HighImpedance,
    /// Pin specific: reserved on GPIO1, STC/RDS interrupt on GPIO2,
    /// mono/stereo indicator on GPIO3
    Function,
    /// Driven low
    Low,
    /// Driven high
    High,
}

impl GpioMode {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::HighImpedance,
            1 => Self::Function,
            2 => Self::Low,
            _ => Self::High,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::HighImpedance => 0,
            Self::Function => 1,
            Self::Low => 2,
            Self::High => 3,
        }
    }
}

/// GPIO pin selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gpio {
    /// GPIO1
    Gpio1,
    /// GPIO2 (interrupt output)
    Gpio2,
    /// GPIO3 (stereo indicator)
    Gpio3,
}

/// LNA input port (register 05, `LNA_PORT_SEL` field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LnaInput {
    /// No input
    None,
    /// LNAN
    LnaN,
    /// LNAP
    #[default]
    LnaP,
    /// Both inputs
    Dual,
}

impl LnaInput {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::None,
            1 => Self::LnaN,
            2 => Self::LnaP,
            _ => Self::Dual,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::None => 0,
            Self::LnaN => 1,
            Self::LnaP => 2,
            Self::Dual => 3,
        }
    }
}

/// LNA working current (register 05, `LNA_ICSEL` field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LnaCurrent {
    /// 1.8 mA
    #[default]
    Ma1_8,
    /// 2.1 mA
    Ma2_1,
    /// 2.5 mA
    Ma2_5,
    /// 3.0 mA
    Ma3_0,
}

impl LnaCurrent {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::Ma1_8,
            1 => Self::Ma2_1,
            2 => Self::Ma2_5,
            _ => Self::Ma3_0,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        match self {
            Self::Ma1_8 => 0,
            Self::Ma2_1 => 1,
            Self::Ma2_5 => 2,
            Self::Ma3_0 => 3,
        }
    }
}

/// I2S word-select rate (register 06, `I2S_SW_CNT` field)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WsStep {
    /// 8 kbps
    #[default]
    Kbps8,
    /// 11.025 kbps
    Kbps11_025,
    /// 12 kbps
    Kbps12,
    /// 16 kbps
    Kbps16,
    /// 22.05 kbps
    Kbps22_05,
    /// 24 kbps
    Kbps24,
    /// 32 kbps
    Kbps32,
    /// 44.1 kbps
    Kbps44_1,
    /// 48 kbps
    Kbps48,
}

impl WsStep {
    /// Decode from the 4-bit register field (codes above 8 are reserved)
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        match bits & 0xF {
            0 => Some(Self::Kbps8),
            1 => Some(Self::Kbps11_025),
            2 => Some(Self::Kbps12),
            3 => Some(Self::Kbps16),
            4 => Some(Self::Kbps22_05),
            5 => Some(Self::Kbps24),
            6 => Some(Self::Kbps32),
            7 => Some(Self::Kbps44_1),
            8 => Some(Self::Kbps48),
            _ => None,
        }
    }

    /// Get register field value
    #[must_use]
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

/// RDS block error level (register 0B, BLERA/BLERB fields)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockErrorLevel {
    /// No errors
    None,
    /// 1–2 errors corrected
    Low,
    /// 3–5 errors corrected
    Medium,
    /// 6 or more errors, block unusable
    Uncorrectable,
}

impl BlockErrorLevel {
    /// Decode from the 2-bit register field
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b11 {
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Medium,
            _ => Self::Uncorrectable,
        }
    }
}

/// Seek direction (register 02, SEEKUP bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeekDirection {
    /// Towards lower frequencies
    #[default]
    Down,
    /// Towards higher frequencies
    Up,
}

/// Behaviour at the band edge while seeking (register 02, SKMODE bit)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeekWrap {
    /// Wrap around to the other band edge
    #[default]
    Wrap,
    /// Stop at the band edge
    StopAtLimit,
}

/// Audio volume (register 05, VOLUME field), logarithmic, 0..=15
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Volume(u8);

impl Volume {
    /// Maximum volume step
    pub const MAX: u8 = 15;

    /// Create a volume, returns None above [`Volume::MAX`]
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Create a volume, clamping to [`Volume::MAX`]
    #[must_use]
    pub const fn saturating(level: u8) -> Self {
        if level > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(level)
        }
    }

    /// Scale a full-range byte (0..=255) onto the 16 volume steps
    #[must_use]
    pub const fn from_u8_scaled(value: u8) -> Self {
        Self(value / 0x10)
    }

    /// Get the volume step
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Volume {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Vol({})", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_bounds() {
        assert!(Frequency::from_100khz(499).is_none());
        assert!(Frequency::from_100khz(500).is_some());
        assert!(Frequency::from_100khz(1080).is_some());
        assert!(Frequency::from_100khz(1081).is_none());
        assert_eq!(Frequency::from_khz(91_950).map(Frequency::as_100khz), Some(919));
    }

    #[test]
    fn band_limits_top_edges() {
        assert_eq!(Band::UsEurope.limits(false).max(), 1080);
        assert_eq!(Band::Japan.limits(false).max(), 910);
        assert_eq!(Band::WorldWide.limits(true).max(), 1080);
        assert_eq!(Band::EastEurope.limits(false).max(), 760);
        assert_eq!(Band::EastEurope.limits(true).max(), 760);
        assert_eq!(Band::Japan.frequency_range(false), 760..=910);
    }

    #[test]
    fn field_codes_roundtrip() {
        for bits in 0..4 {
            assert_eq!(Band::from_bits(bits).bits(), bits);
            assert_eq!(ChannelSpacing::from_bits(bits).bits(), bits);
            assert_eq!(GpioMode::from_bits(bits).bits(), bits);
        }
        assert!(ClockMode::from_bits(4).is_none());
        assert!(WsStep::from_bits(9).is_none());
    }

    #[test]
    fn volume_scaling() {
        assert_eq!(Volume::from_u8_scaled(0).level(), 0);
        assert_eq!(Volume::from_u8_scaled(0x8F).level(), 8);
        assert_eq!(Volume::from_u8_scaled(0xFF).level(), 15);
        assert!(Volume::new(16).is_none());
        assert_eq!(Volume::saturating(40).level(), 15);
    }
}
