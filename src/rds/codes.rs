//! RDS code tables and packed fields

/// Programme type (PTY), RDS (European) code table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProgrammeType {
    /// No programme type or undefined
    #[default]
    None,
    /// News
    News,
    /// Current affairs
    Affairs,
    /// Information
    Info,
    /// Sport
    Sport,
    /// Education
    Education,
    /// Drama
    Drama,
    /// Culture
    Culture,
    /// Science
    Science,
    /// Varied
    Varied,
    /// Pop music
    Pop,
    /// Rock music
    Rock,
    /// Easy listening music
    EasyListening,
    /// Light classical
    LightClassical,
    /// Serious classical
    SeriousClassical,
    /// Other music
    OtherMusic,
    /// Weather
    Weather,
    /// Finance
    Finance,
    /// Children's programmes
    Children,
    /// Social affairs
    Social,
    /// Religion
    Religion,
    /// Phone in
    PhoneIn,
    /// Travel
    Travel,
    /// Leisure
    Leisure,
    /// Jazz music
    Jazz,
    /// Country music
    Country,
    /// National music
    NationalMusic,
    /// Oldies music
    Oldies,
    /// Folk music
    Folk,
    /// Documentary
    Documentary,
    /// Alarm test
    AlarmTest,
    /// Alarm
    Alarm,
}

impl ProgrammeType {
    /// Decode the 5-bit PTY code
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x1F {
            0 => Self::None,
            1 => Self::News,
            2 => Self::Affairs,
            3 => Self::Info,
            4 => Self::Sport,
            5 => Self::Education,
            6 => Self::Drama,
            7 => Self::Culture,
            8 => Self::Science,
            9 => Self::Varied,
            10 => Self::Pop,
            11 => Self::Rock,
            12 => Self::EasyListening,
            13 => Self::LightClassical,
            14 => Self::SeriousClassical,
            15 => Self::OtherMusic,
            16 => Self::Weather,
            17 => Self::Finance,
            18 => Self::Children,
            19 => Self::Social,
            20 => Self::Religion,
            21 => Self::PhoneIn,
            22 => Self::Travel,
            23 => Self::Leisure,
            24 => Self::Jazz,
            25 => Self::Country,
            26 => Self::NationalMusic,
            27 => Self::Oldies,
            28 => Self::Folk,
            29 => Self::Documentary,
            30 => Self::AlarmTest,
            _ => Self::Alarm,
        }
    }

    /// 5-bit PTY code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// 8-character display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::News => "News",
            Self::Affairs => "Affairs",
            Self::Info => "Info",
            Self::Sport => "Sport",
            Self::Education => "Educate",
            Self::Drama => "Drama",
            Self::Culture => "Culture",
            Self::Science => "Science",
            Self::Varied => "Varied",
            Self::Pop => "Pop M",
            Self::Rock => "Rock M",
            Self::EasyListening => "Easy M",
            Self::LightClassical => "Light M",
            Self::SeriousClassical => "Classics",
            Self::OtherMusic => "Other M",
            Self::Weather => "Weather",
            Self::Finance => "Finance",
            Self::Children => "Children",
            Self::Social => "Social",
            Self::Religion => "Religion",
            Self::PhoneIn => "Phone In",
            Self::Travel => "Travel",
            Self::Leisure => "Leisure",
            Self::Jazz => "Jazz",
            Self::Country => "Country",
            Self::NationalMusic => "Nation M",
            Self::Oldies => "Oldies",
            Self::Folk => "Folk M",
            Self::Documentary => "Document",
            Self::AlarmTest => "TEST",
            Self::Alarm => "Alarm !",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProgrammeType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.label());
    }
}

/// Programme area coverage (PI code bits 11..8)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageArea {
    /// Local, single transmitter
    Local,
    /// International
    International,
    /// National
    National,
    /// Supra-regional
    SupraRegional,
    /// Regional, code 4..=15
    Regional(u8),
}

impl CoverageArea {
    /// Decode the 4-bit coverage code
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code & 0x0F {
            0 => Self::Local,
            1 => Self::International,
            2 => Self::National,
            3 => Self::SupraRegional,
            n => Self::Regional(n),
        }
    }
}

/// Extended country code carried in group 1A variant 0
///
/// Variants are named by ISO 3166 alpha-2 code. Code 0 is reserved and
/// unlisted codes have no entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum ExtendedCountryCode {
    /// Germany, alternate code
    DeAlternative = 0x01,
    Dz = 0x02,
    Ad = 0x03,
    Il = 0x04,
    It = 0x05,
    Be = 0x06,
    Ru = 0x07,
    Ps = 0x08,
    Al = 0x09,
    At = 0x0A,
    Hu = 0x0B,
    Mt = 0x0C,
    De = 0x0D,
    Eg = 0x0F,
    Gr = 0x10,
    Cy = 0x11,
    Sm = 0x12,
    Ch = 0x13,
    Jo = 0x14,
    Fi = 0x15,
    Lu = 0x16,
    Bg = 0x17,
    Dk = 0x18,
    Gi = 0x19,
    Iq = 0x1A,
    Gb = 0x1B,
    Ly = 0x1C,
    Ro = 0x1D,
    Fr = 0x1E,
    Ma = 0x1F,
    Cz = 0x20,
    Pl = 0x21,
    Va = 0x22,
    Sk = 0x23,
    Sy = 0x24,
    Tn = 0x25,
    Li = 0x29,
    Is = 0x2A,
    Mc = 0x2B,
    Lt = 0x2C,
    Yu = 0x2D,
    Es = 0x2E,
    No = 0x2F,
    Ie = 0x33,
    Tr = 0x34,
    Mk = 0x35,
    Nl = 0x38,
    Lv = 0x39,
    Lb = 0x3A,
    Hr = 0x3C,
    Se = 0x3E,
    By = 0x3F,
    Md = 0x40,
    Ee = 0x41,
    Ua = 0x46,
    Pt = 0x48,
    Si = 0x49,
    Ba = 0x4F,
}

impl ExtendedCountryCode {
    /// Look up a raw ECC byte
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x01 => Self::DeAlternative,
            0x02 => Self::Dz,
            0x03 => Self::Ad,
            0x04 => Self::Il,
            0x05 => Self::It,
            0x06 => Self::Be,
            0x07 => Self::Ru,
            0x08 => Self::Ps,
            0x09 => Self::Al,
            0x0A => Self::At,
            0x0B => Self::Hu,
            0x0C => Self::Mt,
            0x0D => Self::De,
            0x0F => Self::Eg,
            0x10 => Self::Gr,
            0x11 => Self::Cy,
            0x12 => Self::Sm,
            0x13 => Self::Ch,
            0x14 => Self::Jo,
            0x15 => Self::Fi,
            0x16 => Self::Lu,
            0x17 => Self::Bg,
            0x18 => Self::Dk,
            0x19 => Self::Gi,
            0x1A => Self::Iq,
            0x1B => Self::Gb,
            0x1C => Self::Ly,
            0x1D => Self::Ro,
            0x1E => Self::Fr,
            0x1F => Self::Ma,
            0x20 => Self::Cz,
            0x21 => Self::Pl,
            0x22 => Self::Va,
            0x23 => Self::Sk,
            0x24 => Self::Sy,
            0x25 => Self::Tn,
            0x29 => Self::Li,
            0x2A => Self::Is,
            0x2B => Self::Mc,
            0x2C => Self::Lt,
            0x2D => Self::Yu,
            0x2E => Self::Es,
            0x2F => Self::No,
            0x33 => Self::Ie,
            0x34 => Self::Tr,
            0x35 => Self::Mk,
            0x38 => Self::Nl,
            0x39 => Self::Lv,
            0x3A => Self::Lb,
            0x3C => Self::Hr,
            0x3E => Self::Se,
            0x3F => Self::By,
            0x40 => Self::Md,
            0x41 => Self::Ee,
            0x46 => Self::Ua,
            0x48 => Self::Pt,
            0x49 => Self::Si,
            0x4F => Self::Ba,
            _ => return None,
        })
    }

    /// Raw ECC byte
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ExtendedCountryCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ECC {=u8:02X}", self.code());
    }
}

/// Programme identification (block A)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProgrammeIdentification {
    /// Country code, bits 15..12
    pub country_code: u8,
    /// Area coverage code, bits 11..8
    pub area_coverage: u8,
    /// Programme reference number, bits 7..0
    pub reference_number: u8,
}

impl ProgrammeIdentification {
    /// Split block A into its fields
    #[must_use]
    pub const fn from_block(block_a: u16) -> Self {
        Self {
            country_code: ((block_a >> 12) & 0x0F) as u8,
            area_coverage: ((block_a >> 8) & 0x0F) as u8,
            reference_number: (block_a & 0xFF) as u8,
        }
    }

    /// Reassembled 16-bit PI code
    #[must_use]
    pub const fn code(self) -> u16 {
        ((self.country_code as u16) << 12)
            | ((self.area_coverage as u16) << 8)
            | self.reference_number as u16
    }

    /// Decoded area coverage
    #[must_use]
    pub const fn coverage(self) -> CoverageArea {
        CoverageArea::from_code(self.area_coverage)
    }
}

/// Decoder identification bits carried one per group 0 segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecoderIdentification(u8);

impl DecoderIdentification {
    /// Wrap the 4-bit DI value (d3..d0)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw 4-bit value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// d0: stereo (false = mono)
    #[must_use]
    pub const fn stereo(self) -> bool {
        self.0 & 0x1 != 0
    }

    /// d1: artificial head recording
    #[must_use]
    pub const fn artificial_head(self) -> bool {
        self.0 & 0x2 != 0
    }

    /// d2: compressed
    #[must_use]
    pub const fn compressed(self) -> bool {
        self.0 & 0x4 != 0
    }

    /// d3: PTY switched dynamically
    #[must_use]
    pub const fn dynamic_pty(self) -> bool {
        self.0 & 0x8 != 0
    }
}

/// Programme item number (groups 1A/1B block D), kept raw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProgrammeItemNumber(u16);

impl ProgrammeItemNumber {
    /// Wrap the raw block D value
    #[must_use]
    pub const fn from_block(block_d: u16) -> Self {
        Self(block_d)
    }

    /// Raw value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Scheduled day of month, bits 15..11 (0 = no valid PIN)
    #[must_use]
    pub const fn day(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Scheduled hour, bits 10..6
    #[must_use]
    pub const fn hour(self) -> u8 {
        ((self.0 >> 6) & 0x1F) as u8
    }

    /// Scheduled minute, bits 5..0
    #[must_use]
    pub const fn minute(self) -> u8 {
        (self.0 & 0x3F) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_split_and_join() {
        let pi = ProgrammeIdentification::from_block(0xD3C2);
        assert_eq!(pi.country_code, 0xD);
        assert_eq!(pi.area_coverage, 0x3);
        assert_eq!(pi.reference_number, 0xC2);
        assert_eq!(pi.code(), 0xD3C2);
        assert_eq!(pi.coverage(), CoverageArea::SupraRegional);
    }

    #[test]
    fn pty_codes() {
        for code in 0..32 {
            assert_eq!(ProgrammeType::from_code(code).code(), code);
        }
        assert_eq!(ProgrammeType::from_code(10), ProgrammeType::Pop);
    }

    #[test]
    fn pin_fields() {
        // day 17, 20:45
        let pin = ProgrammeItemNumber::from_block((17 << 11) | (20 << 6) | 45);
        assert_eq!(pin.day(), 17);
        assert_eq!(pin.hour(), 20);
        assert_eq!(pin.minute(), 45);
    }

    #[test]
    fn ecc_table() {
        assert_eq!(ExtendedCountryCode::from_code(0), None);
        assert_eq!(ExtendedCountryCode::from_code(0x0E), None);
        assert_eq!(ExtendedCountryCode::from_code(0x0D), Some(ExtendedCountryCode::De));
        assert_eq!(ExtendedCountryCode::from_code(0x4F), Some(ExtendedCountryCode::Ba));
        for code in 0..=u8::MAX {
            if let Some(ecc) = ExtendedCountryCode::from_code(code) {
                assert_eq!(ecc.code(), code);
            }
        }
    }
}
