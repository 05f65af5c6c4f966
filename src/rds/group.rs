//! RDS group framing
//!
//! A group is four 16-bit blocks delivered together. Block B carries the
//! group type code (bits 15..12) and version (bit 11).

/// Group version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupVersion {
    /// Version A: block C carries data
    A,
    /// Version B: block C repeats the PI code
    B,
}

/// Group type: function code 0..=15 plus version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupType {
    number: u8,
    version: GroupVersion,
}

impl GroupType {
    /// Basic tuning and switching information, version A
    pub const G0A: Self = Self::new(0, GroupVersion::A);
    /// Basic tuning and switching information, version B
    pub const G0B: Self = Self::new(0, GroupVersion::B);
    /// Programme item number and slow labelling codes, version A
    pub const G1A: Self = Self::new(1, GroupVersion::A);
    /// Programme item number, version B
    pub const G1B: Self = Self::new(1, GroupVersion::B);
    /// Radio text, version A
    pub const G2A: Self = Self::new(2, GroupVersion::A);
    /// Radio text, version B
    pub const G2B: Self = Self::new(2, GroupVersion::B);
    /// Clock time and date
    pub const G4A: Self = Self::new(4, GroupVersion::A);
    /// Programme type name
    pub const G10A: Self = Self::new(10, GroupVersion::A);

    /// Create a group type (number is truncated to 4 bits)
    #[must_use]
    pub const fn new(number: u8, version: GroupVersion) -> Self {
        Self {
            number: number & 0x0F,
            version,
        }
    }

    /// Create from the 5-bit code `number << 1 | version`
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        let version = if code & 1 == 0 {
            GroupVersion::A
        } else {
            GroupVersion::B
        };
        Self::new((code >> 1) & 0x0F, version)
    }

    /// Classify from block B
    #[must_use]
    pub const fn from_block_b(block_b: u16) -> Self {
        Self::from_code(((block_b >> 11) & 0x1F) as u8)
    }

    /// 5-bit code `number << 1 | version` (0..=31)
    #[must_use]
    pub const fn code(self) -> u8 {
        let version = match self.version {
            GroupVersion::A => 0,
            GroupVersion::B => 1,
        };
        (self.number << 1) | version
    }

    /// Group function number (0..=15)
    #[must_use]
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Group version
    #[must_use]
    pub const fn version(self) -> GroupVersion {
        self.version
    }

    /// Whether the decoder interprets blocks C/D of this group
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(
            (self.number, self.version),
            (0 | 1 | 2, _) | (4 | 10, GroupVersion::A)
        )
    }
}

impl core::fmt::Display for GroupType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let version = match self.version {
            GroupVersion::A => 'A',
            GroupVersion::B => 'B',
        };
        write!(f, "{}{}", self.number, version)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for GroupType {
    fn format(&self, f: defmt::Formatter) {
        match self.version {
            GroupVersion::A => defmt::write!(f, "{}A", self.number),
            GroupVersion::B => defmt::write!(f, "{}B", self.number),
        }
    }
}

/// Four raw RDS blocks, consumed by value per decode call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RdsGroup {
    /// Block A: programme identification
    pub a: u16,
    /// Block B: group type, TP, PTY and group specific bits
    pub b: u16,
    /// Block C
    pub c: u16,
    /// Block D
    pub d: u16,
}

impl RdsGroup {
    /// Create from blocks A..D
    #[must_use]
    pub const fn new(blocks: [u16; 4]) -> Self {
        Self {
            a: blocks[0],
            b: blocks[1],
            c: blocks[2],
            d: blocks[3],
        }
    }

    /// Group type encoded in block B
    #[must_use]
    pub const fn group_type(&self) -> GroupType {
        GroupType::from_block_b(self.b)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RdsGroup {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Group({=u16:04X} {=u16:04X} {=u16:04X} {=u16:04X})",
            self.a,
            self.b,
            self.c,
            self.d
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_from_block_b() {
        assert_eq!(GroupType::from_block_b(0x0000), GroupType::G0A);
        assert_eq!(GroupType::from_block_b(0x0800), GroupType::G0B);
        assert_eq!(GroupType::from_block_b(0x2410), GroupType::G2A);
        assert_eq!(GroupType::from_block_b(0xA000), GroupType::G10A);
        assert_eq!(GroupType::from_block_b(0xF800).code(), 31);
    }

    #[test]
    fn supported_set() {
        let supported = (0..32)
            .map(GroupType::from_code)
            .filter(|g| g.is_supported())
            .count();
        assert_eq!(supported, 8);
        assert!(!GroupType::new(4, GroupVersion::B).is_supported());
        assert!(!GroupType::new(10, GroupVersion::B).is_supported());
        assert!(!GroupType::new(3, GroupVersion::A).is_supported());
    }
}
