//! RDS Group Decoder
//!
//! Consumes one [`RdsGroup`] per call and accumulates the broadcast
//! metadata spread across many groups: station name (0A/0B), programme
//! item and language (1A/1B), radio text (2A/2B), clock time (4A) and
//! programme type name (10A).
//!
//! Text buffers are cleared whenever their segment set restarts (address 0
//! for the station name, the A/B toggle for radio text and PTYN), so
//! fragments of an old message never mix with a new one.

use heapless::String;

use super::codes::{
    DecoderIdentification, ExtendedCountryCode, ProgrammeIdentification, ProgrammeItemNumber,
    ProgrammeType,
};
use super::date::ClockTime;
use super::group::{GroupType, GroupVersion, RdsGroup};

/// Station name length (PS)
pub const STATION_NAME_LEN: usize = 8;

/// Radio text length (RT)
pub const RADIO_TEXT_LEN: usize = 64;

/// Programme type name length (PTYN)
pub const PTY_NAME_LEN: usize = 8;

/// Text/flag toggle bit in block B (groups 2 and 10A)
const AB_FLAG: u16 = 0x0010;

/// Accumulated RDS state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RdsDecoder {
    pi: ProgrammeIdentification,
    traffic_programme: bool,
    programme_type: ProgrammeType,

    traffic_announcement: bool,
    music: bool,
    decoder_id: u8,
    station_name: [u8; STATION_NAME_LEN],

    extended_country_code: u8,
    language_code: u16,
    programme_item: ProgrammeItemNumber,

    text_ab: bool,
    radio_text: [u8; RADIO_TEXT_LEN],

    clock: Option<ClockTime>,

    pty_name_ab: bool,
    pty_name: [u8; PTY_NAME_LEN],
}

impl RdsDecoder {
    /// Create an empty decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pi: ProgrammeIdentification {
                country_code: 0,
                area_coverage: 0,
                reference_number: 0,
            },
            traffic_programme: false,
            programme_type: ProgrammeType::None,
            traffic_announcement: false,
            music: false,
            decoder_id: 0,
            station_name: [0; STATION_NAME_LEN],
            extended_country_code: 0,
            language_code: 0,
            programme_item: ProgrammeItemNumber::from_block(0),
            text_ab: false,
            radio_text: [0; RADIO_TEXT_LEN],
            clock: None,
            pty_name_ab: false,
            pty_name: [0; PTY_NAME_LEN],
        }
    }

    /// Decode one group
    ///
    /// PI, TP and PTY are refreshed for every group. Returns the group type
    /// when blocks C/D were interpreted, `None` for unsupported groups.
    pub fn decode(&mut self, group: RdsGroup) -> Option<GroupType> {
        self.pi = ProgrammeIdentification::from_block(group.a);
        self.traffic_programme = group.b & 0x0400 != 0;
        self.programme_type = ProgrammeType::from_code(((group.b >> 5) & 0x1F) as u8);

        let group_type = group.group_type();
        match (group_type.number(), group_type.version()) {
            (0, _) => self.station_name_segment(group),
            (1, GroupVersion::A) => {
                self.slow_labelling(group.c);
                self.programme_item = ProgrammeItemNumber::from_block(group.d);
            }
            (1, GroupVersion::B) => {
                self.programme_item = ProgrammeItemNumber::from_block(group.d);
            }
            (2, version) => self.radio_text_segment(group, version),
            (4, GroupVersion::A) => {
                self.clock = Some(ClockTime::from_blocks(group.b, group.c, group.d));
            }
            (10, GroupVersion::A) => self.pty_name_segment(group),
            _ => return None,
        }
        Some(group_type)
    }

    /// Groups 0A/0B: two station name characters plus one DI bit
    fn station_name_segment(&mut self, group: RdsGroup) {
        let address = usize::from(group.b & 0x0003);
        if address == 0 {
            self.decoder_id = 0;
            self.station_name = [0; STATION_NAME_LEN];
        }

        let [hi, lo] = group.d.to_be_bytes();
        self.station_name[address * 2] = hi;
        self.station_name[address * 2 + 1] = lo;

        // segment 0 carries d3, segment 3 carries d0
        let di = ((group.b >> 2) & 1) as u8;
        self.decoder_id |= di << (3 - address);

        self.traffic_announcement = group.b & 0x0010 != 0;
        self.music = group.b & 0x0008 != 0;
    }

    /// Group 1A block C: extended country code and language code
    fn slow_labelling(&mut self, block_c: u16) {
        self.extended_country_code = (block_c & 0x00FF) as u8;
        if block_c & 0xB000 != 0 {
            self.language_code = block_c & 0x0FFF;
        }
    }

    /// Groups 2A/2B: radio text segment
    fn radio_text_segment(&mut self, group: RdsGroup, version: GroupVersion) {
        let ab = group.b & AB_FLAG != 0;
        if ab != self.text_ab {
            self.text_ab = ab;
            self.radio_text = [0; RADIO_TEXT_LEN];
        }

        let address = usize::from(group.b & 0x000F);
        match version {
            GroupVersion::A => {
                let start = address * 4;
                let [c_hi, c_lo] = group.c.to_be_bytes();
                let [d_hi, d_lo] = group.d.to_be_bytes();
                self.radio_text[start..start + 4].copy_from_slice(&[c_hi, c_lo, d_hi, d_lo]);
            }
            GroupVersion::B => {
                let start = address * 2;
                self.radio_text[start..start + 2].copy_from_slice(&group.d.to_be_bytes());
            }
        }
    }

    /// Group 10A: programme type name half
    fn pty_name_segment(&mut self, group: RdsGroup) {
        if group.b & 0x000E != 0 {
            return;
        }

        let ab = group.b & AB_FLAG != 0;
        if ab != self.pty_name_ab {
            self.pty_name_ab = ab;
            self.pty_name = [0; PTY_NAME_LEN];
        }

        let start = if group.b & 0x0001 != 0 { 4 } else { 0 };
        let [c_hi, c_lo] = group.c.to_be_bytes();
        let [d_hi, d_lo] = group.d.to_be_bytes();
        self.pty_name[start..start + 4].copy_from_slice(&[c_hi, c_lo, d_hi, d_lo]);
    }

    /// Programme identification from the last group
    #[must_use]
    pub const fn programme_identification(&self) -> ProgrammeIdentification {
        self.pi
    }

    /// Country code (PI bits 15..12)
    #[must_use]
    pub const fn country_code(&self) -> u8 {
        self.pi.country_code
    }

    /// Area coverage code (PI bits 11..8)
    #[must_use]
    pub const fn area_coverage(&self) -> u8 {
        self.pi.area_coverage
    }

    /// Programme reference number (PI bits 7..0)
    #[must_use]
    pub const fn reference_number(&self) -> u8 {
        self.pi.reference_number
    }

    /// Station carries traffic programmes (TP)
    #[must_use]
    pub const fn traffic_programme(&self) -> bool {
        self.traffic_programme
    }

    /// Programme type (PTY)
    #[must_use]
    pub const fn programme_type(&self) -> ProgrammeType {
        self.programme_type
    }

    /// Traffic announcement in progress (TA, group 0)
    #[must_use]
    pub const fn traffic_announcement(&self) -> bool {
        self.traffic_announcement
    }

    /// Music is broadcast, false for speech (M/S, group 0)
    #[must_use]
    pub const fn music(&self) -> bool {
        self.music
    }

    /// Decoder identification bits collected so far
    #[must_use]
    pub const fn decoder_identification(&self) -> DecoderIdentification {
        DecoderIdentification::from_bits(self.decoder_id)
    }

    /// Raw station name buffer (unreceived characters are 0)
    #[must_use]
    pub const fn station_name_bytes(&self) -> &[u8; STATION_NAME_LEN] {
        &self.station_name
    }

    /// Station name (PS)
    #[must_use]
    pub fn station_name(&self) -> String<STATION_NAME_LEN> {
        text(&self.station_name)
    }

    /// Extended country code (group 1A)
    #[must_use]
    pub const fn extended_country_code(&self) -> u8 {
        self.extended_country_code
    }

    /// Extended country code looked up in the ECC table, `None` when
    /// reserved or unlisted
    #[must_use]
    pub const fn extended_country(&self) -> Option<ExtendedCountryCode> {
        ExtendedCountryCode::from_code(self.extended_country_code)
    }

    /// 12-bit language code (group 1A)
    #[must_use]
    pub const fn language_code(&self) -> u16 {
        self.language_code
    }

    /// Programme item number (groups 1A/1B)
    #[must_use]
    pub const fn programme_item(&self) -> ProgrammeItemNumber {
        self.programme_item
    }

    /// Raw radio text buffer (unreceived characters are 0)
    #[must_use]
    pub const fn radio_text_bytes(&self) -> &[u8; RADIO_TEXT_LEN] {
        &self.radio_text
    }

    /// Radio text (RT), cut at the carriage return end marker
    #[must_use]
    pub fn radio_text(&self) -> String<RADIO_TEXT_LEN> {
        text(&self.radio_text)
    }

    /// Current A/B flag of the radio text
    #[must_use]
    pub const fn radio_text_ab(&self) -> bool {
        self.text_ab
    }

    /// Clock time and date, None until a group 4A was decoded
    #[must_use]
    pub const fn clock_time(&self) -> Option<ClockTime> {
        self.clock
    }

    /// Raw programme type name buffer (unreceived characters are 0)
    #[must_use]
    pub const fn pty_name_bytes(&self) -> &[u8; PTY_NAME_LEN] {
        &self.pty_name
    }

    /// Programme type name (PTYN)
    #[must_use]
    pub fn pty_name(&self) -> String<PTY_NAME_LEN> {
        text(&self.pty_name)
    }

    /// Forget everything, e.g. after retuning
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RdsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a text buffer: trailing gaps dropped, gaps shown as spaces,
/// stops at CR, non-printable bytes shown as `?`
fn text<const N: usize>(bytes: &[u8; N]) -> String<N> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let mut out = String::new();
    for &b in &bytes[..end] {
        let ch = match b {
            0x0D => break,
            0 => ' ',
            0x20..=0x7E => char::from(b),
            _ => '?',
        };
        // at most N single-byte chars, cannot overflow
        let _ = out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rendering() {
        let mut buf = [0u8; 8];
        buf[..2].copy_from_slice(b"AB");
        buf[4..6].copy_from_slice(b"EF");
        assert_eq!(text(&buf).as_str(), "AB  EF");

        let buf = *b"Hi\r junk";
        assert_eq!(text(&buf).as_str(), "Hi");

        let buf = [0xC4, b'x', 0, 0];
        assert_eq!(text(&buf).as_str(), "?x");
    }

    #[test]
    fn di_bit_positions() {
        let mut dec = RdsDecoder::new();
        // segment 3 with DI set -> d0 (stereo)
        dec.decode(RdsGroup::new([0x1234, 0x0007, 0, 0x4142]));
        assert!(dec.decoder_identification().stereo());
        // segment 0 clears, then sets d3
        dec.decode(RdsGroup::new([0x1234, 0x0004, 0, 0x4142]));
        assert_eq!(dec.decoder_identification().bits(), 0x8);
    }
}
