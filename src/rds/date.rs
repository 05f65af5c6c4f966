//! Modified Julian Day to Gregorian calendar conversion
//!
//! Implements the conversion published with the RDS standard
//! (EN 50067 Annex G). The formulas are exact between 1900-03-01 and
//! 2100-02-28; outside that window every field is clamped to its legal
//! range instead of wrapping.

/// Calendar date decoded from group 4A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date {
    /// Full year
    pub year: u16,
    /// Month, 1..=12
    pub month: u8,
    /// Day of month, 1..=31
    pub day: u8,
    /// Day of week, 1 = Monday ..= 7 = Sunday
    pub weekday: u8,
    /// ISO 8601 week number, 1..=53
    pub week: u8,
}

impl Date {
    /// Earliest representable year (MJD 0 is 1858-11-17)
    pub const MIN_YEAR: u16 = 1858;

    /// Latest year reachable from a 17-bit MJD
    pub const MAX_YEAR: u16 = 2218;

    /// Convert a Modified Julian Day
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn from_mjd(mjd: u32) -> Self {
        let mjd_i = i64::from(mjd);
        let mjd_f = f64::from(mjd);

        let y1 = ((mjd_f - 15_078.2) / 365.25) as i64;
        let y_days = (y1 as f64 * 365.25) as i64;
        let m1 = ((mjd_f - 14_956.1 - y_days as f64) / 30.6001) as i64;
        let day = mjd_i - 14_956 - y_days - (m1 as f64 * 30.6001) as i64;

        let k = i64::from(m1 == 14 || m1 == 15);
        let year = 1900 + y1 + k;
        let month = m1 - 1 - k * 12;

        let weekday = (mjd_i + 2) % 7 + 1;

        let w = (mjd_f / 7.0 - 2144.64) as i64;
        let wy = ((w * 28) as f64 / 1461.0 - 0.0079) as i64;
        let week = w - ((wy * 1461) as f64 / 28.0 + 0.41) as i64;

        Self {
            year: year.clamp(i64::from(Self::MIN_YEAR), i64::from(Self::MAX_YEAR)) as u16,
            month: month.clamp(1, 12) as u8,
            day: day.clamp(1, 31) as u8,
            weekday: weekday.clamp(1, 7) as u8,
            week: week.clamp(1, 53) as u8,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Date {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u16}-{=u8:02}-{=u8:02} (wd {=u8}, wk {=u8})",
            self.year,
            self.month,
            self.day,
            self.weekday,
            self.week
        );
    }
}

/// Clock time and date from group 4A
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    /// Modified Julian Day as transmitted (17 bits)
    pub mjd: u32,
    /// UTC hour, 0..=23
    pub hour: u8,
    /// UTC minute, 0..=59
    pub minute: u8,
    /// Local offset is negative (west of UTC)
    pub offset_negative: bool,
    /// Local offset magnitude in half hours, 0..=31
    pub offset_half_hours: u8,
    /// Gregorian date derived from `mjd`
    pub date: Date,
}

impl ClockTime {
    /// Unpack blocks B, C and D of a group 4A
    #[must_use]
    pub fn from_blocks(b: u16, c: u16, d: u16) -> Self {
        let mjd = (u32::from(b & 0x0003) << 15) | u32::from(c >> 1);
        let hour = (((c & 0x0001) << 4) | (d >> 12)) as u8;
        let minute = ((d >> 6) & 0x3F) as u8;

        Self {
            mjd,
            hour: hour.min(23),
            minute: minute.min(59),
            offset_negative: d & 0x0020 != 0,
            offset_half_hours: (d & 0x001F) as u8,
            date: Date::from_mjd(mjd),
        }
    }

    /// Signed local offset in minutes
    #[must_use]
    pub fn offset_minutes(&self) -> i16 {
        let minutes = i16::from(self.offset_half_hours) * 30;
        if self.offset_negative {
            -minutes
        } else {
            minutes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_dates() {
        let d = Date::from_mjd(45_218);
        assert_eq!((d.year, d.month, d.day), (1982, 9, 6));
        assert_eq!(d.weekday, 1);
        assert_eq!(d.week, 36);

        let d = Date::from_mjd(44_239);
        assert_eq!((d.year, d.month, d.day), (1980, 1, 1));
        assert_eq!(d.weekday, 2);
        assert_eq!(d.week, 1);
    }

    #[test]
    fn february_uses_month_code_15() {
        // 2000-02-29
        let d = Date::from_mjd(51_603);
        assert_eq!((d.year, d.month, d.day), (2000, 2, 29));
    }

    #[test]
    fn clock_fields_unpack() {
        // MJD 45218, 13:45 UTC, +2 hours
        let mjd: u32 = 45_218;
        let b = (mjd >> 15) as u16 | 0x4000;
        let c = ((mjd & 0x7FFF) << 1) as u16 | (13 >> 4);
        let d = ((13 & 0xF) << 12) | (45 << 6) | 4;
        let t = ClockTime::from_blocks(b, c, d);
        assert_eq!(t.mjd, mjd);
        assert_eq!(t.hour, 13);
        assert_eq!(t.minute, 45);
        assert!(!t.offset_negative);
        assert_eq!(t.offset_minutes(), 120);
    }

    #[test]
    fn out_of_range_time_is_clamped() {
        // hour 31, minute 63
        let t = ClockTime::from_blocks(0, 0x0001, 0xFFC0);
        assert_eq!(t.hour, 23);
        assert_eq!(t.minute, 59);
    }
}
