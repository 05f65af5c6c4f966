//! RDA5807 Register Image
//!
//! Plain 16-bit storage for every register the driver touches, with named
//! bitfields expressed as explicit mask/shift pairs. The raw value and the
//! field views share the same storage, so they can never disagree.
//!
//! [`ShadowImage`] holds the last value transmitted for each writable
//! register and is used only for change detection.

use crate::config::{defaults, READ_REGISTER_COUNT, WRITE_REGISTER_COUNT};

/// Register address
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    /// Chip identification
    ChipId,
    /// Power, mute, seek and clock control
    Reg02,
    /// Channel, band, spacing and tune
    Reg03,
    /// GPIO, RDS FIFO, de-emphasis, soft-mute, AFC
    Reg04,
    /// Volume, LNA and seek threshold
    Reg05,
    /// I2S configuration
    Reg06,
    /// Frequency mode, soft blend, 65M/50M band select
    Reg07,
    /// Direct frequency offset
    Reg08,
    /// Read channel and seek/tune/RDS status
    Reg0A,
    /// RSSI, station flags and RDS block errors
    Reg0B,
    /// RDS block A
    Reg0C,
    /// RDS block B
    Reg0D,
    /// RDS block C
    Reg0E,
    /// RDS block D
    Reg0F,
}

impl Register {
    /// Writable registers in device-mandated transmission order
    pub const WRITABLE: [Self; WRITE_REGISTER_COUNT] = [
        Self::Reg02,
        Self::Reg03,
        Self::Reg04,
        Self::Reg05,
        Self::Reg06,
        Self::Reg07,
        Self::Reg08,
    ];

    /// Status registers in burst read order
    pub const READABLE: [Self; READ_REGISTER_COUNT] = [
        Self::Reg0A,
        Self::Reg0B,
        Self::Reg0C,
        Self::Reg0D,
        Self::Reg0E,
        Self::Reg0F,
    ];

    /// Register index on the random-access interface
    #[must_use]
    pub const fn address(self) -> u8 {
        match self {
            Self::ChipId => 0x00,
            Self::Reg02 => 0x02,
            Self::Reg03 => 0x03,
            Self::Reg04 => 0x04,
            Self::Reg05 => 0x05,
            Self::Reg06 => 0x06,
            Self::Reg07 => 0x07,
            Self::Reg08 => 0x08,
            Self::Reg0A => 0x0A,
            Self::Reg0B => 0x0B,
            Self::Reg0C => 0x0C,
            Self::Reg0D => 0x0D,
            Self::Reg0E => 0x0E,
            Self::Reg0F => 0x0F,
        }
    }

    /// Look up a register by its address
    #[must_use]
    pub const fn from_address(address: u8) -> Option<Self> {
        match address {
            0x00 => Some(Self::ChipId),
            0x02 => Some(Self::Reg02),
            0x03 => Some(Self::Reg03),
            0x04 => Some(Self::Reg04),
            0x05 => Some(Self::Reg05),
            0x06 => Some(Self::Reg06),
            0x07 => Some(Self::Reg07),
            0x08 => Some(Self::Reg08),
            0x0A => Some(Self::Reg0A),
            0x0B => Some(Self::Reg0B),
            0x0C => Some(Self::Reg0C),
            0x0D => Some(Self::Reg0D),
            0x0E => Some(Self::Reg0E),
            0x0F => Some(Self::Reg0F),
            _ => None,
        }
    }

    /// Position within [`Register::WRITABLE`]
    #[must_use]
    pub const fn write_index(self) -> Option<usize> {
        match self {
            Self::Reg02 => Some(0),
            Self::Reg03 => Some(1),
            Self::Reg04 => Some(2),
            Self::Reg05 => Some(3),
            Self::Reg06 => Some(4),
            Self::Reg07 => Some(5),
            Self::Reg08 => Some(6),
            _ => None,
        }
    }

    /// Position within [`Register::READABLE`]
    #[must_use]
    pub const fn read_index(self) -> Option<usize> {
        match self {
            Self::Reg0A => Some(0),
            Self::Reg0B => Some(1),
            Self::Reg0C => Some(2),
            Self::Reg0D => Some(3),
            Self::Reg0E => Some(4),
            Self::Reg0F => Some(5),
            _ => None,
        }
    }

    /// Whether the register belongs to the control block
    #[must_use]
    pub const fn is_writable(self) -> bool {
        self.write_index().is_some()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Register {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "R{:02X}", self.address());
    }
}

/// A bitfield inside one register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Owning register
    pub register: Register,
    /// Bit offset of the least significant bit
    pub shift: u8,
    /// Width in bits (1..=16)
    pub width: u8,
}

impl Field {
    /// Define a field
    #[must_use]
    pub const fn new(register: Register, shift: u8, width: u8) -> Self {
        Self {
            register,
            shift,
            width,
        }
    }

    /// Unshifted mask covering `width` bits
    #[must_use]
    pub const fn mask(self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    /// Extract the field from a raw register value
    #[must_use]
    pub const fn extract(self, raw: u16) -> u16 {
        (raw >> self.shift) & self.mask()
    }

    /// Replace the field in a raw register value, truncating `value` to width
    #[must_use]
    pub const fn insert(self, raw: u16, value: u16) -> u16 {
        let mask = self.mask() << self.shift;
        (raw & !mask) | ((value << self.shift) & mask)
    }
}

/// Field definitions, `(register, bit offset, width)`
pub mod field {
    use super::{Field, Register};

    /// 02[0]: power up enable
    pub const ENABLE: Field = Field::new(Register::Reg02, 0, 1);
    /// 02[1]: soft reset
    pub const SOFT_RESET: Field = Field::new(Register::Reg02, 1, 1);
    /// 02[2]: new demodulation method
    pub const NEW_METHOD: Field = Field::new(Register::Reg02, 2, 1);
    /// 02[3]: RDS/RBDS enable
    pub const RDS_EN: Field = Field::new(Register::Reg02, 3, 1);
    /// 02[6:4]: reference clock mode
    pub const CLK_MODE: Field = Field::new(Register::Reg02, 4, 3);
    /// 02[7]: seek mode, 1 = stop at band limit
    pub const SKMODE: Field = Field::new(Register::Reg02, 7, 1);
    /// 02[8]: seek start
    pub const SEEK: Field = Field::new(Register::Reg02, 8, 1);
    /// 02[9]: seek up
    pub const SEEKUP: Field = Field::new(Register::Reg02, 9, 1);
    /// 02[10]: RCLK direct input
    pub const RCLK_DIRECT_INPUT: Field = Field::new(Register::Reg02, 10, 1);
    /// 02[11]: RCLK always supplied (non-calibrate mode)
    pub const RCLK_NON_CALIBRATE: Field = Field::new(Register::Reg02, 11, 1);
    /// 02[12]: bass boost
    pub const BASS: Field = Field::new(Register::Reg02, 12, 1);
    /// 02[13]: force mono
    pub const MONO: Field = Field::new(Register::Reg02, 13, 1);
    /// 02[14]: mute disable, 0 = muted
    pub const DMUTE: Field = Field::new(Register::Reg02, 14, 1);
    /// 02[15]: audio output high-Z disable, 1 = normal operation
    pub const DHIZ: Field = Field::new(Register::Reg02, 15, 1);

    /// 03[1:0]: channel spacing
    pub const SPACE: Field = Field::new(Register::Reg03, 0, 2);
    /// 03[3:2]: band select
    pub const BAND: Field = Field::new(Register::Reg03, 2, 2);
    /// 03[4]: tune
    pub const TUNE: Field = Field::new(Register::Reg03, 4, 1);
    /// 03[5]: direct control mode (test)
    pub const DIRECT_MODE: Field = Field::new(Register::Reg03, 5, 1);
    /// 03[15:6]: channel select
    pub const CHAN: Field = Field::new(Register::Reg03, 6, 10);

    /// 04[1:0]: GPIO1 function
    pub const GPIO1: Field = Field::new(Register::Reg04, 0, 2);
    /// 04[3:2]: GPIO2 function
    pub const GPIO2: Field = Field::new(Register::Reg04, 2, 2);
    /// 04[5:4]: GPIO3 function
    pub const GPIO3: Field = Field::new(Register::Reg04, 4, 2);
    /// 04[6]: I2S bus enable
    pub const I2S_ENABLE: Field = Field::new(Register::Reg04, 6, 1);
    /// 04[8]: AFC disable
    pub const AFCD: Field = Field::new(Register::Reg04, 8, 1);
    /// 04[9]: soft mute enable
    pub const SOFTMUTE: Field = Field::new(Register::Reg04, 9, 1);
    /// 04[10]: RDS FIFO clear
    pub const RDS_FIFO_CLR: Field = Field::new(Register::Reg04, 10, 1);
    /// 04[11]: de-emphasis, 1 = 50 us
    pub const DE: Field = Field::new(Register::Reg04, 11, 1);
    /// 04[12]: RDS FIFO mode enable
    pub const RDS_FIFO_EN: Field = Field::new(Register::Reg04, 12, 1);
    /// 04[13]: RBDS mode, 0 = RDS only
    pub const RBDS: Field = Field::new(Register::Reg04, 13, 1);
    /// 04[14]: seek/tune complete interrupt enable
    pub const STCIEN: Field = Field::new(Register::Reg04, 14, 1);

    /// 05[3:0]: volume
    pub const VOLUME: Field = Field::new(Register::Reg05, 0, 4);
    /// 05[5:4]: LNA working current
    pub const LNA_ICSEL: Field = Field::new(Register::Reg05, 4, 2);
    /// 05[7:6]: LNA input port
    pub const LNA_PORT_SEL: Field = Field::new(Register::Reg05, 6, 2);
    /// 05[11:8]: seek SNR threshold
    pub const SEEKTH: Field = Field::new(Register::Reg05, 8, 4);
    /// 05[14:13]: seek mode, 2 = RSSI seek
    pub const SEEK_MODE: Field = Field::new(Register::Reg05, 13, 2);
    /// 05[15]: interrupt mode, 0 = 5 ms pulse
    pub const INT_MODE: Field = Field::new(Register::Reg05, 15, 1);

    /// 06[0]: right channel data delay
    pub const R_DELY: Field = Field::new(Register::Reg06, 0, 1);
    /// 06[1]: left channel data delay
    pub const L_DELY: Field = Field::new(Register::Reg06, 1, 1);
    /// 06[2]: invert SCLK output in master mode
    pub const SCLK_O_EDGE: Field = Field::new(Register::Reg06, 2, 1);
    /// 06[3]: invert WS output in master mode
    pub const SW_O_EDGE: Field = Field::new(Register::Reg06, 3, 1);
    /// 06[7:4]: I2S word select rate
    pub const I2S_SW_CNT: Field = Field::new(Register::Reg06, 4, 4);
    /// 06[8]: invert internal WS
    pub const WS_I_EDGE: Field = Field::new(Register::Reg06, 8, 1);
    /// 06[9]: signed I2S data
    pub const DATA_SIGNED: Field = Field::new(Register::Reg06, 9, 1);
    /// 06[10]: invert internal SCLK
    pub const SCLK_I_EDGE: Field = Field::new(Register::Reg06, 10, 1);
    /// 06[11]: WS polarity, 0 = left channel on high
    pub const SW_LR: Field = Field::new(Register::Reg06, 11, 1);
    /// 06[12]: I2S slave mode
    pub const I2S_MODE: Field = Field::new(Register::Reg06, 12, 1);
    /// 06[14:13]: open reserved registers for writing
    pub const OPEN_MODE: Field = Field::new(Register::Reg06, 13, 2);

    /// 07[0]: frequency mode, 1 = direct frequency
    pub const FREQ_MODE: Field = Field::new(Register::Reg07, 0, 1);
    /// 07[1]: soft blend enable
    pub const SOFTBLEND_EN: Field = Field::new(Register::Reg07, 1, 1);
    /// 07[7:2]: seek threshold for the old seek mode
    pub const SEEK_TH_OLD: Field = Field::new(Register::Reg07, 2, 6);
    /// 07[9]: East Europe band, 1 = 65–76 MHz, 0 = 50–76 MHz
    pub const MODE_65M_50M: Field = Field::new(Register::Reg07, 9, 1);
    /// 07[14:10]: noise soft blend threshold
    pub const TH_SOFTBLEND: Field = Field::new(Register::Reg07, 10, 5);

    /// 08[15:0]: direct frequency offset in kHz
    pub const FREQ_DIRECT: Field = Field::new(Register::Reg08, 0, 16);

    /// 0A[9:0]: current channel
    pub const READCHAN: Field = Field::new(Register::Reg0A, 0, 10);
    /// 0A[10]: stereo indicator
    pub const ST: Field = Field::new(Register::Reg0A, 10, 1);
    /// 0A[11]: block E found (RBDS)
    pub const BLK_E: Field = Field::new(Register::Reg0A, 11, 1);
    /// 0A[12]: RDS synchronised
    pub const RDSS: Field = Field::new(Register::Reg0A, 12, 1);
    /// 0A[13]: seek fail
    pub const SF: Field = Field::new(Register::Reg0A, 13, 1);
    /// 0A[14]: seek/tune complete
    pub const STC: Field = Field::new(Register::Reg0A, 14, 1);
    /// 0A[15]: new RDS group ready
    pub const RDSR: Field = Field::new(Register::Reg0A, 15, 1);

    /// 0B[1:0]: block error level of RDS data 1 (blocks B/D)
    pub const BLERB: Field = Field::new(Register::Reg0B, 0, 2);
    /// 0B[3:2]: block error level of RDS data 0 (blocks A/C)
    pub const BLERA: Field = Field::new(Register::Reg0B, 2, 2);
    /// 0B[4]: 1 = registers 0C..0F hold block E
    pub const ABCD_E: Field = Field::new(Register::Reg0B, 4, 1);
    /// 0B[7]: FM ready
    pub const FM_READY: Field = Field::new(Register::Reg0B, 7, 1);
    /// 0B[8]: current channel is a station
    pub const FM_TRUE: Field = Field::new(Register::Reg0B, 8, 1);
    /// 0B[15:9]: RSSI, logarithmic
    pub const RSSI: Field = Field::new(Register::Reg0B, 9, 7);
}

/// In-memory copy of all device registers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterImage {
    chip_id: u16,
    write: [u16; WRITE_REGISTER_COUNT],
    read: [u16; READ_REGISTER_COUNT],
}

impl RegisterImage {
    /// Create an image holding the power-on reset values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chip_id: defaults::CHIP_ID,
            write: defaults::WRITE,
            read: defaults::READ,
        }
    }

    /// Raw register value
    #[must_use]
    pub const fn get(&self, register: Register) -> u16 {
        if let Some(i) = register.write_index() {
            self.write[i]
        } else if let Some(i) = register.read_index() {
            self.read[i]
        } else {
            self.chip_id
        }
    }

    /// Replace a raw register value (local only)
    pub fn set(&mut self, register: Register, value: u16) {
        if let Some(i) = register.write_index() {
            self.write[i] = value;
        } else if let Some(i) = register.read_index() {
            self.read[i] = value;
        } else {
            self.chip_id = value;
        }
    }

    /// Read a multi-bit field
    #[must_use]
    pub const fn field(&self, field: Field) -> u16 {
        field.extract(self.get(field.register))
    }

    /// Write a multi-bit field, truncating `value` to the field width
    pub fn set_field(&mut self, field: Field, value: u16) {
        let raw = field.insert(self.get(field.register), value);
        self.set(field.register, raw);
    }

    /// Read a single-bit field
    #[must_use]
    pub const fn flag(&self, field: Field) -> bool {
        self.field(field) != 0
    }

    /// Write a single-bit field
    pub fn set_flag(&mut self, field: Field, on: bool) {
        self.set_field(field, u16::from(on));
    }

    /// Control registers in transmission order
    #[must_use]
    pub const fn control_block(&self) -> &[u16; WRITE_REGISTER_COUNT] {
        &self.write
    }

    /// Status registers in read order
    #[must_use]
    pub const fn status_block(&self) -> &[u16; READ_REGISTER_COUNT] {
        &self.read
    }

    /// Replace every status register at once
    pub fn set_status_block(&mut self, values: [u16; READ_REGISTER_COUNT]) {
        self.read = values;
    }
}

impl Default for RegisterImage {
    fn default() -> Self {
        Self::new()
    }
}

/// Last value transmitted for each writable register
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowImage {
    values: [u16; WRITE_REGISTER_COUNT],
}

impl ShadowImage {
    /// Create a shadow matching the power-on defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: defaults::WRITE,
        }
    }

    /// Last transmitted value, None for non-writable registers
    #[must_use]
    pub const fn get(&self, register: Register) -> Option<u16> {
        match register.write_index() {
            Some(i) => Some(self.values[i]),
            None => None,
        }
    }

    /// Record that `value` was sent for `register`
    pub fn commit(&mut self, register: Register, value: u16) {
        if let Some(i) = register.write_index() {
            self.values[i] = value;
        }
    }

    /// Record that the whole control block was sent
    pub fn commit_all(&mut self, image: &RegisterImage) {
        self.values = *image.control_block();
    }

    /// Check whether `register` differs from what the device last received
    #[must_use]
    pub fn is_dirty(&self, image: &RegisterImage, register: Register) -> bool {
        self.get(register)
            .is_some_and(|sent| sent != image.get(register))
    }

    /// Check if any writable register differs
    #[must_use]
    pub fn any_dirty(&self, image: &RegisterImage) -> bool {
        self.values != *image.control_block()
    }

    /// Iterate over changed registers in transmission order
    pub fn dirty_regs<'a>(
        &'a self,
        image: &'a RegisterImage,
    ) -> impl Iterator<Item = (Register, u16)> + 'a {
        Register::WRITABLE
            .into_iter()
            .zip(self.values.iter().zip(image.control_block().iter()))
            .filter(|(_, (sent, current))| sent != current)
            .map(|(reg, (_, &current))| (reg, current))
    }
}

impl Default for ShadowImage {
    fn default() -> Self {
        Self::new()
    }
}
