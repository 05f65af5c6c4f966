//! RDA5807 FM Receiver Driver
//!
//! Owns the bus, the local [`RegisterImage`] and the [`ShadowImage`] of
//! what the device last received. Setters only touch the image; nothing
//! reaches the chip until one of the synchronization operations runs:
//!
//! - [`Rda5807::write_all`]: whole control block, one sequential transfer
//! - [`Rda5807::write_changed`]: only registers that differ from the shadow
//! - [`Rda5807::read_status`]: whole status block, one sequential transfer
//!
//! The `update_*` helpers and [`Rda5807::tune`] combine a local change with
//! the addressed writes the chip needs.

use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::config::{Config, WRITE_REGISTER_COUNT};
use crate::error::{DriverResult, Error};
use crate::hal::i2c::RdaBus;
use crate::radio::tuning::{self, SeekStatus, TuneTarget, TuningRequest};
use crate::rds::{GroupType, RdsDecoder, RdsGroup};
use crate::registers::{field, Register, RegisterImage, ShadowImage};
use crate::types::{
    Band, BlockErrorLevel, ChannelSpacing, ClockMode, Frequency, FrequencyMode, Gpio, GpioMode,
    LnaCurrent, LnaInput, SeekDirection, SeekWrap, Volume, WsStep,
};

/// RDS data registers in block order
const RDS_BLOCKS: [Register; 4] = [
    Register::Reg0C,
    Register::Reg0D,
    Register::Reg0E,
    Register::Reg0F,
];

/// `SEEK_MODE` value selecting RSSI based seeking
const SEEK_MODE_RSSI: u16 = 0b10;

/// `OPEN_MODE` value unlocking the reserved registers
const OPEN_MODE_UNLOCKED: u16 = 0b11;

/// RDA5807 driver
pub struct Rda5807<I2C> {
    bus: RdaBus<I2C>,
    regs: RegisterImage,
    shadow: ShadowImage,
    config: Config,
    rds: Option<RdsDecoder>,
}

impl<I2C: I2c> Rda5807<I2C> {
    /// Create a driver holding the power-on defaults
    ///
    /// With [`Config::read_on_init`] the status block is read once; if that
    /// read fails the defaults are kept and the error is only logged.
    #[must_use]
    pub fn new(i2c: I2C, config: Config) -> Self {
        let mut radio = Self {
            bus: RdaBus::new(i2c),
            regs: RegisterImage::new(),
            shadow: ShadowImage::new(),
            config,
            rds: config.rds.then(RdsDecoder::new),
        };

        if config.read_on_init && radio.read_status().is_err() {
            warn!("initial status read failed, keeping defaults");
        }

        radio
    }

    /// Release the I2C peripheral
    #[must_use]
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Local register image
    #[must_use]
    pub const fn registers(&self) -> &RegisterImage {
        &self.regs
    }

    /// Values the device last received
    #[must_use]
    pub const fn shadow(&self) -> &ShadowImage {
        &self.shadow
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Send registers 02..08 in one sequential transfer
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails; the shadow is left untouched.
    pub fn write_all(&mut self) -> DriverResult<(), I2C::Error> {
        trace!("write_all");
        self.bus
            .write_block(self.regs.control_block())
            .map_err(Error::Bus)?;
        self.shadow.commit_all(&self.regs);
        Ok(())
    }

    /// Send every control register that differs from the shadow
    ///
    /// Registers are examined in order 02..08 and written one by one through
    /// the random-access interface. A failed write does not stop the pass and
    /// its shadow entry still takes the new value. Returns the number of
    /// successful writes.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] carrying the first failure, after the pass completed.
    pub fn write_changed(&mut self) -> DriverResult<usize, I2C::Error> {
        let mut written = 0;
        let mut first_error = None;

        let dirty: Vec<(Register, u16), WRITE_REGISTER_COUNT> =
            self.shadow.dirty_regs(&self.regs).collect();

        for (reg, value) in dirty {
            match self.bus.write_reg(reg.address(), value) {
                Ok(()) => written += 1,
                Err(e) => {
                    warn!("write of {} failed", reg);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
            self.shadow.commit(reg, value);
        }

        debug!("write_changed: {} register(s)", written);
        match first_error {
            Some(e) => Err(Error::Bus(e)),
            None => Ok(written),
        }
    }

    /// Read registers 0A..0F in one sequential transfer
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails or comes back short; the image is
    /// left unchanged.
    pub fn read_status(&mut self) -> DriverResult<(), I2C::Error> {
        let values = self.bus.read_block().map_err(Error::Bus)?;
        self.regs.set_status_block(values);
        trace!("status 0A={=u16:04X} 0B={=u16:04X}", values[0], values[1]);
        Ok(())
    }

    /// Send one control register through the random-access interface
    ///
    /// # Errors
    ///
    /// [`Error::NotWritable`] for status or chip-id registers,
    /// [`Error::Bus`] if the transfer fails.
    pub fn write_register(&mut self, register: Register) -> DriverResult<(), I2C::Error> {
        if !register.is_writable() {
            return Err(Error::NotWritable { register });
        }
        let value = self.regs.get(register);
        self.bus
            .write_reg(register.address(), value)
            .map_err(Error::Bus)?;
        self.shadow.commit(register, value);
        trace!("{} <- {=u16:04X}", register, value);
        Ok(())
    }

    /// Read one register through the random-access interface into the image
    ///
    /// Reading a control register also refreshes its shadow entry, since the
    /// value came from the device.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails; the image is left unchanged.
    pub fn read_register(&mut self, register: Register) -> DriverResult<u16, I2C::Error> {
        let value = fetch(&mut self.bus, &mut self.regs, register)?;
        self.shadow.commit(register, value);
        Ok(value)
    }

    // ========================================================================
    // Device operations
    // ========================================================================

    /// Read the chip identification register (0x00)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn read_chip_id(&mut self) -> DriverResult<u16, I2C::Error> {
        let id = self.read_register(Register::ChipId)?;
        debug!("chip id {=u16:04X}", id);
        Ok(id)
    }

    /// Pulse `SOFT_RESET`: set, send register 02, clear, send again
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if either transfer fails.
    pub fn soft_reset(&mut self) -> DriverResult<(), I2C::Error> {
        self.regs.set_flag(field::SOFT_RESET, true);
        self.write_register(Register::Reg02)?;
        self.regs.set_flag(field::SOFT_RESET, false);
        self.write_register(Register::Reg02)
    }

    /// Enable the receiver with audio output, unmuted, new demodulation
    /// method, RDS as configured, then send the whole control block
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn power_up(&mut self) -> DriverResult<(), I2C::Error> {
        self.regs.set_flag(field::SOFT_RESET, false);
        self.regs.set_flag(field::DHIZ, true);
        self.regs.set_flag(field::DMUTE, true);
        self.regs.set_flag(field::NEW_METHOD, true);
        self.regs.set_flag(field::RDS_EN, self.config.rds);
        self.regs.set_flag(field::ENABLE, true);
        debug!("power up, rds={}", self.config.rds);
        self.write_all()
    }

    /// Set mute and send register 02
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn update_mute(&mut self, muted: bool) -> DriverResult<(), I2C::Error> {
        self.set_mute(muted);
        self.write_register(Register::Reg02)
    }

    /// Set volume from a full-range byte (`value / 16`) and send register 05
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn update_volume(&mut self, value: u8) -> DriverResult<(), I2C::Error> {
        self.set_volume(Volume::from_u8_scaled(value));
        self.write_register(Register::Reg05)
    }

    /// Read register 0B and return the RSSI
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn update_rssi(&mut self) -> DriverResult<u8, I2C::Error> {
        self.read_register(Register::Reg0B)?;
        Ok(self.rssi())
    }

    /// Set SEEK and send register 02
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn update_seek(&mut self) -> DriverResult<(), I2C::Error> {
        self.regs.set_flag(field::SEEK, true);
        self.write_register(Register::Reg02)
    }

    /// Set TUNE and send register 03 (tune pulse)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn update_tune(&mut self) -> DriverResult<(), I2C::Error> {
        self.regs.set_flag(field::TUNE, true);
        self.write_register(Register::Reg03)
    }

    /// Read register 0A and report seek progress
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn poll_seek(&mut self) -> DriverResult<SeekStatus, I2C::Error> {
        self.read_register(Register::Reg0A)?;
        Ok(SeekStatus::from_image(&self.regs))
    }

    // ========================================================================
    // Tuning
    // ========================================================================

    /// Tune to `frequency` using the band, spacing and mode in the image
    ///
    /// Direct mode stores the kHz offset in register 08, then sends 07 and
    /// 08. Standard mode stores the channel, sends 02 and 03, then repeats
    /// tune pulse and 0A read until STC is set, at most
    /// [`Config::max_tune_polls`] times.
    ///
    /// # Errors
    ///
    /// - [`Error::FrequencyOutOfRange`] before any bus access or local change
    /// - [`Error::TuneTimeout`] when STC never appears
    /// - [`Error::Bus`] on any failed transfer
    pub fn tune(&mut self, frequency: Frequency) -> DriverResult<TuneTarget, I2C::Error> {
        let target = match TuningRequest::from_image(frequency, &self.regs).resolve() {
            Ok(target) => target,
            Err(e) => {
                warn!("cannot tune {}", frequency);
                return Err(e.into());
            }
        };

        debug!("tune {} -> {}", frequency, target);
        target.apply(&mut self.regs);

        match target {
            TuneTarget::Direct(_) => {
                self.write_register(Register::Reg07)?;
                self.write_register(Register::Reg08)?;
            }
            TuneTarget::Channel(_) => {
                // the chip only starts receiving after 02 is sent again here
                self.write_register(Register::Reg02)?;
                self.write_register(Register::Reg03)?;
                self.wait_tune_complete()?;
            }
        }

        Ok(target)
    }

    fn wait_tune_complete(&mut self) -> DriverResult<(), I2C::Error> {
        let max_polls = self.config.max_tune_polls.max(1);
        for poll in 1..=max_polls {
            self.update_tune()?;
            self.read_register(Register::Reg0A)?;
            if self.regs.flag(field::STC) {
                trace!("STC after {} poll(s)", poll);
                return Ok(());
            }
        }
        warn!("no STC after {} polls", max_polls);
        Err(Error::TuneTimeout { polls: max_polls })
    }

    /// Frequency in kHz of the channel reported by READCHAN, or of the
    /// direct offset in direct mode
    #[must_use]
    pub fn current_frequency_khz(&self) -> u32 {
        let band = self.band();
        let east65 = self.east_europe_65m();
        match self.frequency_mode() {
            FrequencyMode::Direct => tuning::direct_to_khz(self.frequency_direct(), band, east65),
            FrequencyMode::Standard => {
                tuning::channel_to_khz(self.read_channel(), band, self.channel_spacing(), east65)
            }
        }
    }

    /// Current frequency at 100 kHz resolution
    #[must_use]
    pub fn current_frequency(&self) -> Option<Frequency> {
        Frequency::from_khz(self.current_frequency_khz())
    }

    // ========================================================================
    // RDS
    // ========================================================================

    /// RDS access, None unless the driver was built with RDS enabled
    pub fn rds(&mut self) -> Option<RdsLink<'_, I2C>> {
        let decoder = self.rds.as_mut()?;
        Some(RdsLink {
            bus: &mut self.bus,
            regs: &mut self.regs,
            decoder,
        })
    }

    /// Decoded RDS state, None unless the driver was built with RDS enabled
    #[must_use]
    pub const fn rds_decoder(&self) -> Option<&RdsDecoder> {
        self.rds.as_ref()
    }

    // ========================================================================
    // Raw register access (local)
    // ========================================================================

    /// Raw register value from the image
    #[must_use]
    pub const fn register(&self, register: Register) -> u16 {
        self.regs.get(register)
    }

    /// Replace a raw register value in the image
    pub fn set_register(&mut self, register: Register, value: u16) {
        self.regs.set(register, value);
    }

    // ========================================================================
    // Register 02
    // ========================================================================

    /// Enable audio output (DHIZ set) or put it in high impedance
    pub fn set_audio_output(&mut self, enabled: bool) {
        self.regs.set_flag(field::DHIZ, enabled);
    }

    /// Audio output enabled
    #[must_use]
    pub const fn audio_output(&self) -> bool {
        self.regs.flag(field::DHIZ)
    }

    /// Mute audio (DMUTE is active low)
    pub fn set_mute(&mut self, muted: bool) {
        self.regs.set_flag(field::DMUTE, !muted);
    }

    /// Audio muted
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        !self.regs.flag(field::DMUTE)
    }

    /// Force mono output
    pub fn set_mono(&mut self, mono: bool) {
        self.regs.set_flag(field::MONO, mono);
    }

    /// Mono output forced
    #[must_use]
    pub const fn is_mono(&self) -> bool {
        self.regs.flag(field::MONO)
    }

    /// Bass boost
    pub fn set_bass_boost(&mut self, on: bool) {
        self.regs.set_flag(field::BASS, on);
    }

    /// Bass boost enabled
    #[must_use]
    pub const fn bass_boost(&self) -> bool {
        self.regs.flag(field::BASS)
    }

    /// RCLK always supplied (no calibration mode)
    pub fn set_rclk_non_calibrate(&mut self, on: bool) {
        self.regs.set_flag(field::RCLK_NON_CALIBRATE, on);
    }

    /// RCLK non-calibrate mode
    #[must_use]
    pub const fn rclk_non_calibrate(&self) -> bool {
        self.regs.flag(field::RCLK_NON_CALIBRATE)
    }

    /// RCLK fed as direct input instead of crystal
    pub fn set_rclk_direct_input(&mut self, on: bool) {
        self.regs.set_flag(field::RCLK_DIRECT_INPUT, on);
    }

    /// RCLK direct input mode
    #[must_use]
    pub const fn rclk_direct_input(&self) -> bool {
        self.regs.flag(field::RCLK_DIRECT_INPUT)
    }

    /// Seek direction
    pub fn set_seek_direction(&mut self, direction: SeekDirection) {
        self.regs
            .set_flag(field::SEEKUP, direction == SeekDirection::Up);
    }

    /// Seek direction
    #[must_use]
    pub const fn seek_direction(&self) -> SeekDirection {
        if self.regs.flag(field::SEEKUP) {
            SeekDirection::Up
        } else {
            SeekDirection::Down
        }
    }

    /// SEEK bit (start seeking when sent)
    pub fn set_seek(&mut self, on: bool) {
        self.regs.set_flag(field::SEEK, on);
    }

    /// SEEK bit
    #[must_use]
    pub const fn seek(&self) -> bool {
        self.regs.flag(field::SEEK)
    }

    /// Band edge behaviour while seeking
    pub fn set_seek_wrap(&mut self, wrap: SeekWrap) {
        self.regs
            .set_flag(field::SKMODE, wrap == SeekWrap::StopAtLimit);
    }

    /// Band edge behaviour while seeking
    #[must_use]
    pub const fn seek_wrap(&self) -> SeekWrap {
        if self.regs.flag(field::SKMODE) {
            SeekWrap::StopAtLimit
        } else {
            SeekWrap::Wrap
        }
    }

    /// Reference clock frequency
    pub fn set_clock_mode(&mut self, mode: ClockMode) {
        self.regs.set_field(field::CLK_MODE, mode.bits());
    }

    /// Reference clock frequency, None for the reserved code
    #[must_use]
    pub const fn clock_mode(&self) -> Option<ClockMode> {
        ClockMode::from_bits(self.regs.field(field::CLK_MODE))
    }

    /// RDS/RBDS reception
    pub fn set_rds_enabled(&mut self, on: bool) {
        self.regs.set_flag(field::RDS_EN, on);
    }

    /// RDS/RBDS reception enabled
    #[must_use]
    pub const fn rds_enabled(&self) -> bool {
        self.regs.flag(field::RDS_EN)
    }

    /// New demodulation method (better sensitivity)
    pub fn set_new_method(&mut self, on: bool) {
        self.regs.set_flag(field::NEW_METHOD, on);
    }

    /// New demodulation method
    #[must_use]
    pub const fn new_method(&self) -> bool {
        self.regs.flag(field::NEW_METHOD)
    }

    /// `SOFT_RESET` bit
    pub fn set_soft_reset(&mut self, on: bool) {
        self.regs.set_flag(field::SOFT_RESET, on);
    }

    /// `SOFT_RESET` bit
    #[must_use]
    pub const fn soft_reset_flag(&self) -> bool {
        self.regs.flag(field::SOFT_RESET)
    }

    /// Power up enable
    pub fn set_enabled(&mut self, on: bool) {
        self.regs.set_flag(field::ENABLE, on);
    }

    /// Power up enable
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.regs.flag(field::ENABLE)
    }

    // ========================================================================
    // Register 03
    // ========================================================================

    /// Channel index (truncated to 10 bits)
    pub fn set_channel(&mut self, channel: u16) {
        self.regs.set_field(field::CHAN, channel);
    }

    /// Channel index
    #[must_use]
    pub const fn channel(&self) -> u16 {
        self.regs.field(field::CHAN)
    }

    /// Direct mode (test mode)
    pub fn set_direct_mode(&mut self, on: bool) {
        self.regs.set_flag(field::DIRECT_MODE, on);
    }

    /// Direct mode
    #[must_use]
    pub const fn direct_mode(&self) -> bool {
        self.regs.flag(field::DIRECT_MODE)
    }

    /// TUNE bit
    pub fn set_tune(&mut self, on: bool) {
        self.regs.set_flag(field::TUNE, on);
    }

    /// TUNE bit
    #[must_use]
    pub const fn tune_flag(&self) -> bool {
        self.regs.flag(field::TUNE)
    }

    /// Band
    pub fn set_band(&mut self, band: Band) {
        self.regs.set_field(field::BAND, band.bits());
    }

    /// Band
    #[must_use]
    pub const fn band(&self) -> Band {
        Band::from_bits(self.regs.field(field::BAND))
    }

    /// Channel spacing
    pub fn set_channel_spacing(&mut self, spacing: ChannelSpacing) {
        self.regs.set_field(field::SPACE, spacing.bits());
    }

    /// Channel spacing
    #[must_use]
    pub const fn channel_spacing(&self) -> ChannelSpacing {
        ChannelSpacing::from_bits(self.regs.field(field::SPACE))
    }

    // ========================================================================
    // Register 04
    // ========================================================================

    /// Seek/tune complete interrupt on GPIO2
    pub fn set_stc_interrupt(&mut self, on: bool) {
        self.regs.set_flag(field::STCIEN, on);
    }

    /// Seek/tune complete interrupt
    #[must_use]
    pub const fn stc_interrupt(&self) -> bool {
        self.regs.flag(field::STCIEN)
    }

    /// RBDS mode (false: RDS only)
    pub fn set_rbds(&mut self, on: bool) {
        self.regs.set_flag(field::RBDS, on);
    }

    /// RBDS mode
    #[must_use]
    pub const fn rbds(&self) -> bool {
        self.regs.flag(field::RBDS)
    }

    /// RDS FIFO mode
    pub fn set_rds_fifo(&mut self, on: bool) {
        self.regs.set_flag(field::RDS_FIFO_EN, on);
    }

    /// RDS FIFO mode
    #[must_use]
    pub const fn rds_fifo(&self) -> bool {
        self.regs.flag(field::RDS_FIFO_EN)
    }

    /// De-emphasis 50 µs (false: 75 µs)
    pub fn set_deemphasis_50us(&mut self, on: bool) {
        self.regs.set_flag(field::DE, on);
    }

    /// De-emphasis 50 µs
    #[must_use]
    pub const fn deemphasis_50us(&self) -> bool {
        self.regs.flag(field::DE)
    }

    /// Clear RDS FIFO
    pub fn set_rds_fifo_clear(&mut self, on: bool) {
        self.regs.set_flag(field::RDS_FIFO_CLR, on);
    }

    /// Clear RDS FIFO bit
    #[must_use]
    pub const fn rds_fifo_clear(&self) -> bool {
        self.regs.flag(field::RDS_FIFO_CLR)
    }

    /// Soft mute
    pub fn set_soft_mute(&mut self, on: bool) {
        self.regs.set_flag(field::SOFTMUTE, on);
    }

    /// Soft mute
    #[must_use]
    pub const fn soft_mute(&self) -> bool {
        self.regs.flag(field::SOFTMUTE)
    }

    /// Automatic frequency correction (AFCD is active low)
    pub fn set_afc(&mut self, enabled: bool) {
        self.regs.set_flag(field::AFCD, !enabled);
    }

    /// Automatic frequency correction
    #[must_use]
    pub const fn afc(&self) -> bool {
        !self.regs.flag(field::AFCD)
    }

    /// I2S output
    pub fn set_i2s(&mut self, on: bool) {
        self.regs.set_flag(field::I2S_ENABLE, on);
    }

    /// I2S output
    #[must_use]
    pub const fn i2s(&self) -> bool {
        self.regs.flag(field::I2S_ENABLE)
    }

    /// GPIO pin function
    pub fn set_gpio(&mut self, pin: Gpio, mode: GpioMode) {
        self.regs.set_field(gpio_field(pin), mode.bits());
    }

    /// GPIO pin function
    #[must_use]
    pub const fn gpio(&self, pin: Gpio) -> GpioMode {
        GpioMode::from_bits(self.regs.field(gpio_field(pin)))
    }

    // ========================================================================
    // Register 05
    // ========================================================================

    /// Interrupt mode: 5 ms pulse (true) or held until register 0C is read
    pub fn set_interrupt_5ms(&mut self, on: bool) {
        self.regs.set_flag(field::INT_MODE, !on);
    }

    /// Interrupt mode is a 5 ms pulse
    #[must_use]
    pub const fn interrupt_5ms(&self) -> bool {
        !self.regs.flag(field::INT_MODE)
    }

    /// RSSI based seek mode
    pub fn set_rssi_seek_mode(&mut self, on: bool) {
        let mode = if on { SEEK_MODE_RSSI } else { 0 };
        self.regs.set_field(field::SEEK_MODE, mode);
    }

    /// RSSI based seek mode
    #[must_use]
    pub const fn rssi_seek_mode(&self) -> bool {
        self.regs.field(field::SEEK_MODE) == SEEK_MODE_RSSI
    }

    /// Seek SNR threshold (4 bits)
    pub fn set_seek_threshold(&mut self, threshold: u8) {
        self.regs.set_field(field::SEEKTH, u16::from(threshold));
    }

    /// Seek SNR threshold
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn seek_threshold(&self) -> u8 {
        self.regs.field(field::SEEKTH) as u8
    }

    /// LNA input port
    pub fn set_lna_input(&mut self, input: LnaInput) {
        self.regs.set_field(field::LNA_PORT_SEL, input.bits());
    }

    /// LNA input port
    #[must_use]
    pub const fn lna_input(&self) -> LnaInput {
        LnaInput::from_bits(self.regs.field(field::LNA_PORT_SEL))
    }

    /// LNA working current
    pub fn set_lna_current(&mut self, current: LnaCurrent) {
        self.regs.set_field(field::LNA_ICSEL, current.bits());
    }

    /// LNA working current
    #[must_use]
    pub const fn lna_current(&self) -> LnaCurrent {
        LnaCurrent::from_bits(self.regs.field(field::LNA_ICSEL))
    }

    /// Volume
    pub fn set_volume(&mut self, volume: Volume) {
        self.regs
            .set_field(field::VOLUME, u16::from(volume.level()));
    }

    /// Volume
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn volume(&self) -> Volume {
        Volume::saturating(self.regs.field(field::VOLUME) as u8)
    }

    // ========================================================================
    // Register 06
    // ========================================================================

    /// Unlock the reserved registers for writing
    pub fn set_open_mode(&mut self, on: bool) {
        let mode = if on { OPEN_MODE_UNLOCKED } else { 0 };
        self.regs.set_field(field::OPEN_MODE, mode);
    }

    /// Reserved registers unlocked
    #[must_use]
    pub const fn open_mode(&self) -> bool {
        self.regs.field(field::OPEN_MODE) == OPEN_MODE_UNLOCKED
    }

    /// I2S slave (true) or master mode
    pub fn set_i2s_slave(&mut self, on: bool) {
        self.regs.set_flag(field::I2S_MODE, on);
    }

    /// I2S slave mode
    #[must_use]
    pub const fn i2s_slave(&self) -> bool {
        self.regs.flag(field::I2S_MODE)
    }

    /// Invert WS: high for the left channel
    pub fn set_ws_left_high(&mut self, on: bool) {
        self.regs.set_flag(field::SW_LR, on);
    }

    /// WS high for the left channel
    #[must_use]
    pub const fn ws_left_high(&self) -> bool {
        self.regs.flag(field::SW_LR)
    }

    /// Invert the internal SCLK
    pub fn set_sclk_input_inverted(&mut self, on: bool) {
        self.regs.set_flag(field::SCLK_I_EDGE, on);
    }

    /// Internal SCLK inverted
    #[must_use]
    pub const fn sclk_input_inverted(&self) -> bool {
        self.regs.flag(field::SCLK_I_EDGE)
    }

    /// Signed 16-bit I2S samples
    pub fn set_i2s_signed(&mut self, on: bool) {
        self.regs.set_flag(field::DATA_SIGNED, on);
    }

    /// Signed I2S samples
    #[must_use]
    pub const fn i2s_signed(&self) -> bool {
        self.regs.flag(field::DATA_SIGNED)
    }

    /// Invert the internal WS
    pub fn set_ws_input_inverted(&mut self, on: bool) {
        self.regs.set_flag(field::WS_I_EDGE, on);
    }

    /// Internal WS inverted
    #[must_use]
    pub const fn ws_input_inverted(&self) -> bool {
        self.regs.flag(field::WS_I_EDGE)
    }

    /// I2S word-select rate (master mode)
    pub fn set_ws_step(&mut self, step: WsStep) {
        self.regs.set_field(field::I2S_SW_CNT, step.bits());
    }

    /// I2S word-select rate, None for reserved codes
    #[must_use]
    pub const fn ws_step(&self) -> Option<WsStep> {
        WsStep::from_bits(self.regs.field(field::I2S_SW_CNT))
    }

    /// Invert the WS output (master mode)
    pub fn set_ws_output_inverted(&mut self, on: bool) {
        self.regs.set_flag(field::SW_O_EDGE, on);
    }

    /// WS output inverted
    #[must_use]
    pub const fn ws_output_inverted(&self) -> bool {
        self.regs.flag(field::SW_O_EDGE)
    }

    /// Invert the SCLK output (master mode)
    pub fn set_sclk_output_inverted(&mut self, on: bool) {
        self.regs.set_flag(field::SCLK_O_EDGE, on);
    }

    /// SCLK output inverted
    #[must_use]
    pub const fn sclk_output_inverted(&self) -> bool {
        self.regs.flag(field::SCLK_O_EDGE)
    }

    /// Delay the left channel data by one cycle
    pub fn set_left_delay(&mut self, on: bool) {
        self.regs.set_flag(field::L_DELY, on);
    }

    /// Left channel delayed
    #[must_use]
    pub const fn left_delay(&self) -> bool {
        self.regs.flag(field::L_DELY)
    }

    /// Delay the right channel data by one cycle
    pub fn set_right_delay(&mut self, on: bool) {
        self.regs.set_flag(field::R_DELY, on);
    }

    /// Right channel delayed
    #[must_use]
    pub const fn right_delay(&self) -> bool {
        self.regs.flag(field::R_DELY)
    }

    // ========================================================================
    // Register 07
    // ========================================================================

    /// Noise soft blend threshold (5 bits)
    pub fn set_soft_blend_threshold(&mut self, threshold: u8) {
        self.regs
            .set_field(field::TH_SOFTBLEND, u16::from(threshold));
    }

    /// Noise soft blend threshold
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn soft_blend_threshold(&self) -> u8 {
        self.regs.field(field::TH_SOFTBLEND) as u8
    }

    /// East Europe band: 65..76 MHz (true) or 50..76 MHz
    pub fn set_east_europe_65m(&mut self, on: bool) {
        self.regs.set_flag(field::MODE_65M_50M, on);
    }

    /// East Europe band starts at 65 MHz
    #[must_use]
    pub const fn east_europe_65m(&self) -> bool {
        self.regs.flag(field::MODE_65M_50M)
    }

    /// Seek threshold for the old seek mode (6 bits)
    pub fn set_seek_threshold_old(&mut self, threshold: u8) {
        self.regs
            .set_field(field::SEEK_TH_OLD, u16::from(threshold));
    }

    /// Seek threshold for the old seek mode
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn seek_threshold_old(&self) -> u8 {
        self.regs.field(field::SEEK_TH_OLD) as u8
    }

    /// Soft blend
    pub fn set_soft_blend(&mut self, on: bool) {
        self.regs.set_flag(field::SOFTBLEND_EN, on);
    }

    /// Soft blend
    #[must_use]
    pub const fn soft_blend(&self) -> bool {
        self.regs.flag(field::SOFTBLEND_EN)
    }

    /// Frequency setting mode
    pub fn set_frequency_mode(&mut self, mode: FrequencyMode) {
        self.regs
            .set_flag(field::FREQ_MODE, mode == FrequencyMode::Direct);
    }

    /// Frequency setting mode
    #[must_use]
    pub const fn frequency_mode(&self) -> FrequencyMode {
        if self.regs.flag(field::FREQ_MODE) {
            FrequencyMode::Direct
        } else {
            FrequencyMode::Standard
        }
    }

    // ========================================================================
    // Register 08
    // ========================================================================

    /// Direct frequency offset from the band minimum in kHz
    pub fn set_frequency_direct(&mut self, offset_khz: u16) {
        self.regs.set_field(field::FREQ_DIRECT, offset_khz);
    }

    /// Direct frequency offset in kHz
    #[must_use]
    pub const fn frequency_direct(&self) -> u16 {
        self.regs.field(field::FREQ_DIRECT)
    }

    // ========================================================================
    // Status (registers 00, 0A, 0B)
    // ========================================================================

    /// Chip id as last read
    #[must_use]
    pub const fn chip_id(&self) -> u16 {
        self.regs.get(Register::ChipId)
    }

    /// Chip model, high byte of register 00 (0x58)
    #[must_use]
    pub const fn chip_model(&self) -> u8 {
        self.chip_id().to_be_bytes()[0]
    }

    /// Chip revision, low byte of register 00
    #[must_use]
    pub const fn chip_revision(&self) -> u8 {
        self.chip_id().to_be_bytes()[1]
    }

    /// New RDS group ready
    #[must_use]
    pub const fn rds_ready(&self) -> bool {
        self.regs.flag(field::RDSR)
    }

    /// Seek/tune complete
    #[must_use]
    pub const fn seek_tune_complete(&self) -> bool {
        self.regs.flag(field::STC)
    }

    /// Seek failed
    #[must_use]
    pub const fn seek_failed(&self) -> bool {
        self.regs.flag(field::SF)
    }

    /// RDS decoder synchronized
    #[must_use]
    pub const fn rds_synchronized(&self) -> bool {
        self.regs.flag(field::RDSS)
    }

    /// Block E found (RBDS only)
    #[must_use]
    pub const fn block_e_found(&self) -> bool {
        self.regs.flag(field::BLK_E)
    }

    /// Stereo reception
    #[must_use]
    pub const fn is_stereo(&self) -> bool {
        self.regs.flag(field::ST)
    }

    /// Channel reported by the chip
    #[must_use]
    pub const fn read_channel(&self) -> u16 {
        self.regs.field(field::READCHAN)
    }

    /// Received signal strength (7 bits, logarithmic)
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn rssi(&self) -> u8 {
        self.regs.field(field::RSSI) as u8
    }

    /// Current channel is a station
    #[must_use]
    pub const fn is_station(&self) -> bool {
        self.regs.flag(field::FM_TRUE)
    }

    /// FM ready
    #[must_use]
    pub const fn fm_ready(&self) -> bool {
        self.regs.flag(field::FM_READY)
    }

    /// Group type of the last block received was block E (RBDS)
    #[must_use]
    pub const fn abcd_e(&self) -> bool {
        self.regs.flag(field::ABCD_E)
    }

    /// Error level of RDS block A (or E)
    #[must_use]
    pub const fn block_error_a(&self) -> BlockErrorLevel {
        BlockErrorLevel::from_bits(self.regs.field(field::BLERA))
    }

    /// Error level of RDS block B (or E)
    #[must_use]
    pub const fn block_error_b(&self) -> BlockErrorLevel {
        BlockErrorLevel::from_bits(self.regs.field(field::BLERB))
    }
}

const fn gpio_field(pin: Gpio) -> crate::registers::Field {
    match pin {
        Gpio::Gpio1 => field::GPIO1,
        Gpio::Gpio2 => field::GPIO2,
        Gpio::Gpio3 => field::GPIO3,
    }
}

/// Addressed read stored into the image only on success
fn fetch<I2C: I2c>(
    bus: &mut RdaBus<I2C>,
    regs: &mut RegisterImage,
    register: Register,
) -> DriverResult<u16, I2C::Error> {
    let value = bus.read_reg(register.address()).map_err(Error::Bus)?;
    regs.set(register, value);
    trace!("{} -> {=u16:04X}", register, value);
    Ok(value)
}

/// Borrowed RDS access, obtained from [`Rda5807::rds`]
pub struct RdsLink<'a, I2C> {
    bus: &'a mut RdaBus<I2C>,
    regs: &'a mut RegisterImage,
    decoder: &'a mut RdsDecoder,
}

impl<I2C: I2c> RdsLink<'_, I2C> {
    /// Read register 0A and report whether a new group is ready (RDSR)
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if the transfer fails.
    pub fn is_ready(&mut self) -> DriverResult<bool, I2C::Error> {
        fetch(self.bus, self.regs, Register::Reg0A)?;
        Ok(self.regs.flag(field::RDSR))
    }

    /// Read registers 0C..0F one by one
    ///
    /// The image is updated only once all four blocks arrived.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if any transfer fails.
    pub fn read_group(&mut self) -> DriverResult<RdsGroup, I2C::Error> {
        let mut blocks = [0u16; 4];
        for (block, reg) in blocks.iter_mut().zip(RDS_BLOCKS) {
            *block = self.bus.read_reg(reg.address()).map_err(Error::Bus)?;
        }
        for (&block, reg) in blocks.iter().zip(RDS_BLOCKS) {
            self.regs.set(reg, block);
        }
        Ok(RdsGroup::new(blocks))
    }

    /// Read the current group and feed it to the decoder
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if any transfer fails; the decoder is left untouched.
    pub fn decode_next(&mut self) -> DriverResult<Option<GroupType>, I2C::Error> {
        let group = self.read_group()?;
        let decoded = self.decoder.decode(group);
        if let Some(group_type) = decoded {
            trace!("rds {}", group_type);
        }
        Ok(decoded)
    }

    /// Decoded state
    #[must_use]
    pub fn decoder(&self) -> &RdsDecoder {
        &*self.decoder
    }

    /// Forget decoded state, e.g. after retuning
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}
