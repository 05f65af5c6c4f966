//! Register Synchronization Tests
//!
//! Tests for block writes, change-only writes, status reads and the shadow
//! image against a simulated chip.
//! Run with: cargo test --test sync_tests

mod common;

use common::{MockRda, Transfer};
use rda5807::prelude::*;

fn radio() -> Rda5807<MockRda> {
    Rda5807::new(MockRda::new(), Config::new())
}

// =============================================================================
// Block Write Tests
// =============================================================================

#[test]
fn write_all_sends_control_block_in_order() {
    let mut radio = radio();
    radio.write_all().unwrap();

    let bus = radio.release();
    assert_eq!(
        bus.log,
        vec![Transfer::Block(vec![
            0x0000, 0x4FC0, 0x0400, 0x888B, 0x0000, 0x4202, 0x0000
        ])]
    );
}

#[test]
fn write_all_commits_shadow() {
    let mut radio = radio();
    radio.set_enabled(true);
    radio.set_volume(Volume::saturating(3));
    assert!(radio.shadow().any_dirty(radio.registers()));

    radio.write_all().unwrap();
    assert!(!radio.shadow().any_dirty(radio.registers()));
    assert_eq!(radio.write_changed().unwrap(), 0);
}

#[test]
fn failed_block_write_keeps_shadow() {
    let mut bus = MockRda::new();
    bus.fail_block_write = true;
    let mut radio = Rda5807::new(bus, Config::new());
    radio.set_enabled(true);

    assert!(matches!(radio.write_all(), Err(Error::Bus(_))));
    assert!(radio.shadow().is_dirty(radio.registers(), Register::Reg02));
}

// =============================================================================
// Change-Only Write Tests
// =============================================================================

#[test]
fn nothing_changed_nothing_sent() {
    let mut radio = radio();
    assert_eq!(radio.write_changed().unwrap(), 0);
    assert!(radio.release().log.is_empty());
}

#[test]
fn single_field_change_single_write() {
    let mut radio = radio();
    radio.set_volume(Volume::saturating(3));
    assert_eq!(radio.write_changed().unwrap(), 1);

    let bus = radio.release();
    assert_eq!(bus.log, vec![Transfer::WriteReg(0x05, 0x8883)]);
}

#[test]
fn setting_same_value_is_not_a_change() {
    let mut radio = radio();
    radio.set_volume(Volume::saturating(11));
    assert_eq!(radio.write_changed().unwrap(), 0);
}

#[test]
fn changed_registers_written_in_address_order() {
    let mut radio = radio();
    radio.set_frequency_mode(FrequencyMode::Direct);
    radio.set_mute(false);
    radio.set_bass_boost(true);

    assert_eq!(radio.write_changed().unwrap(), 2);
    let bus = radio.release();
    assert_eq!(bus.reg_writes(), vec![(0x02, 0x5000), (0x07, 0x4203)]);
}

#[test]
fn second_pass_after_success_is_empty() {
    let mut radio = radio();
    radio.set_mono(true);
    radio.write_changed().unwrap();
    assert_eq!(radio.write_changed().unwrap(), 0);
    assert_eq!(radio.release().log.len(), 1);
}

#[test]
fn failed_write_still_converges_shadow() {
    let mut bus = MockRda::new();
    bus.fail_writes.push(0x02);
    let mut radio = Rda5807::new(bus, Config::new());
    radio.set_enabled(true);
    radio.set_volume(Volume::saturating(0));

    assert!(matches!(radio.write_changed(), Err(Error::Bus(_))));
    assert!(!radio.shadow().any_dirty(radio.registers()));
    assert_eq!(radio.write_changed().unwrap(), 0);

    let bus = radio.release();
    assert_eq!(bus.reg_writes(), vec![(0x02, 0x0001), (0x05, 0x8880)]);
    // register 05 reached the device despite the earlier failure
    assert_eq!(bus.regs[0x05], 0x8880);
}

// =============================================================================
// Status Read Tests
// =============================================================================

#[test]
fn read_status_fills_image() {
    let mut bus = MockRda::new();
    bus.regs[0x0B] = (60 << 9) | (1 << 8);
    bus.set_group([0x1234, 0x0000, 0x0000, 0x4142]);
    let mut radio = Rda5807::new(bus, Config::new());

    radio.read_status().unwrap();
    assert_eq!(radio.rssi(), 60);
    assert!(radio.is_station());
    assert!(radio.seek_tune_complete());
    assert_eq!(radio.register(Register::Reg0C), 0x1234);
    assert_eq!(radio.register(Register::Reg0F), 0x4142);
}

#[test]
fn short_read_leaves_image_unchanged() {
    let mut bus = MockRda::new();
    bus.short_read = true;
    bus.regs[0x0B] = 0xFFFF;
    let mut radio = Rda5807::new(bus, Config::new());
    let before = radio.registers().clone();

    assert!(matches!(radio.read_status(), Err(Error::Bus(_))));
    assert_eq!(radio.registers(), &before);
}

#[test]
fn read_on_init_loads_status() {
    let mut bus = MockRda::new();
    bus.regs[0x0B] = 42 << 9;
    let radio = Rda5807::new(bus, Config::new().with_read_on_init(true));

    assert_eq!(radio.rssi(), 42);
    assert_eq!(radio.release().log, vec![Transfer::Status]);
}

#[test]
fn read_on_init_failure_keeps_defaults() {
    let mut bus = MockRda::new();
    bus.fail_reads = true;
    let radio = Rda5807::new(bus, Config::new().with_read_on_init(true));
    assert_eq!(radio.register(Register::Reg0A), 0x0400);
}

// =============================================================================
// Addressed Access Tests
// =============================================================================

#[test]
fn write_register_commits_single_entry() {
    let mut radio = radio();
    radio.set_mono(true);
    radio.set_volume(Volume::saturating(1));

    radio.write_register(Register::Reg02).unwrap();
    assert!(!radio.shadow().is_dirty(radio.registers(), Register::Reg02));
    assert!(radio.shadow().is_dirty(radio.registers(), Register::Reg05));
}

#[test]
fn status_register_is_not_writable() {
    let mut radio = radio();
    assert_eq!(
        radio.write_register(Register::Reg0A),
        Err(Error::NotWritable {
            register: Register::Reg0A
        })
    );
    assert!(radio.release().log.is_empty());
}

#[test]
fn read_chip_id() {
    let mut bus = MockRda::new();
    bus.regs[0x00] = 0x5801;
    let mut radio = Rda5807::new(bus, Config::new());

    assert_eq!(radio.read_chip_id().unwrap(), 0x5801);
    assert_eq!(radio.chip_id(), 0x5801);
    assert_eq!(radio.chip_model(), 0x58);
    assert_eq!(radio.chip_revision(), 0x01);
}

#[test]
fn read_register_failure_leaves_image() {
    let mut bus = MockRda::new();
    bus.fail_reads = true;
    let mut radio = Rda5807::new(bus, Config::new());

    assert!(radio.read_register(Register::Reg0B).is_err());
    assert_eq!(radio.register(Register::Reg0B), 0x0000);
}

// =============================================================================
// Update Helper Tests
// =============================================================================

#[test]
fn update_mute_writes_register_02() {
    let mut radio = radio();
    radio.update_mute(false).unwrap();
    assert!(!radio.is_muted());
    assert_eq!(radio.release().reg_writes(), vec![(0x02, 0x4000)]);
}

#[test]
fn update_volume_scales_byte() {
    let mut radio = radio();
    radio.update_volume(0xFF).unwrap();
    assert_eq!(radio.volume().level(), 15);
    radio.update_volume(0x0F).unwrap();
    assert_eq!(radio.volume().level(), 0);
    assert_eq!(
        radio.release().reg_writes(),
        vec![(0x05, 0x888F), (0x05, 0x8880)]
    );
}

#[test]
fn update_rssi_reads_register_0b() {
    let mut bus = MockRda::new();
    bus.regs[0x0B] = 0x7F << 9;
    let mut radio = Rda5807::new(bus, Config::new());

    assert_eq!(radio.update_rssi().unwrap(), 0x7F);
    assert_eq!(radio.release().log, vec![Transfer::ReadReg(0x0B)]);
}

#[test]
fn power_up_sends_whole_block() {
    let mut radio = Rda5807::new(MockRda::new(), Config::new().with_rds(true));
    radio.power_up().unwrap();

    assert!(radio.is_enabled());
    assert!(!radio.is_muted());
    assert!(radio.audio_output());
    assert!(radio.rds_enabled());
    let bus = radio.release();
    assert_eq!(bus.log.len(), 1);
    assert_eq!(bus.regs[0x02], 0xC00D);
}

#[test]
fn soft_reset_pulses_bit() {
    let mut radio = radio();
    radio.soft_reset().unwrap();
    assert!(!radio.soft_reset_flag());
    assert_eq!(
        radio.release().reg_writes(),
        vec![(0x02, 0x0002), (0x02, 0x0000)]
    );
}
