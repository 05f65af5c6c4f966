//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use rda5807::config::*;
use rda5807::registers::RegisterImage;

// =============================================================================
// I2C Configuration Tests
// =============================================================================

#[test]
fn i2c_frequency_valid() {
    // RDA5807 supports standard and fast mode
    assert!(I2C_FREQUENCY_HZ == 100_000 || I2C_FREQUENCY_HZ == 400_000);
}

#[test]
fn endpoint_addresses() {
    assert_eq!(SEQUENTIAL_I2C_ADDR, 0x10);
    assert_eq!(RANDOM_ACCESS_I2C_ADDR, 0x11);
}

#[test]
fn block_lengths_match_register_counts() {
    assert_eq!(WRITE_BLOCK_LEN, 14);
    assert_eq!(READ_BLOCK_LEN, 12);
    assert_eq!(WRITE_BLOCK_LEN, WRITE_REGISTER_COUNT * 2);
    assert_eq!(READ_BLOCK_LEN, READ_REGISTER_COUNT * 2);
}

// =============================================================================
// Default Register Tests
// =============================================================================

#[test]
fn defaults_seed_register_image() {
    let image = RegisterImage::new();
    assert_eq!(image.control_block(), &defaults::WRITE);
    assert_eq!(image.status_block(), &defaults::READ);
}

#[test]
fn default_chip_id() {
    assert_eq!(defaults::CHIP_ID, 0x5804);
}

// =============================================================================
// Runtime Config Tests
// =============================================================================

#[test]
fn default_config() {
    let config = Config::default();
    assert!(!config.rds);
    assert!(!config.read_on_init);
    assert_eq!(config.max_tune_polls, DEFAULT_MAX_TUNE_POLLS);
    assert_eq!(config, Config::new());
}

#[test]
fn builder_sets_fields() {
    let config = Config::new()
        .with_rds(true)
        .with_read_on_init(true)
        .with_max_tune_polls(20);
    assert!(config.rds);
    assert!(config.read_on_init);
    assert_eq!(config.max_tune_polls, 20);
}

#[test]
fn zero_polls_still_polls_once() {
    assert_eq!(Config::new().with_max_tune_polls(0).max_tune_polls, 1);
}
