//! Integration tests for Settings config loading.
//!
//! These tests only write local (farm directory) configs; they assume no
//! MANGOSURV_* variables are set in the test environment.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use mango_surveil::config::{local_config_path, Settings};
use mango_surveil::domain::CalculationMode;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let farm = TempDir::new().unwrap();
    fs::write(
        local_config_path(farm.path()),
        r#"
mode = "quick"
frequency_days = 21
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(farm.path())).expect("load settings");

    // Assert
    assert_eq!(settings.mode, CalculationMode::Quick);
    assert_eq!(settings.frequency_days, Some(21));
}

#[test]
fn given_relative_inventory_in_local_config_when_load_then_resolves_against_farm_dir() {
    let farm = TempDir::new().unwrap();
    fs::write(
        local_config_path(farm.path()),
        r#"inventory = "data/inventory.toml""#,
    )
    .unwrap();

    let settings = Settings::load(Some(farm.path())).expect("load settings");

    assert_eq!(
        settings.inventory,
        farm.path().join("data").join("inventory.toml")
    );
}

#[test]
fn given_absolute_inventory_when_load_then_kept_as_is() {
    let farm = TempDir::new().unwrap();
    fs::write(
        local_config_path(farm.path()),
        r#"inventory = "/srv/mango/inventory.toml""#,
    )
    .unwrap();

    let settings = Settings::load(Some(farm.path())).expect("load settings");

    assert_eq!(settings.inventory, PathBuf::from("/srv/mango/inventory.toml"));
}

#[test]
fn given_directory_without_config_when_load_then_uses_defaults() {
    let farm = TempDir::new().unwrap();

    let settings = Settings::load(Some(farm.path())).expect("load settings");

    assert_eq!(settings.mode, CalculationMode::Detailed);
    assert_eq!(settings.frequency_days, None);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let farm = TempDir::new().unwrap();
    fs::write(local_config_path(farm.path()), "mode = [not toml").unwrap();

    let err = Settings::load(Some(farm.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error"), "got: {err}");
}

#[test]
fn given_unknown_mode_in_local_config_when_load_then_config_error() {
    let farm = TempDir::new().unwrap();
    fs::write(local_config_path(farm.path()), r#"mode = "guesswork""#).unwrap();

    assert!(Settings::load(Some(farm.path())).is_err());
}
