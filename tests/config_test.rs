//! Configuration loading through figment: file, defaults and environment.

use ev3_sound::config::Ev3Config;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

const ENV_VARS: [&str; 3] = [
    "EV3_SOUND_LOG_LEVEL",
    "EV3_SOUND_SENSOR__PORT",
    "EV3_SOUND_SENSOR__AUTO_SWITCH_MODE",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_missing_file_yields_defaults() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let config = Ev3Config::load_from(dir.path().join("absent.toml"))?;

    assert_eq!(config, Ev3Config::default());
    Ok(())
}

#[test]
#[serial]
fn test_load_from_file() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ev3-sound.toml");
    fs::write(
        &path,
        r#"
log_level = "debug"

[sensor]
device_dir = "/tmp/lego-sensor/sensor0"
port = "in4"
auto_switch_mode = false
"#,
    )?;

    let config = Ev3Config::load_from(&path)?;
    config.validate()?;

    assert_eq!(config.log_level, "debug");
    assert_eq!(
        config.sensor.device_dir,
        Some(PathBuf::from("/tmp/lego-sensor/sensor0"))
    );
    assert_eq!(config.sensor.port, "in4");
    assert!(!config.sensor.auto_switch_mode);
    Ok(())
}

#[test]
#[serial]
fn test_partial_sensor_table_keeps_defaults() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ev3-sound.toml");
    fs::write(&path, "[sensor]\nport = \"in2\"\n")?;

    let config = Ev3Config::load_from(&path)?;
    assert_eq!(config.log_level, "info");
    assert_eq!(config.sensor.port, "in2");
    assert!(config.sensor.auto_switch_mode);
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides_file() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ev3-sound.toml");
    fs::write(&path, "log_level = \"warn\"\n[sensor]\nport = \"in2\"\n")?;

    std::env::set_var("EV3_SOUND_LOG_LEVEL", "trace");
    std::env::set_var("EV3_SOUND_SENSOR__PORT", "in3");
    std::env::set_var("EV3_SOUND_SENSOR__AUTO_SWITCH_MODE", "false");
    let loaded = Ev3Config::load_from(&path);
    clear_env();

    let config = loaded?;
    assert_eq!(config.log_level, "trace");
    assert_eq!(config.sensor.port, "in3");
    assert!(!config.sensor.auto_switch_mode);
    Ok(())
}

#[test]
#[serial]
fn test_invalid_values_fail_validation_not_loading() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ev3-sound.toml");
    fs::write(&path, "log_level = \"loud\"\n")?;

    let config = Ev3Config::load_from(&path)?;
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
#[serial]
fn test_malformed_file_is_load_error() -> anyhow::Result<()> {
    clear_env();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ev3-sound.toml");
    fs::write(&path, "[sensor]\nauto_switch_mode = \"sometimes\"\n")?;

    assert!(Ev3Config::load_from(&path).is_err());
    Ok(())
}
