//! End-to-end tests over fake `/sys/class/lego-sensor/sensorN` directories.

use ev3_core::SensorFactory;
use ev3_sound::config::SensorConfig;
use ev3_sound::{Ev3Error, SensorPort, SoundSensor, SoundSensorFactory, SysfsPort};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn add_sensor(class_dir: &Path, dir_name: &str, port: &str, driver: &str, mode: &str, value0: &str) -> PathBuf {
    let dir = class_dir.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("address"), format!("ev3-ports:{port}\n")).unwrap();
    fs::write(dir.join("driver_name"), format!("{driver}\n")).unwrap();
    fs::write(dir.join("mode"), format!("{mode}\n")).unwrap();
    fs::write(dir.join("modes"), "DB DBA\n").unwrap();
    fs::write(dir.join("value0"), format!("{value0}\n")).unwrap();
    fs::set_permissions(dir.join("mode"), fs::Permissions::from_mode(0o664)).unwrap();
    dir
}

struct Brick {
    _class_dir: TempDir,
    touch: PathBuf,
    sound: PathBuf,
}

fn brick() -> Brick {
    let class_dir = tempfile::tempdir().unwrap();
    let touch = add_sensor(class_dir.path(), "sensor0", "in1", "lego-ev3-touch", "TOUCH", "0");
    let sound = add_sensor(class_dir.path(), "sensor1", "in2", "lego-nxt-sound", "DB", "42.5");
    Brick {
        _class_dir: class_dir,
        touch,
        sound,
    }
}

fn config_for(device_dir: &Path) -> SensorConfig {
    SensorConfig {
        port: "in2".to_string(),
        device_dir: Some(device_dir.to_path_buf()),
        auto_switch_mode: true,
    }
}

#[test]
fn test_read_switches_mode_file() -> anyhow::Result<()> {
    let brick = brick();
    let sensor = SoundSensor::new(SysfsPort::open(&brick.sound)?)?;

    assert_eq!(sensor.read_sound_pressure()?, 42.5);
    assert_eq!(sensor.read_sound_pressure_low()?, 42.5);
    assert_eq!(fs::read_to_string(brick.sound.join("mode"))?, "DBA");
    Ok(())
}

#[test]
fn test_touch_sensor_port_is_invalid_sensor() -> anyhow::Result<()> {
    let brick = brick();
    let port = SysfsPort::open(&brick.touch)?;

    match SoundSensor::new(port) {
        Err(Ev3Error::InvalidSensor { actual, .. }) => assert_eq!(actual, "lego-ev3-touch"),
        other => panic!("expected InvalidSensor, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_open_from_config() -> anyhow::Result<()> {
    let brick = brick();
    let mut config = config_for(&brick.sound);
    config.auto_switch_mode = false;

    let sensor = SoundSensor::open(&config)?;
    assert!(!sensor.is_auto_switch_mode());
    assert_eq!(sensor.port().address(), "ev3-ports:in2");

    // Device sits in DB and auto-switch is off
    assert!(matches!(
        sensor.read_sound_pressure_low(),
        Err(Ev3Error::InvalidMode { .. })
    ));
    assert_eq!(sensor.read_sound_pressure()?, 42.5);
    Ok(())
}

#[test]
fn test_open_empty_directory_is_invalid_port() {
    let brick = brick();
    let empty = brick.sound.with_file_name("sensor7");
    fs::create_dir_all(&empty).unwrap();

    let result = SoundSensor::open(&config_for(&empty));
    assert!(matches!(result, Err(Ev3Error::InvalidPort { .. })));
}

#[test]
fn test_factory_builds_sensor() -> anyhow::Result<()> {
    let brick = brick();
    let dir = brick.sound.to_string_lossy().to_string();

    let mut table = toml::Table::new();
    table.insert("device_dir".into(), toml::Value::String(dir));
    table.insert("port".into(), toml::Value::String("in2".into()));

    let sensor = SoundSensorFactory.build(toml::Value::Table(table))?;
    assert!(sensor.is_auto_switch_mode());
    assert_eq!(sensor.read_sound_pressure()?, 42.5);
    Ok(())
}

#[test]
fn test_garbage_value_file() -> anyhow::Result<()> {
    let brick = brick();
    fs::write(brick.sound.join("value0"), "abc\n")?;
    let sensor = SoundSensor::open(&config_for(&brick.sound))?;

    match sensor.read_sound_pressure() {
        Err(Ev3Error::Parse { value, .. }) => assert_eq!(value, "abc"),
        other => panic!("expected Parse, got {other:?}"),
    }
    Ok(())
}
