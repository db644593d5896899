//! ev3dev `lego-sensor` sysfs port
//!
//! Reference: ev3dev kernel drivers, `lego-sensor` class
//!
//! Layout Overview:
//! - Class directory: `/sys/class/lego-sensor`
//! - One `sensorN` directory per bound device (N is assigned by the kernel)
//! - Attributes are plain text files ending with a newline:
//!   `address` (e.g. `ev3-ports:in2`), `driver_name`, `mode`, `modes`,
//!   `value0`..`value7`, ...
//! - Writing a token to `mode` selects the mode; unknown tokens are rejected
//!   with EINVAL
//!
//! Port lookup goes through [`ev3dev_lang_rust::Driver`], attribute access
//! through [`ev3dev_lang_rust::Attribute`]. Each access opens the attribute
//! file, reads or writes it, and drops it again. No file descriptors are kept
//! between calls.
//!
//! `ev3dev-lang-rust` folds every I/O failure into a message string, so
//! attribute failures surface as [`Ev3Error::Io`] with
//! [`io::ErrorKind::Other`] and that message.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev3_driver_sysfs::SysfsPort;
//! use ev3_core::SensorPort;
//!
//! let port = SysfsPort::find("in2")?;
//! println!("{} is driving {}", port.address(), port.driver_name()?);
//! ```

use ev3_core::{Ev3Error, Ev3Result, SensorPort};
use ev3dev_lang_rust::{Attribute, Driver, Port};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sysfs class of ev3dev sensors.
pub const LEGO_SENSOR_CLASS: &str = "lego-sensor";

/// Class directory of ev3dev sensors.
pub const LEGO_SENSOR_CLASS_DIR: &str = "/sys/class/lego-sensor";

const ADDRESS_ATTRIBUTE: &str = "address";
const DRIVER_NAME_ATTRIBUTE: &str = "driver_name";
const MODE_ATTRIBUTE: &str = "mode";
const MODES_ATTRIBUTE: &str = "modes";

/// Port name handed to the ev3dev lookup.
///
/// ev3dev matches it as a substring of each device's `address`, so `in2`
/// and `ev3-ports:in2` both select input 2.
struct PortName<'a>(&'a str);

impl Port for PortName<'_> {
    fn address(&self) -> String {
        self.0.to_string()
    }
}

/// A sensor port backed by one `sensorN` sysfs directory.
#[derive(Debug, Clone)]
pub struct SysfsPort {
    /// Device directory (e.g. `/sys/class/lego-sensor/sensor0`)
    device_dir: PathBuf,
    /// Port address reported by the device
    address: String,
}

impl SysfsPort {
    /// Bind to a device directory.
    ///
    /// # Errors
    /// Returns `InvalidPort` if the directory does not exist or has no
    /// readable `driver_name` attribute (nothing bound).
    pub fn open(device_dir: impl AsRef<Path>) -> Ev3Result<Self> {
        let device_dir = device_dir.as_ref().to_path_buf();
        let display = device_dir.display().to_string();

        if let Err(e) = read_attribute(&device_dir, DRIVER_NAME_ATTRIBUTE) {
            return Err(Ev3Error::invalid_port(
                display,
                format!("no readable driver_name, nothing bound ({e})"),
            ));
        }

        let address = match read_attribute(&device_dir, ADDRESS_ATTRIBUTE) {
            Ok(address) if !address.is_empty() => address,
            Ok(_) | Err(_) => display,
        };

        info!(port = %address, dir = %device_dir.display(), "bound sysfs sensor port");
        Ok(Self {
            device_dir,
            address,
        })
    }

    /// Find the device on `port` in [`LEGO_SENSOR_CLASS_DIR`].
    ///
    /// # Errors
    /// - `InvalidPort` if this is not an ev3dev system, nothing is connected
    ///   to `port`, or several devices match
    /// - `Io` if the class directory cannot be listed
    pub fn find(port: &str) -> Ev3Result<Self> {
        if !Path::new(LEGO_SENSOR_CLASS_DIR).is_dir() {
            return Err(Ev3Error::invalid_port(
                port,
                format!("sensor class directory {LEGO_SENSOR_CLASS_DIR} not found"),
            ));
        }

        let name = Driver::find_name_by_port(LEGO_SENSOR_CLASS, &PortName(port))
            .map_err(|e| lookup_error(port, e))?;
        debug!(port, device = %name, "ev3dev port lookup");
        Self::open(Path::new(LEGO_SENSOR_CLASS_DIR).join(name))
    }

    /// Device directory this port reads from.
    pub fn device_dir(&self) -> &Path {
        &self.device_dir
    }

    /// Mode tokens the device supports, from the `modes` attribute.
    pub fn modes(&self) -> Ev3Result<Vec<String>> {
        let modes = self.attribute(MODES_ATTRIBUTE)?;
        Ok(modes.split_whitespace().map(str::to_string).collect())
    }
}

impl SensorPort for SysfsPort {
    fn address(&self) -> &str {
        &self.address
    }

    fn driver_name(&self) -> Ev3Result<String> {
        self.attribute(DRIVER_NAME_ATTRIBUTE)
    }

    fn mode(&self) -> Ev3Result<String> {
        self.attribute(MODE_ATTRIBUTE)
    }

    fn set_mode(&self, mode: &str) -> Ev3Result<()> {
        debug!(port = %self.address, mode, "writing mode");
        write_attribute(&self.device_dir, MODE_ATTRIBUTE, mode)
    }

    fn attribute(&self, name: &str) -> Ev3Result<String> {
        let value = read_attribute(&self.device_dir, name)?;
        debug!(port = %self.address, attribute = name, value = %value, "read attribute");
        Ok(value)
    }
}

/// Open one attribute file of a device directory.
fn open_attribute(dir: &Path, name: &str) -> Ev3Result<Attribute> {
    let path = dir.join(name);
    let path = path.to_str().ok_or_else(|| {
        Ev3Error::invalid_port(dir.display().to_string(), "device path is not UTF-8")
    })?;
    Attribute::from_path(Path::new(path)).map_err(device_error)
}

/// Read an attribute; ev3dev-lang-rust drops the trailing newline.
fn read_attribute(dir: &Path, name: &str) -> Ev3Result<String> {
    open_attribute(dir, name)?.get::<String>().map_err(device_error)
}

fn write_attribute(dir: &Path, name: &str, value: &str) -> Ev3Result<()> {
    open_attribute(dir, name)?
        .set_str_slice(value)
        .map_err(device_error)
}

/// Attribute access failure from ev3dev-lang-rust.
fn device_error(e: ev3dev_lang_rust::Ev3Error) -> Ev3Error {
    match e {
        ev3dev_lang_rust::Ev3Error::InternalError { msg } => {
            Ev3Error::Io(io::Error::new(io::ErrorKind::Other, msg))
        }
        other => Ev3Error::Io(io::Error::new(io::ErrorKind::Other, format!("{other:?}"))),
    }
}

/// Port lookup failure from ev3dev-lang-rust.
fn lookup_error(port: &str, e: ev3dev_lang_rust::Ev3Error) -> Ev3Error {
    match e {
        ev3dev_lang_rust::Ev3Error::InternalError { msg } => {
            Ev3Error::Io(io::Error::new(io::ErrorKind::Other, msg))
        }
        ev3dev_lang_rust::Ev3Error::NotConnected { .. } => {
            Ev3Error::invalid_port(port, "no sensor connected")
        }
        other => Ev3Error::invalid_port(port, format!("{other:?}")),
    }
}
