//! Follower device handles.
//!
//! A follower is an existing LED class device whose brightness attribute is
//! opened write-only at startup and re-written on every leader event. The
//! device is resolved through the udev `leds` subsystem.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};

use tracing::debug;

use crate::leader::validate_led_name;

/// Writable handle on one follower's brightness attribute. Dropping the
/// handle closes it; a follower is owned by the group once inserted.
#[derive(Debug)]
pub struct Follower {
    name: String,
    file: File,
}

impl Follower {
    /// Resolve `name` in the `leds` subsystem and open its brightness
    /// attribute write-only.
    pub fn open(name: &str) -> io::Result<Self> {
        validate_led_name(name)?;

        let device =
            udev::Device::from_subsystem_sysname("leds".to_string(), name.to_string())?;

        if let Some(max) = device.attribute_value("max_brightness") {
            debug!(
                "follower LED {} reports max_brightness {}",
                name,
                max.to_string_lossy()
            );
        }

        let path = device.syspath().join("brightness");
        let file = loop {
            match OpenOptions::new().write(true).open(&path) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                result => break result?,
            }
        };

        Ok(Self {
            name: name.to_string(),
            file,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_file(name: &str, file: File) -> Self {
        Self {
            name: name.to_string(),
            file,
        }
    }

    /// Name the follower was resolved by; used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write `brightness` to the attribute as decimal ASCII plus a newline,
    /// starting from offset 0 as sysfs expects.
    pub fn set_brightness(&mut self, brightness: i32) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(format!("{brightness}\n").as_bytes())
    }
}
