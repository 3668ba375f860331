//! Virtual leader LED registration and event source.
//!
//! The leader is created through the kernel's userspace LED driver: writing
//! a registration record to `/dev/uleds` creates a new LED class device, and
//! subsequent reads on the same descriptor block until some writer changes
//! the leader's brightness, yielding the new value as a native-endian 32-bit
//! integer.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};

use crate::signals;

/// Control device of the userspace LED driver (uleds kernel module).
const ULEDS_DEVICE: &str = "/dev/uleds";

/// Kernel limit on an LED class device name, NUL terminator included
/// (`LED_MAX_NAME_SIZE` in `linux/uleds.h`).
pub const LED_MAX_NAME_SIZE: usize = 64;

/// Size of the registration record (`struct uleds_user_dev`): the name
/// buffer followed by a 32-bit maximum brightness.
const REGISTRATION_RECORD_SIZE: usize = LED_MAX_NAME_SIZE + 4;

/// Brightness range declared for the leader. The kernel enforces the range,
/// so values read back never need clamping here.
pub const MAX_BRIGHTNESS: i32 = 100;

/// One outcome of a blocking read on the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderEvent {
    /// The leader's brightness changed to this value.
    Brightness(i32),
    /// The event source reached end-of-file; the leader device is gone.
    Closed,
    /// A termination signal was received while waiting for an event.
    Interrupted,
}

/// Readable handle on the leader device. Dropping it closes the descriptor,
/// which unregisters the virtual LED.
#[derive(Debug)]
pub struct Leader {
    file: File,
}

impl Leader {
    /// Register a virtual LED named `name` and return its event source.
    pub fn create(name: &str, max_brightness: i32) -> io::Result<Self> {
        let record = encode_registration(name, max_brightness)?;

        let mut file = loop {
            match OpenOptions::new().read(true).write(true).open(ULEDS_DEVICE) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                result => break result?,
            }
        };
        file.write_all(&record)?;

        Ok(Self { file })
    }

    #[cfg(test)]
    pub(crate) fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Block until the leader's brightness changes.
    ///
    /// A read interrupted by a signal is retried unless the signal requested
    /// termination; any other failure is terminal.
    pub fn next_event(&mut self) -> io::Result<LeaderEvent> {
        let mut buf = [0u8; 4];
        let mut filled = 0;

        while filled < buf.len() {
            if signals::termination_requested() {
                return Ok(LeaderEvent::Interrupted);
            }

            match self.file.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(LeaderEvent::Closed),
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "leader event source closed mid-event",
                    ))
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }

        Ok(LeaderEvent::Brightness(i32::from_ne_bytes(buf)))
    }
}

/// Build the `uleds_user_dev` record: the NUL-padded name followed by the
/// native-endian maximum brightness.
fn encode_registration(
    name: &str,
    max_brightness: i32,
) -> io::Result<[u8; REGISTRATION_RECORD_SIZE]> {
    validate_led_name(name)?;

    let mut record = [0u8; REGISTRATION_RECORD_SIZE];
    record[..name.len()].copy_from_slice(name.as_bytes());
    record[LED_MAX_NAME_SIZE..].copy_from_slice(&max_brightness.to_ne_bytes());
    Ok(record)
}

/// Reject names that cannot name an LED class device: empty, longer than
/// the kernel's 63-byte limit, or containing a path separator or NUL. The
/// same bound is applied to follower names before deriving their sysfs
/// paths.
pub(crate) fn validate_led_name(name: &str) -> io::Result<()> {
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "LED name is empty",
        ));
    }
    if name.len() >= LED_MAX_NAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "LED name {name:?} exceeds {} bytes",
                LED_MAX_NAME_SIZE - 1
            ),
        ));
    }
    if name.bytes().any(|b| b == b'/' || b == 0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("LED name {name:?} contains a path separator or NUL"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom};
    use tempfile::tempfile;

    fn event_source(values: &[i32]) -> Leader {
        let mut file = tempfile().expect("tempfile");
        for value in values {
            file.write_all(&value.to_ne_bytes()).expect("write");
        }
        file.seek(SeekFrom::Start(0)).expect("seek");
        Leader::from_file(file)
    }

    #[test]
    fn registration_record_layout() {
        let record = encode_registration("grp0", MAX_BRIGHTNESS).expect("encode");
        assert_eq!(record.len(), REGISTRATION_RECORD_SIZE);
        assert_eq!(&record[..4], b"grp0");
        assert!(record[4..LED_MAX_NAME_SIZE].iter().all(|&b| b == 0));
        assert_eq!(record[LED_MAX_NAME_SIZE..], 100i32.to_ne_bytes());
    }

    #[test]
    fn over_long_name_is_rejected_before_any_device_write() {
        let name = "x".repeat(LED_MAX_NAME_SIZE);
        let err = encode_registration(&name, MAX_BRIGHTNESS).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn longest_valid_name_is_accepted() {
        let name = "x".repeat(LED_MAX_NAME_SIZE - 1);
        assert!(validate_led_name(&name).is_ok());
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(validate_led_name("").is_err());
        assert!(validate_led_name("../evil").is_err());
        assert!(validate_led_name("has/separator").is_err());
        assert!(validate_led_name("led_a").is_ok());
    }

    #[test]
    fn yields_events_in_order_then_closed() {
        let mut leader = event_source(&[0, 50, 100, 50]);
        for expected in [0, 50, 100, 50] {
            assert_eq!(
                leader.next_event().expect("event"),
                LeaderEvent::Brightness(expected)
            );
        }
        assert_eq!(leader.next_event().expect("event"), LeaderEvent::Closed);
        // The source stays closed on further reads.
        assert_eq!(leader.next_event().expect("event"), LeaderEvent::Closed);
    }

    #[test]
    fn truncated_event_is_an_error() {
        let mut file = tempfile().expect("tempfile");
        file.write_all(&[1, 2]).expect("write");
        file.seek(SeekFrom::Start(0)).expect("seek");

        let mut leader = Leader::from_file(file);
        let err = leader.next_event().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn unreadable_source_is_a_terminal_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(dir.path().join("write-only"))
            .expect("open");

        let mut leader = Leader::from_file(file);
        assert!(leader.next_event().is_err());
    }
}
