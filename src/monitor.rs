//! The monitoring loop: block on the leader, fan out to the group.

use tracing::debug;

use crate::error::Error;
use crate::group::LedGroup;
use crate::leader::{Leader, LeaderEvent};

/// How the loop came to an end. Both variants are nominal shutdowns; a
/// terminal read failure surfaces as [`Error::EventRead`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// The event source reached end-of-file (leader removed or closed).
    SourceClosed,
    /// A termination signal was received.
    Interrupted,
}

/// Run the read-propagate cycle until the event source ends.
///
/// Every event is fully propagated to the whole group before the next read
/// is issued, so all followers observe the same sequence of values.
pub fn run(leader: &mut Leader, group: &mut LedGroup) -> Result<Shutdown, Error> {
    loop {
        match leader.next_event() {
            Ok(LeaderEvent::Brightness(brightness)) => {
                #[cfg(feature = "timestamp")]
                print_timestamped(brightness);

                debug!("leader brightness changed to {brightness}");
                group.propagate(brightness);
            }
            Ok(LeaderEvent::Closed) => return Ok(Shutdown::SourceClosed),
            Ok(LeaderEvent::Interrupted) => return Ok(Shutdown::Interrupted),
            Err(source) => return Err(Error::EventRead { source }),
        }
    }
}

/// Echo one event to stdout as `[<seconds>.<milliseconds>] <brightness>`,
/// stamped with the monotonic clock.
#[cfg(feature = "timestamp")]
fn print_timestamped(brightness: i32) {
    let mut now = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    if unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut now) } == 0 {
        println!("[{}.{:03}] {}", now.tv_sec, now.tv_nsec / 1_000_000, brightness);
    }
}
