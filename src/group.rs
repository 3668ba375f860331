//! Bounded LED group membership and brightness propagation.
//!
//! The group is a fixed-capacity arena with an explicit count. Insertion
//! order is preserved and defines propagation order.

use tracing::warn;

use crate::error::Error;
use crate::follower::Follower;

/// Maximum number of followers in a group.
pub const MAX_GROUP_SIZE: usize = 4;

/// Ordered, fixed-capacity set of follower handles. Dropping the group
/// closes every handle it still holds.
#[derive(Debug, Default)]
pub struct LedGroup {
    slots: [Option<Follower>; MAX_GROUP_SIZE],
    count: usize,
}

impl LedGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append `follower` to the group. At capacity the group is left
    /// untouched and the handle is handed back to the caller.
    pub fn insert(&mut self, follower: Follower) -> Result<(), Follower> {
        if self.count >= MAX_GROUP_SIZE {
            return Err(follower);
        }

        self.slots[self.count] = Some(follower);
        self.count += 1;
        Ok(())
    }

    /// Open the LED named `name` and append it. All-or-nothing: on capacity
    /// failure the just-opened handle is closed again before returning.
    pub fn add_by_name(&mut self, name: &str) -> Result<(), Error> {
        let follower = Follower::open(name).map_err(|source| Error::FollowerOpen {
            name: name.to_string(),
            source,
        })?;

        match self.insert(follower) {
            Ok(()) => Ok(()),
            Err(rejected) => {
                drop(rejected);
                Err(Error::GroupFull {
                    name: name.to_string(),
                    capacity: MAX_GROUP_SIZE,
                })
            }
        }
    }

    /// Write `brightness` to every follower in insertion order. A failing
    /// follower is reported and skipped; the rest still receive the value.
    pub fn propagate(&mut self, brightness: i32) {
        for follower in self.slots[..self.count].iter_mut().flatten() {
            if let Err(err) = follower.set_brightness(brightness) {
                warn!(
                    "failed to write brightness to LED {}: {err}",
                    follower.name()
                );
            }
        }
    }
}
