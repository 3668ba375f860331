//! Crate-level errors.
//!
//! Startup failures (leader creation, follower resolution, group capacity)
//! and a terminal event-source failure are the only fatal conditions. A
//! failed brightness write to a single follower is not an error variant: it
//! is logged during propagation and the remaining followers still receive
//! the value.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Registering the virtual leader LED through /dev/uleds failed.
    #[error("failed to create LED group leader {name:?}: {source}")]
    LeaderCreate {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A follower name could not be resolved to a writable brightness
    /// attribute.
    #[error("failed to open follower LED {name:?}: {source}")]
    FollowerOpen {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The group already holds its maximum number of followers.
    #[error("cannot add LED {name:?}: group is limited to {capacity} followers")]
    GroupFull { name: String, capacity: usize },

    /// Reading the next brightness event from the leader failed terminally.
    #[error("failed to read brightness event from leader: {source}")]
    EventRead {
        #[source]
        source: io::Error,
    },
}
