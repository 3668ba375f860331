//! Mirror a virtual LED's brightness onto a group of existing LEDs.
//!
//! A virtual "group leader" LED is registered through `/dev/uleds`; whenever
//! any writer changes its brightness, the new value is written to every
//! follower in the group. Followers are regular `/sys/class/leds` devices.

pub mod error;
pub mod follower;
pub mod group;
pub mod leader;
pub mod monitor;
pub mod signals;

use tracing::info;

pub use error::{Error, Result};
pub use monitor::Shutdown;

use group::LedGroup;
use leader::{Leader, MAX_BRIGHTNESS};

/// Create the leader, populate the group, and run the monitoring loop.
///
/// Every exit route passes through this frame: the leader handle and the
/// group are owned here, so all device handles are released whether the loop
/// ends nominally, a startup step fails, or a termination signal unwinds it.
pub fn run(leader_name: &str, follower_names: &[String]) -> Result<Shutdown> {
    let mut leader =
        Leader::create(leader_name, MAX_BRIGHTNESS).map_err(|source| Error::LeaderCreate {
            name: leader_name.to_string(),
            source,
        })?;
    info!("created LED group leader {leader_name}");

    let mut group = LedGroup::new();
    for name in follower_names {
        group.add_by_name(name)?;
        info!("LED {name} follows {leader_name}");
    }

    monitor::run(&mut leader, &mut group)
}
