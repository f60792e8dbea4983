use serde::{Deserialize, Serialize};
use std::fmt;

/// Component tag attached to every structured log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Store,
    Synchronizer,
    Aggregator,
    RoleTagger,
    VolumeUpdater,
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Store => "store",
            Component::Synchronizer => "synchronizer",
            Component::Aggregator => "aggregator",
            Component::RoleTagger => "role_tagger",
            Component::VolumeUpdater => "volume_updater",
            Component::Cli => "cli",
        };
        f.write_str(name)
    }
}
