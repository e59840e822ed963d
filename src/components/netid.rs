use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Network identity shared by the host entity and its client mirrors.
///
/// Assigned by the host; clients spawn their mirror with the same id.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetId(pub u32);
