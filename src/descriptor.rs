use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Identity and creation time a configuration source attaches to a route or
/// filter instance. An empty `id` or unset `created_at` means the descriptor
/// carries nothing worth measuring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDescriptor {
    pub id: String,
    pub created_at: Option<SystemTime>,
}

impl ConfigDescriptor {
    pub fn new(id: impl Into<String>, created_at: SystemTime) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
        }
    }
}

pub trait Filter: fmt::Debug {
    /// Filter types built from a tracked configuration source override this
    /// to expose their descriptor; everything else inherits the absent
    /// default, so no type switching is needed at the call site.
    fn config_descriptor(&self) -> Option<&ConfigDescriptor> {
        None
    }
}
