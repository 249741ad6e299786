//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Ids are handed out in increasing order by an [`EntityManager`] and never
/// reused, so ordering entities orders them by creation.
///
/// [`EntityManager`]: crate::ecs::EntityManager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
