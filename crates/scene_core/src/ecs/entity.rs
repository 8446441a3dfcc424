//! Entity implementation

use std::fmt;
use uuid::Uuid;

/// Entity identifier
///
/// A random 128-bit token generated once at creation. Identifiers are never
/// reused, so a stale `Entity` can only miss, never alias a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: Uuid,
}

impl Entity {
    /// Create a new entity with a freshly generated ID
    pub(crate) fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    /// Get the entity ID
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entity_ids_are_unique() {
        let ids: HashSet<Entity> = (0..1000).map(|_| Entity::new()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_entity_display_is_hex() {
        let entity = Entity::new();
        let text = entity.to_string();
        assert_eq!(text.len(), 32);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
