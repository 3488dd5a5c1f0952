use serde::{Deserialize, Serialize};

use crate::id::composite_id;

pub const RELATION_MIN: i32 = -100;
pub const RELATION_MAX: i32 = 100;

/// Clamp a relation value into `[RELATION_MIN, RELATION_MAX]`.
pub fn clamp_relation(value: i64) -> i32 {
    value.clamp(i64::from(RELATION_MIN), i64::from(RELATION_MAX)) as i32
}

/// Directed affinity from one faction towards another.
///
/// Stored as two records per pair; every mutation writes both so they
/// always mirror each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub id: String,
    pub source_faction_id: String,
    pub target_faction_id: String,
    #[serde(default)]
    pub value: i32,
}

impl Relation {
    pub fn new(source_faction_id: &str, target_faction_id: &str, value: i32) -> Self {
        Self {
            id: composite_id(source_faction_id, target_faction_id),
            source_faction_id: source_faction_id.to_string(),
            target_faction_id: target_faction_id.to_string(),
            value: clamp_relation(i64::from(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        assert_eq!(clamp_relation(150), 100);
        assert_eq!(clamp_relation(-150), -100);
        assert_eq!(clamp_relation(42), 42);
        assert_eq!(clamp_relation(i64::MAX), 100);
    }

    #[test]
    fn constructor_clamps_and_keys() {
        let rel = Relation::new("rome", "carthage", 250);
        assert_eq!(rel.id, "rome:carthage");
        assert_eq!(rel.value, RELATION_MAX);
    }
}
