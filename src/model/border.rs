use serde::{Deserialize, Serialize};

use crate::id::border_key;

/// Adjacency between two provinces.
///
/// `id` is the unordered key, so `(a, b)` and `(b, a)` collide in the store.
/// Source/target keep the order in which the border was first recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    #[serde(default)]
    pub id: String,
    pub source_province_id: String,
    pub target_province_id: String,
}

impl Border {
    pub fn new(source_province_id: &str, target_province_id: &str) -> Self {
        Self {
            id: border_key(source_province_id, target_province_id),
            source_province_id: source_province_id.to_string(),
            target_province_id: target_province_id.to_string(),
        }
    }

    /// Whether this border touches `province_id`.
    pub fn touches(&self, province_id: &str) -> bool {
        self.source_province_id == province_id || self.target_province_id == province_id
    }

    /// The province on the other side of `province_id`, if it is an endpoint.
    pub fn other_side(&self, province_id: &str) -> Option<&str> {
        if self.source_province_id == province_id {
            Some(&self.target_province_id)
        } else if self.target_province_id == province_id {
            Some(&self.source_province_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_direction() {
        let ab = Border::new("a", "b");
        let ba = Border::new("b", "a");
        assert_eq!(ab.id, ba.id);
        assert_eq!(ba.source_province_id, "b");
    }

    #[test]
    fn other_side() {
        let border = Border::new("north", "south");
        assert_eq!(border.other_side("north"), Some("south"));
        assert_eq!(border.other_side("south"), Some("north"));
        assert_eq!(border.other_side("east"), None);
        assert!(border.touches("south"));
    }
}
