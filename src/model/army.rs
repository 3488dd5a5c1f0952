use serde::{Deserialize, Serialize};

use crate::id::composite_id;

/// Static combat stats for one troop type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Hit points per troop. Must be positive; it divides attrition.
    pub health: u32,
    /// Damage dealt per troop per clash.
    pub power: u32,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub maintenance: u32,
}

impl Unit {
    pub fn new(id: impl Into<String>, health: u32, power: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            health,
            power,
            price: 0,
            maintenance: 0,
        }
    }
}

/// A faction's troop count for one unit type. Identified by `faction:unit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    pub id: String,
    pub faction_id: String,
    pub unit_id: String,
    pub size: u32,
}

impl Army {
    pub fn new(faction_id: &str, unit_id: &str, size: u32) -> Self {
        Self {
            id: composite_id(faction_id, unit_id),
            faction_id: faction_id.to_string(),
            unit_id: unit_id.to_string(),
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn army_id_is_faction_then_unit() {
        let army = Army::new("rome", "legionary", 100);
        assert_eq!(army.id, "rome:legionary");
        assert!(!army.is_empty());
        assert!(Army::new("rome", "archer", 0).is_empty());
    }

    #[test]
    fn unit_optional_fields_default() {
        let unit: Unit =
            serde_json::from_str(r#"{"id": "archer", "health": 8, "power": 3}"#).unwrap();
        assert_eq!(unit, Unit::new("archer", 8, 3));
    }
}
