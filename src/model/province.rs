use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ProvinceKind {
    #[default]
    Province,
    Capital,
}

string_enum!(ProvinceKind {
    Province => "province",
    Capital => "capital",
});

/// Whether a province is held by its rightful owner. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ProvinceState {
    Sovereign,
    Occupied,
}

string_enum!(ProvinceState {
    Sovereign => "sovereign",
    Occupied => "occupied",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Current holder.
    pub faction_id: String,
    /// Rightful holder. Empty in content means "same as `faction_id`";
    /// filled in once at world initialisation and never reset.
    #[serde(default)]
    pub sovereign_faction_id: String,
    /// Set right after a conquest, cleared at the next turn boundary.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub kind: ProvinceKind,
}

impl Province {
    pub fn new(id: impl Into<String>, faction_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            resource_id: None,
            faction_id: faction_id.into(),
            sovereign_faction_id: String::new(),
            locked: false,
            kind: ProvinceKind::Province,
        }
    }

    pub fn state(&self) -> ProvinceState {
        if self.faction_id == self.sovereign_faction_id {
            ProvinceState::Sovereign
        } else {
            ProvinceState::Occupied
        }
    }

    pub fn is_capital(&self) -> bool {
        self.kind == ProvinceKind::Capital
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_current_holder() {
        let mut province = Province::new("tuscia", "rome");
        province.sovereign_faction_id = "rome".to_string();
        assert_eq!(province.state(), ProvinceState::Sovereign);

        province.faction_id = "carthage".to_string();
        assert_eq!(province.state(), ProvinceState::Occupied);
    }

    #[test]
    fn content_shape_defaults() {
        let province: Province =
            serde_json::from_str(r#"{"id": "tuscia", "faction_id": "rome"}"#).unwrap();
        assert_eq!(province.kind, ProvinceKind::Province);
        assert!(province.sovereign_faction_id.is_empty());
        assert!(!province.locked);
        assert!(province.resource_id.is_none());
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProvinceKind::Capital).unwrap(),
            "\"capital\""
        );
        let bad: Result<ProvinceKind, _> = serde_json::from_str("\"fortress\"");
        assert!(bad.is_err());
    }
}
