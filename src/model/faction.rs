use serde::{Deserialize, Serialize};

/// Id reserved for the neutral faction owning unclaimed land.
pub const GAIA_FACTION_ID: &str = "gaia";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FactionKind {
    #[default]
    Normal,
    /// Neutral owner of unclaimed territory. Never alive, never fights,
    /// never has relations.
    Gaia,
}

string_enum!(FactionKind {
    Normal => "normal",
    Gaia => "gaia",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_id: Option<String>,
    #[serde(default)]
    pub kind: FactionKind,
    #[serde(default)]
    pub wealth: i64,
    #[serde(default)]
    pub alive: bool,
}

impl Faction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            culture_id: None,
            flag_id: None,
            kind: FactionKind::Normal,
            wealth: 0,
            alive: false,
        }
    }

    pub fn gaia() -> Self {
        Self {
            kind: FactionKind::Gaia,
            ..Self::new(GAIA_FACTION_ID)
        }
    }

    pub fn is_gaia(&self) -> bool {
        self.kind == FactionKind::Gaia
    }
}
