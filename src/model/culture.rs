use serde::{Deserialize, Serialize};

/// Descriptive culture record. Static after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Heraldry for a faction. Colours are `#rrggbb` strings; drawing them is
/// the presentation layer's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub id: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub emblem: String,
    #[serde(default)]
    pub skin: String,
    #[serde(default)]
    pub background_primary_colour: String,
    #[serde(default)]
    pub background_secondary_colour: String,
    #[serde(default)]
    pub emblem_colour: String,
}
