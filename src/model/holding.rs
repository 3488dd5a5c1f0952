use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HoldingKind {
    Castle,
    City,
    Temple,
    Custom(String),
}

string_enum_open!(HoldingKind, "holding kind", {
    Castle => "castle",
    City => "city",
    Temple => "temple",
});

/// A building sitting on a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: HoldingKind,
    pub province_id: String,
}

impl Holding {
    pub fn new(id: impl Into<String>, kind: HoldingKind, province_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            province_id: province_id.into(),
        }
    }
}
