use serde::{Deserialize, Serialize};

/// Every collection held by the world store. Used to label lookups and
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityKind {
    Army,
    Border,
    Culture,
    Faction,
    Flag,
    Holding,
    Province,
    Relation,
    Resource,
    Terrain,
    Unit,
    World,
}

string_enum!(EntityKind {
    Army => "army",
    Border => "border",
    Culture => "culture",
    Faction => "faction",
    Flag => "flag",
    Holding => "holding",
    Province => "province",
    Relation => "relation",
    Resource => "resource",
    Terrain => "terrain",
    Unit => "unit",
    World => "world",
});
