use serde::{Deserialize, Serialize};

/// Ground type referenced by map tiles. Purely descriptive for the core;
/// the presentation layer decides how it looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Draw order when terrains overlap.
    #[serde(default)]
    pub z_index: i32,
}
