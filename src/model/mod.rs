#[macro_use]
mod macros;

pub mod army;
pub mod border;
pub mod culture;
pub mod entity;
pub mod faction;
pub mod holding;
pub mod province;
pub mod relation;
pub mod resource;
pub mod terrain;
pub mod world;

pub use army::{Army, Unit};
pub use border::Border;
pub use culture::{Culture, Flag};
pub use entity::EntityKind;
pub use faction::{Faction, FactionKind, GAIA_FACTION_ID};
pub use holding::{Holding, HoldingKind};
pub use province::{Province, ProvinceKind, ProvinceState};
pub use relation::{RELATION_MAX, RELATION_MIN, Relation, clamp_relation};
pub use resource::{Resource, ResourceKind};
pub use terrain::Terrain;
pub use world::{TileGrid, World, WorldTile};
