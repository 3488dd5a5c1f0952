#[macro_use]
pub mod model;

pub mod config;
pub mod content;
pub mod error;
pub mod flush;
pub mod id;
pub mod scenario;
pub mod sim;
pub mod store;
pub mod worldgen;

pub use config::GameConfig;
pub use content::{ContentSource, JsonContentSource, WorldContent};
pub use error::{AttackError, ContentError, InvalidTargetReason, WorldError};
pub use model::{
    Army, Border, EntityKind, Faction, Holding, Province, Relation, Resource, Unit, World,
};
pub use sim::{AttackManager, BattleReport, BattleResult, TurnReport, WorldManager, end_turn};
