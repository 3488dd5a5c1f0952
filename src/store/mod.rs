//! In-memory world store: one concurrent repository per entity type.

mod repository;

pub use repository::Repository;

use crate::model::{
    Army, Border, Culture, EntityKind, Faction, Flag, Holding, Province, Relation, Resource,
    Terrain, Unit,
};

/// Single source of truth for every loaded entity.
///
/// Shared by reference between all readers; writers are the world manager
/// and, through it, the attack manager.
#[derive(Debug)]
pub struct WorldStore {
    pub armies: Repository<Army>,
    pub borders: Repository<Border>,
    pub cultures: Repository<Culture>,
    pub factions: Repository<Faction>,
    pub flags: Repository<Flag>,
    pub holdings: Repository<Holding>,
    pub provinces: Repository<Province>,
    pub relations: Repository<Relation>,
    pub resources: Repository<Resource>,
    pub terrains: Repository<Terrain>,
    pub units: Repository<Unit>,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            armies: Repository::new(EntityKind::Army),
            borders: Repository::new(EntityKind::Border),
            cultures: Repository::new(EntityKind::Culture),
            factions: Repository::new(EntityKind::Faction),
            flags: Repository::new(EntityKind::Flag),
            holdings: Repository::new(EntityKind::Holding),
            provinces: Repository::new(EntityKind::Province),
            relations: Repository::new(EntityKind::Relation),
            resources: Repository::new(EntityKind::Resource),
            terrains: Repository::new(EntityKind::Terrain),
            units: Repository::new(EntityKind::Unit),
        }
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}
