//! Already-deserialized world content and the seam that supplies it.
//!
//! The simulation core never parses files itself; it asks a
//! [`ContentSource`] for a [`WorldContent`] by world id.

mod json;

use std::collections::HashSet;

pub use json::JsonContentSource;

use crate::error::ContentError;
use crate::id::is_valid_id;
use crate::model::{
    Border, Culture, EntityKind, Faction, FactionKind, Flag, GAIA_FACTION_ID, Holding, Province,
    Relation, Resource, Terrain, Unit, World,
};

/// Supplies world content by id.
pub trait ContentSource {
    fn load(&self, world_id: &str) -> Result<WorldContent, ContentError>;
}

/// Every record needed to build a world, as loaded from content.
#[derive(Debug, Clone)]
pub struct WorldContent {
    pub world: World,
    pub provinces: Vec<Province>,
    pub factions: Vec<Faction>,
    pub units: Vec<Unit>,
    pub resources: Vec<Resource>,
    pub holdings: Vec<Holding>,
    pub borders: Vec<Border>,
    /// Initial relation values; applied symmetrically after initialisation.
    pub relations: Vec<Relation>,
    pub cultures: Vec<Culture>,
    pub flags: Vec<Flag>,
    pub terrains: Vec<Terrain>,
}

impl WorldContent {
    pub fn new(world: World) -> Self {
        Self {
            world,
            provinces: Vec::new(),
            factions: Vec::new(),
            units: Vec::new(),
            resources: Vec::new(),
            holdings: Vec::new(),
            borders: Vec::new(),
            relations: Vec::new(),
            cultures: Vec::new(),
            flags: Vec::new(),
            terrains: Vec::new(),
        }
    }

    /// Fill derived fields: composite ids, Gaia kind for the reserved id,
    /// and runtime-only province state.
    pub fn normalize(&mut self) {
        for faction in &mut self.factions {
            if faction.id == GAIA_FACTION_ID {
                faction.kind = FactionKind::Gaia;
            }
        }
        for province in &mut self.provinces {
            province.locked = false;
        }
        for border in &mut self.borders {
            *border = Border::new(&border.source_province_id, &border.target_province_id);
        }
        for relation in &mut self.relations {
            *relation = Relation::new(
                &relation.source_faction_id,
                &relation.target_faction_id,
                relation.value,
            );
        }
    }

    /// Check ids and cross references. Terrain, culture and flag references
    /// are only checked when the matching collection is non-empty, since
    /// those collections are optional.
    pub fn validate(&self) -> Result<(), ContentError> {
        if !is_valid_id(&self.world.id) {
            return Err(ContentError::InvalidId {
                kind: EntityKind::World,
                id: self.world.id.clone(),
            });
        }

        let factions = unique_ids(EntityKind::Faction, self.factions.iter().map(|f| &f.id))?;
        let provinces = unique_ids(EntityKind::Province, self.provinces.iter().map(|p| &p.id))?;
        unique_ids(EntityKind::Unit, self.units.iter().map(|u| &u.id))?;
        let resources = unique_ids(EntityKind::Resource, self.resources.iter().map(|r| &r.id))?;
        unique_ids(EntityKind::Holding, self.holdings.iter().map(|h| &h.id))?;
        let cultures = unique_ids(EntityKind::Culture, self.cultures.iter().map(|c| &c.id))?;
        let flags = unique_ids(EntityKind::Flag, self.flags.iter().map(|f| &f.id))?;
        let terrains = unique_ids(EntityKind::Terrain, self.terrains.iter().map(|t| &t.id))?;

        for unit in &self.units {
            if unit.health == 0 {
                return Err(ContentError::Invalid(format!(
                    "unit {} has zero health",
                    unit.id
                )));
            }
        }

        for faction in &self.factions {
            if let Some(culture_id) = &faction.culture_id {
                check_optional_ref(EntityKind::Culture, &cultures, culture_id, &faction.id)?;
            }
            if let Some(flag_id) = &faction.flag_id {
                check_optional_ref(EntityKind::Flag, &flags, flag_id, &faction.id)?;
            }
        }

        for province in &self.provinces {
            check_ref(EntityKind::Faction, &factions, &province.faction_id, &province.id)?;
            if !province.sovereign_faction_id.is_empty() {
                check_ref(
                    EntityKind::Faction,
                    &factions,
                    &province.sovereign_faction_id,
                    &province.id,
                )?;
            }
            if let Some(resource_id) = &province.resource_id {
                check_ref(EntityKind::Resource, &resources, resource_id, &province.id)?;
            }
        }

        for holding in &self.holdings {
            check_ref(EntityKind::Province, &provinces, &holding.province_id, &holding.id)?;
        }

        for border in &self.borders {
            check_ref(EntityKind::Province, &provinces, &border.source_province_id, "border")?;
            check_ref(EntityKind::Province, &provinces, &border.target_province_id, "border")?;
            if border.source_province_id == border.target_province_id {
                return Err(ContentError::Invalid(format!(
                    "border {} joins a province to itself",
                    border.id
                )));
            }
        }

        let gaia: HashSet<&str> = self
            .factions
            .iter()
            .filter(|f| f.is_gaia())
            .map(|f| f.id.as_str())
            .collect();
        for relation in &self.relations {
            check_ref(EntityKind::Faction, &factions, &relation.source_faction_id, "relation")?;
            check_ref(EntityKind::Faction, &factions, &relation.target_faction_id, "relation")?;
            if relation.source_faction_id == relation.target_faction_id
                || gaia.contains(relation.source_faction_id.as_str())
                || gaia.contains(relation.target_faction_id.as_str())
            {
                return Err(ContentError::Invalid(format!(
                    "relation {} must join two distinct non-gaia factions",
                    relation.id
                )));
            }
        }

        for (x, y, tile) in self.world.tiles.iter() {
            let owner = format!("tile ({x}, {y})");
            check_ref(EntityKind::Province, &provinces, &tile.province_id, &owner)?;
            if !tile.terrain_id.is_empty() {
                check_optional_ref(EntityKind::Terrain, &terrains, &tile.terrain_id, &owner)?;
            }
        }

        Ok(())
    }
}

impl ContentSource for WorldContent {
    fn load(&self, world_id: &str) -> Result<WorldContent, ContentError> {
        if self.world.id == world_id {
            Ok(self.clone())
        } else {
            Err(ContentError::UnknownWorld(world_id.to_string()))
        }
    }
}

fn unique_ids<'a>(
    kind: EntityKind,
    ids: impl Iterator<Item = &'a String>,
) -> Result<HashSet<&'a str>, ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !is_valid_id(id) {
            return Err(ContentError::InvalidId {
                kind,
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(seen)
}

fn check_ref(
    kind: EntityKind,
    known: &HashSet<&str>,
    id: &str,
    owner: &str,
) -> Result<(), ContentError> {
    if known.contains(id) {
        Ok(())
    } else {
        Err(ContentError::UnknownReference {
            kind,
            id: id.to_string(),
            owner: owner.to_string(),
        })
    }
}

fn check_optional_ref(
    kind: EntityKind,
    known: &HashSet<&str>,
    id: &str,
    owner: &str,
) -> Result<(), ContentError> {
    if known.is_empty() {
        Ok(())
    } else {
        check_ref(kind, known, id, owner)
    }
}
