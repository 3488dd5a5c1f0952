use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use parking_lot::ReentrantMutex;
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::content::{ContentSource, WorldContent};
use crate::error::WorldError;
use crate::id::{border_key, composite_id};
use crate::model::{
    Army, Border, Culture, EntityKind, Faction, Flag, Holding, Province, Relation, Resource,
    Terrain, Unit, World, clamp_relation,
};
use crate::store::WorldStore;
use crate::worldgen::generate_borders;

/// Owns the loaded world: the store, the static map and the turn counter.
///
/// All queries and commands take `&self`. The store is concurrent, so the
/// manager can be shared across threads. Writes to a single province are
/// serialised by a per-province reentrant guard, and army sizes by a
/// per-faction one.
#[derive(Debug)]
pub struct WorldManager {
    world: World,
    store: WorldStore,
    province_guards: DashMap<String, Arc<ReentrantMutex<()>>>,
    faction_guards: DashMap<String, Arc<ReentrantMutex<()>>>,
    turn: AtomicU32,
}

impl WorldManager {
    /// Load `world_id` from `source` and initialise it for play.
    pub fn load_world(source: &dyn ContentSource, world_id: &str) -> Result<Self, WorldError> {
        let span = info_span!("load_world", world_id);
        let _enter = span.enter();
        info!("loading world");

        let content = source.load(world_id)?;
        Self::from_content(content)
    }

    /// Build a world from content that is already in memory.
    ///
    /// Order matters: entities are stored, borders from content are kept,
    /// sampled borders fill the gaps, provinces are initialised before
    /// factions, and content relations are applied last so they override the
    /// neutral defaults.
    pub fn from_content(mut content: WorldContent) -> Result<Self, WorldError> {
        content.normalize();
        content.validate()?;

        let WorldContent {
            world,
            provinces,
            factions,
            units,
            resources,
            holdings,
            borders,
            relations,
            cultures,
            flags,
            terrains,
        } = content;

        let store = WorldStore::new();
        let province_guards = DashMap::new();
        for province in provinces {
            province_guards.insert(province.id.clone(), Arc::new(ReentrantMutex::new(())));
            store.provinces.insert(province.id.clone(), province);
        }
        let faction_guards = DashMap::new();
        for faction in factions {
            faction_guards.insert(faction.id.clone(), Arc::new(ReentrantMutex::new(())));
            store.factions.insert(faction.id.clone(), faction);
        }
        for unit in units {
            store.units.insert(unit.id.clone(), unit);
        }
        for resource in resources {
            store.resources.insert(resource.id.clone(), resource);
        }
        for holding in holdings {
            store.holdings.insert(holding.id.clone(), holding);
        }
        for culture in cultures {
            store.cultures.insert(culture.id.clone(), culture);
        }
        for flag in flags {
            store.flags.insert(flag.id.clone(), flag);
        }
        for terrain in terrains {
            store.terrains.insert(terrain.id.clone(), terrain);
        }
        for border in borders {
            store.borders.insert_if_absent(border.id.clone(), border);
        }

        let manager = Self {
            world,
            store,
            province_guards,
            faction_guards,
            turn: AtomicU32::new(1),
        };

        let sampled = generate_borders(&manager.world.tiles, &manager.store.borders);
        manager.initialize_entities()?;

        for relation in &relations {
            manager.set_relations(
                &relation.source_faction_id,
                &relation.target_faction_id,
                relation.value,
            )?;
        }

        info!(
            world_id = %manager.world.id,
            provinces = manager.store.provinces.len(),
            factions = manager.store.factions.len(),
            borders = manager.store.borders.len(),
            sampled_borders = sampled,
            armies = manager.store.armies.len(),
            "world loaded"
        );
        Ok(manager)
    }

    fn initialize_entities(&self) -> Result<(), WorldError> {
        for id in self.store.provinces.ids() {
            self.initialize_province(&id)?;
        }
        self.store
            .factions
            .ids()
            .par_iter()
            .try_for_each(|id| self.initialize_faction(id))
    }

    /// Reset runtime province state. A province without a recorded sovereign
    /// takes its current owner as sovereign.
    pub fn initialize_province(&self, province_id: &str) -> Result<(), WorldError> {
        self.store.provinces.update(province_id, |province| {
            province.locked = false;
            if province.sovereign_faction_id.is_empty() {
                province.sovereign_faction_id = province.faction_id.clone();
            }
        })
    }

    /// Give a faction its starting wealth, one army per unit type and a
    /// neutral relation with every other non-Gaia faction, in both
    /// directions. Gaia is only marked dead.
    pub fn initialize_faction(&self, faction_id: &str) -> Result<(), WorldError> {
        let faction = self.store.factions.require(faction_id)?;
        if faction.is_gaia() {
            return self.set_faction_alive(faction_id, false);
        }

        let starting_wealth = self.world.starting_wealth;
        self.store.factions.update(faction_id, |f| {
            f.wealth = starting_wealth;
            f.alive = true;
        })?;

        let troops = self.world.starting_troops;
        self.store.units.ids().par_iter().for_each(|unit_id| {
            let army = Army::new(faction_id, unit_id, troops);
            self.store.armies.insert(army.id.clone(), army);
        });

        let others = self
            .store
            .factions
            .filter(|other| !other.is_gaia() && other.id != faction_id);
        others.par_iter().for_each(|other| {
            for relation in [
                Relation::new(faction_id, &other.id, 0),
                Relation::new(&other.id, faction_id, 0),
            ] {
                self.store.relations.insert(relation.id.clone(), relation);
            }
        });

        debug!(faction_id, troops, wealth = starting_wealth, "faction initialised");
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn current_turn(&self) -> u32 {
        self.turn.load(Ordering::SeqCst)
    }

    /// Move to the next turn and return its number.
    pub fn advance_turn(&self) -> u32 {
        self.turn.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn province_guard(
        &self,
        province_id: &str,
    ) -> Result<Arc<ReentrantMutex<()>>, WorldError> {
        self.province_guards
            .get(province_id)
            .map(|guard| Arc::clone(guard.value()))
            .ok_or_else(|| WorldError::not_found(EntityKind::Province, province_id))
    }

    /// Guards for every faction in `faction_ids`, deduplicated and in id
    /// order. Lock them in the returned order so battles sharing a faction
    /// cannot deadlock.
    pub(crate) fn faction_guards(
        &self,
        faction_ids: &[&str],
    ) -> Result<Vec<Arc<ReentrantMutex<()>>>, WorldError> {
        let mut ids = faction_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .map(|faction_id| {
                self.faction_guards
                    .get(faction_id)
                    .map(|guard| Arc::clone(guard.value()))
                    .ok_or_else(|| WorldError::not_found(EntityKind::Faction, faction_id))
            })
            .collect()
    }

    // -- Adjacency --

    pub fn province_borders_province(&self, a: &str, b: &str) -> bool {
        a != b && self.store.borders.contains(&border_key(a, b))
    }

    /// Whether any province of `faction_a` borders any province of `faction_b`.
    pub fn faction_borders_faction(&self, faction_a: &str, faction_b: &str) -> bool {
        let ours = self.faction_provinces(faction_a);
        let theirs = self.faction_provinces(faction_b);
        ours.iter().any(|a| {
            theirs
                .iter()
                .any(|b| self.province_borders_province(&a.id, &b.id))
        })
    }

    /// Whether any province of `faction_id` borders `province_id`.
    pub fn faction_borders_province(&self, faction_id: &str, province_id: &str) -> bool {
        self.faction_provinces(faction_id)
            .iter()
            .any(|owned| self.province_borders_province(&owned.id, province_id))
    }

    /// Ids of every province sharing a border with `province_id`, sorted.
    pub fn province_neighbours(&self, province_id: &str) -> Vec<String> {
        let mut neighbours: Vec<String> = self
            .store
            .borders
            .filter(|border| border.touches(province_id))
            .iter()
            .filter_map(|border| border.other_side(province_id).map(str::to_string))
            .collect();
        neighbours.sort();
        neighbours
    }

    // -- Province commands --

    /// Hand `province_id` to `faction_id`. Sovereignty is unchanged.
    pub fn transfer_province(&self, province_id: &str, faction_id: &str) -> Result<(), WorldError> {
        self.store.factions.require(faction_id)?;
        let guard = self.province_guard(province_id)?;
        let _lock = guard.lock();

        let previous = self.store.provinces.update(province_id, |province| {
            std::mem::replace(&mut province.faction_id, faction_id.to_string())
        })?;
        debug!(province_id, from = %previous, to = faction_id, "province transferred");
        Ok(())
    }

    pub fn set_province_locked(&self, province_id: &str, locked: bool) -> Result<(), WorldError> {
        self.store
            .provinces
            .update(province_id, |province| province.locked = locked)
    }

    /// Clear every lock. Returns how many provinces were locked.
    pub fn unlock_all_provinces(&self) -> usize {
        self.store
            .provinces
            .update_all(|province| std::mem::replace(&mut province.locked, false))
    }

    // -- Relations --

    pub fn relation_value(&self, source: &str, target: &str) -> Option<i32> {
        self.store
            .relations
            .get(&composite_id(source, target))
            .map(|relation| relation.value)
    }

    /// Outgoing relations of `faction_id`, sorted by target.
    pub fn faction_relations(&self, faction_id: &str) -> Vec<Relation> {
        self.store.relations.filter(|relation| {
            relation.source_faction_id == faction_id && relation.target_faction_id != faction_id
        })
    }

    /// Shift the relation between two factions by `delta`, clamped to
    /// [-100, 100], and write it in both directions. Returns the new value.
    pub fn change_relations(&self, source: &str, target: &str, delta: i32) -> Result<i32, WorldError> {
        let current = self.require_relation(source, target)?.value;
        self.require_relation(target, source)?;
        let value = clamp_relation(i64::from(current) + i64::from(delta));
        self.write_relation_pair(source, target, value)
    }

    /// Set the relation between two factions, clamped, in both directions.
    /// Returns the stored value.
    pub fn set_relations(&self, source: &str, target: &str, value: i32) -> Result<i32, WorldError> {
        self.require_relation(source, target)?;
        self.require_relation(target, source)?;
        self.write_relation_pair(source, target, clamp_relation(i64::from(value)))
    }

    fn require_relation(&self, source: &str, target: &str) -> Result<Relation, WorldError> {
        self.store
            .relations
            .get(&composite_id(source, target))
            .ok_or_else(|| WorldError::NoRelation {
                from: source.to_string(),
                to: target.to_string(),
            })
    }

    fn write_relation_pair(&self, a: &str, b: &str, value: i32) -> Result<i32, WorldError> {
        for (source, target) in [(a, b), (b, a)] {
            self.store
                .relations
                .update(&composite_id(source, target), |relation| relation.value = value)?;
        }
        debug!(a, b, value, "relations updated");
        Ok(value)
    }

    // -- Faction commands --

    /// Add `delta` to a faction's treasury. Returns the new balance.
    pub fn adjust_faction_wealth(&self, faction_id: &str, delta: i64) -> Result<i64, WorldError> {
        self.store.factions.update(faction_id, |faction| {
            faction.wealth = faction.wealth.saturating_add(delta);
            faction.wealth
        })
    }

    pub fn set_faction_alive(&self, faction_id: &str, alive: bool) -> Result<(), WorldError> {
        self.store
            .factions
            .update(faction_id, |faction| faction.alive = alive)
    }

    /// Waits for any battle the faction is fighting to finish.
    pub fn update_army_size(&self, faction_id: &str, unit_id: &str, size: u32) -> Result<(), WorldError> {
        let guards = self.faction_guards(&[faction_id])?;
        let _locks: Vec<_> = guards.iter().map(|guard| guard.lock()).collect();
        self.store
            .armies
            .update(&composite_id(faction_id, unit_id), |army| army.size = size)
    }

    // -- Lookups --

    pub fn province(&self, province_id: &str) -> Result<Province, WorldError> {
        self.store.provinces.require(province_id)
    }

    pub fn provinces(&self) -> Vec<Province> {
        self.store.provinces.values()
    }

    /// The province painted on tile `(x, y)`.
    pub fn province_at(&self, x: i64, y: i64) -> Result<Province, WorldError> {
        let tiles = &self.world.tiles;
        let out_of_bounds = || WorldError::OutOfBounds {
            x,
            y,
            width: tiles.width(),
            height: tiles.height(),
        };
        if !tiles.contains(x, y) {
            return Err(out_of_bounds());
        }
        let tile = tiles
            .get(x as u32, y as u32)
            .ok_or_else(out_of_bounds)?;
        self.province(&tile.province_id)
    }

    pub fn faction(&self, faction_id: &str) -> Result<Faction, WorldError> {
        self.store.factions.require(faction_id)
    }

    pub fn factions(&self) -> Vec<Faction> {
        self.store.factions.values()
    }

    /// Owner of the province on tile `(x, y)`.
    pub fn faction_at(&self, x: i64, y: i64) -> Result<Faction, WorldError> {
        let province = self.province_at(x, y)?;
        self.faction(&province.faction_id)
    }

    /// Whether `faction_id` names the neutral faction. Unknown ids are not Gaia.
    pub fn is_gaia(&self, faction_id: &str) -> bool {
        self.store
            .factions
            .get(faction_id)
            .is_some_and(|faction| faction.is_gaia())
    }

    pub fn faction_provinces(&self, faction_id: &str) -> Vec<Province> {
        self.store
            .provinces
            .filter(|province| province.faction_id == faction_id)
    }

    pub fn faction_armies(&self, faction_id: &str) -> Vec<Army> {
        self.store
            .armies
            .filter(|army| army.faction_id == faction_id)
    }

    /// Sum of all army sizes of a faction.
    pub fn faction_troops(&self, faction_id: &str) -> u64 {
        self.faction_armies(faction_id)
            .iter()
            .map(|army| u64::from(army.size))
            .sum()
    }

    /// The lowest-id capital the faction both owns and is sovereign of.
    /// An occupied capital does not count.
    pub fn faction_capital(&self, faction_id: &str) -> Option<Province> {
        self.store
            .provinces
            .filter(|province| {
                province.is_capital()
                    && province.faction_id == faction_id
                    && province.sovereign_faction_id == faction_id
            })
            .into_iter()
            .next()
    }

    /// Centre of the bounding box of every tile the faction owns.
    pub fn faction_centre(&self, faction_id: &str) -> Option<(u32, u32)> {
        let owners: HashMap<String, String> = self
            .store
            .provinces
            .values()
            .into_iter()
            .map(|province| (province.id, province.faction_id))
            .collect();

        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, tile) in self.world.tiles.iter() {
            if owners.get(&tile.province_id).map(String::as_str) != Some(faction_id) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds.map(|(min_x, min_y, max_x, max_y)| ((min_x + max_x) / 2, (min_y + max_y) / 2))
    }

    pub fn army(&self, faction_id: &str, unit_id: &str) -> Result<Army, WorldError> {
        self.store.armies.require(&composite_id(faction_id, unit_id))
    }

    pub fn armies(&self) -> Vec<Army> {
        self.store.armies.values()
    }

    pub fn unit(&self, unit_id: &str) -> Result<Unit, WorldError> {
        self.store.units.require(unit_id)
    }

    pub fn units(&self) -> Vec<Unit> {
        self.store.units.values()
    }

    pub fn resource(&self, resource_id: &str) -> Result<Resource, WorldError> {
        self.store.resources.require(resource_id)
    }

    pub fn resources(&self) -> Vec<Resource> {
        self.store.resources.values()
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.store.holdings.values()
    }

    pub fn province_holdings(&self, province_id: &str) -> Vec<Holding> {
        self.store
            .holdings
            .filter(|holding| holding.province_id == province_id)
    }

    pub fn borders(&self) -> Vec<Border> {
        self.store.borders.values()
    }

    pub fn relations(&self) -> Vec<Relation> {
        self.store.relations.values()
    }

    pub fn culture(&self, culture_id: &str) -> Result<Culture, WorldError> {
        self.store.cultures.require(culture_id)
    }

    pub fn cultures(&self) -> Vec<Culture> {
        self.store.cultures.values()
    }

    pub fn flag(&self, flag_id: &str) -> Result<Flag, WorldError> {
        self.store.flags.require(flag_id)
    }

    pub fn flags(&self) -> Vec<Flag> {
        self.store.flags.values()
    }

    pub fn terrain(&self, terrain_id: &str) -> Result<Terrain, WorldError> {
        self.store.terrains.require(terrain_id)
    }

    pub fn terrains(&self) -> Vec<Terrain> {
        self.store.terrains.values()
    }
}
