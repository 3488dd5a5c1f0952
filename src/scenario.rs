use std::ops::Range;

use crate::content::WorldContent;
use crate::error::WorldError;
use crate::model::*;
use crate::sim::WorldManager;

/// Typed reference to a province in a [`Scenario`], enabling chained field mutation.
///
/// Created by [`Scenario::province`] (creation) or [`Scenario::province_mut`] (mutation).
/// Call [`.id()`](ProvinceRef::id) to terminate the chain and extract the province id.
pub struct ProvinceRef<'a> {
    scenario: &'a mut Scenario,
    index: usize,
}

impl<'a> ProvinceRef<'a> {
    fn province_mut(&mut self) -> &mut Province {
        &mut self.scenario.content.provinces[self.index]
    }

    pub fn name(mut self, v: &str) -> Self { self.province_mut().name = v.to_string(); self }
    pub fn capital(mut self) -> Self { self.province_mut().kind = ProvinceKind::Capital; self }
    pub fn sovereign(mut self, faction: &str) -> Self { self.province_mut().sovereign_faction_id = faction.to_string(); self }
    pub fn resource(mut self, resource: &str) -> Self { self.province_mut().resource_id = Some(resource.to_string()); self }

    /// Paint the tiles in `xs × ys` with this province. Tiles outside the map are ignored.
    pub fn area(mut self, xs: Range<u32>, ys: Range<u32>) -> Self {
        let id = self.province_mut().id.clone();
        self.scenario.paint(&id, xs, ys);
        self
    }

    /// Escape hatch: apply an arbitrary closure to the province.
    pub fn with(mut self, f: impl FnOnce(&mut Province)) -> Self { f(self.province_mut()); self }

    /// Terminate the chain and return the province id.
    pub fn id(mut self) -> String { self.province_mut().id.clone() }
}

/// Fluent builder for small worlds.
///
/// Produces [`WorldContent`] exactly as a content source would, so the built
/// world goes through the same validation and initialisation as a loaded
/// one. Every tile starts unpainted; a tile left unpainted fails validation.
///
/// Defaults: 100 starting wealth, 50 starting troops per unit type,
/// 10 income per province, 1 troop needed to attack.
pub struct Scenario {
    content: WorldContent,
    next_holding: u32,
}

impl Scenario {
    pub fn new(world_id: &str, width: u32, height: u32) -> Self {
        let mut world = World::new(world_id, TileGrid::filled(width, height, WorldTile::new("", "")));
        world.name = world_id.to_string();
        world.starting_wealth = 100;
        world.starting_troops = 50;
        world.base_province_income = 10;
        world.min_troops_per_attack = 1;
        Self {
            content: WorldContent::new(world),
            next_holding: 1,
        }
    }

    // -- World settings --

    pub fn starting_wealth(&mut self, v: i64) -> &mut Self { self.content.world.starting_wealth = v; self }
    pub fn starting_troops(&mut self, v: u32) -> &mut Self { self.content.world.starting_troops = v; self }
    pub fn province_income(&mut self, v: i64) -> &mut Self { self.content.world.base_province_income = v; self }
    pub fn min_troops_per_attack(&mut self, v: u32) -> &mut Self { self.content.world.min_troops_per_attack = v; self }

    /// Escape hatch: apply an arbitrary closure to the world record.
    pub fn with_world(&mut self, f: impl FnOnce(&mut World)) -> &mut Self { f(&mut self.content.world); self }

    // -- Entity creation --

    pub fn add_faction(&mut self, id: &str) -> String {
        let mut faction = Faction::new(id);
        faction.name = id.to_string();
        self.content.factions.push(faction);
        id.to_string()
    }

    /// Add the neutral faction under its reserved id.
    pub fn add_gaia(&mut self) -> String {
        self.content.factions.push(Faction::gaia());
        GAIA_FACTION_ID.to_string()
    }

    pub fn add_unit(&mut self, id: &str, health: u32, power: u32) -> String {
        self.content.units.push(Unit::new(id, health, power));
        id.to_string()
    }

    pub fn add_resource(&mut self, id: &str, kind: ResourceKind) -> String {
        self.content.resources.push(Resource::new(id, kind));
        id.to_string()
    }

    /// Add a province owned by `faction` and return a ref for chaining.
    pub fn province(&mut self, id: &str, faction: &str) -> ProvinceRef<'_> {
        self.content.provinces.push(Province::new(id, faction));
        let index = self.content.provinces.len() - 1;
        ProvinceRef { scenario: self, index }
    }

    /// Add a province with no tiles and return its id.
    pub fn add_province(&mut self, id: &str, faction: &str) -> String {
        self.province(id, faction).id()
    }

    /// Ref to an existing province, if it was added.
    pub fn province_mut(&mut self, id: &str) -> Option<ProvinceRef<'_>> {
        let index = self.content.provinces.iter().position(|p| p.id == id)?;
        Some(ProvinceRef { scenario: self, index })
    }

    /// Add a holding of `kind` on `province` and return its generated id.
    pub fn add_holding(&mut self, province: &str, kind: HoldingKind) -> String {
        let id = format!("holding{}", self.next_holding);
        self.next_holding += 1;
        self.content.holdings.push(Holding::new(&id, kind, province));
        id
    }

    /// Declare a border the tile sampler might not find.
    pub fn add_border(&mut self, a: &str, b: &str) -> &mut Self {
        self.content.borders.push(Border::new(a, b));
        self
    }

    /// Initial relation between two factions, applied in both directions at load.
    pub fn add_relation(&mut self, a: &str, b: &str, value: i32) -> &mut Self {
        self.content.relations.push(Relation::new(a, b, value));
        self
    }

    /// Assign every tile in `xs × ys` to `province`.
    pub fn paint(&mut self, province: &str, xs: Range<u32>, ys: Range<u32>) -> &mut Self {
        for y in ys {
            for x in xs.clone() {
                if let Some(tile) = self.content.world.tiles.get_mut(x, y) {
                    tile.province_id = province.to_string();
                }
            }
        }
        self
    }

    // -- Output --

    pub fn content(&self) -> &WorldContent {
        &self.content
    }

    pub fn build(self) -> WorldContent {
        self.content
    }

    /// Validate, initialise and return the world.
    pub fn load(self) -> Result<WorldManager, WorldError> {
        WorldManager::from_content(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn painted_provinces_cover_the_map() {
        let mut s = Scenario::new("painted", 4, 2);
        s.add_faction("rome");
        s.province("west", "rome").area(0..2, 0..2);
        s.province("east", "rome").capital().area(2..4, 0..2);
        let content = s.build();
        content.validate().unwrap();
        assert_eq!(content.world.tiles.get(3, 1).unwrap().province_id, "east");
        assert_eq!(content.provinces[1].kind, ProvinceKind::Capital);
    }

    #[test]
    fn unpainted_tiles_fail_validation() {
        let mut s = Scenario::new("holes", 4, 2);
        s.add_faction("rome");
        s.province("west", "rome").area(0..2, 0..2);
        assert!(s.load().is_err());
    }

    #[test]
    fn holdings_get_sequential_ids() {
        let mut s = Scenario::new("holdings", 1, 1);
        assert_eq!(s.add_holding("p", HoldingKind::City), "holding1");
        assert_eq!(s.add_holding("p", HoldingKind::Castle), "holding2");
    }

    #[test]
    fn province_mut_finds_existing() {
        let mut s = Scenario::new("edit", 1, 1);
        s.add_faction("rome");
        s.add_province("latium", "rome");
        s.province_mut("latium").unwrap().sovereign("carthage");
        assert_eq!(s.content().provinces[0].sovereign_faction_id, "carthage");
        assert!(s.province_mut("africa").is_none());
    }
}
