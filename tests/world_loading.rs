mod common;

use std::fs;
use std::path::Path;

use common::frontier;
use proptest::prelude::*;
use serde::Serialize;
use territory_sim::model::{RELATION_MAX, RELATION_MIN};
use territory_sim::{ContentError, JsonContentSource, WorldContent, WorldError, WorldManager};

fn write<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) {
    fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Lay `content` out the way `JsonContentSource` expects it.
fn write_world(root: &Path, content: &WorldContent) {
    let dir = root.join(&content.world.id);
    fs::create_dir_all(&dir).unwrap();
    write(&dir, "world.json", &content.world);
    write(&dir, "provinces.json", &content.provinces);
    write(&dir, "factions.json", &content.factions);
    write(&dir, "units.json", &content.units);
    write(&dir, "borders.json", &content.borders);
    write(&dir, "relations.json", &content.relations);
}

#[test]
fn every_faction_gets_an_army_per_unit() {
    let world = frontier().load().unwrap();
    let units = world.units();
    for faction in world.factions() {
        let armies = world.faction_armies(&faction.id);
        if faction.is_gaia() {
            assert!(armies.is_empty());
            assert!(!faction.alive);
            continue;
        }
        assert!(faction.alive);
        assert_eq!(armies.len(), units.len(), "{}", faction.id);
        for unit in &units {
            assert_eq!(world.army(&faction.id, &unit.id).unwrap().size, 50);
        }
    }
}

#[test]
fn relations_are_symmetric_after_load() {
    let mut s = frontier();
    s.add_faction("greece");
    s.add_province("hellas", "greece");
    s.add_relation("rome", "carthage", -150);
    let world = s.load().unwrap();

    assert_eq!(world.relation_value("rome", "carthage"), Some(-100));
    assert_eq!(world.relation_value("carthage", "rome"), Some(-100));
    assert_eq!(world.relation_value("rome", "greece"), Some(0));
    assert_eq!(world.relation_value("greece", "carthage"), Some(0));
    assert_eq!(world.faction_relations("rome").len(), 2);
}

#[test]
fn set_relations_clamps_both_directions() {
    let world = frontier().load().unwrap();

    assert_eq!(world.set_relations("rome", "carthage", 150).unwrap(), RELATION_MAX);
    assert_eq!(world.relation_value("rome", "carthage"), Some(100));
    assert_eq!(world.relation_value("carthage", "rome"), Some(100));

    assert_eq!(world.set_relations("rome", "carthage", -150).unwrap(), RELATION_MIN);
    assert_eq!(world.relation_value("rome", "carthage"), Some(-100));
    assert_eq!(world.relation_value("carthage", "rome"), Some(-100));
}

#[test]
fn json_content_loads_through_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = frontier();
    s.add_relation("rome", "carthage", 25);
    write_world(dir.path(), s.content());

    let source = JsonContentSource::new(dir.path());
    let world = WorldManager::load_world(&source, "frontier").unwrap();

    assert_eq!(world.world().width(), 20);
    assert_eq!(world.provinces().len(), 4);
    assert_eq!(world.province_at(12, 3).unwrap().id, "africa");
    assert_eq!(world.faction_capital("rome").unwrap().id, "latium");
    assert_eq!(world.relation_value("carthage", "rome"), Some(25));
    assert!(world.province_borders_province("wilds", "etruria"));
}

#[test]
fn unknown_world_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonContentSource::new(dir.path());
    let err = WorldManager::load_world(&source, "nowhere").unwrap_err();
    assert!(matches!(err, WorldError::Content(ContentError::UnknownWorld(_))));
}

#[test]
fn dangling_reference_fails_the_load() {
    let mut s = frontier();
    s.add_province("carthago", "numidia");
    let err = s.load().unwrap_err();
    assert!(err.to_string().contains("numidia"));
}

#[test]
fn in_memory_content_is_a_source() {
    let content = frontier().build();
    let world = WorldManager::load_world(&content, "frontier").unwrap();
    assert_eq!(world.factions().len(), 3);
    assert!(WorldManager::load_world(&content, "elsewhere").is_err());
}

proptest! {
    #[test]
    fn relation_changes_stay_clamped_and_symmetric(deltas in prop::collection::vec(-250i32..250, 1..20)) {
        let world = frontier().load().unwrap();
        for delta in deltas {
            let value = world.change_relations("rome", "carthage", delta).unwrap();
            prop_assert!((RELATION_MIN..=RELATION_MAX).contains(&value));
            prop_assert_eq!(world.relation_value("rome", "carthage"), Some(value));
            prop_assert_eq!(world.relation_value("carthage", "rome"), Some(value));
        }
    }
}
