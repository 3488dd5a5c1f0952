mod common;

use common::{frontier, rng};
use territory_sim::model::Army;
use territory_sim::{
    AttackError, AttackManager, BattleResult, GameConfig, InvalidTargetReason, WorldError,
    WorldManager,
};

fn world() -> WorldManager {
    frontier().load().unwrap()
}

fn armies(world: &WorldManager) -> Vec<Army> {
    world.armies()
}

fn reason(world: &WorldManager, attacker: &str, province: &str) -> InvalidTargetReason {
    let attacks = AttackManager::new(world, &GameConfig::default());
    let before = armies(world);
    let err = attacks
        .attack_province(attacker, province, &mut rng(0))
        .unwrap_err();
    assert_eq!(armies(world), before, "rejected attack must not touch armies");
    err.invalid_reason()
        .unwrap_or_else(|| panic!("expected invalid target, got {err}"))
}

#[test]
fn knights_overrun_militia_in_one_round() {
    let world = world();
    world.update_army_size("rome", "knight", 100).unwrap();
    world.update_army_size("rome", "militia", 0).unwrap();
    world.update_army_size("carthage", "knight", 0).unwrap();
    world.update_army_size("carthage", "militia", 40).unwrap();

    let attacks = AttackManager::new(&world, &GameConfig::default());
    let report = attacks
        .attack_province("rome", "africa", &mut rng(11))
        .unwrap();

    assert_eq!(report.result, BattleResult::Victory);
    assert_eq!(report.defender_faction_id, "carthage");
    assert_eq!(report.rounds, 1);
    assert_eq!(world.army("rome", "knight").unwrap().size, 88);
    assert_eq!(world.army("carthage", "militia").unwrap().size, 0);

    let africa = world.province("africa").unwrap();
    assert_eq!(africa.faction_id, "rome");
    assert_eq!(africa.sovereign_faction_id, "carthage");
    assert!(africa.locked);
}

#[test]
fn conquered_province_cannot_be_attacked_again_this_turn() {
    let world = world();
    world.update_army_size("carthage", "knight", 0).unwrap();
    world.update_army_size("carthage", "militia", 0).unwrap();
    let attacks = AttackManager::new(&world, &GameConfig::default());

    assert!(attacks.attack_province("rome", "africa", &mut rng(1)).unwrap().is_victory());
    assert_eq!(reason(&world, "carthage", "africa"), InvalidTargetReason::Locked);
}

#[test]
fn empty_or_blank_ids_are_rejected() {
    let world = world();
    assert_eq!(reason(&world, "rome", ""), InvalidTargetReason::EmptyId);
    assert_eq!(reason(&world, "rome", "   "), InvalidTargetReason::EmptyId);
}

#[test]
fn unknown_province_is_rejected() {
    let world = world();
    assert_eq!(reason(&world, "rome", "atlantis"), InvalidTargetReason::UnknownProvince);
}

#[test]
fn locked_province_is_rejected() {
    let world = world();
    world.set_province_locked("africa", true).unwrap();
    assert_eq!(reason(&world, "rome", "africa"), InvalidTargetReason::Locked);
}

#[test]
fn province_out_of_reach_is_rejected() {
    let world = world();
    assert_eq!(reason(&world, "carthage", "latium"), InvalidTargetReason::NotBordering);
}

#[test]
fn own_province_is_rejected() {
    let world = world();
    assert_eq!(reason(&world, "rome", "etruria"), InvalidTargetReason::OwnProvince);
}

#[test]
fn gaia_province_is_rejected() {
    let world = world();
    assert_eq!(reason(&world, "rome", "wilds"), InvalidTargetReason::NeutralProvince);
}

#[test]
fn unknown_attacker_is_a_world_error() {
    let world = world();
    let attacks = AttackManager::new(&world, &GameConfig::default());
    let err = attacks
        .attack_province("persia", "africa", &mut rng(0))
        .unwrap_err();
    assert!(matches!(err, AttackError::World(WorldError::NotFound { .. })));
}

#[test]
fn battles_only_remove_troops() {
    for seed in 0..16 {
        let world = world();
        let before = world.faction_troops("rome") + world.faction_troops("carthage");
        let attacks = AttackManager::new(&world, &GameConfig::default());
        let report = attacks
            .attack_province("rome", "africa", &mut rng(seed))
            .unwrap();
        let rome = world.faction_troops("rome");
        let carthage = world.faction_troops("carthage");
        assert_eq!((report.attacker_troops, report.defender_troops), (rome, carthage));
        assert!(rome == 0 || carthage == 0 || report.rounds == GameConfig::default().max_battle_rounds);
        assert!(rome + carthage <= before);
        assert_eq!(report.is_victory(), rome > carthage);
    }
}

#[test]
fn concurrent_attacks_on_one_province_are_serialised() {
    let mut s = frontier();
    s.add_faction("greece");
    s.add_province("hellas", "greece");
    s.add_border("hellas", "africa");
    let world = s.load().unwrap();
    world.update_army_size("carthage", "knight", 0).unwrap();
    world.update_army_size("carthage", "militia", 1).unwrap();

    let attacks = AttackManager::new(&world, &GameConfig::default());
    let results: Vec<Result<_, AttackError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["rome", "greece"]
            .into_iter()
            .enumerate()
            .map(|(i, attacker)| {
                scope.spawn(move || attacks.attack_province(attacker, "africa", &mut rng(i as u64)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let victories = results
        .iter()
        .filter(|r| matches!(r, Ok(report) if report.is_victory()))
        .count();
    assert_eq!(victories, 1, "exactly one attacker takes the province");
    for result in &results {
        if let Err(err) = result {
            assert_eq!(err.invalid_reason(), Some(InvalidTargetReason::Locked));
        }
    }
    let owner = world.province("africa").unwrap().faction_id;
    assert!(owner == "rome" || owner == "greece");
}

#[test]
fn battles_sharing_a_faction_fight_one_after_the_other() {
    for seed in 0..8u64 {
        let mut s = frontier();
        s.add_faction("greece");
        s.add_province("hellas", "greece");
        s.add_border("etruria", "hellas");
        // Every clash costs each side exactly one troop.
        s.add_unit("legion", 1_000_000, 1);
        let world = s.load().unwrap();
        for (faction, legions) in [("rome", 5000), ("carthage", 4000), ("greece", 4000)] {
            world.update_army_size(faction, "knight", 0).unwrap();
            world.update_army_size(faction, "militia", 0).unwrap();
            world.update_army_size(faction, "legion", legions).unwrap();
        }

        let attacks = AttackManager::new(&world, &GameConfig::default());
        let reports = std::thread::scope(|scope| {
            let handles: Vec<_> = ["africa", "hellas"]
                .into_iter()
                .enumerate()
                .map(|(i, province)| {
                    scope.spawn(move || {
                        attacks
                            .attack_province("rome", province, &mut rng(seed * 2 + i as u64))
                            .unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        // Whichever battle runs first wins with 1000 left; the second is lost.
        let victories = reports.iter().filter(|r| r.is_victory()).count();
        assert_eq!(victories, 1, "seed {seed}: {reports:?}");
        assert_eq!(reports.iter().map(|r| r.rounds).sum::<u32>(), 5000);
        assert_eq!(world.faction_troops("rome"), 0);
        assert_eq!(
            world.faction_troops("carthage") + world.faction_troops("greece"),
            3000
        );
    }
}
