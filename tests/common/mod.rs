#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::SmallRng;
use territory_sim::scenario::Scenario;

/// Four five-tile bands on a 20×5 map:
///
/// `latium` (rome, capital) | `etruria` (rome) | `africa` (carthage) | `wilds` (gaia)
///
/// Sampled borders join neighbouring bands. An extra declared border joins
/// `etruria` and `wilds`. Two unit types, 50 troops each.
pub fn frontier() -> Scenario {
    let mut s = Scenario::new("frontier", 20, 5);
    s.add_faction("rome");
    s.add_faction("carthage");
    s.add_gaia();
    s.add_unit("knight", 10, 5);
    s.add_unit("militia", 8, 3);
    s.province("latium", "rome").capital().area(0..5, 0..5);
    s.province("etruria", "rome").area(5..10, 0..5);
    s.province("africa", "carthage").area(10..15, 0..5);
    s.province("wilds", "gaia").area(15..20, 0..5);
    s.add_border("etruria", "wilds");
    s
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
