use std::collections::HashMap;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::AttackManager;
use crate::error::{AttackError, InvalidTargetReason, WorldError};
use crate::model::{Army, EntityKind, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BattleResult {
    Victory,
    /// Includes the case where both sides are wiped out or end level.
    Defeat,
}

string_enum!(BattleResult {
    Victory => "victory",
    Defeat => "defeat",
});

/// Outcome of one `attack_province` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub province_id: String,
    pub attacker_faction_id: String,
    pub defender_faction_id: String,
    pub result: BattleResult,
    pub rounds: u32,
    /// Troops left across all of the attacker's armies.
    pub attacker_troops: u64,
    pub defender_troops: u64,
}

impl BattleReport {
    pub fn is_victory(&self) -> bool {
        self.result == BattleResult::Victory
    }
}

/// Survivors of a single clash between `attacker_size` troops of `attacker`
/// and `defender_size` troops of `defender`, as `(attacker_left, defender_left)`.
///
/// Each side loses the other side's total power, measured in its own health
/// per troop. Division truncates toward zero and results never go below zero.
pub fn clash(attacker_size: u32, attacker: &Unit, defender_size: u32, defender: &Unit) -> (u32, u32) {
    (
        troops_left(attacker_size, attacker.health, defender.power, defender_size),
        troops_left(defender_size, defender.health, attacker.power, attacker_size),
    )
}

fn troops_left(size: u32, health: u32, enemy_power: u32, enemy_size: u32) -> u32 {
    if health == 0 {
        return 0;
    }
    let health = i64::from(health);
    let left = (health * i64::from(size) - i64::from(enemy_power) * i64::from(enemy_size)) / health;
    // Bounded by `size`, so the cast is lossless.
    left.clamp(0, i64::from(size)) as u32
}

fn total(armies: &[Army]) -> u64 {
    armies.iter().map(|army| u64::from(army.size)).sum()
}

/// Index of a uniformly drawn army with troops left.
fn pick_standing(armies: &[Army], rng: &mut dyn RngCore) -> Option<usize> {
    let standing: Vec<usize> = armies
        .iter()
        .enumerate()
        .filter(|(_, army)| army.size > 0)
        .map(|(index, _)| index)
        .collect();
    if standing.is_empty() {
        return None;
    }
    Some(standing[rng.random_range(0..standing.len())])
}

struct BattleTally {
    rounds: u32,
    attacker_troops: u64,
    defender_troops: u64,
}

impl AttackManager<'_> {
    /// Attack `province_id` with every army of `attacker_id`.
    ///
    /// The target must exist, be unlocked, border the attacker, belong to
    /// someone else and not belong to Gaia; otherwise `InvalidTarget` is
    /// returned and nothing changes. The battle runs rounds of single clashes
    /// between randomly drawn armies until one side is out of troops. The
    /// attacker wins only with strictly more troops left; a win transfers the
    /// province and locks it until the end of the turn.
    ///
    /// The province stays guarded for the whole battle, so concurrent attacks
    /// on it are serialised.
    pub fn attack_province(
        &self,
        attacker_id: &str,
        province_id: &str,
        rng: &mut dyn RngCore,
    ) -> Result<BattleReport, AttackError> {
        use InvalidTargetReason::*;

        if province_id.trim().is_empty() {
            return Err(AttackError::invalid(province_id, EmptyId));
        }
        self.world.faction(attacker_id)?;

        let guard = self
            .world
            .province_guard(province_id)
            .map_err(|_| AttackError::invalid(province_id, UnknownProvince))?;
        let _lock = guard.lock();

        let province = self
            .world
            .province(province_id)
            .map_err(|_| AttackError::invalid(province_id, UnknownProvince))?;
        if province.locked {
            return Err(AttackError::invalid(province_id, Locked));
        }
        if !self.world.faction_borders_province(attacker_id, province_id) {
            return Err(AttackError::invalid(province_id, NotBordering));
        }
        let defender_id = province.faction_id;
        if defender_id == attacker_id {
            return Err(AttackError::invalid(province_id, OwnProvince));
        }
        if self.world.is_gaia(&defender_id) {
            return Err(AttackError::invalid(province_id, NeutralProvince));
        }

        let tally = self.fight(attacker_id, &defender_id, rng)?;
        let result = if tally.attacker_troops > tally.defender_troops {
            BattleResult::Victory
        } else {
            BattleResult::Defeat
        };

        if result == BattleResult::Victory {
            self.world.transfer_province(province_id, attacker_id)?;
            self.world.set_province_locked(province_id, true)?;
        }

        info!(
            attacker_id,
            defender_id = %defender_id,
            province_id,
            %result,
            rounds = tally.rounds,
            attacker_troops = tally.attacker_troops,
            defender_troops = tally.defender_troops,
            "battle resolved"
        );

        Ok(BattleReport {
            province_id: province_id.to_string(),
            attacker_faction_id: attacker_id.to_string(),
            defender_faction_id: defender_id,
            result,
            rounds: tally.rounds,
            attacker_troops: tally.attacker_troops,
            defender_troops: tally.defender_troops,
        })
    }

    /// Run clash rounds until one side has no troops left. Army sizes are
    /// written back after every round.
    ///
    /// Both factions stay guarded for the whole fight, so two battles that
    /// share a faction run one after the other on the same armies. Stops
    /// early when no pairing of standing armies can change anything (both
    /// sides powerless) or after `max_battle_rounds`.
    fn fight(
        &self,
        attacker_id: &str,
        defender_id: &str,
        rng: &mut dyn RngCore,
    ) -> Result<BattleTally, WorldError> {
        let guards = self.world.faction_guards(&[attacker_id, defender_id])?;
        let _locks: Vec<_> = guards.iter().map(|guard| guard.lock()).collect();

        let units: HashMap<String, Unit> = self
            .world
            .units()
            .into_iter()
            .map(|unit| (unit.id.clone(), unit))
            .collect();
        let mut attackers = self.world.faction_armies(attacker_id);
        let mut defenders = self.world.faction_armies(defender_id);

        let mut rounds = 0;
        while total(&attackers) > 0 && total(&defenders) > 0 {
            if rounds >= self.max_battle_rounds {
                warn!(attacker_id, defender_id, rounds, "battle hit the round limit");
                break;
            }
            if !can_progress(&attackers, &defenders, &units) {
                warn!(attacker_id, defender_id, rounds, "battle stalemated");
                break;
            }

            let (Some(a), Some(d)) = (pick_standing(&attackers, rng), pick_standing(&defenders, rng))
            else {
                break;
            };
            let attacker_unit = unit_of(&units, &attackers[a])?;
            let defender_unit = unit_of(&units, &defenders[d])?;
            let (a_left, d_left) = clash(
                attackers[a].size,
                attacker_unit,
                defenders[d].size,
                defender_unit,
            );
            trace!(
                attacker_unit = %attacker_unit.id,
                defender_unit = %defender_unit.id,
                before = ?(attackers[a].size, defenders[d].size),
                after = ?(a_left, d_left),
                "clash"
            );

            attackers[a].size = a_left;
            defenders[d].size = d_left;
            self.world.update_army_size(attacker_id, &attackers[a].unit_id, a_left)?;
            self.world.update_army_size(defender_id, &defenders[d].unit_id, d_left)?;
            rounds += 1;
        }

        debug!(attacker_id, defender_id, rounds, "fight over");
        Ok(BattleTally {
            rounds,
            attacker_troops: total(&attackers),
            defender_troops: total(&defenders),
        })
    }
}

fn unit_of<'u>(units: &'u HashMap<String, Unit>, army: &Army) -> Result<&'u Unit, WorldError> {
    units
        .get(&army.unit_id)
        .ok_or_else(|| WorldError::not_found(EntityKind::Unit, army.unit_id.as_str()))
}

/// Whether some clash between standing armies would change a size.
fn can_progress(attackers: &[Army], defenders: &[Army], units: &HashMap<String, Unit>) -> bool {
    attackers.iter().filter(|a| a.size > 0).any(|a| {
        defenders.iter().filter(|d| d.size > 0).any(|d| {
            match (units.get(&a.unit_id), units.get(&d.unit_id)) {
                (Some(au), Some(du)) => clash(a.size, au, d.size, du) != (a.size, d.size),
                // Unknown units surface as an error on the next clash.
                _ => true,
            }
        })
    })
}
