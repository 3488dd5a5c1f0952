use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use super::attack::{AttackManager, BattleReport};
use super::world_manager::WorldManager;
use crate::config::GameConfig;
use crate::error::{AttackError, WorldError};

/// What happened during one `end_turn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The turn that was closed.
    pub turn: u32,
    pub battles: Vec<BattleReport>,
    /// `(faction_id, income)` per faction that was paid, sorted by id.
    pub income: Vec<(String, i64)>,
    /// Factions that lost their last province this turn.
    pub eliminated: Vec<String>,
    pub unlocked: usize,
}

/// Close the current turn.
///
/// 1. Every alive AI faction with at least `min_troops_per_attack` troops
///    picks a target and attacks it, in faction id order. The player
///    faction, if any, is skipped.
/// 2. Alive factions collect `base_province_income` per owned province.
/// 3. Alive factions that own nothing are marked dead.
/// 4. Province locks are cleared and the turn counter moves on.
///
/// An attack target the AI could not take is logged and skipped. Any other
/// error stops the turn where it happened: battles already fought stay
/// applied, but no income is paid, locks stay set and the turn counter does
/// not move. Loading validates every cross reference, so such an error
/// means a broken world rather than a game outcome.
pub fn end_turn(
    attacks: &AttackManager<'_>,
    player_faction_id: Option<&str>,
    rng: &mut dyn RngCore,
) -> Result<TurnReport, WorldError> {
    let world = attacks.world();
    let turn = world.current_turn();
    let span = info_span!("end_turn", turn);
    let _enter = span.enter();

    let mut report = TurnReport {
        turn,
        ..TurnReport::default()
    };

    let min_troops = u64::from(world.world().min_troops_per_attack);
    for faction in world.factions() {
        if !faction.alive || faction.is_gaia() || Some(faction.id.as_str()) == player_faction_id {
            continue;
        }
        let troops = world.faction_troops(&faction.id);
        if troops == 0 || troops < min_troops {
            continue;
        }
        let Some(target) = attacks.choose_province_to_attack(&faction.id, rng)? else {
            continue;
        };
        match attacks.attack_province(&faction.id, &target, rng) {
            Ok(battle) => report.battles.push(battle),
            Err(AttackError::InvalidTarget { province_id, reason }) => {
                warn!(faction_id = %faction.id, province_id = %province_id, %reason, "skipped attack");
            }
            Err(AttackError::World(err)) => return Err(err),
        }
    }

    let per_province = world.world().base_province_income;
    for faction in world.factions() {
        if !faction.alive || faction.is_gaia() {
            continue;
        }
        let owned = world.faction_provinces(&faction.id).len();
        if owned == 0 {
            world.set_faction_alive(&faction.id, false)?;
            report.eliminated.push(faction.id);
            continue;
        }
        let income = per_province.saturating_mul(owned as i64);
        world.adjust_faction_wealth(&faction.id, income)?;
        report.income.push((faction.id, income));
    }

    report.unlocked = world.unlock_all_provinces();
    let next = world.advance_turn();

    info!(
        battles = report.battles.len(),
        eliminated = report.eliminated.len(),
        next_turn = next,
        "turn ended"
    );
    Ok(report)
}

/// Play `turns` AI-only turns with an RNG seeded from `config.seed`, so the
/// same world and seed always produce the same history.
pub fn run_turns(
    world: &WorldManager,
    config: &GameConfig,
    turns: u32,
) -> Result<Vec<TurnReport>, WorldError> {
    let attacks = AttackManager::new(world, config);
    let mut rng = SmallRng::seed_from_u64(config.seed);
    (0..turns)
        .map(|_| end_turn(&attacks, None, &mut rng))
        .collect()
}
