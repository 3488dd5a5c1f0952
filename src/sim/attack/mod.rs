//! AI target selection and battle resolution.

mod battle;
mod targeting;

pub use battle::{BattleReport, BattleResult, clash};
pub use targeting::{
    BORDER_PRESSURE_SCORE, CASTLE_SCORE, CITY_SCORE, ECONOMY_RESOURCE_SCORE,
    MILITARY_RESOURCE_SCORE, SOVEREIGNTY_SCORE, TEMPLE_SCORE, TargetScore,
};

use crate::config::GameConfig;
use crate::sim::WorldManager;

/// Decides what to attack and fights battles against a shared world.
#[derive(Debug, Clone, Copy)]
pub struct AttackManager<'w> {
    world: &'w WorldManager,
    max_battle_rounds: u32,
}

impl<'w> AttackManager<'w> {
    pub fn new(world: &'w WorldManager, config: &GameConfig) -> Self {
        Self {
            world,
            max_battle_rounds: config.max_battle_rounds,
        }
    }

    pub fn world(&self) -> &'w WorldManager {
        self.world
    }

    pub fn max_battle_rounds(&self) -> u32 {
        self.max_battle_rounds
    }
}
