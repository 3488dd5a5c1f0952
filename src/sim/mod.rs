pub mod attack;
mod turn;
mod world_manager;

pub use attack::{AttackManager, BattleReport, BattleResult, TargetScore};
pub use turn::{TurnReport, end_turn, run_turns};
pub use world_manager::WorldManager;
