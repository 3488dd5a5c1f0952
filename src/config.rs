use std::path::PathBuf;

/// Runtime configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Directory holding one sub-directory of JSON content per world.
    pub worlds_dir: PathBuf,
    /// RNG seed for AI turns and battle draws.
    pub seed: u64,
    /// Upper bound on clash rounds in a single battle. `u32::MAX` by
    /// default, which no real battle reaches: a clash either removes troops
    /// or the fight stops as a stalemate.
    pub max_battle_rounds: u32,
}

impl GameConfig {
    pub fn new(worlds_dir: impl Into<PathBuf>) -> Self {
        Self {
            worlds_dir: worlds_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            worlds_dir: PathBuf::from("worlds"),
            seed: 42,
            max_battle_rounds: u32::MAX,
        }
    }
}
