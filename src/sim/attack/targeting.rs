use rand::{Rng, RngCore};
use rayon::prelude::*;
use tracing::debug;

use super::AttackManager;
use crate::error::WorldError;
use crate::model::{HoldingKind, Province, ResourceKind};

// --- Scoring weights ---

/// Province is rightfully the attacker's.
pub const SOVEREIGNTY_SCORE: i32 = 30;
pub const CASTLE_SCORE: i32 = 30;
pub const CITY_SCORE: i32 = 20;
pub const TEMPLE_SCORE: i32 = 10;
pub const MILITARY_RESOURCE_SCORE: i32 = 10;
pub const ECONOMY_RESOURCE_SCORE: i32 = 5;
/// Per attacker province bordering the target.
pub const BORDER_PRESSURE_SCORE: i32 = 15;

/// Attractiveness of one candidate province.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetScore {
    pub province_id: String,
    pub score: i32,
}

impl AttackManager<'_> {
    /// Score every province `attacker_id` could attack this turn, sorted by
    /// province id. Gaia never attacks, so it gets no candidates.
    ///
    /// A candidate is unlocked, owned by another non-Gaia faction, and
    /// borders at least one province the attacker owns.
    pub fn score_targets(&self, attacker_id: &str) -> Result<Vec<TargetScore>, WorldError> {
        let attacker = self.world.faction(attacker_id)?;
        if attacker.is_gaia() {
            return Ok(Vec::new());
        }

        let owned: Vec<String> = self
            .world
            .faction_provinces(attacker_id)
            .into_iter()
            .map(|province| province.id)
            .collect();

        let candidates: Vec<Province> = self
            .world
            .provinces()
            .into_iter()
            .filter(|province| {
                province.faction_id != attacker_id
                    && !province.locked
                    && !self.world.is_gaia(&province.faction_id)
                    && owned
                        .iter()
                        .any(|own| self.world.province_borders_province(own, &province.id))
            })
            .collect();

        Ok(candidates
            .par_iter()
            .map(|province| TargetScore {
                province_id: province.id.clone(),
                score: self.score_province(attacker_id, &owned, province),
            })
            .collect())
    }

    /// Pick the highest scoring target for `attacker_id`. Ties are broken
    /// uniformly at random; `None` when there is nothing to attack.
    pub fn choose_province_to_attack(
        &self,
        attacker_id: &str,
        rng: &mut dyn RngCore,
    ) -> Result<Option<String>, WorldError> {
        let scores = self.score_targets(attacker_id)?;
        let Some(best) = scores.iter().map(|target| target.score).max() else {
            debug!(attacker_id, "no province to attack");
            return Ok(None);
        };

        let top: Vec<&TargetScore> = scores.iter().filter(|t| t.score == best).collect();
        let choice = &top[rng.random_range(0..top.len())];
        debug!(
            attacker_id,
            province_id = %choice.province_id,
            score = best,
            tied = top.len(),
            "chose province to attack"
        );
        Ok(Some(choice.province_id.clone()))
    }

    fn score_province(&self, attacker_id: &str, owned: &[String], province: &Province) -> i32 {
        let mut score = 0;

        if province.sovereign_faction_id == attacker_id {
            score += SOVEREIGNTY_SCORE;
        }

        for holding in self.world.province_holdings(&province.id) {
            score += holding_score(&holding.kind);
        }

        if let Some(resource) = province
            .resource_id
            .as_deref()
            .and_then(|id| self.world.resource(id).ok())
        {
            score += resource_score(&resource.kind);
        }

        let pressure = owned
            .iter()
            .filter(|own| self.world.province_borders_province(own, &province.id))
            .count();
        score += BORDER_PRESSURE_SCORE * pressure as i32;

        // Friendly factions are less attractive, hated ones more.
        score - self
            .world
            .relation_value(attacker_id, &province.faction_id)
            .unwrap_or(0)
    }
}

fn holding_score(kind: &HoldingKind) -> i32 {
    match kind {
        HoldingKind::Castle => CASTLE_SCORE,
        HoldingKind::City => CITY_SCORE,
        HoldingKind::Temple => TEMPLE_SCORE,
        HoldingKind::Custom(_) => 0,
    }
}

fn resource_score(kind: &ResourceKind) -> i32 {
    match kind {
        ResourceKind::Military => MILITARY_RESOURCE_SCORE,
        ResourceKind::Economy => ECONOMY_RESOURCE_SCORE,
        ResourceKind::Custom(_) => 0,
    }
}
