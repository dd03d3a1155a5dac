//! Uniform weighted-candidate list reduced by max.

use std::fmt;

use skirmish_core::constants::WEAPON_SWITCH_EPSILON;
use skirmish_core::enums::Weapon;

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponScores {
    entries: Vec<(Weapon, f32)>,
}

impl WeaponScores {
    pub fn new(entries: &[(Weapon, f32)]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }

    pub fn get(&self, weapon: Weapon) -> f32 {
        self.entries
            .iter()
            .find(|(w, _)| *w == weapon)
            .map(|(_, s)| *s)
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, weapon: Weapon, score: f32) {
        if let Some(entry) = self.entries.iter_mut().find(|(w, _)| *w == weapon) {
            entry.1 = score;
        }
    }

    pub fn scale(&mut self, weapon: Weapon, factor: f32) {
        self.set(weapon, self.get(weapon) * factor);
    }

    pub fn add(&mut self, weapon: Weapon, amount: f32) {
        self.set(weapon, self.get(weapon) + amount);
    }

    /// Highest positive score, first one wins ties.
    pub fn best(&self) -> Option<Weapon> {
        let mut best = None;
        let mut max_score = 0.0;
        for &(weapon, score) in &self.entries {
            if max_score < score {
                max_score = score;
                best = Some(weapon);
            }
        }
        best
    }

    /// Highest positive score after adding `random` to every score.
    ///
    /// When `pending` is among the candidates, any other weapon must differ
    /// from it by more than the switch epsilon to be picked.
    pub fn choose_with_hysteresis(&self, pending: Option<Weapon>, random: f32) -> Option<Weapon> {
        let pending_score = pending.and_then(|p| {
            self.entries
                .iter()
                .find(|(w, _)| *w == p)
                .map(|(_, s)| *s + random)
        });

        let mut chosen = None;
        let mut max_score = 0.0;
        for &(weapon, score) in &self.entries {
            let score = score + random;
            if max_score >= score {
                continue;
            }
            let accept = match pending_score {
                Some(pending_score) => {
                    Some(weapon) == pending || (score - pending_score).abs() > WEAPON_SWITCH_EPSILON
                }
                None => true,
            };
            if accept {
                max_score = score;
                chosen = Some(weapon);
            }
        }
        tracing::trace!(scores = %self, ?chosen, "weapon scores");
        chosen
    }
}

impl fmt::Display for WeaponScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (weapon, score)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={:.2}", weapon.name(), score)?;
        }
        Ok(())
    }
}
