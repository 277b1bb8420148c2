use super::player::RoleDistribution;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The probability that an intuition hint tells the truth.
pub const DEFAULT_INTUITION_ACCURACY: f64 = 0.8;

/// Options for customising a game of Mafia.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct GameOptions {
    /// Probability, between 0 and 1, that a villager's intuition hint is correct.
    pub intuition_accuracy: f64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { intuition_accuracy: DEFAULT_INTUITION_ACCURACY }
    }
}

impl GameOptions {
    /// Returns a `GameError` if any option is out of range.
    pub fn validate(&self) -> Result<(), GameError> {
        if (0.0..=1.0).contains(&self.intuition_accuracy) {
            Ok(())
        } else {
            Err(GameError::InvalidGameOptions)
        }
    }

    /// Gets the role distribution for the given number of players.
    /// Returns a `GameError` if the player count is not valid.
    pub fn role_distribution(&self, num_players: usize) -> Result<RoleDistribution, GameError> {
        RoleDistribution::new(num_players)
    }
}
