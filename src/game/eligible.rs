use super::{player::Role, Game};
use serde::{Deserialize, Serialize};

/// The set of players that may be chosen for a vote or a night action.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct EligiblePlayers {
    eligible: Vec<bool>,
}

impl EligiblePlayers {
    pub fn includes(&self, player: usize) -> bool {
        self.eligible.get(player).copied().unwrap_or(false)
    }

    pub fn indices(&self) -> Vec<usize> {
        self.eligible
            .iter()
            .enumerate()
            .filter(|(_, e)| **e)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn names(&self, game: &Game) -> Vec<String> {
        game.players
            .iter()
            .enumerate()
            .filter(|(i, _)| self.includes(*i))
            .map(|(_, p)| p.name.clone())
            .collect()
    }
}

pub struct EligiblePlayersBuilder<'a> {
    game: &'a Game,
    eligible: Vec<bool>,
}

impl Game {
    /// Starts building a set of eligible players, initially all living players.
    pub fn eligible_players(&self) -> EligiblePlayersBuilder<'_> {
        EligiblePlayersBuilder {
            game: self,
            eligible: self.players.iter().map(|p| p.alive()).collect(),
        }
    }
}

impl<'a> EligiblePlayersBuilder<'a> {
    pub fn exclude(mut self, player: usize) -> Self {
        if let Some(e) = self.eligible.get_mut(player) {
            *e = false;
        }
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= player.role == role;
        }
        self
    }

    pub fn make(self) -> EligiblePlayers {
        EligiblePlayers { eligible: self.eligible }
    }
}
