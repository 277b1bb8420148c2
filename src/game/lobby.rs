use super::player::normalize_name;
use super::{Game, GameOptions};
use crate::error::GameError;

/// A table of a fixed size that players join before the roles are dealt.
#[derive(Clone, Debug)]
pub struct Lobby {
    options: GameOptions,
    num_players: usize,
    players: Vec<String>,
}

impl Lobby {
    /// Opens a lobby for exactly `num_players` players.
    pub fn new(options: GameOptions, num_players: usize) -> Result<Self, GameError> {
        options.validate()?;
        options.role_distribution(num_players)?;
        Ok(Self { options, num_players, players: vec![] })
    }

    /// Seats a player, returning their index. Names are trimmed and compared case-insensitively.
    pub fn add_player(&mut self, name: &str) -> Result<usize, GameError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if self.players.contains(&name) {
            return Err(GameError::DuplicatePlayerName(name));
        }
        if self.is_full() {
            return Err(GameError::LobbyFull);
        }
        self.players.push(name);
        Ok(self.players.len() - 1)
    }

    /// The names of the seated players, in seat order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn is_full(&self) -> bool {
        self.players.len() == self.num_players
    }

    /// Deals the roles and starts the game.
    pub fn start(&self, seed: u64) -> Result<Game, GameError> {
        if !self.is_full() {
            return Err(GameError::LobbyNotFull);
        }
        Game::new(self.options, &self.players, seed)
    }
}
