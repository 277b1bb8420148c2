use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game] or [Lobby].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs at least one player, got {0}")]
    InvalidPlayerCount(usize),
    #[error("role quotas ({special}) exceed the player count ({players})")]
    RoleQuotaExceeded { players: usize, special: usize },
    #[error("invalid combination of game options")]
    InvalidGameOptions,
    #[error("player names cannot be empty")]
    EmptyPlayerName,
    #[error("a player named {0:?} has already joined")]
    DuplicatePlayerName(String),
    #[error("the lobby is already full")]
    LobbyFull,
    #[error("the lobby still has empty seats")]
    LobbyNotFull,
    #[error("no player exists with the given name")]
    PlayerNotFound,
    #[error("invalid player index")]
    InvalidPlayerIndex,
    #[error("it is not this player's turn")]
    NotPlayersTurn,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
}

impl GameError {
    /// Returns true for errors raised while setting a game up, before any role is assigned.
    pub fn is_configuration(&self) -> bool {
        use GameError::*;
        matches!(
            self,
            InvalidPlayerCount(_)
                | RoleQuotaExceeded { .. }
                | InvalidGameOptions
                | EmptyPlayerName
                | DuplicatePlayerName(_)
                | LobbyFull
                | LobbyNotFull
        )
    }
}
