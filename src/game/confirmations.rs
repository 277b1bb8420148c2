use serde::{Deserialize, Serialize};

/// Tracks which players have taken their private turn, such that each player must confirm in
/// seat order before the next one is shown anything. Used for the role call and for the night.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Confirmations {
    state: Vec<bool>,
}

impl Confirmations {
    /// Creates a new `Confirmations`, where `num_players` is the number of confirmations needed to proceed.
    pub fn new(num_players: usize) -> Self {
        Self { state: vec![false; num_players] }
    }

    /// Creates a new `Confirmations` where only the players marked `true` need to confirm.
    pub fn only(needed: impl IntoIterator<Item = bool>) -> Self {
        Self { state: needed.into_iter().map(|n| !n).collect() }
    }

    /// The first player who has yet to confirm.
    pub fn next(&self) -> Option<usize> {
        self.state.iter().position(|c| !*c)
    }

    /// Records the acknowledgement of a player, and returns `true` iff the game can now proceed.
    pub fn confirm(&mut self, player_idx: usize) -> bool {
        self.state[player_idx] = true;
        self.can_proceed()
    }

    /// Returns `true` iff the game can now proceed.
    pub fn can_proceed(&self) -> bool {
        self.state.iter().all(|c| *c)
    }
}
