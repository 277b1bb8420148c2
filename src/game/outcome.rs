use serde::{Deserialize, Serialize};

/// The result of submitting a vote or a night action.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Outcome {
    Accepted,
    /// The input was dropped without changing the game.
    Discarded(Discard),
}

/// Why an input was dropped.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Discard {
    /// A player chose themselves.
    SelfTarget,
    /// No player has the chosen name.
    UnknownTarget,
    /// The chosen player is dead.
    DeadTarget,
    /// The acting player is dead.
    DeadActor,
    /// The acting player's role has no night action.
    NoNightAction,
}

impl Discard {
    /// True for actions the player was never entitled to take, as opposed to badly aimed ones.
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, Discard::DeadActor | Discard::NoNightAction)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Discard::SelfTarget => "you cannot choose yourself",
            Discard::UnknownTarget => "no player has that name",
            Discard::DeadTarget => "that player is not alive",
            Discard::DeadActor => "dead players cannot act",
            Discard::NoNightAction => "your role has no night action",
        }
    }
}
