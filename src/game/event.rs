use super::faction::Faction;
use super::player::Role;
use serde::{Deserialize, Serialize};

/// Something that happened in the game, to be rendered by the host.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(tag = "type")]
pub enum GameEvent {
    DayStarted { day: u32 },
    /// The public result of a day vote: the count per target and who, if anyone, was eliminated.
    VoteResult {
        counts: Vec<(usize, usize)>,
        eliminated: Option<usize>,
    },
    Eliminated { player: usize },
    NightStarted { night: u32 },
    /// Private to the living mafia: who the mafia decided to kill.
    MafiaTarget { mafia: Vec<usize>, target: usize },
    /// Private to the detective.
    Investigation {
        detective: usize,
        target: usize,
        role: Role,
    },
    /// The public outcome of the night.
    NightOutcome { target: Option<usize>, survived: bool },
    /// Private to a villager with the suspicion radar: whether any mafia member chose them tonight.
    SuspicionRadar { villager: usize, targeted: bool },
    /// Private to a villager with intuition; the hint is only correct with some probability.
    IntuitionHint {
        villager: usize,
        target: usize,
        appears_mafia: bool,
    },
    GameOver { winner: Faction },
}

/// Who is allowed to see an event.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Audience {
    Everyone,
    Players(Vec<usize>),
}

impl Audience {
    pub fn includes(&self, player: usize) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Players(players) => players.contains(&player),
        }
    }
}

impl GameEvent {
    pub fn audience(&self) -> Audience {
        use GameEvent::*;
        match self {
            MafiaTarget { mafia, .. } => Audience::Players(mafia.clone()),
            Investigation { detective, .. } => Audience::Players(vec![*detective]),
            SuspicionRadar { villager, .. } | IntuitionHint { villager, .. } => {
                Audience::Players(vec![*villager])
            }
            DayStarted { .. }
            | VoteResult { .. }
            | Eliminated { .. }
            | NightStarted { .. }
            | NightOutcome { .. }
            | GameOver { .. } => Audience::Everyone,
        }
    }

    pub fn is_public(&self) -> bool {
        self.audience() == Audience::Everyone
    }
}
