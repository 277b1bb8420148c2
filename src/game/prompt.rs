use super::eligible::EligiblePlayers;
use super::faction::Faction;
use super::player::{Attribute, Role};
use super::{Game, GameState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The input the game is waiting for next.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum Prompt {
    /// The player must privately view their role card and acknowledge it.
    RevealRole { player: usize, card: RoleCard },
    /// The player must vote to eliminate one of the eligible players, or abstain.
    Vote { voter: usize, eligible: EligiblePlayers },
    /// The player must choose a target for their night action.
    NightAction {
        actor: usize,
        action: NightAction,
        eligible: EligiblePlayers,
    },
    /// A living player with no night action takes their turn at night all the same, and must
    /// acknowledge it.
    NightIdle { player: usize },
    GameOver { winner: Faction },
}

/// What a role does at night.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum NightAction {
    Investigate,
    Protect,
    Kill,
}

impl NightAction {
    /// The night action of the given role, if it has one.
    pub fn of(role: Role) -> Option<Self> {
        match role {
            Role::Detective => Some(NightAction::Investigate),
            Role::Doctor => Some(NightAction::Protect),
            Role::Mafia => Some(NightAction::Kill),
            Role::Villager => None,
        }
    }

    /// Whether the actor may choose themselves.
    pub fn can_target_self(&self) -> bool {
        matches!(self, NightAction::Protect)
    }
}

impl fmt::Display for NightAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NightAction::Investigate => "investigate",
            NightAction::Protect => "protect",
            NightAction::Kill => "kill",
        })
    }
}

/// What a single player learns about themselves during the role call.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoleCard {
    pub role: Role,
    pub attribute: Option<Attribute>,
    /// The other members of the mafia; empty for everyone else.
    pub allies: Vec<String>,
}

impl Game {
    /// Gets the input the game is waiting for.
    pub fn prompt(&self) -> Prompt {
        match &self.state {
            GameState::RoleCall { confirmations } => {
                // The role call ends as soon as the last confirmation arrives
                let player = confirmations.next().unwrap_or_default();
                Prompt::RevealRole { player, card: self.role_card(player) }
            }
            GameState::DayVoting { turn, .. } => Prompt::Vote {
                voter: *turn,
                eligible: self.eligible_players().exclude(*turn).make(),
            },
            GameState::NightActions { visits } => {
                let turn = visits.next().unwrap_or_default();
                let Some(action) = NightAction::of(self.players[turn].role) else {
                    return Prompt::NightIdle { player: turn };
                };
                let mut eligible = self.eligible_players();
                if !action.can_target_self() {
                    eligible = eligible.exclude(turn);
                }
                Prompt::NightAction { actor: turn, action, eligible: eligible.make() }
            }
            GameState::GameOver(winner) => Prompt::GameOver { winner: *winner },
        }
    }

    /// Gets the private role card of the given player.
    pub fn role_card(&self, player: usize) -> RoleCard {
        let me = &self.players[player];
        let allies = match me.role {
            Role::Mafia => self
                .eligible_players()
                .with_role(Role::Mafia)
                .exclude(player)
                .make()
                .names(self),
            _ => vec![],
        };
        RoleCard { role: me.role, attribute: me.attribute, allies }
    }
}
