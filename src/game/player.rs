use super::faction::Faction;
use super::options::GameOptions;
use crate::error::GameError;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::repeat;

/// A game player.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub role: Role,
    pub status: Status,
    pub attribute: Option<Attribute>,
    /// Whether the doctor is protecting this player tonight.
    pub protected: bool,
    /// The player this player chose as the target of their night action.
    pub night_target: Option<usize>,
    /// The player this player investigated tonight (detectives only).
    pub investigated: Option<usize>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Mafia,
    Doctor,
    Detective,
    Villager,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Status {
    Alive,
    Dead,
}

/// A passive trait that some villagers are dealt along with their role.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Attribute {
    /// Receives a hint about another living player's allegiance each night.
    Intuition,
    /// Learns each night whether the mafia targeted them.
    SuspicionRadar,
}

/// The villager attributes that can be handed out; each is dealt at most once.
pub const ATTRIBUTE_POOL: [Attribute; 2] = [Attribute::Intuition, Attribute::SuspicionRadar];

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Mafia => "Mafia",
            Role::Doctor => "Doctor",
            Role::Detective => "Detective",
            Role::Villager => "Villager",
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Intuition => "Intuition",
            Attribute::SuspicionRadar => "Suspicion Radar",
        })
    }
}

impl Role {
    pub fn faction(&self) -> Faction {
        match self {
            Role::Mafia => Faction::Mafia,
            Role::Doctor | Role::Detective | Role::Villager => Faction::Village,
        }
    }
}

impl Player {
    pub fn new(name: String, role: Role) -> Self {
        Self {
            name,
            role,
            status: Status::Alive,
            attribute: None,
            protected: false,
            night_target: None,
            investigated: None,
        }
    }

    pub fn alive(&self) -> bool {
        self.status == Status::Alive
    }

    /// Clears everything recorded during a night.
    pub fn reset_night_actions(&mut self) {
        self.protected = false;
        self.night_target = None;
        self.investigated = None;
    }
}

/// Canonicalises a player name; names are compared case-insensitively.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The number of players dealt each role.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoleDistribution {
    pub mafia: usize,
    pub doctors: usize,
    pub detectives: usize,
    pub villagers: usize,
}

impl RoleDistribution {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if num_players < 1 {
            return Err(GameError::InvalidPlayerCount(num_players));
        }

        let mafia = (num_players / 3).max(1);
        let doctors = usize::from(num_players >= 4);
        let detectives = usize::from(num_players >= 5);
        let special = mafia + doctors + detectives;
        let villagers = num_players
            .checked_sub(special)
            .ok_or(GameError::RoleQuotaExceeded { players: num_players, special })?;

        Ok(Self { mafia, doctors, detectives, villagers })
    }

    /// The role tokens in a fixed, unshuffled order.
    fn tokens(&self) -> Vec<Role> {
        repeat(Role::Mafia)
            .take(self.mafia)
            .chain(repeat(Role::Doctor).take(self.doctors))
            .chain(repeat(Role::Detective).take(self.detectives))
            .chain(repeat(Role::Villager).take(self.villagers))
            .collect()
    }
}

/// Deals a shuffled role to each of `num_players` seats.
pub fn assign_roles(
    num_players: usize,
    opts: &GameOptions,
    rng: &mut impl rand::Rng,
) -> Result<Vec<Role>, GameError> {
    let mut roles = opts.role_distribution(num_players)?.tokens();
    roles.shuffle(rng);
    Ok(roles)
}

/// Hands out the villager attributes in seat order until the pool runs dry.
pub fn assign_attributes(roles: &[Role]) -> Vec<Option<Attribute>> {
    let mut pool = ATTRIBUTE_POOL.iter().copied();
    roles
        .iter()
        .map(|role| match role {
            Role::Villager => pool.next(),
            _ => None,
        })
        .collect()
}
