use super::player::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of the game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Faction {
    Village,
    Mafia,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Faction::Village => "Village",
            Faction::Mafia => "Mafia",
        })
    }
}

/// Live counts of the roles the win condition depends on.
///
/// Detectives are not tracked here; they are found by querying the roster.
#[derive(Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Debug)]
pub struct FactionCounts {
    pub mafia: usize,
    pub doctors: usize,
    pub villagers: usize,
}

impl FactionCounts {
    /// Records a player of the given role joining the living.
    pub fn add(&mut self, role: Role) {
        if let Some(count) = self.count_mut(role) {
            *count += 1;
        }
    }

    /// Records the death of a player of the given role.
    pub fn remove(&mut self, role: Role) {
        if let Some(count) = self.count_mut(role) {
            *count = count.saturating_sub(1);
        }
    }

    fn count_mut(&mut self, role: Role) -> Option<&mut usize> {
        match role {
            Role::Mafia => Some(&mut self.mafia),
            Role::Doctor => Some(&mut self.doctors),
            Role::Villager => Some(&mut self.villagers),
            Role::Detective => None,
        }
    }

    /// Evaluates the win condition.
    ///
    /// The village wins once every mafia member is dead. The mafia wins once they are at least as
    /// numerous as the living villagers and doctors; living detectives do not count against them.
    /// The village check is made first.
    pub fn winner(&self) -> Option<Faction> {
        if self.mafia == 0 {
            Some(Faction::Village)
        } else if self.mafia >= self.villagers + self.doctors {
            Some(Faction::Mafia)
        } else {
            None
        }
    }
}
