use crate::game::event::GameEvent;
use crate::game::player::Role;
use crate::game::prompt::{NightAction, RoleCard};
use crate::game::Game;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;


/// How cleverly a computer-controlled player plays.
#[derive(Clone, Copy, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum Difficulty {
    /// Chooses uniformly at random.
    Easy,
    /// Acts on what it privately knows.
    Normal,
    /// As `Normal`, but the mafia coordinate on a single victim and the doctor guards itself.
    Hard,
}

/// A computer-controlled seat. Only ever learns what its own player is told.
#[derive(Clone, Debug)]
pub struct Bot {
    seat: usize,
    difficulty: Difficulty,
    role: Option<Role>,
    allies: Vec<usize>,
    known_mafia: Vec<usize>,
    known_town: Vec<usize>,
    suspects: Vec<usize>,
    rng: ChaCha8Rng,
}

impl Bot {
    pub fn new(seat: usize, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            seat,
            difficulty,
            role: None,
            allies: vec![],
            known_mafia: vec![],
            known_town: vec![],
            suspects: vec![],
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Forgets everything learned in the previous game.
    pub fn reset(&mut self) {
        self.role = None;
        self.allies.clear();
        self.known_mafia.clear();
        self.known_town.clear();
        self.suspects.clear();
    }

    /// Called when the bot's player is shown their role card.
    pub fn learn_role(&mut self, game: &Game, card: &RoleCard) {
        self.role = Some(card.role);
        self.allies = card
            .allies
            .iter()
            .filter_map(|name| game.find_player(name).ok())
            .collect();
    }

    /// Called with each event addressed to the bot's player.
    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Investigation { detective, target, role } if detective == self.seat => {
                if role == Role::Mafia {
                    self.known_mafia.push(target);
                } else {
                    self.known_town.push(target);
                }
            }
            GameEvent::IntuitionHint { villager, target, appears_mafia: true } if villager == self.seat => {
                self.suspects.push(target);
            }
            _ => {}
        }
    }

    /// Chooses who to vote for during the day; `None` abstains.
    pub fn choose_vote(&mut self, eligible: &[usize]) -> Option<usize> {
        if self.difficulty == Difficulty::Easy {
            return eligible.choose(&mut self.rng).copied();
        }
        if self.role == Some(Role::Mafia) {
            return self.choose_victim(eligible);
        }
        let known = first_of(&self.known_mafia, eligible);
        if known.is_some() {
            return known;
        }
        let suspects = only(eligible, |p| self.suspects.contains(p) && !self.known_town.contains(p));
        if let Some(suspect) = suspects.choose(&mut self.rng) {
            return Some(*suspect);
        }
        let unknown = only(eligible, |p| !self.known_town.contains(p));
        unknown
            .choose(&mut self.rng)
            .or_else(|| eligible.choose(&mut self.rng))
            .copied()
    }

    /// Chooses the target of the bot's night action.
    pub fn choose_night_target(&mut self, action: NightAction, eligible: &[usize]) -> Option<usize> {
        if self.difficulty == Difficulty::Easy {
            return eligible.choose(&mut self.rng).copied();
        }
        match action {
            NightAction::Kill => self.choose_victim(eligible),
            NightAction::Protect if self.difficulty == Difficulty::Hard && eligible.contains(&self.seat) => {
                Some(self.seat)
            }
            NightAction::Protect => eligible.choose(&mut self.rng).copied(),
            NightAction::Investigate => {
                let unknown = only(eligible, |p| {
                    !self.known_mafia.contains(p) && !self.known_town.contains(p)
                });
                unknown
                    .choose(&mut self.rng)
                    .or_else(|| eligible.choose(&mut self.rng))
                    .copied()
            }
        }
    }

    /// A mafia member's pick among the non-mafia.
    fn choose_victim(&mut self, eligible: &[usize]) -> Option<usize> {
        let victims = only(eligible, |p| !self.allies.contains(p));
        let pick = match self.difficulty {
            Difficulty::Hard => victims.first(),
            _ => victims.choose(&mut self.rng),
        };
        pick.or_else(|| eligible.choose(&mut self.rng)).copied()
    }
}

fn only(players: &[usize], keep: impl Fn(&usize) -> bool) -> Vec<usize> {
    players.iter().copied().filter(|p| keep(p)).collect()
}

fn first_of(wanted: &[usize], eligible: &[usize]) -> Option<usize> {
    wanted.iter().copied().find(|p| eligible.contains(p))
}
