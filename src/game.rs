use self::confirmations::Confirmations;
use self::event::GameEvent;
use self::faction::{Faction, FactionCounts};
pub use self::lobby::Lobby;
pub use self::options::GameOptions;
use self::outcome::{Discard, Outcome};
use self::player::{assign_attributes, assign_roles, normalize_name, Player, Status};
use self::prompt::NightAction;
use self::votes::{Ballot, Votes};
use crate::error::GameError;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

mod confirmations;
pub mod eligible;
pub mod event;
pub mod faction;
mod lobby;
mod night;
pub mod options;
pub mod outcome;
pub mod player;
pub mod prompt;
mod test;
pub mod votes;

/// A game of Mafia.
#[derive(Clone, Debug)]
pub struct Game {
    opts: GameOptions,
    players: Vec<Player>,
    counts: FactionCounts,
    state: GameState,
    day: u32,
    night: u32,
    events: Vec<GameEvent>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Serialize, Deserialize, Debug)]
enum GameState {
    /// Each player privately views their role, one at a time.
    RoleCall { confirmations: Confirmations },
    DayVoting {
        /// The player whose vote is awaited.
        turn: usize,
        votes: Votes,
    },
    /// Every living player takes a private turn in seat order. Players with a night action choose
    /// a target; everyone else acknowledges.
    NightActions { visits: Confirmations },
    GameOver(Faction),
}

impl Game {
    /// Creates a new game of Mafia, dealing a role to each named player.
    pub fn new(opts: GameOptions, player_names: &[String], seed: u64) -> Result<Self, GameError> {
        opts.validate()?;
        let num_players = player_names.len();
        let player_names = check_names(player_names)?;

        // Generate the players and their roles
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let roles = assign_roles(num_players, &opts, &mut rng)?;
        let attributes = assign_attributes(&roles);
        let mut counts = FactionCounts::default();
        let players = player_names
            .into_iter()
            .zip(roles.into_iter().zip(attributes))
            .map(|(name, (role, attribute))| {
                counts.add(role);
                Player { attribute, ..Player::new(name, role) }
            })
            .collect::<Vec<_>>();

        log::debug!("dealt roles to {} players", num_players);

        Ok(Game {
            opts,
            players,
            counts,
            state: GameState::RoleCall {
                confirmations: Confirmations::new(num_players),
            },
            day: 0,
            night: 0,
            events: vec![],
            rng,
        })
    }

    /// Creates a fresh game with the same options and players, and newly dealt roles.
    pub fn restart(&mut self) -> Result<Self, GameError> {
        let names = self.player_names().map(str::to_string).collect::<Vec<_>>();
        Game::new(self.opts, &names, self.rng.next_u64())
    }

    /// Gets the player names.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.players.iter().map(|p| &p.name[..])
    }

    /// Gets the name of the given player.
    pub fn player_name(&self, player: usize) -> &str {
        &self.players[player].name
    }

    /// Gets the players, in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Finds a player with the given name, ignoring case.
    pub fn find_player(&self, name: &str) -> Result<usize, GameError> {
        let name = normalize_name(name);
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Takes the events that have happened since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Called when a player has privately viewed their role.
    pub fn acknowledge_role(&mut self, player: usize) -> Result<(), GameError> {
        self.check_player_index(player)?;
        let GameState::RoleCall { confirmations } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        if confirmations.next() != Some(player) {
            return Err(GameError::NotPlayersTurn);
        }
        if confirmations.confirm(player) {
            self.start_day();
        }
        Ok(())
    }

    /// Called when a player casts their day vote; `None` abstains.
    ///
    /// Votes for oneself, for an unknown name or for a dead player are discarded, and count as an
    /// abstention.
    pub fn cast_vote(&mut self, voter: usize, target: Option<&str>) -> Result<Outcome, GameError> {
        self.check_player_index(voter)?;
        let GameState::DayVoting { turn, .. } = self.state else {
            return Err(GameError::InvalidAction);
        };
        if !self.players[voter].alive() {
            return Ok(Outcome::Discarded(Discard::DeadActor));
        }
        if voter != turn {
            return Err(GameError::NotPlayersTurn);
        }

        let (ballot, outcome) = match target.map(|name| self.check_target(voter, name, false)) {
            None => (Ballot::Abstain, Outcome::Accepted),
            Some(Ok(target)) => (Ballot::For(target), Outcome::Accepted),
            Some(Err(discard)) => {
                log::warn!("vote by {} skipped: {}", self.players[voter].name, discard.message());
                (Ballot::Abstain, Outcome::Discarded(discard))
            }
        };

        let GameState::DayVoting { votes, .. } = &mut self.state else {
            return Err(GameError::InvalidAction);
        };
        votes.vote(voter, ballot);
        match self.next_voter() {
            Some(next) => {
                if let GameState::DayVoting { turn, .. } = &mut self.state {
                    *turn = next;
                }
            }
            None => self.end_voting(),
        }
        Ok(outcome)
    }

    /// Called when a mafia member, doctor or detective chooses the target of their night action.
    ///
    /// Actions by dead players or players without a night action are discarded. So are actions
    /// aimed at an unknown or dead player, in which case the actor may choose again.
    pub fn submit_night_action(&mut self, actor: usize, target: &str) -> Result<Outcome, GameError> {
        self.check_player_index(actor)?;
        let GameState::NightActions { visits } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        let turn = visits.next();
        let player = &self.players[actor];
        if !player.alive() {
            return Ok(Outcome::Discarded(Discard::DeadActor));
        }
        let Some(action) = NightAction::of(player.role) else {
            return Ok(Outcome::Discarded(Discard::NoNightAction));
        };
        if turn != Some(actor) {
            return Err(GameError::NotPlayersTurn);
        }

        let target = match self.check_target(actor, target, action.can_target_self()) {
            Ok(target) => target,
            Err(discard) => {
                log::warn!("{} by {} rejected: {}", action, self.players[actor].name, discard.message());
                return Ok(Outcome::Discarded(discard));
            }
        };

        log::debug!("{} chose to {} {}", self.players[actor].name, action, self.players[target].name);
        self.players[actor].night_target = Some(target);
        self.end_night_turn(actor);
        Ok(Outcome::Accepted)
    }

    /// Called when a player without a night action has taken their turn at night.
    pub fn acknowledge_night(&mut self, player: usize) -> Result<(), GameError> {
        self.check_player_index(player)?;
        let GameState::NightActions { visits } = &self.state else {
            return Err(GameError::InvalidAction);
        };
        if visits.next() != Some(player) {
            return Err(GameError::NotPlayersTurn);
        }
        if NightAction::of(self.players[player].role).is_some() {
            return Err(GameError::InvalidAction);
        }
        self.end_night_turn(player);
        Ok(())
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    /// Gets the winning faction, if the game is over.
    pub fn winner(&self) -> Option<Faction> {
        match self.state {
            GameState::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    /// Returns whether a particular player has won.
    pub fn player_has_won(&self, player: usize) -> bool {
        self.winner() == Some(self.players[player].role.faction())
    }

    fn start_day(&mut self) {
        self.day += 1;
        log::debug!("day {} begins", self.day);
        self.events.push(GameEvent::DayStarted { day: self.day });
        self.state = GameState::DayVoting {
            turn: self.players.iter().position(|p| p.alive()).unwrap_or_default(),
            votes: Votes::new(self.num_players()),
        };
    }

    fn end_voting(&mut self) {
        let GameState::DayVoting { votes, .. } = &self.state else {
            return;
        };
        let tally = votes.tally();
        log::debug!("{} valid votes cast on day {}", tally.total(), self.day);
        let eliminated = tally.winner(&mut self.rng);
        self.events.push(GameEvent::VoteResult {
            counts: tally.counts().collect(),
            eliminated,
        });

        if let Some(player) = eliminated {
            log::info!("{} has been eliminated", self.players[player].name);
            self.kill(player);
            self.events.push(GameEvent::Eliminated { player });
        }

        if !self.check_game_over() {
            self.start_night();
        }
    }

    fn start_night(&mut self) {
        self.night += 1;
        log::debug!("night {} begins", self.night);
        self.events.push(GameEvent::NightStarted { night: self.night });
        for player in self.players.iter_mut() {
            player.reset_night_actions();
        }
        let visits = Confirmations::only(self.players.iter().map(|p| p.alive()));
        if visits.can_proceed() {
            self.end_night();
        } else {
            self.state = GameState::NightActions { visits };
        }
    }

    fn end_night_turn(&mut self, player: usize) {
        let GameState::NightActions { visits } = &mut self.state else {
            return;
        };
        if visits.confirm(player) {
            self.end_night();
        }
    }

    fn end_night(&mut self) {
        self.resolve_night();
        if !self.check_game_over() {
            self.start_day();
        }
    }

    /// Runs the win evaluator, ending the game if a faction has won.
    /// Once the game is over the winner never changes.
    fn check_game_over(&mut self) -> bool {
        if self.game_over() {
            return true;
        }
        let Some(winner) = self.counts.winner() else {
            return false;
        };
        log::info!("{} wins", winner);
        self.state = GameState::GameOver(winner);
        self.events.push(GameEvent::GameOver { winner });
        true
    }

    /// Marks a player as dead, keeping the live role counts in step.
    fn kill(&mut self, player: usize) {
        let player = &mut self.players[player];
        if player.alive() {
            player.status = Status::Dead;
            self.counts.remove(player.role);
        }
    }

    /// Resolves a chosen name to a living player other than the chooser, unless `allow_self`.
    fn check_target(&self, chooser: usize, name: &str, allow_self: bool) -> Result<usize, Discard> {
        let target = self.find_player(name).map_err(|_| Discard::UnknownTarget)?;
        if target == chooser && !allow_self {
            return Err(Discard::SelfTarget);
        }
        if !self.players[target].alive() {
            return Err(Discard::DeadTarget);
        }
        Ok(target)
    }

    /// The first living player, in seat order, who has yet to vote.
    fn next_voter(&self) -> Option<usize> {
        let GameState::DayVoting { votes, .. } = &self.state else {
            return None;
        };
        (0..self.num_players()).find(|idx| self.players[*idx].alive() && !votes.has_cast(*idx))
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive()).count()
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.num_players() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerIndex)
        }
    }
}

/// Normalises the player names, rejecting empty names and names that differ only in case.
fn check_names(names: &[String]) -> Result<Vec<String>, GameError> {
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| normalize_name(n)) {
        if name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if result.contains(&name) {
            return Err(GameError::DuplicatePlayerName(name));
        }
        result.push(name);
    }
    Ok(result)
}
