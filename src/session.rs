use crate::bot::Bot;
use crate::game::event::GameEvent;
use crate::game::faction::Faction;
use crate::game::outcome::{Discard, Outcome};
use crate::game::player::Role;
use crate::game::prompt::{NightAction, Prompt, RoleCard};
use crate::game::Game;
use anyhow::{bail, Result};

mod test;

/// The presentation layer: renders what happens and collects each human player's choices.
///
/// Everything shown between `begin_private` and `end_private` is meant for that one player.
/// Private turns come in seat order, and every living player gets one each night, so the order of
/// hand-overs says nothing about anyone's role.
pub trait Host {
    /// Hands the device to a player before they are shown anything private.
    fn begin_private(&mut self, player: &str) -> Result<()>;

    /// Hides whatever the player was shown, once they are done.
    fn end_private(&mut self, player: &str) -> Result<()>;

    /// Shows a player their role card.
    fn reveal_role(&mut self, player: &str, card: &RoleCard) -> Result<()>;

    /// Asks a player who they vote to eliminate; `None` abstains.
    fn prompt_vote(&mut self, voter: &str, eligible: &[String]) -> Result<Option<String>>;

    /// Asks a player to choose the target of their night action.
    fn prompt_night_action(&mut self, actor: &str, action: NightAction, eligible: &[String]) -> Result<String>;

    /// Tells a player without a night action that there is nothing for them to do tonight.
    fn rest(&mut self, player: &str) -> Result<()>;

    /// Tells a player their vote or action was dropped.
    fn input_discarded(&mut self, player: &str, discard: Discard) -> Result<()>;

    fn announce_day(&mut self, day: u32) -> Result<()>;

    fn announce_night(&mut self, night: u32) -> Result<()>;

    /// Shows the number of votes received by each player.
    fn announce_vote_result(&mut self, counts: &[(String, usize)]) -> Result<()>;

    fn announce_elimination(&mut self, player: &str) -> Result<()>;

    fn announce_night_outcome(&mut self, target: Option<&str>, survived: bool) -> Result<()>;

    /// Tells a mafia member who the mafia are going to kill.
    fn reveal_mafia_target(&mut self, member: &str, target: &str) -> Result<()>;

    fn reveal_investigation(&mut self, detective: &str, target: &str, role: Role) -> Result<()>;

    fn reveal_suspicion_radar(&mut self, villager: &str, targeted: bool) -> Result<()>;

    fn reveal_intuition(&mut self, villager: &str, target: &str, appears_mafia: bool) -> Result<()>;

    /// Tells a player the night brought them no private news.
    fn nothing_to_report(&mut self, player: &str) -> Result<()>;

    /// Names the winning faction and the players on it.
    fn announce_winner(&mut self, winner: Faction, players: &[String]) -> Result<()>;

    /// Asks whether to play again with the same players.
    fn offer_restart(&mut self) -> Result<bool>;
}

/// Who makes the decisions for a seat.
#[derive(Clone, Debug)]
pub enum Seat {
    Human,
    Bot(Bot),
}

impl Seat {
    fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }
}

/// Drives a game to completion, feeding prompts to the host or to bots and dispatching events.
pub struct Session<H: Host> {
    game: Game,
    seats: Vec<Seat>,
    host: H,
}

impl<H: Host> Session<H> {
    pub fn new(game: Game, seats: Vec<Seat>, host: H) -> Result<Self> {
        if seats.len() != game.num_players() {
            bail!("expected {} seats, got {}", game.num_players(), seats.len());
        }
        Ok(Self { game, seats, host })
    }

    /// Plays games until the host declines to play again.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let winner = self.play()?;
            log::info!("game over: {} wins", winner);
            if !self.host.offer_restart()? {
                return Ok(());
            }
            self.game = self.game.restart()?;
            for seat in self.seats.iter_mut() {
                if let Seat::Bot(bot) = seat {
                    bot.reset();
                }
            }
        }
    }

    /// Plays the current game until a faction wins.
    pub fn play(&mut self) -> Result<Faction> {
        loop {
            let winner = self.step()?;
            self.dispatch_events()?;
            if let Some(winner) = winner {
                return Ok(winner);
            }
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Collects the input the game is waiting for.
    fn step(&mut self) -> Result<Option<Faction>> {
        match self.game.prompt() {
            Prompt::RevealRole { player, card } => {
                if let Seat::Bot(bot) = &mut self.seats[player] {
                    bot.learn_role(&self.game, &card);
                } else {
                    let name = self.game.player_name(player).to_string();
                    self.host.begin_private(&name)?;
                    self.host.reveal_role(&name, &card)?;
                    self.host.end_private(&name)?;
                }
                self.game.acknowledge_role(player)?;
            }
            Prompt::Vote { voter, eligible } => {
                let name = self.game.player_name(voter).to_string();
                match &mut self.seats[voter] {
                    Seat::Bot(bot) => {
                        let target = bot
                            .choose_vote(&eligible.indices())
                            .map(|p| self.game.player_name(p).to_string());
                        self.game.cast_vote(voter, target.as_deref())?;
                    }
                    Seat::Human => {
                        self.host.begin_private(&name)?;
                        let target = self.host.prompt_vote(&name, &eligible.names(&self.game))?;
                        if let Outcome::Discarded(discard) = self.game.cast_vote(voter, target.as_deref())? {
                            self.host.input_discarded(&name, discard)?;
                        }
                        self.host.end_private(&name)?;
                    }
                }
            }
            Prompt::NightAction { actor, action, eligible } => {
                let name = self.game.player_name(actor).to_string();
                match &mut self.seats[actor] {
                    Seat::Bot(bot) => {
                        let Some(target) = bot.choose_night_target(action, &eligible.indices()) else {
                            bail!("{} has no one to {}", name, action);
                        };
                        let target = self.game.player_name(target).to_string();
                        if let Outcome::Discarded(discard) = self.game.submit_night_action(actor, &target)? {
                            bail!("bot night action rejected: {}", discard.message());
                        }
                    }
                    Seat::Human => {
                        self.host.begin_private(&name)?;
                        let names = eligible.names(&self.game);
                        // The player keeps the device until the game accepts a target
                        loop {
                            let target = self.host.prompt_night_action(&name, action, &names)?;
                            match self.game.submit_night_action(actor, &target)? {
                                Outcome::Accepted => break,
                                Outcome::Discarded(discard) => self.host.input_discarded(&name, discard)?,
                            }
                        }
                        self.host.end_private(&name)?;
                    }
                }
            }
            Prompt::NightIdle { player } => {
                if self.seats[player].is_human() {
                    let name = self.game.player_name(player).to_string();
                    self.host.begin_private(&name)?;
                    self.host.rest(&name)?;
                    self.host.end_private(&name)?;
                }
                self.game.acknowledge_night(player)?;
            }
            Prompt::GameOver { winner } => return Ok(Some(winner)),
        }
        Ok(None)
    }

    /// Hands each new event to the bots and the host, respecting who may see it.
    ///
    /// Public events are announced as they come. Private events are held back until the night's
    /// outcome is known, then every human player who was alive at dusk is briefed in seat order.
    fn dispatch_events(&mut self) -> Result<()> {
        let mut private = vec![];
        let mut briefing: Option<Vec<usize>> = None;
        for event in self.game.drain_events() {
            if let Ok(json) = serde_json::to_string(&event) {
                log::trace!("event: {}", json);
            }

            let audience = event.audience();
            for (idx, seat) in self.seats.iter_mut().enumerate() {
                if let (Seat::Bot(bot), true) = (seat, audience.includes(idx)) {
                    bot.observe(&event);
                }
            }

            if !event.is_public() {
                private.push(event);
                continue;
            }
            if let Some(visits) = briefing.take() {
                self.brief(&visits, &private)?;
                private.clear();
            }
            self.announce(&event)?;
            if let GameEvent::NightOutcome { target, survived } = event {
                briefing = Some(self.briefing_order(target.filter(|_| !survived)));
            }
        }
        if briefing.is_some() || !private.is_empty() {
            let visits = briefing.unwrap_or_else(|| self.briefing_order(None));
            self.brief(&visits, &private)?;
        }
        Ok(())
    }

    /// The human players still alive, plus the one killed tonight, in seat order.
    fn briefing_order(&self, killed: Option<usize>) -> Vec<usize> {
        let players = self.game.players();
        (0..players.len())
            .filter(|p| self.seats[*p].is_human())
            .filter(|p| players[*p].alive() || killed == Some(*p))
            .collect()
    }

    /// Visits each player in private and shows them their own share of the secrets.
    fn brief(&mut self, visits: &[usize], private: &[GameEvent]) -> Result<()> {
        for &player in visits {
            let name = self.game.player_name(player).to_string();
            self.host.begin_private(&name)?;
            let mut told = false;
            for event in private.iter().filter(|e| e.audience().includes(player)) {
                self.reveal(event, player)?;
                told = true;
            }
            if !told {
                self.host.nothing_to_report(&name)?;
            }
            self.host.end_private(&name)?;
        }
        Ok(())
    }

    fn announce(&mut self, event: &GameEvent) -> Result<()> {
        let game = &self.game;
        let name = |p: usize| game.player_name(p).to_string();
        match *event {
            GameEvent::DayStarted { day } => self.host.announce_day(day),
            GameEvent::NightStarted { night } => self.host.announce_night(night),
            GameEvent::VoteResult { ref counts, .. } => {
                let counts = counts.iter().map(|(p, n)| (name(*p), *n)).collect::<Vec<_>>();
                self.host.announce_vote_result(&counts)
            }
            GameEvent::Eliminated { player } => self.host.announce_elimination(&name(player)),
            GameEvent::NightOutcome { target, survived } => {
                let target = target.map(name);
                self.host.announce_night_outcome(target.as_deref(), survived)
            }
            GameEvent::GameOver { winner } => {
                let winners = (0..game.num_players())
                    .filter(|p| game.player_has_won(*p))
                    .map(name)
                    .collect::<Vec<_>>();
                self.host.announce_winner(winner, &winners)
            }
            GameEvent::MafiaTarget { .. }
            | GameEvent::Investigation { .. }
            | GameEvent::SuspicionRadar { .. }
            | GameEvent::IntuitionHint { .. } => Ok(()),
        }
    }

    /// Shows `viewer` a private event addressed to them.
    fn reveal(&mut self, event: &GameEvent, viewer: usize) -> Result<()> {
        let game = &self.game;
        let name = |p: usize| game.player_name(p).to_string();
        match *event {
            GameEvent::MafiaTarget { target, .. } => self.host.reveal_mafia_target(&name(viewer), &name(target)),
            GameEvent::Investigation { detective, target, role } => {
                self.host.reveal_investigation(&name(detective), &name(target), role)
            }
            GameEvent::SuspicionRadar { villager, targeted } => {
                self.host.reveal_suspicion_radar(&name(villager), targeted)
            }
            GameEvent::IntuitionHint { villager, target, appears_mafia } => {
                self.host.reveal_intuition(&name(villager), &name(target), appears_mafia)
            }
            _ => Ok(()),
        }
    }
}
