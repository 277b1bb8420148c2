//! Session tests: whole games driven through a host

#![cfg(test)]

use super::*;
use crate::bot::Difficulty;
use crate::console::ConsoleHost;
use crate::game::GameOptions;
use std::io::Cursor;

/// Plays every human seat by abstaining and picking the first eligible target (the last, when
/// protecting), and writes down everything it is shown.
#[derive(Default)]
struct RecordingHost {
    log: Vec<String>,
    restarts: usize,
}

impl RecordingHost {
    fn count(&self, prefix: &str) -> usize {
        self.log.iter().filter(|l| l.starts_with(prefix)).count()
    }

    /// The players handed the device between the two log entries.
    fn handoffs(&self, from: &str, until: &str) -> Vec<String> {
        self.log
            .iter()
            .skip_while(|l| *l != from)
            .take_while(|l| !l.starts_with(until))
            .filter_map(|l| l.strip_prefix("handoff "))
            .map(str::to_string)
            .collect()
    }
}

impl Host for RecordingHost {
    fn begin_private(&mut self, player: &str) -> Result<()> {
        self.log.push(format!("handoff {}", player));
        Ok(())
    }

    fn end_private(&mut self, player: &str) -> Result<()> {
        self.log.push(format!("hide {}", player));
        Ok(())
    }

    fn reveal_role(&mut self, player: &str, card: &RoleCard) -> Result<()> {
        self.log.push(format!("role {} {}", player, card.role));
        Ok(())
    }

    fn prompt_vote(&mut self, voter: &str, _eligible: &[String]) -> Result<Option<String>> {
        self.log.push(format!("vote {}", voter));
        Ok(None)
    }

    fn prompt_night_action(&mut self, actor: &str, action: NightAction, eligible: &[String]) -> Result<String> {
        self.log.push(format!("night {} {}", actor, action));
        let choice = match action {
            NightAction::Protect => eligible.last(),
            _ => eligible.first(),
        };
        match choice {
            Some(target) => Ok(target.clone()),
            None => bail!("nothing to choose"),
        }
    }

    fn rest(&mut self, player: &str) -> Result<()> {
        self.log.push(format!("rest {}", player));
        Ok(())
    }

    fn input_discarded(&mut self, player: &str, discard: Discard) -> Result<()> {
        self.log.push(format!("discarded {} {:?}", player, discard));
        Ok(())
    }

    fn announce_day(&mut self, day: u32) -> Result<()> {
        self.log.push(format!("day {}", day));
        Ok(())
    }

    fn announce_night(&mut self, night: u32) -> Result<()> {
        self.log.push(format!("dusk {}", night));
        Ok(())
    }

    fn announce_vote_result(&mut self, counts: &[(String, usize)]) -> Result<()> {
        self.log.push(format!("tally {:?}", counts));
        Ok(())
    }

    fn announce_elimination(&mut self, player: &str) -> Result<()> {
        self.log.push(format!("eliminated {}", player));
        Ok(())
    }

    fn announce_night_outcome(&mut self, target: Option<&str>, survived: bool) -> Result<()> {
        self.log.push(format!("dawn {:?} {}", target, survived));
        Ok(())
    }

    fn reveal_mafia_target(&mut self, member: &str, target: &str) -> Result<()> {
        self.log.push(format!("private mafia {} {}", member, target));
        Ok(())
    }

    fn reveal_investigation(&mut self, detective: &str, target: &str, role: Role) -> Result<()> {
        self.log.push(format!("private {} investigated {} {}", detective, target, role));
        Ok(())
    }

    fn reveal_suspicion_radar(&mut self, villager: &str, targeted: bool) -> Result<()> {
        self.log.push(format!("private {} radar {}", villager, targeted));
        Ok(())
    }

    fn reveal_intuition(&mut self, villager: &str, target: &str, appears_mafia: bool) -> Result<()> {
        self.log.push(format!("private {} intuition {} {}", villager, target, appears_mafia));
        Ok(())
    }

    fn nothing_to_report(&mut self, player: &str) -> Result<()> {
        self.log.push(format!("quiet {}", player));
        Ok(())
    }

    fn announce_winner(&mut self, winner: Faction, players: &[String]) -> Result<()> {
        self.log.push(format!("winner {} {}", winner, players.join(",")));
        Ok(())
    }

    fn offer_restart(&mut self) -> Result<bool> {
        if self.restarts == 0 {
            return Ok(false);
        }
        self.restarts -= 1;
        Ok(true)
    }
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{}", i)).collect()
}

fn bots(n: usize, difficulty: Difficulty) -> Vec<Seat> {
    (0..n).map(|i| Seat::Bot(Bot::new(i, difficulty, i as u64))).collect()
}

fn humans(n: usize) -> Vec<Seat> {
    vec![Seat::Human; n]
}

#[test]
fn test_seat_count_must_match() {
    let game = Game::new(GameOptions::default(), &names(5), 0).unwrap();
    assert!(Session::new(game, bots(4, Difficulty::Easy), RecordingHost::default()).is_err());
}

#[test]
fn test_bots_play_to_the_end() {
    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        for seed in 0..10 {
            let game = Game::new(GameOptions::default(), &names(8), seed).unwrap();
            let mut session = Session::new(game, bots(8, difficulty), RecordingHost::default()).unwrap();
            let winner = session.play().unwrap();

            assert_eq!(session.game().winner(), Some(winner));
            let host = session.host();
            assert_eq!(host.count("winner"), 1);
            assert_eq!(host.count("handoff"), 0);
            assert_eq!(host.count("private"), 0, "private events leaked: {:?}", host.log);
            assert_eq!(host.log.first().map(String::as_str), Some("day 1"));
        }
    }
}

#[test]
fn test_winners_are_named() {
    let game = Game::new(GameOptions::default(), &names(6), 4).unwrap();
    let mut session = Session::new(game, bots(6, Difficulty::Normal), RecordingHost::default()).unwrap();
    session.play().unwrap();

    let game = session.game();
    let winners = (0..6)
        .filter(|p| game.player_has_won(*p))
        .map(|p| format!("p{}", p))
        .collect::<Vec<_>>();
    let expected = format!("winner {} {}", game.winner().unwrap(), winners.join(","));
    assert_eq!(session.host().log.last(), Some(&expected));
}

#[test]
fn test_human_only_sees_their_own_secrets() {
    for seed in 0..20 {
        let game = Game::new(GameOptions::default(), &names(7), seed).unwrap();
        let mut seats = bots(7, Difficulty::Normal);
        seats[0] = Seat::Human;
        let mut session = Session::new(game, seats, RecordingHost::default()).unwrap();
        session.play().unwrap();

        let host = session.host();
        assert_eq!(host.count("role"), 1);
        assert!(host.log.iter().any(|l| l.starts_with("role p0 ")));
        assert!(host.log.iter().filter(|l| l.starts_with("handoff")).all(|l| l == "handoff p0"));
        for line in host.log.iter().filter(|l| l.starts_with("private")) {
            let whom = line.split(' ').nth(if line.starts_with("private mafia") { 2 } else { 1 });
            assert_eq!(whom, Some("p0"), "p0 was shown {}", line);
        }
    }
}

#[test]
fn test_private_turns_do_not_depend_on_roles() {
    let seat_order = names(6);
    let mut layouts = std::collections::HashSet::new();
    for seed in 0..10 {
        let game = Game::new(GameOptions::default(), &names(6), seed).unwrap();
        layouts.insert(game.players().iter().map(|p| p.role as u8).collect::<Vec<_>>());
        let mut session = Session::new(game, humans(6), RecordingHost::default()).unwrap();
        session.play().unwrap();

        let host = session.host();
        assert_eq!(host.handoffs("day 1", "dusk 1"), seat_order, "day 1 votes");

        // Everyone takes a night turn, then everyone alive at dusk is briefed
        assert_eq!(host.handoffs("dusk 1", "day 2"), [&seat_order[..], &seat_order[..]].concat(), "night 1");
        assert_eq!(host.count("handoff"), host.count("hide"));
    }
    assert!(layouts.len() > 1);
}

/// Plays the role call, an abstaining first day and the first night at a shared console.
/// Every seat with a night action picks the next seat along.
fn hotseat_first_night(seed: u64) -> (Vec<Role>, String) {
    let game = Game::new(GameOptions::default(), &names(6), seed).unwrap();
    let roles = game.players().iter().map(|p| p.role).collect::<Vec<_>>();

    let mut input = "\n\n".repeat(6) + &"\n\n\n".repeat(6);
    for (seat, role) in roles.iter().enumerate() {
        match NightAction::of(*role) {
            Some(_) => input += &format!("\np{}\n\n", (seat + 1) % 6),
            None => input += "\n\n",
        }
    }
    input += &"\n\n".repeat(6);

    let host = ConsoleHost::new(Cursor::new(input.into_bytes()), vec![], true);
    let mut session = Session::new(game, humans(6), host).unwrap();
    // Runs out of input on the second day, unless the game is already over
    let _ = session.play();
    let output = String::from_utf8_lossy(session.host().output()).to_string();
    (roles, output)
}

#[test]
fn test_hotseat_night_handoffs_follow_seat_order() {
    let expected = ["P0", "P1", "P2", "P3", "P4", "P5"].repeat(2);
    for seed in [3, 11, 27] {
        let (roles, output) = hotseat_first_night(seed);
        let start = output.find("=== Night 1 ===").unwrap();
        let end = output.find("=== Day 2 ===").unwrap_or(output.len());
        let handoffs = output[start..end]
            .split("Pass the device to ")
            .skip(1)
            .filter_map(|s| s.split('.').next())
            .collect::<Vec<_>>();
        assert_eq!(handoffs, expected, "roles {:?}", roles);
    }
}

#[test]
fn test_run_restarts_until_declined() {
    let game = Game::new(GameOptions::default(), &names(6), 3).unwrap();
    let host = RecordingHost { restarts: 2, ..Default::default() };
    let mut session = Session::new(game, bots(6, Difficulty::Hard), host).unwrap();
    session.run().unwrap();

    assert_eq!(session.host().count("winner"), 3);
    assert_eq!(session.host().count("day 1"), 3);
    assert!(session.game().game_over());
}
