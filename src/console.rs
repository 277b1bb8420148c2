use crate::game::faction::Faction;
use crate::game::outcome::Discard;
use crate::game::player::Role;
use crate::game::prompt::{NightAction, RoleCard};
use crate::session::Host;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};


const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Renders the game as text and reads choices from a line-based input.
///
/// In hot-seat mode everyone shares one screen, so each private turn starts with a request to
/// hand the device over and ends with a screen clear.
pub struct ConsoleHost<R, W> {
    input: R,
    output: W,
    hotseat: bool,
}

impl<R: BufRead, W: Write> ConsoleHost<R, W> {
    pub fn new(input: R, output: W, hotseat: bool) -> Self {
        Self { input, output, hotseat }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Reads a trimmed line, or `None` once the input is exhausted.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints a question and reads the answer, failing once the input is exhausted.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;
        match self.read_answer()? {
            Some(answer) => Ok(answer),
            None => bail!("input closed"),
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn pick(&mut self, question: &str, eligible: &[String]) -> Result<String> {
        let names = eligible.iter().map(|n| capitalize(n)).collect::<Vec<_>>();
        self.say(&format!("Players available: {}", names.join(", ")))?;
        self.ask(question)
    }
}

impl<R: BufRead, W: Write> Host for ConsoleHost<R, W> {
    fn begin_private(&mut self, player: &str) -> Result<()> {
        if self.hotseat {
            self.ask(&format!("Pass the device to {}. Press Enter when ready.", capitalize(player)))?;
        }
        Ok(())
    }

    fn end_private(&mut self, _player: &str) -> Result<()> {
        if self.hotseat {
            self.ask("Press Enter to hide.")?;
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }

    fn reveal_role(&mut self, player: &str, card: &RoleCard) -> Result<()> {
        let mut message = format!("{}, your role: {}", capitalize(player), card.role);
        if let Some(attribute) = card.attribute {
            message.push_str(&format!("\nSpecial ability: {}", attribute));
        }
        if card.role == Role::Mafia {
            let allies = card.allies.iter().map(|n| capitalize(n)).collect::<Vec<_>>();
            if allies.is_empty() {
                message.push_str("\nYou have no mafia allies.");
            } else {
                message.push_str(&format!("\nMafia allies: {}", allies.join(", ")));
            }
        }
        self.say(&message)
    }

    fn prompt_vote(&mut self, voter: &str, eligible: &[String]) -> Result<Option<String>> {
        let answer = self.pick(
            &format!("{}, who do you vote to eliminate? (blank to abstain)", capitalize(voter)),
            eligible,
        )?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    fn prompt_night_action(&mut self, actor: &str, action: NightAction, eligible: &[String]) -> Result<String> {
        self.pick(&format!("{}, choose a player to {}:", capitalize(actor), action), eligible)
    }

    fn rest(&mut self, player: &str) -> Result<()> {
        self.say(&format!("{}, you have no action tonight.", capitalize(player)))
    }

    fn input_discarded(&mut self, player: &str, discard: Discard) -> Result<()> {
        let message = if discard.is_illegal_action() {
            format!("{}: {}.", capitalize(player), discard.message())
        } else {
            format!("{}: {}; choice skipped.", capitalize(player), discard.message())
        };
        self.say(&message)
    }

    fn announce_day(&mut self, day: u32) -> Result<()> {
        self.say(&format!("\n=== Day {} ===\nEveryone, open your eyes. Time to vote!", day))
    }

    fn announce_night(&mut self, night: u32) -> Result<()> {
        self.say(&format!("\n=== Night {} ===\nEveryone, close your eyes.", night))
    }

    fn announce_vote_result(&mut self, counts: &[(String, usize)]) -> Result<()> {
        if counts.is_empty() {
            return self.say("No valid votes were cast. No one is eliminated.");
        }
        for (name, count) in counts {
            self.say(&format!("  {}: {} vote(s)", capitalize(name), count))?;
        }
        Ok(())
    }

    fn announce_elimination(&mut self, player: &str) -> Result<()> {
        self.say(&format!("{} has been eliminated!", capitalize(player)))
    }

    fn announce_night_outcome(&mut self, target: Option<&str>, survived: bool) -> Result<()> {
        match (target, survived) {
            (Some(target), true) => self.say(&format!(
                "{} was protected by the Doctor and survived the night!",
                capitalize(target)
            )),
            (Some(target), false) => self.say(&format!("{} was killed during the night!", capitalize(target))),
            (None, _) => self.say("The night passed quietly."),
        }
    }

    fn reveal_mafia_target(&mut self, member: &str, target: &str) -> Result<()> {
        self.say(&format!(
            "{}, the Mafia has chosen to target {}.",
            capitalize(member),
            capitalize(target)
        ))
    }

    fn reveal_investigation(&mut self, detective: &str, target: &str, role: Role) -> Result<()> {
        self.say(&format!(
            "{}, your investigation shows {} is a {}.",
            capitalize(detective),
            capitalize(target),
            role
        ))
    }

    fn reveal_suspicion_radar(&mut self, villager: &str, targeted: bool) -> Result<()> {
        let message = if targeted {
            format!("{}, your Suspicion Radar detects that the Mafia picked you last night.", capitalize(villager))
        } else {
            format!("{}, your Suspicion Radar is calm tonight.", capitalize(villager))
        };
        self.say(&message)
    }

    fn reveal_intuition(&mut self, villager: &str, target: &str, appears_mafia: bool) -> Result<()> {
        let hint = if appears_mafia { "Mafia" } else { "Not Mafia" };
        self.say(&format!("Hint for {}: {} might be {}.", capitalize(villager), capitalize(target), hint))
    }

    fn nothing_to_report(&mut self, player: &str) -> Result<()> {
        self.say(&format!("{}, you have no news from the night.", capitalize(player)))
    }

    fn announce_winner(&mut self, winner: Faction, players: &[String]) -> Result<()> {
        let players = players.iter().map(|n| capitalize(n)).collect::<Vec<_>>();
        self.say(&format!("\n{} wins! Winners: {}", winner, players.join(", ")))
    }

    fn offer_restart(&mut self) -> Result<bool> {
        loop {
            write!(self.output, "Play again? (y/n) ")?;
            self.output.flush()?;
            let Some(answer) = self.read_answer()? else {
                return Ok(false);
            };
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }
}

/// Upper-cases the first letter of a (lower-cased) player name for display.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
