use super::event::GameEvent;
use super::player::{Attribute, Role};
use super::votes::Tally;
use super::Game;
use rand::seq::SliceRandom;
use rand::Rng;

impl Game {
    /// Applies the night actions in their fixed order: investigations, then protection, then the
    /// mafia's kill, then the villagers' passive attributes. Every player's night state is cleared
    /// afterwards.
    pub(super) fn resolve_night(&mut self) {
        let alive_at_dusk: Vec<bool> = self.players.iter().map(|p| p.alive()).collect();
        let mafia_choices: Vec<usize> = self
            .players
            .iter()
            .filter(|p| p.role == Role::Mafia)
            .filter_map(|p| p.night_target)
            .collect();

        self.resolve_investigations();
        self.resolve_protection();
        let target = self.choose_mafia_target();

        let survived = match target {
            Some(target) if self.players[target].protected => {
                log::info!("{} was protected and survived the night", self.players[target].name);
                true
            }
            Some(target) => {
                log::info!("{} was killed during the night", self.players[target].name);
                self.kill(target);
                false
            }
            None => false,
        };
        self.events.push(GameEvent::NightOutcome { target, survived });

        self.resolve_attributes(&mafia_choices, &alive_at_dusk);

        for player in self.players.iter_mut() {
            player.reset_night_actions();
        }
    }

    fn resolve_investigations(&mut self) {
        for detective in self.acting(Role::Detective) {
            let Some(target) = self.players[detective].night_target else {
                continue;
            };
            self.players[detective].investigated = Some(target);
            self.events.push(GameEvent::Investigation {
                detective,
                target,
                role: self.players[target].role,
            });
        }
    }

    fn resolve_protection(&mut self) {
        for doctor in self.acting(Role::Doctor) {
            if let Some(target) = self.players[doctor].night_target {
                self.players[target].protected = true;
            }
        }
    }

    /// Tallies the mafia's votes, and privately tells the mafia who they settled on.
    fn choose_mafia_target(&mut self) -> Option<usize> {
        let mafia = self.acting(Role::Mafia);
        let mut tally = Tally::new();
        for member in mafia.iter() {
            if let Some(target) = self.players[*member].night_target {
                tally.record(target);
            }
        }
        let target = tally.winner(&mut self.rng)?;
        self.events.push(GameEvent::MafiaTarget { mafia, target });
        Some(target)
    }

    fn resolve_attributes(&mut self, mafia_choices: &[usize], alive_at_dusk: &[bool]) {
        for villager in 0..self.players.len() {
            let player = &self.players[villager];
            if player.role != Role::Villager {
                continue;
            }
            let (attribute, alive) = (player.attribute, player.alive());
            match attribute {
                // The radar fires even if its owner died tonight
                Some(Attribute::SuspicionRadar) if alive_at_dusk[villager] => {
                    self.events.push(GameEvent::SuspicionRadar {
                        villager,
                        targeted: mafia_choices.contains(&villager),
                    });
                }
                Some(Attribute::Intuition) if alive => self.intuition_hint(villager),
                _ => {}
            }
        }
    }

    fn intuition_hint(&mut self, villager: usize) {
        let candidates = self.eligible_players().exclude(villager).make().indices();
        let Some(&target) = candidates.choose(&mut self.rng) else {
            return;
        };
        let correct = self.rng.gen_bool(self.opts.intuition_accuracy);
        let is_mafia = self.players[target].role == Role::Mafia;
        self.events.push(GameEvent::IntuitionHint {
            villager,
            target,
            appears_mafia: is_mafia == correct,
        });
    }

    /// The living players of the given role, in seat order.
    fn acting(&self, role: Role) -> Vec<usize> {
        self.eligible_players().with_role(role).make().indices()
    }
}
