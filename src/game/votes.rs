use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A plurality vote counter.
///
/// Used for both the day elimination and the mafia's choice of victim.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Tally<T: Ord> {
    counts: BTreeMap<T, usize>,
}

impl<T: Ord> Default for Tally<T> {
    fn default() -> Self {
        Self { counts: BTreeMap::new() }
    }
}

impl<T: Ord + Copy> Tally<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one vote for `target`.
    pub fn record(&mut self, target: T) {
        *self.counts.entry(target).or_insert(0) += 1;
    }

    /// The number of votes counted for `target`.
    #[cfg(test)]
    pub fn count(&self, target: T) -> usize {
        self.counts.get(&target).copied().unwrap_or(0)
    }

    /// The total number of votes counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Every target that received a vote, with its count.
    pub fn counts(&self) -> impl Iterator<Item = (T, usize)> + '_ {
        self.counts.iter().map(|(target, count)| (*target, *count))
    }

    /// The targets sharing the highest vote count.
    pub fn leaders(&self) -> Vec<T> {
        let Some(max) = self.counts.values().max().copied() else {
            return vec![];
        };
        self.counts()
            .filter(|(_, count)| *count == max)
            .map(|(target, _)| target)
            .collect()
    }

    /// Picks the winner of the vote, breaking ties uniformly at random.
    /// Returns `None` if no votes were counted.
    pub fn winner(&self, rng: &mut impl Rng) -> Option<T> {
        let leaders = self.leaders();
        match leaders.as_slice() {
            [] => None,
            [only] => Some(*only),
            tied => tied.choose(rng).copied(),
        }
    }
}

/// How a single player voted during the day.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Ballot {
    For(usize),
    /// The player abstained, or their vote was discarded.
    Abstain,
}

/// Tracks the day vote of each player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Votes {
    ballots: Vec<Option<Ballot>>,
}

impl Votes {
    /// Creates a new `Votes` for a table of `num_players` seats.
    pub fn new(num_players: usize) -> Self {
        Self { ballots: vec![None; num_players] }
    }

    /// Returns whether the given player has cast their vote.
    pub fn has_cast(&self, player_idx: usize) -> bool {
        self.ballots[player_idx].is_some()
    }

    /// Records the vote of a player.
    pub fn vote(&mut self, player_idx: usize, ballot: Ballot) {
        self.ballots[player_idx] = Some(ballot);
    }

    /// Counts the votes cast so far.
    pub fn tally(&self) -> Tally<usize> {
        let mut tally = Tally::new();
        for ballot in self.ballots.iter().flatten() {
            if let Ballot::For(target) = ballot {
                tally.record(*target);
            }
        }
        tally
    }

    /// Gets the vote of each player.
    #[cfg(test)]
    pub fn ballots(&self) -> &[Option<Ballot>] {
        &self.ballots
    }
}
