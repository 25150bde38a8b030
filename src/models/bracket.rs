//! Bracket aggregate: winners rounds, losers rounds, grand final and reset.

use crate::models::game::{BracketSide, GameId, GameMatch, GameStatus};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Games sharing one round number within one sub-bracket, ordered by match number.
pub type Round = Vec<GameMatch>;

/// Storage index of a 1-indexed round number.
pub fn round_index(round_number: u32) -> usize {
    (round_number as usize).saturating_sub(1)
}

/// 1-indexed round number of a storage index.
pub fn round_number(index: usize) -> u32 {
    index as u32 + 1
}

/// Elimination format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketFormat {
    #[default]
    SingleElimination,
    DoubleElimination,
}

/// Where a game lives inside the bracket. For `Final`, round 0 is the grand final and 1 the reset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GameLocation {
    pub side: BracketSide,
    pub round_index: usize,
    pub match_index: usize,
}

/// The single mutable aggregate every engine operation works on.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub format: BracketFormat,
    pub winners: Vec<Round>,
    /// Empty for single elimination.
    pub losers: Vec<Round>,
    pub grand_final: Option<GameMatch>,
    pub grand_final_reset: Option<GameMatch>,
}

impl Bracket {
    pub fn is_double_elimination(&self) -> bool {
        self.format == BracketFormat::DoubleElimination
    }

    /// Every game in bracket order: winners, losers, grand final, reset.
    pub fn games(&self) -> impl Iterator<Item = &GameMatch> {
        self.winners
            .iter()
            .flatten()
            .chain(self.losers.iter().flatten())
            .chain(self.grand_final.iter())
            .chain(self.grand_final_reset.iter())
    }

    pub fn locate(&self, id: GameId) -> Option<GameLocation> {
        fn find(rounds: &[Round], side: BracketSide, id: GameId) -> Option<GameLocation> {
            rounds.iter().enumerate().find_map(|(round_index, round)| {
                round
                    .iter()
                    .position(|g| g.id == id)
                    .map(|match_index| GameLocation {
                        side,
                        round_index,
                        match_index,
                    })
            })
        }
        find(&self.winners, BracketSide::Winners, id)
            .or_else(|| find(&self.losers, BracketSide::Losers, id))
            .or_else(|| {
                [&self.grand_final, &self.grand_final_reset]
                    .iter()
                    .position(|g| g.as_ref().is_some_and(|g| g.id == id))
                    .map(|round_index| GameLocation {
                        side: BracketSide::Final,
                        round_index,
                        match_index: 0,
                    })
            })
    }

    pub fn game_at(&self, loc: GameLocation) -> Option<&GameMatch> {
        match loc.side {
            BracketSide::Winners => self.winners.get(loc.round_index)?.get(loc.match_index),
            BracketSide::Losers => self.losers.get(loc.round_index)?.get(loc.match_index),
            BracketSide::Final => match loc.round_index {
                0 => self.grand_final.as_ref(),
                1 => self.grand_final_reset.as_ref(),
                _ => None,
            },
        }
    }

    pub fn game_at_mut(&mut self, loc: GameLocation) -> Option<&mut GameMatch> {
        match loc.side {
            BracketSide::Winners => self.winners.get_mut(loc.round_index)?.get_mut(loc.match_index),
            BracketSide::Losers => self.losers.get_mut(loc.round_index)?.get_mut(loc.match_index),
            BracketSide::Final => match loc.round_index {
                0 => self.grand_final.as_mut(),
                1 => self.grand_final_reset.as_mut(),
                _ => None,
            },
        }
    }

    pub fn game(&self, id: GameId) -> Option<&GameMatch> {
        self.game_at(self.locate(id)?)
    }

    pub fn game_mut(&mut self, id: GameId) -> Option<&mut GameMatch> {
        let loc = self.locate(id)?;
        self.game_at_mut(loc)
    }

    /// Rounds of one sub-bracket (`Final` has none).
    pub fn rounds(&self, side: BracketSide) -> &[Round] {
        match side {
            BracketSide::Winners => &self.winners,
            BracketSide::Losers => &self.losers,
            BracketSide::Final => &[],
        }
    }

    /// True when the round exists and every game in it is finished.
    pub fn round_finished(&self, side: BracketSide, index: usize) -> bool {
        self.rounds(side)
            .get(index)
            .is_some_and(|round| round.iter().all(GameMatch::is_finished))
    }

    /// Queued games with two real teams, in bracket order.
    pub fn playable_games(&self) -> Vec<&GameMatch> {
        self.games()
            .filter(|g| g.status == GameStatus::Queued && g.is_playable())
            .collect()
    }

    /// Tournament winner once it is decided.
    pub fn champion(&self) -> Option<TeamId> {
        if !self.is_double_elimination() {
            let final_game = self.winners.last()?.first()?;
            return final_game.winner()?.team();
        }
        if let Some(reset) = self.grand_final_reset.as_ref().filter(|g| g.is_finished()) {
            return reset.winner()?.team();
        }
        let grand_final = self.grand_final.as_ref().filter(|g| g.is_finished())?;
        let winner = grand_final.winner()?;
        if winner == grand_final.team_a {
            winner.team()
        } else {
            None
        }
    }

    /// Flat list of game rows, as the persistence layer stores them.
    pub fn to_rows(&self) -> Vec<GameMatch> {
        self.games().cloned().collect()
    }

    /// Rebuild from persisted rows: group on (bracket, round, match number), keeping a
    /// finished row with a result over any incomplete duplicate.
    pub fn from_rows(rows: impl IntoIterator<Item = GameMatch>) -> Self {
        let mut grouped: BTreeMap<(BracketSide, u32, u32), GameMatch> = BTreeMap::new();
        for row in rows {
            let key = (row.bracket, row.round, row.match_number);
            match grouped.get(&key) {
                Some(existing) if is_complete(existing) || !is_complete(&row) => {}
                _ => {
                    grouped.insert(key, row);
                }
            }
        }

        let mut bracket = Bracket::default();
        let mut winners: BTreeMap<u32, Round> = BTreeMap::new();
        let mut losers: BTreeMap<u32, Round> = BTreeMap::new();
        for ((side, round, _), game) in grouped {
            match side {
                BracketSide::Winners => winners.entry(round).or_default().push(game),
                BracketSide::Losers => losers.entry(round).or_default().push(game),
                BracketSide::Final if round <= 1 => bracket.grand_final = Some(game),
                BracketSide::Final => bracket.grand_final_reset = Some(game),
            }
        }
        bracket.winners = winners.into_values().collect();
        bracket.losers = losers.into_values().collect();
        if !bracket.losers.is_empty() || bracket.grand_final.is_some() {
            bracket.format = BracketFormat::DoubleElimination;
        }
        bracket
    }
}

fn is_complete(game: &GameMatch) -> bool {
    game.is_finished() && game.result.is_some()
}
