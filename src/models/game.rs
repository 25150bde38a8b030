//! Game, Slot and the per-game lifecycle status.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// Display name frozen into results for a bye slot.
pub const BYE_NAME: &str = "BYE";

/// One side of a game: a real team, a bye, or not yet determined.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team(TeamId),
    Bye,
    /// Not yet determined. Never a playable opponent.
    #[default]
    Open,
}

impl Slot {
    pub fn is_open(self) -> bool {
        self == Slot::Open
    }

    pub fn is_bye(self) -> bool {
        self == Slot::Bye
    }

    pub fn team(self) -> Option<TeamId> {
        match self {
            Slot::Team(id) => Some(id),
            Slot::Bye | Slot::Open => None,
        }
    }
}

/// Which side of a game a slot sits on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSide {
    A,
    B,
}

impl SlotSide {
    /// Side fed by match `match_index` when two matches merge into one: even → A, odd → B.
    pub fn for_match(match_index: usize) -> Self {
        if match_index % 2 == 0 {
            SlotSide::A
        } else {
            SlotSide::B
        }
    }
}

/// Sub-bracket a game belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSide {
    Winners,
    Losers,
    /// Grand final (round 1) and grand final reset (round 2).
    Final,
}

/// Lifecycle of a single game. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Queued,
    Warmup,
    Live,
    /// Extra time after regulation; `Game::overtime` flips once flex time runs out too.
    Flex,
    Paused,
    Finished,
}

/// Organizer action on a game's clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameAction {
    /// Queued → Warmup.
    Start,
    Pause,
    Resume,
    /// Skip ahead: Warmup → Live → Flex.
    Advance,
}

/// Phase a paused game returns to, with the time already spent in it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PausedPhase {
    pub phase: GameStatus,
    pub elapsed_seconds: i64,
}

/// Outcome of a finished game. Names are frozen so history survives team removal.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// A team, or `Bye` when a bye-vs-bye game was resolved.
    pub winner: Slot,
    pub score_a: u32,
    pub score_b: u32,
    pub completed_at: DateTime<Utc>,
    pub team_a_name: String,
    pub team_b_name: String,
}

/// A single game in one of the sub-brackets.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: GameId,
    pub bracket: BracketSide,
    /// 1-indexed round within `bracket`.
    pub round: u32,
    /// 0-indexed position within the round.
    pub match_number: u32,
    pub team_a: Slot,
    pub team_b: Slot,
    pub status: GameStatus,
    /// Present iff `status == Finished`.
    pub result: Option<GameResult>,
    #[serde(default)]
    pub overtime: bool,
    #[serde(default)]
    pub phase_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paused: Option<PausedPhase>,
}

impl GameMatch {
    pub fn new(bracket: BracketSide, round: u32, match_number: u32, team_a: Slot, team_b: Slot) -> Self {
        Self {
            id: Uuid::new_v4(),
            bracket,
            round,
            match_number,
            team_a,
            team_b,
            status: GameStatus::Queued,
            result: None,
            overtime: false,
            phase_started_at: None,
            paused: None,
        }
    }

    /// A queued game with both sides still to be determined.
    pub fn open(bracket: BracketSide, round: u32, match_number: u32) -> Self {
        Self::new(bracket, round, match_number, Slot::Open, Slot::Open)
    }

    pub fn slot(&self, side: SlotSide) -> Slot {
        match side {
            SlotSide::A => self.team_a,
            SlotSide::B => self.team_b,
        }
    }

    pub fn slot_mut(&mut self, side: SlotSide) -> &mut Slot {
        match side {
            SlotSide::A => &mut self.team_a,
            SlotSide::B => &mut self.team_b,
        }
    }

    pub fn slots(&self) -> [Slot; 2] {
        [self.team_a, self.team_b]
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn has_open_slot(&self) -> bool {
        self.team_a.is_open() || self.team_b.is_open()
    }

    pub fn has_bye(&self) -> bool {
        self.team_a.is_bye() || self.team_b.is_bye()
    }

    /// Both sides are real teams, so the game can be put on a court.
    pub fn is_playable(&self) -> bool {
        self.team_a.team().is_some() && self.team_b.team().is_some()
    }

    /// Started but not finished.
    pub fn is_in_progress(&self) -> bool {
        !matches!(self.status, GameStatus::Queued | GameStatus::Finished)
    }

    pub fn winner(&self) -> Option<Slot> {
        self.result.as_ref().map(|r| r.winner)
    }

    /// Side holding `slot`, preferring A when both match.
    pub fn side_of(&self, slot: Slot) -> Option<SlotSide> {
        if self.team_a == slot {
            Some(SlotSide::A)
        } else if self.team_b == slot {
            Some(SlotSide::B)
        } else {
            None
        }
    }
}
