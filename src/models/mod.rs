//! Data structures for elimination tournaments: teams, games, brackets, tournament state.

mod bracket;
mod event;
mod game;
mod settings;
mod team;
mod tournament;

pub use bracket::{round_index, round_number, Bracket, BracketFormat, GameLocation, Round};
pub use event::BracketEvent;
pub use game::{
    BracketSide, GameAction, GameId, GameMatch, GameResult, GameStatus, PausedPhase, Slot, SlotSide,
    BYE_NAME,
};
pub use settings::{OpenSlotPolicy, SeedingMode, SeedingType, Settings};
pub use team::{team_name, Team, TeamId, UNKNOWN_TEAM_NAME};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
