//! Elimination tournament organizer: library with models and the bracket engine.

pub mod logic;
pub mod models;

pub use logic::{
    advance, apply_game_action, build_bracket, build_bracket_with_rng, finalize_losers_round,
    finish_game, import_seeds_csv, next_power_of_two, next_up, record_game_result, resolve_byes,
    set_game_slot, start_tournament, start_tournament_with_rng, target_losers_round, tick_games,
};
pub use models::{
    Bracket, BracketEvent, BracketFormat, BracketSide, GameAction, GameId, GameMatch, GameResult,
    GameStatus, OpenSlotPolicy, SeedingMode, SeedingType, Settings, Slot, SlotSide, Team, TeamId,
    Tournament, TournamentError, TournamentId, TournamentState,
};
