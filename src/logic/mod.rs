//! Bracket engine: seeding, construction, advancement, bye resolution, and game clocks.

mod advancement;
mod builder;
mod byes;
mod cascade;
mod clock;
mod finalizer;
mod play;
mod seeding;
mod setup;
mod upload;

pub use advancement::advance;
pub use builder::{
    build_bracket, build_bracket_with_rng, losers_round_count, losers_winner_target,
    target_losers_round, winners_loser_target, winners_winner_target, FeedTarget,
};
pub use byes::{resolve_byes, MAX_BYE_PASSES};
pub use cascade::finish_game;
pub use clock::{advance_phase, apply_action, pause, resume, start_game, tick};
pub use finalizer::finalize_losers_round;
pub use play::{apply_game_action, next_up, record_game_result, set_game_slot, tick_games};
pub use seeding::{next_power_of_two, place, redistribute_byes, snake_order, standard_order};
pub use setup::{start_tournament, start_tournament_with_rng, MIN_TEAMS};
pub use upload::import_seeds_csv;
