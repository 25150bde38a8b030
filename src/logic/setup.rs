//! Setup phase: start tournament (transition from Setup to InProgress).

use crate::logic::builder::build_bracket_with_rng;
use crate::logic::byes::resolve_byes;
use crate::models::{BracketEvent, Tournament, TournamentError, TournamentState};
use chrono::Utc;
use rand::Rng;

/// Minimum roster size for a bracket.
pub const MIN_TEAMS: usize = 2;

/// Start the tournament: build the bracket and resolve every bye that is already decided.
pub fn start_tournament(tournament: &mut Tournament) -> Result<Vec<BracketEvent>, TournamentError> {
    start_tournament_with_rng(tournament, &mut rand::thread_rng())
}

/// Like [`start_tournament`], shuffling unseeded rosters with `rng`.
pub fn start_tournament_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<Vec<BracketEvent>, TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.teams.len() < MIN_TEAMS {
        return Err(TournamentError::NotEnoughTeams { required: MIN_TEAMS });
    }
    let mut bracket = build_bracket_with_rng(
        &tournament.teams,
        &tournament.settings,
        tournament.seeding_mode,
        tournament.seeding_type,
        rng,
    );
    let events = resolve_byes(&mut bracket, &tournament.teams, Utc::now());
    tournament.bracket = Some(bracket);
    tournament.state = TournamentState::InProgress;
    Ok(events)
}
