//! Finishing a game and everything that follows from it.
//!
//! One call runs the whole cascade to completion: record the result, advance, close
//! losers slots once a winners round is done, then drain bye resolution. Nothing here
//! recurses into the cascade, so two cascades can never overlap.

use crate::logic::advancement::advance;
use crate::logic::byes::resolve_byes;
use crate::logic::finalizer::finalize_losers_round;
use crate::models::{
    team_name, Bracket, BracketEvent, BracketSide, GameId, GameMatch, GameResult, GameStatus, Slot,
    Team, TeamId, TournamentError, BYE_NAME,
};
use chrono::{DateTime, Utc};

/// Finish `game_id` with `winner` and run the cascade. Returns every event it produced.
pub fn finish_game(
    bracket: &mut Bracket,
    teams: &[Team],
    game_id: GameId,
    winner: TeamId,
    score_a: u32,
    score_b: u32,
    now: DateTime<Utc>,
) -> Result<Vec<BracketEvent>, TournamentError> {
    let game = bracket
        .game_mut(game_id)
        .ok_or(TournamentError::GameNotFound(game_id))?;
    if game.is_finished() {
        return Err(TournamentError::GameAlreadyFinished(game_id));
    }
    // bye games are only ever finished by the resolver, which respects losers-round order
    if !game.is_playable() {
        return Err(TournamentError::GameNotPlayable(game_id));
    }
    let winner = Slot::Team(winner);
    if game.side_of(winner).is_none() {
        return Err(TournamentError::WinnerNotInGame(game_id));
    }

    record_result(game, winner, score_a, score_b, teams, now);
    let mut events = vec![BracketEvent::GameFinished {
        game: game_id,
        winner,
    }];
    events.extend(settle(bracket, game_id, winner));
    events.extend(resolve_byes(bracket, teams, now));

    if let Some(team) = bracket.champion() {
        log::info!("Champion decided: {}", team_name(teams, team));
        events.push(BracketEvent::ChampionDecided { team });
    }
    Ok(events)
}

/// Store the result on the game, freezing both display names, and mark it finished.
pub(crate) fn record_result(
    game: &mut GameMatch,
    winner: Slot,
    score_a: u32,
    score_b: u32,
    teams: &[Team],
    now: DateTime<Utc>,
) {
    game.result = Some(GameResult {
        winner,
        score_a,
        score_b,
        completed_at: now,
        team_a_name: slot_name(teams, game.team_a),
        team_b_name: slot_name(teams, game.team_b),
    });
    game.status = GameStatus::Finished;
    game.phase_started_at = None;
    game.paused = None;
}

/// Advance a just-finished game and, if that completed its winners round, close the
/// losers slots the round fed.
pub(crate) fn settle(bracket: &mut Bracket, game_id: GameId, winner: Slot) -> Vec<BracketEvent> {
    let mut events = advance(bracket, game_id, winner);
    let winners_round = bracket
        .game(game_id)
        .filter(|g| g.bracket == BracketSide::Winners)
        .map(|g| g.round);
    if let Some(round) = winners_round {
        events.extend(finalize_losers_round(bracket, round));
    }
    events
}

fn slot_name(teams: &[Team], slot: Slot) -> String {
    match slot {
        Slot::Team(id) => team_name(teams, id),
        Slot::Bye => BYE_NAME.to_string(),
        Slot::Open => String::new(),
    }
}
