//! In-progress phase: results, manual slot edits, and game clocks.

use crate::logic::byes::resolve_byes;
use crate::logic::cascade::finish_game;
use crate::logic::clock;
use crate::models::{
    team_name, Bracket, BracketEvent, GameAction, GameId, GameMatch, Slot, SlotSide, TeamId,
    Tournament, TournamentError, TournamentState,
};
use chrono::{DateTime, Utc};

fn bracket_mut(tournament: &mut Tournament) -> Result<&mut Bracket, TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    tournament.bracket.as_mut().ok_or(TournamentError::InvalidState)
}

/// Record a game result and run the cascade. Completes the tournament once a champion is known.
pub fn record_game_result(
    tournament: &mut Tournament,
    game_id: GameId,
    winner: TeamId,
    score_a: u32,
    score_b: u32,
) -> Result<Vec<BracketEvent>, TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    let teams = &tournament.teams;
    let bracket = tournament.bracket.as_mut().ok_or(TournamentError::InvalidState)?;
    let mut events = finish_game(bracket, teams, game_id, winner, score_a, score_b, Utc::now())?;
    complete_if_decided(tournament, &mut events);
    Ok(events)
}

/// Move to `Completed` once the bracket has a champion, announcing it if the cascade did not.
fn complete_if_decided(tournament: &mut Tournament, events: &mut Vec<BracketEvent>) {
    let Some(team) = tournament.bracket.as_ref().and_then(Bracket::champion) else {
        return;
    };
    let announced = events
        .iter()
        .any(|e| matches!(e, BracketEvent::ChampionDecided { .. }));
    if !announced {
        log::info!("Champion decided: {}", team_name(&tournament.teams, team));
        events.push(BracketEvent::ChampionDecided { team });
    }
    tournament.state = TournamentState::Completed;
}

/// Manually set one slot of a game that has not started yet, then resolve any bye it exposes.
pub fn set_game_slot(
    tournament: &mut Tournament,
    game_id: GameId,
    side: SlotSide,
    slot: Slot,
) -> Result<Vec<BracketEvent>, TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    if let Slot::Team(team_id) = slot {
        if tournament.get_team(team_id).is_none() {
            return Err(TournamentError::TeamNotFound(team_id));
        }
    }
    let teams = &tournament.teams;
    let bracket = tournament.bracket.as_mut().ok_or(TournamentError::InvalidState)?;
    let game = bracket
        .game_mut(game_id)
        .ok_or(TournamentError::GameNotFound(game_id))?;
    if game.is_in_progress() || game.is_finished() {
        return Err(TournamentError::SlotNotEditable(game_id));
    }
    *game.slot_mut(side) = slot;
    log::info!("Slot {:?} of game {} set to {:?}", side, game_id, slot);
    let mut events = resolve_byes(bracket, teams, Utc::now());
    complete_if_decided(tournament, &mut events);
    Ok(events)
}

/// Apply a clock action (start, pause, resume, advance) to one game.
pub fn apply_game_action(
    tournament: &mut Tournament,
    game_id: GameId,
    action: GameAction,
    now: DateTime<Utc>,
) -> Result<(), TournamentError> {
    let game = bracket_mut(tournament)?
        .game_mut(game_id)
        .ok_or(TournamentError::GameNotFound(game_id))?;
    clock::apply_action(game, action, now)
}

/// Advance every running game's clock. Returns how many games changed phase.
pub fn tick_games(tournament: &mut Tournament, now: DateTime<Utc>) -> usize {
    let settings = tournament.settings.clone();
    let Some(bracket) = tournament.bracket.as_mut() else {
        return 0;
    };
    let mut changed = 0;
    for game in bracket
        .winners
        .iter_mut()
        .chain(bracket.losers.iter_mut())
        .flatten()
        .chain(bracket.grand_final.iter_mut())
        .chain(bracket.grand_final_reset.iter_mut())
    {
        if clock::tick(game, &settings, now) {
            changed += 1;
        }
    }
    changed
}

/// The next playable games, one per court.
pub fn next_up(tournament: &Tournament) -> Vec<&GameMatch> {
    let Some(bracket) = tournament.bracket.as_ref() else {
        return Vec::new();
    };
    bracket
        .playable_games()
        .into_iter()
        .take(tournament.settings.courts as usize)
        .collect()
}
