//! Per-game phase clock: Queued → Warmup → Live → Flex, with pause/resume.
//!
//! Independent of bracket topology; finishing a game goes through the cascade instead.

use crate::models::{GameAction, GameMatch, GameStatus, PausedPhase, Settings, TournamentError};
use chrono::{DateTime, Duration, Utc};

/// Apply an organizer action to one game.
pub fn apply_action(game: &mut GameMatch, action: GameAction, now: DateTime<Utc>) -> Result<(), TournamentError> {
    match action {
        GameAction::Start => start_game(game, now),
        GameAction::Pause => pause(game, now),
        GameAction::Resume => resume(game, now),
        GameAction::Advance => advance_phase(game, now),
    }
}

/// Queued → Warmup. Both sides must be real teams.
pub fn start_game(game: &mut GameMatch, now: DateTime<Utc>) -> Result<(), TournamentError> {
    if game.status != GameStatus::Queued {
        return Err(invalid(game, GameAction::Start));
    }
    if !game.is_playable() {
        return Err(TournamentError::GameNotPlayable(game.id));
    }
    enter(game, GameStatus::Warmup, now);
    Ok(())
}

/// Warmup | Live | Flex → Paused, remembering how far into the phase the game was.
pub fn pause(game: &mut GameMatch, now: DateTime<Utc>) -> Result<(), TournamentError> {
    if !matches!(game.status, GameStatus::Warmup | GameStatus::Live | GameStatus::Flex) {
        return Err(invalid(game, GameAction::Pause));
    }
    let elapsed = game
        .phase_started_at
        .map(|started| (now - started).num_seconds().max(0))
        .unwrap_or(0);
    game.paused = Some(PausedPhase {
        phase: game.status,
        elapsed_seconds: elapsed,
    });
    game.status = GameStatus::Paused;
    game.phase_started_at = None;
    Ok(())
}

/// Paused → the phase it paused from, with its elapsed time kept.
pub fn resume(game: &mut GameMatch, now: DateTime<Utc>) -> Result<(), TournamentError> {
    let paused = match (game.status, game.paused) {
        (GameStatus::Paused, Some(paused)) => paused,
        _ => return Err(invalid(game, GameAction::Resume)),
    };
    game.status = paused.phase;
    game.phase_started_at = Some(now - Duration::seconds(paused.elapsed_seconds));
    game.paused = None;
    Ok(())
}

/// Manual skip to the next timed phase.
pub fn advance_phase(game: &mut GameMatch, now: DateTime<Utc>) -> Result<(), TournamentError> {
    match game.status {
        GameStatus::Warmup => enter(game, GameStatus::Live, now),
        GameStatus::Live => enter(game, GameStatus::Flex, now),
        _ => return Err(invalid(game, GameAction::Advance)),
    }
    Ok(())
}

/// Move a running game through every phase whose time is up. Returns whether anything changed.
pub fn tick(game: &mut GameMatch, settings: &Settings, now: DateTime<Utc>) -> bool {
    let mut changed = false;
    loop {
        let Some(started) = game.phase_started_at else {
            return changed;
        };
        let (length, next) = match game.status {
            GameStatus::Warmup => (settings.warmup_minutes, GameStatus::Live),
            GameStatus::Live => (settings.game_minutes, GameStatus::Flex),
            GameStatus::Flex if !game.overtime => (settings.flex_minutes, GameStatus::Flex),
            _ => return changed,
        };
        let ends = started + Duration::minutes(i64::from(length));
        if now < ends {
            return changed;
        }
        if game.status == GameStatus::Flex {
            // overtime runs until someone finishes the game
            game.overtime = true;
            return true;
        }
        game.status = next;
        game.phase_started_at = Some(ends);
        changed = true;
    }
}

fn enter(game: &mut GameMatch, status: GameStatus, now: DateTime<Utc>) {
    game.status = status;
    game.phase_started_at = Some(now);
}

fn invalid(game: &GameMatch, action: GameAction) -> TournamentError {
    TournamentError::InvalidTransition {
        from: game.status,
        action,
    }
}
