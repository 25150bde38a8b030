//! Automatic resolution of games containing a bye.

use crate::logic::cascade::{record_result, settle};
use crate::models::{
    Bracket, BracketEvent, BracketSide, GameId, GameLocation, GameMatch, GameStatus, Slot, Team,
};
use chrono::{DateTime, Utc};

/// Upper bound on resolution passes; the loop gives up quietly past this.
pub const MAX_BYE_PASSES: usize = 50;

/// Finish every bye game that is ready, repeating until a pass finds nothing.
///
/// A game is ready when it is queued, has no open slot, has at least one bye, and sits in
/// the winners bracket or in a losers round whose previous round is fully finished. The
/// real team (or the surviving bye, for bye vs bye) wins 1-0 / 0-0.
pub fn resolve_byes(bracket: &mut Bracket, teams: &[Team], now: DateTime<Utc>) -> Vec<BracketEvent> {
    let mut events = Vec::new();
    for _ in 0..MAX_BYE_PASSES {
        let ready: Vec<GameId> = bracket
            .games()
            .filter(|g| is_ready(bracket, g))
            .map(|g| g.id)
            .collect();
        if ready.is_empty() {
            return events;
        }
        for id in ready {
            // an earlier resolution in this pass may have changed the game
            let still_ready = bracket.game(id).is_some_and(|g| is_ready(bracket, g));
            if !still_ready {
                continue;
            }
            let Some(game) = bracket.game_mut(id) else {
                continue;
            };
            let (winner, score_a, score_b) = match (game.team_a, game.team_b) {
                (Slot::Team(_), _) => (game.team_a, 1, 0),
                (_, Slot::Team(_)) => (game.team_b, 0, 1),
                _ => (Slot::Bye, 0, 0),
            };
            record_result(game, winner, score_a, score_b, teams, now);
            log::debug!("Resolved bye game {:?} round {} match {}", game.bracket, game.round, game.match_number);
            events.push(BracketEvent::ByeResolved { game: id, winner });
            events.extend(settle(bracket, id, winner));
        }
    }
    log::warn!("Bye resolution stopped after {} passes", MAX_BYE_PASSES);
    events
}

fn is_ready(bracket: &Bracket, game: &GameMatch) -> bool {
    if game.status != GameStatus::Queued || game.has_open_slot() || !game.has_bye() {
        return false;
    }
    match game.bracket {
        BracketSide::Winners => true,
        // the previous losers round must be done so the losers side never runs ahead
        BracketSide::Losers => match bracket.locate(game.id) {
            Some(GameLocation { round_index: 0, .. }) => true,
            Some(loc) => bracket.round_finished(BracketSide::Losers, loc.round_index - 1),
            None => false,
        },
        BracketSide::Final => false,
    }
}
