//! Closing losers-bracket slots whose winners-bracket feed will never produce a team.

use crate::logic::builder::winners_loser_target;
use crate::models::{round_index, Bracket, BracketEvent, BracketSide, GameLocation, Slot};

/// Once every game of `winners_round` is finished, turn each still-open losers slot that
/// round feeds into a bye.
///
/// Only the losers round given by `target_losers_round` is touched. For winners round 1
/// both sides of a losers-round-1 game can close, so two bye advances feeding the same
/// game produce a bye vs bye rather than a game that never fills.
pub fn finalize_losers_round(bracket: &mut Bracket, winners_round: u32) -> Vec<BracketEvent> {
    let mut events = Vec::new();
    if !bracket.is_double_elimination()
        || !bracket.round_finished(BracketSide::Winners, round_index(winners_round))
    {
        return events;
    }
    let total_winners = bracket.winners.len() as u32;
    let feeders = bracket.winners[round_index(winners_round)].len();

    for match_index in 0..feeders {
        let Some(target) = winners_loser_target(winners_round, match_index, total_winners) else {
            continue;
        };
        let loc = GameLocation {
            side: BracketSide::Losers,
            round_index: round_index(target.round),
            match_index: target.match_index,
        };
        let Some(game) = bracket.game_at_mut(loc) else {
            continue;
        };
        if game.is_finished() || !game.slot(target.side).is_open() {
            continue;
        }
        *game.slot_mut(target.side) = Slot::Bye;
        log::debug!(
            "Closed losers round {} match {} slot {:?} after winners round {}",
            target.round,
            target.match_index,
            target.side,
            winners_round
        );
        events.push(BracketEvent::SlotClosed {
            game: game.id,
            side: target.side,
        });
    }
    if !events.is_empty() {
        log::info!(
            "Winners round {} complete; {} losers slot(s) closed with byes",
            winners_round,
            events.len()
        );
    }
    events
}
