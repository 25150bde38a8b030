//! Writing a finished game's winner, and in double elimination its loser, downstream.
//!
//! Targets are overwritten rather than appended, so advancing the same result twice leaves
//! the bracket unchanged. Missing games and unknown winners are skipped, never errors.

use crate::logic::builder::{losers_winner_target, winners_loser_target, winners_winner_target, FeedTarget};
use crate::models::{
    round_index, Bracket, BracketEvent, BracketSide, GameId, GameLocation, GameStatus, Slot, SlotSide,
    TeamId,
};

/// Advance `winner` of game `game_id` into the next slot(s).
pub fn advance(bracket: &mut Bracket, game_id: GameId, winner: Slot) -> Vec<BracketEvent> {
    let mut events = Vec::new();
    let Some(loc) = bracket.locate(game_id) else {
        log::debug!("Nothing to advance: game {} is not in the bracket", game_id);
        return events;
    };
    let Some(game) = bracket.game_at(loc) else {
        return events;
    };
    if winner.is_open() || game.side_of(winner).is_none() {
        log::debug!("Nothing to advance: {:?} did not play in game {}", winner, game_id);
        return events;
    }

    let round = game.round;
    let match_index = game.match_number as usize;
    // a bye never loses in a way that routes anywhere
    let loser = game
        .slots()
        .into_iter()
        .filter_map(Slot::team)
        .find(|&id| Slot::Team(id) != winner);
    let entered_via_b = game.team_b == winner && game.team_a != winner;
    let total_winners = bracket.winners.len() as u32;
    let total_losers = bracket.losers.len() as u32;

    match loc.side {
        BracketSide::Winners => {
            match winners_winner_target(round, match_index, total_winners) {
                Some(target) => {
                    if let Some(to) = write_slot(bracket, BracketSide::Winners, target, winner) {
                        events.push(BracketEvent::TeamAdvanced {
                            from: game_id,
                            to,
                            side: target.side,
                            slot: winner,
                        });
                    }
                }
                None => {
                    if let Some(to) = write_grand_final(bracket, SlotSide::A, winner) {
                        events.push(BracketEvent::TeamAdvanced {
                            from: game_id,
                            to,
                            side: SlotSide::A,
                            slot: winner,
                        });
                    }
                }
            }
            if let Some(team) = loser.filter(|_| bracket.is_double_elimination()) {
                route_loser(bracket, game_id, round, match_index, team, &mut events);
            }
        }
        BracketSide::Losers => {
            let (to, side) = match losers_winner_target(round, match_index, total_losers) {
                Some(target) => (write_slot(bracket, BracketSide::Losers, target, winner), target.side),
                None => (write_grand_final(bracket, SlotSide::B, winner), SlotSide::B),
            };
            if let Some(to) = to {
                events.push(BracketEvent::TeamAdvanced {
                    from: game_id,
                    to,
                    side,
                    slot: winner,
                });
            }
        }
        BracketSide::Final => {
            if loc.round_index == 0 && entered_via_b {
                activate_reset(bracket, winner, &mut events);
            }
        }
    }
    events
}

/// Drop a winners-bracket loser into the losers bracket, or straight into the grand final
/// when the bracket has no losers rounds.
fn route_loser(
    bracket: &mut Bracket,
    from: GameId,
    round: u32,
    match_index: usize,
    team: TeamId,
    events: &mut Vec<BracketEvent>,
) {
    let total_winners = bracket.winners.len() as u32;
    let (to, side) = match winners_loser_target(round, match_index, total_winners) {
        Some(target) => (
            write_slot(bracket, BracketSide::Losers, target, Slot::Team(team)),
            target.side,
        ),
        None if bracket.losers.is_empty() => (
            write_grand_final(bracket, SlotSide::B, Slot::Team(team)),
            SlotSide::B,
        ),
        None => (None, SlotSide::B),
    };
    if let Some(to) = to {
        events.push(BracketEvent::LoserRouted { from, to, side, team });
    }
}

/// Overwrite one downstream slot. Finished games are never rewritten.
fn write_slot(bracket: &mut Bracket, side: BracketSide, target: FeedTarget, slot: Slot) -> Option<GameId> {
    let loc = GameLocation {
        side,
        round_index: round_index(target.round),
        match_index: target.match_index,
    };
    let Some(game) = bracket.game_at_mut(loc) else {
        log::debug!("No {:?} game at round {} match {}", side, target.round, target.match_index);
        return None;
    };
    if game.is_finished() {
        return None;
    }
    *game.slot_mut(target.side) = slot;
    log::debug!(
        "{:?} -> {:?} round {} match {} slot {:?}",
        slot,
        side,
        target.round,
        target.match_index,
        target.side
    );
    Some(game.id)
}

fn write_grand_final(bracket: &mut Bracket, side: SlotSide, slot: Slot) -> Option<GameId> {
    let game = bracket.grand_final.as_mut().filter(|g| !g.is_finished())?;
    *game.slot_mut(side) = slot;
    log::debug!("{:?} -> grand final slot {:?}", slot, side);
    Some(game.id)
}

/// The losers-bracket champion won the grand final: both champions meet again.
fn activate_reset(bracket: &mut Bracket, winner: Slot, events: &mut Vec<BracketEvent>) {
    let Some(winners_champion) = bracket.grand_final.as_ref().map(|g| g.team_a) else {
        return;
    };
    let Some(reset) = bracket.grand_final_reset.as_mut().filter(|g| !g.is_finished()) else {
        return;
    };
    reset.team_a = winners_champion;
    reset.team_b = winner;
    reset.status = GameStatus::Queued;
    log::info!("Grand final reset activated: {:?} vs {:?}", winners_champion, winner);
    events.push(BracketEvent::ResetActivated { game: reset.id });
}
