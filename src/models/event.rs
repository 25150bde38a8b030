//! Events emitted by the bracket engine, in the order they happened.

use crate::models::game::{GameId, Slot, SlotSide};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketEvent {
    /// A result was recorded for a game.
    GameFinished { game: GameId, winner: Slot },
    /// A winner (team or bye) was written into a downstream slot.
    TeamAdvanced {
        from: GameId,
        to: GameId,
        side: SlotSide,
        slot: Slot,
    },
    /// A winners-bracket loser dropped into the losers bracket or grand final.
    LoserRouted {
        from: GameId,
        to: GameId,
        side: SlotSide,
        team: TeamId,
    },
    /// An open slot whose feed can no longer produce a team became a bye.
    SlotClosed { game: GameId, side: SlotSide },
    /// A game containing a bye was finished automatically.
    ByeResolved { game: GameId, winner: Slot },
    /// The losers-bracket champion won the grand final; the reset game is now playable.
    ResetActivated { game: GameId },
    ChampionDecided { team: TeamId },
}
