//! Bracket construction and the fixed feed topology shared with advancement.
//!
//! Double elimination uses `2 * (W - 1)` losers rounds for `W` winners rounds. Odd losers
//! rounds are played among losers-bracket survivors (round 1 among winners-round-1 losers);
//! even losers rounds take the previous round's winner in slot A and a team dropping out of
//! the winners bracket in slot B. The last losers round is the losers final.

use crate::logic::seeding::{filler, has_bye_pair, next_power_of_two, place, redistribute_byes};
use crate::models::{
    round_number, Bracket, BracketFormat, BracketSide, GameMatch, OpenSlotPolicy, Round,
    SeedingMode, SeedingType, Settings, Slot, SlotSide, Team,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// A downstream slot: 1-indexed round, match index within the round, and side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeedTarget {
    pub round: u32,
    pub match_index: usize,
    pub side: SlotSide,
}

/// Losers round (1-indexed) that receives the losers of `winners_round`, or `None` when
/// there is no losers round and the loser drops straight into the grand final.
pub fn target_losers_round(winners_round: u32, total_winners_rounds: u32) -> Option<u32> {
    if total_winners_rounds < 2 || winners_round == 0 || winners_round > total_winners_rounds {
        return None;
    }
    if winners_round == 1 {
        Some(1)
    } else {
        Some(2 * (winners_round - 1))
    }
}

pub fn losers_round_count(total_winners_rounds: u32) -> u32 {
    2 * total_winners_rounds.saturating_sub(1)
}

/// Where the winner of a winners-bracket game goes; `None` from the final round.
pub fn winners_winner_target(round: u32, match_index: usize, total_winners_rounds: u32) -> Option<FeedTarget> {
    if round >= total_winners_rounds {
        return None;
    }
    Some(FeedTarget {
        round: round + 1,
        match_index: match_index / 2,
        side: SlotSide::for_match(match_index),
    })
}

/// Where the loser of a winners-bracket game drops into the losers bracket.
pub fn winners_loser_target(round: u32, match_index: usize, total_winners_rounds: u32) -> Option<FeedTarget> {
    let target = target_losers_round(round, total_winners_rounds)?;
    if round == 1 {
        Some(FeedTarget {
            round: target,
            match_index: match_index / 2,
            side: SlotSide::for_match(match_index),
        })
    } else {
        // slot A belongs to the previous losers round's winner
        Some(FeedTarget {
            round: target,
            match_index,
            side: SlotSide::B,
        })
    }
}

/// Where the winner of a losers-bracket game goes; `None` from the losers final.
pub fn losers_winner_target(round: u32, match_index: usize, total_losers_rounds: u32) -> Option<FeedTarget> {
    if round >= total_losers_rounds {
        return None;
    }
    if round % 2 == 1 {
        Some(FeedTarget {
            round: round + 1,
            match_index,
            side: SlotSide::A,
        })
    } else {
        Some(FeedTarget {
            round: round + 1,
            match_index: match_index / 2,
            side: SlotSide::for_match(match_index),
        })
    }
}

/// Build a bracket from the roster, shuffling with the thread-local RNG for unseeded modes.
pub fn build_bracket(
    teams: &[Team],
    settings: &Settings,
    seeding_mode: SeedingMode,
    seeding_type: SeedingType,
) -> Bracket {
    build_bracket_with_rng(teams, settings, seeding_mode, seeding_type, &mut rand::thread_rng())
}

/// Build a bracket from the roster using `rng` for unseeded modes.
pub fn build_bracket_with_rng<R: Rng + ?Sized>(
    teams: &[Team],
    settings: &Settings,
    seeding_mode: SeedingMode,
    seeding_type: SeedingType,
    rng: &mut R,
) -> Bracket {
    let bracket_size = next_power_of_two(teams.len());
    let policy = settings.open_slot_policy;

    let mut slots = if seeding_mode.is_seeded() {
        place(teams, bracket_size, seeding_type, policy)
    } else {
        let mut shuffled = teams.to_vec();
        shuffled.shuffle(rng);
        let mut slots: Vec<Slot> = shuffled.iter().map(|t| Slot::Team(t.id)).collect();
        slots.resize(bracket_size, filler(policy));
        slots
    };
    if policy == OpenSlotPolicy::Bye && (!seeding_mode.is_seeded() || has_bye_pair(&slots)) {
        slots = redistribute_byes(&slots);
    }

    let winners = winners_rounds(&slots);
    let total_winners = winners.len() as u32;
    let mut bracket = Bracket {
        winners,
        ..Bracket::default()
    };

    if settings.include_losers_bracket && total_winners >= 1 {
        bracket.format = BracketFormat::DoubleElimination;
        bracket.losers = losers_rounds(&bracket.winners);
        bracket.grand_final = Some(GameMatch::open(BracketSide::Final, 1, 0));
        bracket.grand_final_reset = Some(GameMatch::open(BracketSide::Final, 2, 0));
    }

    log::info!(
        "Built {:?} bracket: {} teams, size {}, {} winners rounds, {} losers rounds",
        bracket.format,
        teams.len(),
        bracket_size,
        bracket.winners.len(),
        bracket.losers.len()
    );
    bracket
}

/// Winners rounds by repeated halving. Only round 1 starts with known slots.
fn winners_rounds(slots: &[Slot]) -> Vec<Round> {
    let mut rounds: Vec<Round> = Vec::new();
    let first: Round = slots
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| GameMatch::new(BracketSide::Winners, 1, i as u32, pair[0], pair[1]))
        .collect();
    if first.is_empty() {
        return rounds;
    }
    let mut games = first.len();
    rounds.push(first);
    while games > 1 {
        games = games.div_ceil(2);
        let round = round_number(rounds.len());
        rounds.push(
            (0..games)
                .map(|i| GameMatch::open(BracketSide::Winners, round, i as u32))
                .collect(),
        );
    }
    rounds
}

/// Empty losers rounds sized from the winners rounds that feed them.
fn losers_rounds(winners: &[Round]) -> Vec<Round> {
    let total_winners = winners.len() as u32;
    let count = losers_round_count(total_winners) as usize;
    let mut sizes = vec![0usize; count];
    for (index, round) in winners.iter().enumerate() {
        let winners_round = round_number(index);
        let Some(target) = target_losers_round(winners_round, total_winners) else {
            continue;
        };
        sizes[target as usize - 1] = if winners_round == 1 {
            round.len() / 2
        } else {
            round.len()
        };
    }
    // odd rounds after the first consolidate to the size of the drop-in round they feed
    for i in (3..count).step_by(2) {
        sizes[i - 1] = sizes[i];
    }
    sizes
        .into_iter()
        .enumerate()
        .map(|(index, games)| {
            let round = round_number(index);
            (0..games)
                .map(|i| GameMatch::open(BracketSide::Losers, round, i as u32))
                .collect()
        })
        .collect()
}
