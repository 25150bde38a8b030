//! Seed placement: which team (or filler) starts in which bracket position.

use crate::models::{OpenSlotPolicy, SeedingType, Slot, Team};

/// Seed ranks per slot for an 8-team snake draw (0 = top seed).
const SNAKE_EIGHT: [usize; 8] = [0, 7, 3, 4, 1, 6, 2, 5];

/// Smallest power of two ≥ `n`; `next_power_of_two(0) == 1`.
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Seed rank sitting in each slot for a classic draw: 1 vs N, 2 vs N-1, with the top two
/// seeds in opposite halves. Built by expanding every seed `s` of the half-size draw into
/// the pair `(s, n - 1 - s)`.
pub fn standard_order(bracket_size: usize) -> Vec<usize> {
    let mut order = vec![0usize];
    while order.len() < bracket_size {
        let n = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, n - 1 - s]).collect();
    }
    order
}

/// Seed rank sitting in each slot for a snake draw.
///
/// Seeds go to the two halves in pairs, alternating which half takes the better seed of
/// the pair (top, bottom, bottom, top, ...). Each half then pairs its best remaining seed
/// with its worst remaining one.
pub fn snake_order(bracket_size: usize) -> Vec<usize> {
    if bracket_size == SNAKE_EIGHT.len() {
        return SNAKE_EIGHT.to_vec();
    }
    if bracket_size < 4 {
        return standard_order(bracket_size);
    }
    let mut top = Vec::with_capacity(bracket_size / 2);
    let mut bottom = Vec::with_capacity(bracket_size / 2);
    for rank in 0..bracket_size {
        let better_of_pair = rank % 2 == 0;
        let pair_goes_top = (rank / 2) % 2 == 0;
        if better_of_pair == pair_goes_top {
            top.push(rank);
        } else {
            bottom.push(rank);
        }
    }
    fold_pairs(&top).into_iter().chain(fold_pairs(&bottom)).collect()
}

fn fold_pairs(ranks: &[usize]) -> Vec<usize> {
    let half = ranks.len() / 2;
    (0..half)
        .flat_map(|i| [ranks[i], ranks[ranks.len() - 1 - i]])
        .collect()
}

/// Place `teams` into `bracket_size` positions by seed. Unseeded teams rank below every
/// seeded team and keep roster order among themselves; positions with no team get the
/// open-slot policy's filler.
pub fn place(
    teams: &[Team],
    bracket_size: usize,
    strategy: SeedingType,
    policy: OpenSlotPolicy,
) -> Vec<Slot> {
    let mut ranked: Vec<&Team> = teams.iter().collect();
    ranked.sort_by_key(|t| (t.seed.is_none(), t.seed));

    let order = match strategy {
        SeedingType::Standard => standard_order(bracket_size),
        SeedingType::Snake => snake_order(bracket_size),
        SeedingType::Bye => {
            log::warn!("bye seeding has no dedicated placement yet; using standard seeding");
            standard_order(bracket_size)
        }
    };

    order
        .into_iter()
        .map(|rank| match ranked.get(rank) {
            Some(team) => Slot::Team(team.id),
            None => filler(policy),
        })
        .collect()
}

/// Slot value for a position no team occupies.
pub fn filler(policy: OpenSlotPolicy) -> Slot {
    match policy {
        OpenSlotPolicy::Bye => Slot::Bye,
        OpenSlotPolicy::Open => Slot::Open,
    }
}

/// Spread byes proportionally across `slots`, keeping the relative order of everything else.
///
/// Walking the positions, a bye is placed whenever the byes placed so far fall behind the
/// ideal `floor((i + 1) * byes / len)`. With fewer byes than half the positions no two byes
/// end up adjacent, so no game starts as bye vs bye.
pub fn redistribute_byes(slots: &[Slot]) -> Vec<Slot> {
    let total = slots.len();
    let byes = slots.iter().filter(|s| s.is_bye()).count();
    if total == 0 || byes == 0 {
        return slots.to_vec();
    }
    let mut others = slots.iter().copied().filter(|s| !s.is_bye());
    let mut placed_byes = 0;
    let mut out = Vec::with_capacity(total);
    for i in 0..total {
        let ideal = (i + 1) * byes / total;
        let next = if placed_byes < ideal {
            None
        } else {
            others.next()
        };
        match next {
            Some(slot) => out.push(slot),
            None => {
                placed_byes += 1;
                out.push(Slot::Bye);
            }
        }
    }
    out
}

/// Whether any first-round pairing in `slots` is bye vs bye.
pub fn has_bye_pair(slots: &[Slot]) -> bool {
    slots.chunks_exact(2).any(|pair| pair[0].is_bye() && pair[1].is_bye())
}
