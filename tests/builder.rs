//! Integration tests for bracket construction and the losers-bracket topology.

use elimination_tournament::logic::{losers_round_count, winners_loser_target, losers_winner_target};
use elimination_tournament::{
    build_bracket_with_rng, target_losers_round, BracketFormat, BracketSide, GameStatus,
    OpenSlotPolicy, SeedingMode, SeedingType, Settings, Slot, SlotSide, Team,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn winners_rounds_halve_down_to_one_game() {
    for k in 2..=40usize {
        let roster = teams(k);
        let bracket = build_bracket_with_rng(
            &roster,
            &Settings::default(),
            SeedingMode::Off,
            SeedingType::Standard,
            &mut rng(),
        );
        let size = k.next_power_of_two();
        assert_eq!(bracket.winners.len(), size.trailing_zeros() as usize);
        for (i, round) in bracket.winners.iter().enumerate() {
            assert_eq!(round.len(), size / 2usize.pow(i as u32 + 1), "{k} teams, round {i}");
            for (m, game) in round.iter().enumerate() {
                assert_eq!(game.round, i as u32 + 1);
                assert_eq!(game.match_number, m as u32);
                assert_eq!(game.bracket, BracketSide::Winners);
            }
        }
        assert_eq!(bracket.winners.last().unwrap().len(), 1);
        assert!(bracket.losers.is_empty());
        assert!(bracket.grand_final.is_none());
    }
}

#[test]
fn later_rounds_start_open() {
    let bracket = build_bracket_with_rng(
        &teams(8),
        &Settings::default(),
        SeedingMode::Off,
        SeedingType::Standard,
        &mut rng(),
    );
    for round in &bracket.winners[1..] {
        for game in round {
            assert_eq!(game.slots(), [Slot::Open, Slot::Open]);
            assert_eq!(game.status, GameStatus::Queued);
        }
    }
}

#[test]
fn three_teams_get_one_real_game_and_one_bye() {
    let roster = teams(3);
    let bracket = build_bracket_with_rng(
        &roster,
        &Settings::default(),
        SeedingMode::Random,
        SeedingType::Standard,
        &mut rng(),
    );
    assert_eq!(bracket.winners.len(), 2);
    let first = &bracket.winners[0];
    assert_eq!(first.len(), 2);
    let real = first.iter().filter(|g| g.is_playable()).count();
    let with_bye = first
        .iter()
        .filter(|g| g.has_bye() && !(g.team_a.is_bye() && g.team_b.is_bye()))
        .count();
    assert_eq!((real, with_bye), (1, 1));
    // every team appears exactly once
    for team in &roster {
        let seen = first
            .iter()
            .flat_map(|g| g.slots())
            .filter(|s| *s == Slot::Team(team.id))
            .count();
        assert_eq!(seen, 1);
    }
}

#[test]
fn open_policy_leaves_unfilled_positions_open() {
    let settings = Settings {
        open_slot_policy: OpenSlotPolicy::Open,
        ..Settings::default()
    };
    let bracket = build_bracket_with_rng(&teams(5), &settings, SeedingMode::Off, SeedingType::Standard, &mut rng());
    let open = bracket.winners[0]
        .iter()
        .flat_map(|g| g.slots())
        .filter(|s| s.is_open())
        .count();
    assert_eq!(open, 3);
    assert!(!bracket.games().any(|g| g.has_bye()));
}

#[test]
fn seeded_modes_use_team_seeds() {
    let roster: Vec<Team> = (1..=8).map(|s| Team::seeded(format!("S{s}"), s)).collect();
    for mode in [SeedingMode::Manual, SeedingMode::Upload] {
        let bracket = build_bracket_with_rng(&roster, &Settings::default(), mode, SeedingType::Standard, &mut rng());
        let first = &bracket.winners[0];
        assert_eq!(first[0].team_a, Slot::Team(roster[0].id));
        assert_eq!(first[0].team_b, Slot::Team(roster[7].id));
        assert_eq!(first[2].team_a, Slot::Team(roster[1].id));
    }
}

#[test]
fn target_losers_round_mapping() {
    // 8 teams: 3 winners rounds, 4 losers rounds
    assert_eq!(target_losers_round(1, 3), Some(1));
    assert_eq!(target_losers_round(2, 3), Some(2));
    assert_eq!(target_losers_round(3, 3), Some(4));
    assert_eq!(losers_round_count(3), 4);
    // the final winners round always feeds the losers final
    for total in 2..8u32 {
        assert_eq!(target_losers_round(total, total), Some(losers_round_count(total)));
    }
    // two teams: no losers rounds at all
    assert_eq!(target_losers_round(1, 1), None);
    assert_eq!(losers_round_count(1), 0);
}

#[test]
fn loser_drop_slots() {
    let first = winners_loser_target(1, 3, 3).unwrap();
    assert_eq!((first.round, first.match_index, first.side), (1, 1, SlotSide::B));
    let middle = winners_loser_target(2, 1, 3).unwrap();
    assert_eq!((middle.round, middle.match_index, middle.side), (2, 1, SlotSide::B));
    let last = winners_loser_target(3, 0, 3).unwrap();
    assert_eq!((last.round, last.match_index, last.side), (4, 0, SlotSide::B));
}

#[test]
fn losers_winner_slots() {
    // odd rounds feed slot A of the same match, even rounds halve
    let odd = losers_winner_target(1, 1, 4).unwrap();
    assert_eq!((odd.round, odd.match_index, odd.side), (2, 1, SlotSide::A));
    let even = losers_winner_target(2, 1, 4).unwrap();
    assert_eq!((even.round, even.match_index, even.side), (3, 0, SlotSide::B));
    assert!(losers_winner_target(4, 0, 4).is_none());
}

#[test]
fn double_elimination_shape() {
    let bracket = build_bracket_with_rng(
        &teams(8),
        &Settings::double_elimination(),
        SeedingMode::Off,
        SeedingType::Standard,
        &mut rng(),
    );
    assert_eq!(bracket.format, BracketFormat::DoubleElimination);
    let sizes: Vec<usize> = bracket.losers.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 1, 1]);
    for (i, round) in bracket.losers.iter().enumerate() {
        for game in round {
            assert_eq!(game.bracket, BracketSide::Losers);
            assert_eq!(game.round, i as u32 + 1);
            assert!(game.has_open_slot());
        }
    }
    let gf = bracket.grand_final.as_ref().unwrap();
    assert_eq!(gf.slots(), [Slot::Open, Slot::Open]);
    let reset = bracket.grand_final_reset.as_ref().unwrap();
    assert_eq!(reset.slots(), [Slot::Open, Slot::Open]);
    assert_eq!(reset.status, GameStatus::Queued);
    assert!(!reset.is_playable());

    let sixteen = build_bracket_with_rng(
        &teams(16),
        &Settings::double_elimination(),
        SeedingMode::Off,
        SeedingType::Standard,
        &mut rng(),
    );
    let sizes: Vec<usize> = sixteen.losers.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 4, 2, 2, 1, 1]);
}

#[test]
fn two_team_double_elimination_has_no_losers_rounds() {
    let bracket = build_bracket_with_rng(
        &teams(2),
        &Settings::double_elimination(),
        SeedingMode::Off,
        SeedingType::Standard,
        &mut rng(),
    );
    assert_eq!(bracket.winners.len(), 1);
    assert!(bracket.losers.is_empty());
    assert!(bracket.grand_final.is_some());
}
