//! Integration tests for double elimination: losers bracket, grand final, reset.

use chrono::{DateTime, TimeZone, Utc};
use elimination_tournament::{
    build_bracket_with_rng, finish_game, resolve_byes, Bracket, BracketEvent, GameId, GameStatus,
    SeedingMode, SeedingType, Settings, Slot, SlotSide, Team,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap()
}

fn double_elimination(roster: &[Team], mode: SeedingMode) -> Bracket {
    let mut bracket = build_bracket_with_rng(
        roster,
        &Settings::double_elimination(),
        mode,
        SeedingType::Standard,
        &mut StdRng::seed_from_u64(3),
    );
    resolve_byes(&mut bracket, roster, now());
    bracket
}

fn play(bracket: &mut Bracket, teams: &[Team], id: GameId, side: SlotSide) -> Vec<BracketEvent> {
    let winner = bracket.game(id).unwrap().slot(side).team().unwrap();
    finish_game(bracket, teams, id, winner, 1, 0, now()).unwrap()
}

/// Play the first playable game with slot A winning until nothing is left to play.
fn play_out(bracket: &mut Bracket, teams: &[Team]) -> usize {
    let mut played = 0;
    while let Some(id) = bracket.playable_games().first().map(|g| g.id) {
        play(bracket, teams, id, SlotSide::A);
        played += 1;
    }
    played
}

/// Four teams, everything up to (not including) the grand final played with slot A winning.
fn four_team_grand_final() -> (Vec<Team>, Bracket) {
    let roster: Vec<Team> = (0..4).map(|i| Team::new(format!("T{i}"))).collect();
    let mut bracket = double_elimination(&roster, SeedingMode::Off);
    for id in [bracket.winners[0][0].id, bracket.winners[0][1].id] {
        play(&mut bracket, &roster, id, SlotSide::A);
    }
    let l1 = bracket.losers[0][0].id;
    play(&mut bracket, &roster, l1, SlotSide::A);
    let w2 = bracket.winners[1][0].id;
    play(&mut bracket, &roster, w2, SlotSide::A);
    let l2 = bracket.losers[1][0].id;
    play(&mut bracket, &roster, l2, SlotSide::A);
    (roster, bracket)
}

#[test]
fn grand_final_gets_both_champions() {
    let (_, bracket) = four_team_grand_final();
    let w2 = &bracket.winners[1][0];
    let l2 = &bracket.losers[1][0];
    let gf = bracket.grand_final.as_ref().unwrap();
    assert_eq!(gf.team_a, w2.winner().unwrap());
    assert_eq!(gf.team_b, l2.winner().unwrap());
    // the winners final loser entered the losers final through slot B
    assert_eq!(l2.team_b, w2.team_b);
    assert!(bracket.champion().is_none());
}

#[test]
fn losers_champion_winning_grand_final_activates_reset() {
    let (roster, mut bracket) = four_team_grand_final();
    let gf = bracket.grand_final.clone().unwrap();
    let events = play(&mut bracket, &roster, gf.id, SlotSide::B);

    let reset = bracket.grand_final_reset.clone().unwrap();
    assert!(events.contains(&BracketEvent::ResetActivated { game: reset.id }));
    assert_eq!(reset.team_a, gf.team_a);
    assert_eq!(reset.team_b, gf.team_b);
    assert_eq!(reset.status, GameStatus::Queued);
    assert!(reset.is_playable());
    assert!(bracket.champion().is_none());

    let events = play(&mut bracket, &roster, reset.id, SlotSide::A);
    let champion = gf.team_a.team().unwrap();
    assert_eq!(bracket.champion(), Some(champion));
    assert!(events.contains(&BracketEvent::ChampionDecided { team: champion }));
}

#[test]
fn winners_champion_winning_grand_final_ends_tournament() {
    let (roster, mut bracket) = four_team_grand_final();
    let gf = bracket.grand_final.clone().unwrap();
    let events = play(&mut bracket, &roster, gf.id, SlotSide::A);

    let reset = bracket.grand_final_reset.as_ref().unwrap();
    assert_eq!(reset.slots(), [Slot::Open, Slot::Open]);
    assert_eq!(reset.status, GameStatus::Queued);
    assert!(reset.result.is_none());
    assert!(!events.iter().any(|e| matches!(e, BracketEvent::ResetActivated { .. })));
    assert_eq!(bracket.champion(), gf.team_a.team());
    assert!(bracket.playable_games().is_empty());
}

#[test]
fn eight_teams_play_to_completion() {
    let roster: Vec<Team> = (0..8).map(|i| Team::new(format!("T{i}"))).collect();
    let mut bracket = double_elimination(&roster, SeedingMode::Off);
    let played = play_out(&mut bracket, &roster);
    // every team but the champion loses twice; slot A always wins so there is no reset
    assert_eq!(played, 14);
    let champion = bracket.champion().unwrap();
    assert_eq!(Some(champion), bracket.winners[2][0].winner().unwrap().team());
    let reset = bracket.grand_final_reset.as_ref().unwrap().id;
    assert!(bracket.games().all(|g| g.is_finished() || g.id == reset));
}

#[test]
fn two_teams_drop_loser_straight_into_grand_final() {
    let roster: Vec<Team> = (0..2).map(|i| Team::new(format!("T{i}"))).collect();
    let mut bracket = double_elimination(&roster, SeedingMode::Off);
    let id = bracket.winners[0][0].id;
    let events = play(&mut bracket, &roster, id, SlotSide::A);
    let game = bracket.game(id).unwrap().clone();
    let gf = bracket.grand_final.as_ref().unwrap();
    assert_eq!(gf.team_a, game.team_a);
    assert_eq!(gf.team_b, game.team_b);
    assert!(events.iter().any(|e| matches!(e, BracketEvent::LoserRouted { side: SlotSide::B, .. })));
}

#[test]
fn five_seeded_teams_close_ghost_slots_with_byes() {
    let roster: Vec<Team> = (1..=5).map(|s| Team::seeded(format!("S{s}"), s)).collect();
    let mut bracket = double_elimination(&roster, SeedingMode::Manual);

    // seeds 1, 2 and 3 start against byes and are through already
    let first = &bracket.winners[0];
    assert!(first[0].is_finished() && first[2].is_finished() && first[3].is_finished());
    assert!(!first[1].is_finished());
    // no winners-round-1 loser has materialized for losers round 1 yet
    assert!(bracket.losers[0].iter().all(|g| g.has_open_slot() && !g.is_finished()));

    let pending = bracket.winners[0][1].id;
    let events = play(&mut bracket, &roster, pending, SlotSide::A);
    let closed = events
        .iter()
        .filter(|e| matches!(e, BracketEvent::SlotClosed { .. }))
        .count();
    assert_eq!(closed, 3);

    // S5 only had a ghost opponent; the other game was bye vs bye
    let l1 = &bracket.losers[0];
    assert_eq!(l1[0].winner(), Some(Slot::Team(roster[4].id)));
    assert_eq!(l1[1].winner(), Some(Slot::Bye));
    assert_eq!(l1[1].result.as_ref().unwrap().team_a_name, "BYE");
    assert_eq!(bracket.losers[1][1].team_a, Slot::Bye);

    play_out(&mut bracket, &roster);
    assert_eq!(bracket.champion(), Some(roster[0].id));
}
