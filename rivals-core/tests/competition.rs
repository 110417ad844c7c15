use std::collections::HashSet;

use rivals_core::ranking::rank_by;
use rivals_core::{
    GameMode, MatchConfig, OpponentManager, PLAYER_NAME, PlayerSnapshot, Session, SessionConfig,
    WinCondition,
};

fn seeded(n: i64, mode: GameMode, condition: WinCondition, seed: u64) -> OpponentManager {
    OpponentManager::with_config(MatchConfig::new(n, mode, condition).with_seed(seed))
}

#[test]
fn long_match_keeps_roster_and_prices_in_bounds() {
    let config = SessionConfig {
        match_config: MatchConfig::new(3, GameMode::Competitive, WinCondition::NetWorth)
            .with_seed(2024),
        ..SessionConfig::default()
    }
    .seeded_with(7);
    let mut session = Session::with_config(config);

    for _ in 0..10_000 {
        session.step(1.0, None);

        let rivals = session.opponents();
        assert_eq!(rivals.rankings().len(), 3);
        assert_eq!(rivals.bankruptcies, 0);
        for opponent in rivals.opponents() {
            assert!(opponent.money >= 0.0, "{} overspent", opponent.name);
            assert!((0.0..=1.0).contains(&opponent.market_share));
        }
        for value in session.market().multipliers().values() {
            assert!((0.3..=3.0).contains(value));
        }
    }

    assert_eq!(session.opponents().tick, 10_000);
    assert_eq!(session.opponents().time_elapsed, 10_000.0);
}

#[test]
fn opponent_count_is_clamped_with_unique_names() {
    for (requested, expected) in [(-3, 1), (99, 5)] {
        let rivals = seeded(requested, GameMode::Competitive, WinCondition::NetWorth, 5);
        assert_eq!(rivals.opponent_count(), expected);
        let names: HashSet<&str> = rivals.opponents().map(|o| o.name.as_str()).collect();
        assert_eq!(names.len(), expected);
    }
}

#[test]
fn market_shares_sum_to_one_when_anything_sold() {
    let mut rivals = seeded(4, GameMode::Competitive, WinCondition::MarketShare, 11);
    let mut player = PlayerSnapshot {
        sales: 3.0,
        market_share: Some(0.0),
        ..PlayerSnapshot::default()
    };

    let mut checked = 0;
    for tick in 0..5_000 {
        // Stock up competitors so sales happen regularly.
        if tick % 50 == 0 {
            for opponent in rivals.opponents_mut() {
                opponent.materials_inventory += 30.0;
            }
        }
        let sales_before = rivals.total_sales;
        rivals.update(1.0, Some(&mut player));
        let sold_this_tick = rivals.total_sales - sales_before;
        if sold_this_tick > player.sales {
            let total: f64 = rivals.opponents().map(|o| o.market_share).sum::<f64>()
                + player.market_share.unwrap_or(0.0);
            assert!((total - 1.0).abs() < 1e-9, "shares sum to {total}");
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn bankrupt_competitor_is_removed() {
    let mut rivals = seeded(3, GameMode::Competitive, WinCondition::NetWorth, 13);
    let doomed = {
        let opponent = rivals.opponents_mut().next().unwrap();
        opponent.money = -50_001.0;
        opponent.materials_inventory = 0.0;
        opponent.name.clone()
    };

    rivals.update(1.0, None);

    assert_eq!(rivals.bankruptcies, 1);
    assert_eq!(rivals.opponent_count(), 2);
    assert!(rivals.opponent(&doomed).is_none());
    assert!(rivals.rankings().iter().all(|s| s.name != doomed));
}

#[test]
fn ranking_orders_by_score() {
    let standings = rank_by(
        [
            ("A".to_string(), 100_i64),
            ("B".to_string(), 50),
            ("C".to_string(), 200),
        ],
        |score| *score,
    );
    let names: Vec<&str> = standings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["C", "A", "B"]);
}

#[test]
fn leaderboard_includes_player_in_score_order() {
    let mut rivals = seeded(3, GameMode::Competitive, WinCondition::NetWorth, 17);
    let funds = [100e6, 50e6, 200e6];
    let mut expected: Vec<(String, f64)> = Vec::new();
    for (opponent, money) in rivals.opponents_mut().zip(funds) {
        opponent.money = money;
        expected.push((opponent.name.clone(), money));
    }
    let mut player = PlayerSnapshot {
        net_worth: 75e6,
        ..PlayerSnapshot::default()
    };

    rivals.update(0.001, Some(&mut player));

    let board = rivals.leaderboard();
    let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        [
            expected[2].0.as_str(),
            expected[0].0.as_str(),
            PLAYER_NAME,
            expected[1].0.as_str()
        ]
    );
    assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert!(board[2].is_player);
    assert!(board.windows(2).all(|w| w[0].score >= w[1].score));

    // Everyone is over the net-worth bar; the leader takes it.
    assert_eq!(rivals.winner(), Some(expected[2].0.as_str()));
    let leader = rivals.opponent_by_rank(0).map(|o| o.name.as_str());
    assert_eq!(leader, Some(expected[2].0.as_str()));
    assert!(rivals.opponent_by_rank(2).is_none());
}

#[test]
fn winner_never_changes_once_declared() {
    let config = MatchConfig {
        net_worth_threshold: 0,
        ..MatchConfig::new(4, GameMode::Competitive, WinCondition::NetWorth).with_seed(19)
    };
    let mut rivals = OpponentManager::with_config(config);

    rivals.update(1.0, None);
    let first = rivals.winner().map(str::to_string);
    assert!(first.is_some());

    for _ in 0..2_000 {
        rivals.update(1.0, None);
        assert_eq!(rivals.winner().map(str::to_string), first);
    }
    assert_eq!(rivals.statistics().winner, first);
}

#[test]
fn solo_and_tournament_matches_only_rank() {
    for mode in [GameMode::Solo, GameMode::Tournament] {
        let config = MatchConfig {
            net_worth_threshold: 0,
            time_limit: 10.0,
            ..MatchConfig::new(2, mode, WinCondition::NetWorth).with_seed(23)
        };
        let mut rivals = OpponentManager::with_config(config);
        for _ in 0..20 {
            rivals.update(1.0, None);
        }
        assert!(rivals.winner().is_none());
        assert_eq!(rivals.rankings().len(), 2);
    }
}

#[test]
fn inverted_host_ranges_do_not_panic() {
    let config = SessionConfig::from_json(
        r#"{
            "match": {"seed": 1, "difficulty_min": 0.9, "difficulty_max": 0.1},
            "market": {"seed": 2, "min_multiplier": 3.0, "max_multiplier": 0.3}
        }"#,
    )
    .unwrap();
    let mut session = Session::with_config(config);
    for _ in 0..100 {
        session.step(3_600.0, None);
    }

    for opponent in session.opponents().opponents() {
        assert!((0.1..=0.9).contains(&opponent.difficulty));
    }
    for value in session.market().multipliers().values() {
        assert!((0.3..=3.0).contains(value));
    }
}
