#![cfg(feature = "instrument")]

use polars::prelude::*;
use rivals_core::instrument::RunRecorder;
use rivals_core::{GameMode, MatchConfig, Session, SessionConfig, WinCondition};

const TICKS: u64 = 2_000;

#[test]
fn captured_tables_hold_match_invariants() {
    let mut recorder = RunRecorder::new(std::env::temp_dir().join("rivals-runs"), "capture");

    let config = SessionConfig {
        match_config: MatchConfig::new(3, GameMode::Competitive, WinCondition::NetWorth)
            .with_seed(99),
        ..SessionConfig::default()
    }
    .seeded_with(100);
    let mut session = Session::with_config(config);
    for _ in 0..TICKS {
        session.step(1.0, None);
    }

    let frames = recorder.frames();

    let conditions = &frames["market_conditions"];
    assert_eq!(conditions.height() as u64, TICKS);
    let demand = conditions.column("demand").unwrap().f64().unwrap();
    assert!(demand.min().unwrap() >= 0.5);
    assert!(demand.max().unwrap() <= 2.0);
    let police = conditions.column("police_activity").unwrap().f64().unwrap();
    assert!(police.max().unwrap() <= 1.0);

    let ranking = &frames["ranking"];
    assert_eq!(ranking.height() as u64, TICKS * 3);
    let per_tick = ranking
        .clone()
        .lazy()
        .group_by([col("tick")])
        .agg([col("rank").max().alias("last"), col("name").n_unique().alias("names")])
        .collect()
        .unwrap();
    assert_eq!(per_tick.height() as u64, TICKS);
    let last = per_tick.column("last").unwrap().u64().unwrap();
    assert!(last.into_iter().all(|r| r == Some(3)));
    let names = per_tick.column("names").unwrap().u32().unwrap();
    assert!(names.into_iter().all(|n| n == Some(3)));

    let prices = &frames["price_update"];
    let multiplier = prices.column("multiplier").unwrap().f64().unwrap();
    assert!(multiplier.min().unwrap() >= 0.3);
    assert!(multiplier.max().unwrap() <= 3.0);
}
