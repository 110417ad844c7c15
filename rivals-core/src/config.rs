use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::RivalsError;
use crate::types::{GameMode, WinCondition};

/// Hard cap on roster size; the name pool holds eight, so shuffle-and-take always succeeds.
pub const MAX_OPPONENTS: i64 = 5;
pub const MIN_OPPONENTS: i64 = 1;

/// Setup for one competitive match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Requested roster size. Clamped into `[1, 5]`, never rejected.
    pub num_opponents: i64,
    pub game_mode: GameMode,
    pub win_condition: WinCondition,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Seconds until a TIME_LIMIT match is decided.
    pub time_limit: f64,
    pub starting_money: f64,
    /// Money below this removes a competitor (debt is allowed down to here).
    pub bankruptcy_threshold: f64,
    /// Market units per period, the denominator of supply pressure.
    pub total_market_size: f64,
    pub difficulty_min: f64,
    pub difficulty_max: f64,
    /// Chance per tick (not per second) that a police investigation starts.
    pub investigation_start_chance: f64,
    /// Chance per tick that an active investigation ends.
    pub investigation_end_chance: f64,
    pub net_worth_threshold: i64,
    pub market_share_threshold: i64,
    pub profit_threshold: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_opponents: 3,
            game_mode: GameMode::Competitive,
            win_condition: WinCondition::NetWorth,
            seed: None,
            time_limit: 3600.0,
            starting_money: 50_000.0,
            bankruptcy_threshold: -50_000.0,
            total_market_size: 1000.0,
            difficulty_min: 0.3,
            difficulty_max: 0.8,
            investigation_start_chance: 0.001,
            investigation_end_chance: 0.01,
            net_worth_threshold: 1_000_000,
            market_share_threshold: 500_000, // 50% market share
            profit_threshold: 500_000,
        }
    }
}

impl MatchConfig {
    pub fn new(num_opponents: i64, game_mode: GameMode, win_condition: WinCondition) -> Self {
        Self {
            num_opponents,
            game_mode,
            win_condition,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, RivalsError> {
        serde_json::from_str(json).map_err(RivalsError::config)
    }

    /// Roster size actually spawned.
    pub fn opponent_count(&self) -> usize {
        self.num_opponents.clamp(MIN_OPPONENTS, MAX_OPPONENTS) as usize
    }

    /// Difficulty draw range with the bounds in order, whichever way the host wrote them.
    pub fn difficulty_range(&self) -> RangeInclusive<f64> {
        ordered(self.difficulty_min, self.difficulty_max)
    }

    /// Bounds put in order and chances kept within [0, 1].
    pub fn normalized(mut self) -> Self {
        let range = self.difficulty_range();
        (self.difficulty_min, self.difficulty_max) = (*range.start(), *range.end());
        self.investigation_start_chance = self.investigation_start_chance.clamp(0.0, 1.0);
        self.investigation_end_chance = self.investigation_end_chance.clamp(0.0, 1.0);
        self
    }

    /// Score a ranking entry must reach to win under threshold-style conditions.
    pub fn threshold_for(&self, condition: WinCondition) -> Option<i64> {
        match condition {
            WinCondition::NetWorth => Some(self.net_worth_threshold),
            WinCondition::MarketShare => Some(self.market_share_threshold),
            WinCondition::Profit => Some(self.profit_threshold),
            WinCondition::Survival | WinCondition::TimeLimit => None,
        }
    }
}

/// Tuning for the commodity price engine. Times are game seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub seed: Option<u64>,
    /// Trend is re-rolled once it has lasted this long (48 game hours).
    pub trend_change_interval: f64,
    /// Event roll cadence (24 game hours).
    pub event_check_interval: f64,
    pub event_probability: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            seed: None,
            trend_change_interval: 172_800.0,
            event_check_interval: 86_400.0,
            event_probability: 0.1,
            min_multiplier: 0.3,
            max_multiplier: 3.0,
        }
    }
}

impl MarketConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, RivalsError> {
        serde_json::from_str(json).map_err(RivalsError::config)
    }

    pub fn multiplier_range(&self) -> RangeInclusive<f64> {
        ordered(self.min_multiplier, self.max_multiplier)
    }

    pub fn clamp(&self, multiplier: f64) -> f64 {
        let range = self.multiplier_range();
        multiplier.clamp(*range.start(), *range.end())
    }

    /// Bounds put in order and the event chance kept within [0, 1].
    pub fn normalized(mut self) -> Self {
        let range = self.multiplier_range();
        (self.min_multiplier, self.max_multiplier) = (*range.start(), *range.end());
        self.event_probability = self.event_probability.clamp(0.0, 1.0);
        self
    }
}

/// Everything a host session is configured with, as one JSON document:
/// `{"match": {...}, "market": {...}}`. Either part may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(rename = "match")]
    pub match_config: MatchConfig,
    pub market: MarketConfig,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, RivalsError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).map_err(RivalsError::config)
    }

    /// Give every unseeded manager a seed derived from `seed`, so one number reproduces
    /// the whole session.
    pub fn seeded_with(mut self, seed: u64) -> Self {
        self.match_config.seed.get_or_insert(seed);
        self.market.seed.get_or_insert(seed.wrapping_add(1));
        self
    }
}

fn ordered(a: f64, b: f64) -> RangeInclusive<f64> {
    if a <= b { a..=b } else { b..=a }
}

/// Seeded generator when a seed is given, OS entropy otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
