use rand::Rng;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::MatchConfig;

// === CONDITION BOUNDS ===

pub const DEMAND_MIN: f64 = 0.5;
pub const DEMAND_MAX: f64 = 2.0;
pub const PRICE_MULTIPLIER_MIN: f64 = 0.5;
pub const PRICE_MULTIPLIER_MAX: f64 = 2.0;
pub const POLICE_MIN: f64 = 0.1;
pub const POLICE_MAX: f64 = 0.9;
pub const POLICE_STEP: f64 = 0.05;
/// Investigations push police activity up by this much, capped at 1.0.
pub const INVESTIGATION_BOOST: f64 = 0.3;
pub const BASE_POLICE_ACTIVITY: f64 = 0.3;

/// What competitors see of the shared market each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketConditions {
    pub demand: f64,
    pub price_multiplier: f64,
    pub total_market_size: f64,
    pub competition_level: usize,
    pub investigation_active: bool,
}

/// Demand, price pressure and policing shared by every participant in a match.
///
/// Recomputed from scratch each tick: a deterministic demand wave plus bounded noise,
/// a price multiplier driven by roster inventory, and a clamped police random walk.
/// Event chances are per tick, so their real-time frequency follows the host's tick rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionMarket {
    pub demand_level: f64,
    pub price_multiplier: f64,
    pub police_activity: f64,
    pub investigation_active: bool,
    pub total_market_size: f64,
}

impl CompetitionMarket {
    pub fn new(total_market_size: f64) -> Self {
        Self {
            demand_level: 1.0,
            price_multiplier: 1.0,
            police_activity: BASE_POLICE_ACTIVITY,
            investigation_active: false,
            total_market_size,
        }
    }

    /// Recompute conditions for the tick ending at `time_elapsed` seconds.
    pub fn advance<R: Rng>(
        &mut self,
        time_elapsed: f64,
        total_inventory: f64,
        config: &MatchConfig,
        rng: &mut R,
    ) {
        let cycle_minutes = time_elapsed / 60.0;

        let wave = (cycle_minutes * 0.1).sin() * 0.3;
        self.demand_level =
            (1.0 + wave + rng.random_range(-0.1..=0.1)).clamp(DEMAND_MIN, DEMAND_MAX);

        // High supply = lower prices, low supply = higher prices
        let supply_pressure = total_inventory / self.total_market_size.max(1.0);
        self.price_multiplier = (1.0 + (1.0 - supply_pressure) * 0.5 + rng.random_range(-0.1..=0.1))
            .clamp(PRICE_MULTIPLIER_MIN, PRICE_MULTIPLIER_MAX);

        self.police_activity = (self.police_activity
            + rng.random_range(-POLICE_STEP..=POLICE_STEP))
        .clamp(POLICE_MIN, POLICE_MAX);

        if rng.random::<f64>() < config.investigation_start_chance {
            self.investigation_active = true;
            self.police_activity = (self.police_activity + INVESTIGATION_BOOST).min(1.0);
        }

        if self.investigation_active && rng.random::<f64>() < config.investigation_end_chance {
            self.investigation_active = false;
        }
    }

    pub fn conditions(&self, competition_level: usize) -> MarketConditions {
        MarketConditions {
            demand: self.demand_level,
            price_multiplier: self.price_multiplier,
            total_market_size: self.total_market_size,
            competition_level,
            investigation_active: self.investigation_active,
        }
    }
}
