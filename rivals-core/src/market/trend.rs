use rand::Rng;
use rand::seq::IndexedRandom;

use crate::types::MarketTrend;

/// Next-trend distribution. Independent of the current trend, which may be re-drawn.
pub const TREND_WEIGHTS: [(MarketTrend, f64); 5] = [
    (MarketTrend::Stable, 0.40),
    (MarketTrend::Bullish, 0.20),
    (MarketTrend::Bearish, 0.20),
    (MarketTrend::Volatile, 0.15),
    (MarketTrend::Crash, 0.05),
];

/// Per-hour noise added on top of directional drift.
pub const DRIFT_NOISE_PER_HOUR: f64 = 0.001;

impl MarketTrend {
    /// Multiplier change per game hour. For VOLATILE this is the half-width of the
    /// uniform swing rather than a drift.
    pub fn hourly_rate(&self) -> f64 {
        match self {
            MarketTrend::Stable => 0.001,
            MarketTrend::Bullish => 0.005,
            MarketTrend::Bearish => -0.005,
            MarketTrend::Volatile => 0.02,
            MarketTrend::Crash => -0.05,
        }
    }
}

/// Weighted draw of the next trend.
pub fn draw_trend<R: Rng>(rng: &mut R) -> Option<MarketTrend> {
    TREND_WEIGHTS
        .choose_weighted(rng, |(_, weight)| *weight)
        .ok()
        .map(|(trend, _)| *trend)
}

/// Change to one material's multiplier over `dt` seconds under `trend`.
pub fn multiplier_step<R: Rng>(trend: MarketTrend, dt: f64, rng: &mut R) -> f64 {
    let hours = dt / 3600.0;
    let rate = trend.hourly_rate();
    match trend {
        MarketTrend::Volatile => rng.random_range(-rate..=rate) * hours,
        _ => {
            let noise = rng.random_range(-DRIFT_NOISE_PER_HOUR..=DRIFT_NOISE_PER_HOUR) * hours;
            rate * hours + noise
        }
    }
}
