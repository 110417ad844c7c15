use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::{MarketConfig, seeded_rng};
use crate::market::{ActiveEvent, EventKind, MarketEvent, draw_trend, multiplier_step};
use crate::types::{Material, MarketTrend};

// ============================================================================
// Host-facing views
// ============================================================================

/// Current buy and sell prices, keyed by material and product name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PriceBoard {
    pub buy: BTreeMap<String, f64>,
    pub sell: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketSummary {
    pub current_trend: MarketTrend,
    pub trend_duration_hours: f64,
    pub active_events: Vec<String>,
    pub price_multipliers: BTreeMap<String, f64>,
    pub total_price_changes: u64,
    pub total_events: u64,
    pub highest_multiplier: f64,
    pub lowest_multiplier: f64,
}

// ============================================================================
// Market Manager - commodity prices over game time
// ============================================================================

/// Per-material price multipliers driven by a trend state machine and random events.
///
/// Every multiplier stays within the configured bounds after any operation. Events compound
/// into the multipliers when they fire and are only dropped from the active list on expiry;
/// the shifted price persists and drifts back under the trend.
#[derive(Debug, Clone)]
pub struct MarketManager {
    config: MarketConfig,
    multipliers: BTreeMap<Material, f64>,
    pub current_trend: MarketTrend,
    /// Seconds since the last trend roll.
    pub trend_duration: f64,
    active_events: Vec<MarketEvent>,
    last_event_check: f64,
    pub total_price_changes: u64,
    pub total_events: u64,
    pub highest_multiplier: f64,
    pub lowest_multiplier: f64,
    rng: StdRng,
}

impl Default for MarketManager {
    fn default() -> Self {
        Self::with_config(MarketConfig::default())
    }
}

impl MarketManager {
    pub fn with_config(config: MarketConfig) -> Self {
        let config = config.normalized();
        let rng = seeded_rng(config.seed);
        Self {
            config,
            multipliers: Material::all().map(|m| (m, 1.0)).collect(),
            current_trend: MarketTrend::Stable,
            trend_duration: 0.0,
            active_events: Vec::new(),
            last_event_check: 0.0,
            total_price_changes: 0,
            total_events: 0,
            highest_multiplier: 1.0,
            lowest_multiplier: 1.0,
            rng,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Advance by `dt` game seconds; `game_time` is the absolute clock after the step.
    pub fn update(&mut self, dt: f64, game_time: f64) {
        self.trend_duration += dt;
        if self.trend_duration >= self.config.trend_change_interval {
            self.roll_trend();
        }

        self.update_prices(dt);

        self.active_events.retain(|event| !event.expired(game_time));

        if game_time - self.last_event_check >= self.config.event_check_interval {
            self.last_event_check = game_time;
            if self.rng.random::<f64>() < self.config.event_probability {
                if let Some(kind) = EventKind::ALL.choose(&mut self.rng).copied() {
                    self.trigger_event(kind, game_time);
                }
            }
        }
    }

    fn roll_trend(&mut self) {
        let Some(next) = draw_trend(&mut self.rng) else {
            return;
        };
        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "trend_change",
            from = self.current_trend.name(),
            to = next.name(),
            lasted_hours = self.trend_duration / 3600.0,
        );
        self.current_trend = next;
        self.trend_duration = 0.0;
    }

    fn update_prices(&mut self, dt: f64) {
        let trend = self.current_trend;
        for material in Material::all() {
            let step = multiplier_step(trend, dt, &mut self.rng);
            let old = self.multiplier(material);
            if self.store(material, old + step) != old {
                self.total_price_changes += 1;
            }

            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "price_update",
                material = material.name(),
                trend = trend.name(),
                multiplier = self.multiplier(material),
            );
        }
    }

    /// Clamp, store and fold into the watermarks. Returns the stored value.
    fn store(&mut self, material: Material, value: f64) -> f64 {
        let clamped = self.config.clamp(value);
        self.multipliers.insert(material, clamped);
        self.highest_multiplier = self.highest_multiplier.max(clamped);
        self.lowest_multiplier = self.lowest_multiplier.min(clamped);
        clamped
    }

    // ========================================================================
    // Direct control
    // ========================================================================

    /// Fire `kind` now, compounding its factors into the current multipliers.
    pub fn trigger_event(&mut self, kind: EventKind, game_time: f64) {
        let event = MarketEvent::start(kind, game_time);
        for &(material, factor) in &event.price_multipliers {
            let value = self.multiplier(material) * factor;
            self.store(material, value);
        }
        self.total_events += 1;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "market_event",
            name = event.name.as_str(),
            start_time = game_time,
            duration = event.duration,
            trend = self.current_trend.name(),
        );

        self.active_events.push(event);
    }

    pub fn set_trend(&mut self, trend: MarketTrend) {
        self.current_trend = trend;
        self.trend_duration = 0.0;
    }

    /// Overwrite one multiplier; the value is clamped into bounds.
    pub fn set_multiplier(&mut self, material: Material, value: f64) {
        self.store(material, value);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn multiplier(&self, material: Material) -> f64 {
        self.multipliers.get(&material).copied().unwrap_or(1.0)
    }

    pub fn multipliers(&self) -> &BTreeMap<Material, f64> {
        &self.multipliers
    }

    pub fn active_events(&self) -> &[MarketEvent] {
        &self.active_events
    }

    /// Active events with the time each has left at `game_time`.
    pub fn event_status(&self, game_time: f64) -> Vec<ActiveEvent> {
        self.active_events
            .iter()
            .map(|event| event.status(game_time))
            .collect()
    }

    /// Purchase price of a raw material, or 0.0 for an unknown name.
    pub fn buy_price(&self, material: &str) -> f64 {
        Material::from_name(material)
            .map(|m| m.base_buy_price() * self.multiplier(m))
            .unwrap_or(0.0)
    }

    /// Sale price of a recycled product, or 0.0 for an unknown name.
    /// Products move with their source material's multiplier.
    pub fn sell_price(&self, product: &str) -> f64 {
        Material::from_product(product)
            .map(|m| m.base_sell_price() * self.multiplier(m))
            .unwrap_or(0.0)
    }

    /// Direction arrow for display. Follows the global trend, not the material.
    pub fn price_trend(&self, _material: &str) -> &'static str {
        self.current_trend.glyph()
    }

    /// Percent away from base price; unknown names read as unchanged.
    pub fn price_change_percentage(&self, material: &str) -> f64 {
        let multiplier = Material::from_name(material)
            .map(|m| self.multiplier(m))
            .unwrap_or(1.0);
        (multiplier - 1.0) * 100.0
    }

    pub fn all_prices(&self) -> PriceBoard {
        PriceBoard {
            buy: Material::all()
                .map(|m| (m.name().to_string(), self.buy_price(m.name())))
                .collect(),
            sell: Material::all()
                .map(|m| {
                    let product = m.product_name();
                    let price = self.sell_price(&product);
                    (product, price)
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> MarketSummary {
        MarketSummary {
            current_trend: self.current_trend,
            trend_duration_hours: self.trend_duration / 3600.0,
            active_events: self.active_events.iter().map(|e| e.name.clone()).collect(),
            price_multipliers: self
                .multipliers
                .iter()
                .map(|(m, v)| (m.name().to_string(), *v))
                .collect(),
            total_price_changes: self.total_price_changes,
            total_events: self.total_events,
            highest_multiplier: self.highest_multiplier,
            lowest_multiplier: self.lowest_multiplier,
        }
    }
}
