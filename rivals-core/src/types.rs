use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use tsify_next::Tsify;

use crate::error::RivalsError;

// ============================================================================
// IDs - Using slotmap for generational indices
// ============================================================================

new_key_type! {
    pub struct CompetitorId;
}

// ============================================================================
// Personality - How a competitor weighs risk against growth
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    Aggressive,  // High risk, fast expansion
    Balanced,    // Moderate risk, steady growth
    Cautious,    // Low risk, slow but safe
    Opportunist, // Adapts to market conditions
    Innovator,   // Focuses on technology/upgrades
}

impl Personality {
    /// Spawn rotation: competitor `i` gets `ROTATION[i % 5]`.
    pub const ROTATION: [Personality; 5] = [
        Personality::Aggressive,
        Personality::Balanced,
        Personality::Cautious,
        Personality::Opportunist,
        Personality::Innovator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Aggressive => "aggressive",
            Personality::Balanced => "balanced",
            Personality::Cautious => "cautious",
            Personality::Opportunist => "opportunist",
            Personality::Innovator => "innovator",
        }
    }

    /// Baseline appetite for risk before difficulty is applied.
    pub fn base_risk_tolerance(&self) -> f64 {
        match self {
            Personality::Aggressive => 0.8,
            Personality::Balanced => 0.5,
            Personality::Cautious => 0.2,
            Personality::Opportunist => 0.6,
            Personality::Innovator => 0.4,
        }
    }
}

// ============================================================================
// Match setup - fixed for the whole session
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Solo,        // Player vs environment only
    Competitive, // Player vs AI opponents
    Tournament,  // Timed competition with rankings
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Solo => "solo",
            GameMode::Competitive => "competitive",
            GameMode::Tournament => "tournament",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    NetWorth,    // Highest net worth
    MarketShare, // Largest market share
    Profit,      // Most profit
    Survival,    // Last factory standing
    TimeLimit,   // Best position after time limit
}

impl WinCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WinCondition::NetWorth => "net_worth",
            WinCondition::MarketShare => "market_share",
            WinCondition::Profit => "profit",
            WinCondition::Survival => "survival",
            WinCondition::TimeLimit => "time_limit",
        }
    }
}

// ============================================================================
// Market Trend - State of the commodity price engine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketTrend {
    Stable,
    Bullish,
    Bearish,
    Volatile,
    Crash,
}

impl MarketTrend {
    pub fn all() -> impl Iterator<Item = MarketTrend> {
        [
            MarketTrend::Stable,
            MarketTrend::Bullish,
            MarketTrend::Bearish,
            MarketTrend::Volatile,
            MarketTrend::Crash,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarketTrend::Stable => "STABLE",
            MarketTrend::Bullish => "BULLISH",
            MarketTrend::Bearish => "BEARISH",
            MarketTrend::Volatile => "VOLATILE",
            MarketTrend::Crash => "CRASH",
        }
    }

    /// Arrow shown next to prices in the UI.
    pub fn glyph(&self) -> &'static str {
        match self {
            MarketTrend::Stable => "→",
            MarketTrend::Bullish => "↑",
            MarketTrend::Bearish => "↓",
            MarketTrend::Volatile => "↕",
            MarketTrend::Crash => "⇊",
        }
    }
}

// ============================================================================
// Materials - The commodities priced by the market engine
// ============================================================================

/// Prefix shared by every sellable product name.
pub const PRODUCT_PREFIX: &str = "recycled_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Plastic,
    Metal,
    Glass,
    Paper,
    Electronics,
    Copper,
    Rubber,
}

impl Material {
    /// Returns an iterator over all materials
    pub fn all() -> impl Iterator<Item = Material> {
        [
            Material::Plastic,
            Material::Metal,
            Material::Glass,
            Material::Paper,
            Material::Electronics,
            Material::Copper,
            Material::Rubber,
        ]
        .into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Material::Plastic => "plastic",
            Material::Metal => "metal",
            Material::Glass => "glass",
            Material::Paper => "paper",
            Material::Electronics => "electronics",
            Material::Copper => "copper",
            Material::Rubber => "rubber",
        }
    }

    pub fn from_name(name: &str) -> Option<Material> {
        Material::all().find(|m| m.name() == name)
    }

    /// Strict lookup for host input that must name a known material.
    pub fn parse(name: &str) -> Result<Material, RivalsError> {
        Material::from_name(name).ok_or_else(|| RivalsError::UnknownMaterial(name.to_string()))
    }

    /// Resolve a product name (`recycled_<material>`) to the material it is made from.
    pub fn from_product(product: &str) -> Option<Material> {
        product.strip_prefix(PRODUCT_PREFIX).and_then(Material::from_name)
    }

    pub fn product_name(&self) -> String {
        format!("{}{}", PRODUCT_PREFIX, self.name())
    }

    /// Raw material purchase price at multiplier 1.0
    pub fn base_buy_price(&self) -> f64 {
        match self {
            Material::Plastic => 2.0,
            Material::Metal => 4.0,
            Material::Glass => 3.0,
            Material::Paper => 1.0,
            Material::Electronics => 20.0,
            Material::Copper => 30.0,
            Material::Rubber => 4.0,
        }
    }

    /// Recycled product sale price at multiplier 1.0
    pub fn base_sell_price(&self) -> f64 {
        match self {
            Material::Plastic => 5.0,
            Material::Metal => 10.0,
            Material::Glass => 8.0,
            Material::Paper => 3.0,
            Material::Electronics => 50.0,
            Material::Copper => 75.0,
            Material::Rubber => 10.0,
        }
    }
}
