use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

/// Escalation level of the authorities pursuing the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorityTier {
    Local,
    State,
    Federal,
}

impl AuthorityTier {
    pub fn level(&self) -> u8 {
        match self {
            AuthorityTier::Local => 0,
            AuthorityTier::State => 1,
            AuthorityTier::Federal => 2,
        }
    }
}

/// Names a cumulative counter so achievement thresholds can be written as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    MoneyEarned,
    MoneySpent,
    MaterialsCollected,
    MaterialsProcessed,
    ProductsSold,
    BuildingsBuilt,
    BuildingsDemolished,
    DronesDeployed,
    DronesCrashed,
    PeakDronesActive,
    WorkersHired,
    InspectionsPassed,
    InspectionsFailed,
    BribesAttempted,
    BribesSuccessful,
    EscapeAttempts,
    TilesExplored,
    TimePlayed,
    MaxSuspicion,
    IllegalOperations,
    TechnologyLevel,
    WeatherChanges,
    MarketProfit,
    PeakAuthorityTier,
}

/// Everything the player has done this game. Only ever grows, except the live
/// drone count and the money watermarks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Counters {
    pub total_money_earned: f64,
    pub total_money_spent: f64,
    pub materials_collected: f64,
    pub materials_processed: f64,
    pub products_sold: f64,
    pub buildings_built: u32,
    pub buildings_demolished: u32,
    pub drones_deployed: u32,
    pub drones_crashed: u32,
    pub drones_active: u32,
    pub peak_drones_active: u32,
    pub workers_hired: u32,
    pub inspections_passed: u32,
    pub inspections_failed: u32,
    pub bribes_attempted: u32,
    pub bribes_successful: u32,
    pub escape_attempts: u32,
    pub tiles_explored: u32,
    pub time_played: f64,
    pub max_suspicion: f64,
    pub min_money: f64,
    pub max_money: f64,
    pub illegal_operations: u32,
    pub technology_level: u32,
    pub weather_changes: u32,
    pub market_profit: f64,
    pub peak_authority_tier: Option<AuthorityTier>,
}

impl Counters {
    pub fn get(&self, counter: Counter) -> f64 {
        match counter {
            Counter::MoneyEarned => self.total_money_earned,
            Counter::MoneySpent => self.total_money_spent,
            Counter::MaterialsCollected => self.materials_collected,
            Counter::MaterialsProcessed => self.materials_processed,
            Counter::ProductsSold => self.products_sold,
            Counter::BuildingsBuilt => self.buildings_built as f64,
            Counter::BuildingsDemolished => self.buildings_demolished as f64,
            Counter::DronesDeployed => self.drones_deployed as f64,
            Counter::DronesCrashed => self.drones_crashed as f64,
            Counter::PeakDronesActive => self.peak_drones_active as f64,
            Counter::WorkersHired => self.workers_hired as f64,
            Counter::InspectionsPassed => self.inspections_passed as f64,
            Counter::InspectionsFailed => self.inspections_failed as f64,
            Counter::BribesAttempted => self.bribes_attempted as f64,
            Counter::BribesSuccessful => self.bribes_successful as f64,
            Counter::EscapeAttempts => self.escape_attempts as f64,
            Counter::TilesExplored => self.tiles_explored as f64,
            Counter::TimePlayed => self.time_played,
            Counter::MaxSuspicion => self.max_suspicion,
            Counter::IllegalOperations => self.illegal_operations as f64,
            Counter::TechnologyLevel => self.technology_level as f64,
            Counter::WeatherChanges => self.weather_changes as f64,
            Counter::MarketProfit => self.market_profit,
            // Unreached reads as -1 so that "at least LOCAL" needs a recorded tier
            Counter::PeakAuthorityTier => self
                .peak_authority_tier
                .map(|tier| tier.level() as f64)
                .unwrap_or(-1.0),
        }
    }

    pub fn inspections(&self) -> u32 {
        self.inspections_passed + self.inspections_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(AuthorityTier::Local < AuthorityTier::State);
        assert!(AuthorityTier::State < AuthorityTier::Federal);
    }

    #[test]
    fn counter_lookup_reads_fields() {
        let counters = Counters {
            buildings_built: 12,
            market_profit: -40.0,
            peak_authority_tier: Some(AuthorityTier::Federal),
            ..Counters::default()
        };
        assert_eq!(counters.get(Counter::BuildingsBuilt), 12.0);
        assert_eq!(counters.get(Counter::MarketProfit), -40.0);
        assert_eq!(counters.get(Counter::PeakAuthorityTier), 2.0);
        assert_eq!(Counters::default().get(Counter::PeakAuthorityTier), -1.0);
    }
}
