use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::scoring::{AuthorityTier, ScoringManager};

/// Something the player did that scoring cares about, as sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(from_wasm_abi)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreEvent {
    MoneyEarned { amount: f64 },
    MoneySpent { amount: f64 },
    MoneyBalance { money: f64 },
    MaterialCollected { quantity: f64 },
    MaterialProcessed { quantity: f64 },
    ProductSold { quantity: f64 },
    BuildingBuilt,
    BuildingDemolished,
    DroneDeployed,
    DroneRecalled,
    DroneCrashed,
    WorkerHired,
    Inspection { passed: bool },
    Bribe { success: bool },
    EscapeAttempt,
    TilesExplored { tiles: u32 },
    Suspicion { level: f64 },
    IllegalOperation,
    TechnologyLevel { level: u32 },
    WeatherChange,
    MarketTrade { profit: f64 },
    AuthorityTier { tier: AuthorityTier },
}

impl ScoringManager {
    pub fn record(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::MoneyEarned { amount } => self.record_money_earned(amount),
            ScoreEvent::MoneySpent { amount } => self.record_money_spent(amount),
            ScoreEvent::MoneyBalance { money } => self.record_money_balance(money),
            ScoreEvent::MaterialCollected { quantity } => self.record_material_collected(quantity),
            ScoreEvent::MaterialProcessed { quantity } => self.record_material_processed(quantity),
            ScoreEvent::ProductSold { quantity } => self.record_product_sold(quantity),
            ScoreEvent::BuildingBuilt => self.record_building_built(),
            ScoreEvent::BuildingDemolished => self.record_building_demolished(),
            ScoreEvent::DroneDeployed => self.record_drone_deployed(),
            ScoreEvent::DroneRecalled => self.record_drone_recalled(),
            ScoreEvent::DroneCrashed => self.record_drone_crashed(),
            ScoreEvent::WorkerHired => self.record_worker_hired(),
            ScoreEvent::Inspection { passed } => self.record_inspection_result(passed),
            ScoreEvent::Bribe { success } => self.record_bribe_attempt(success),
            ScoreEvent::EscapeAttempt => self.record_escape_attempt(),
            ScoreEvent::TilesExplored { tiles } => self.record_tiles_explored(tiles),
            ScoreEvent::Suspicion { level } => self.record_suspicion(level),
            ScoreEvent::IllegalOperation => self.record_illegal_operation(),
            ScoreEvent::TechnologyLevel { level } => self.record_technology_level(level),
            ScoreEvent::WeatherChange => self.record_weather_change(),
            ScoreEvent::MarketTrade { profit } => self.record_market_trade(profit),
            ScoreEvent::AuthorityTier { tier } => self.record_authority_tier(tier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_events_parse_and_apply() {
        let events: Vec<ScoreEvent> = serde_json::from_str(
            r#"[
                {"kind": "money_earned", "amount": 250.0},
                {"kind": "building_built"},
                {"kind": "inspection", "passed": false},
                {"kind": "authority_tier", "tier": "FEDERAL"}
            ]"#,
        )
        .unwrap();

        let mut scoring = ScoringManager::new();
        for event in events {
            scoring.record(event);
        }
        let counters = scoring.counters();
        assert_eq!(counters.total_money_earned, 250.0);
        assert_eq!(counters.buildings_built, 1);
        assert_eq!(counters.inspections_failed, 1);
        assert!(scoring.is_unlocked("federal_attention"));
    }
}
