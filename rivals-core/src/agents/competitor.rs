use rand::Rng;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::agents::strategy::{
    self, Decision, DecisionContext, EXPANSION_MONEY, EXPANSION_SHARE_CAP, FAVOURABLE_PRICE, Goal,
    HEAT_CRITICAL, INVENTORY_HIGH, MoneySituation, POLICE_THREAT, Situation,
};
use crate::competition::MarketConditions;
use crate::types::Personality;

// === ECONOMIC CONSTANTS ===

pub const UNIT_BASE_PRICE: f64 = 1000.0;
pub const WORKSTATION_BASE_COST: f64 = 30_000.0;
pub const WORKSTATION_COST_STEP: f64 = 5_000.0;
pub const ROBOT_COST: f64 = 8_000.0;
pub const UPGRADE_COST_PER_LEVEL: f64 = 50_000.0;
pub const BRIBE_COST: f64 = 10_000.0;
pub const MAX_PRODUCTION_RATE: f64 = 5.0;
pub const MIN_PRODUCTION_RATE: f64 = 0.5;
/// Heat shed per second of game time.
pub const HEAT_DECAY_PER_SEC: f64 = 0.5;
/// A goal is abandoned after this many seconds without success.
pub const GOAL_TIMEOUT: f64 = 600.0;

// Asset valuation for net worth
const WORKSTATION_VALUE: f64 = 25_000.0;
const ROBOT_VALUE: f64 = 5_000.0;
const TECH_LEVEL_VALUE: f64 = 30_000.0;
const INVENTORY_UNIT_VALUE: f64 = 800.0;

/// An AI-run recycling factory competing for the shared market.
///
/// The manager only calls [`CompetitorAgent::update`] and reads the economic fields;
/// everything else is the agent's own business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorAgent {
    pub name: String,
    pub personality: Personality,
    /// 0.0 = easy, 1.0 = hard. Speeds up decisions and raises risk tolerance.
    pub difficulty: f64,

    // Resources
    pub money: f64,
    pub robots: u32,
    pub workstations: u32,
    pub technology_level: u32,

    // Production
    pub production_rate: f64, // Units per hour per workstation
    pub production_active: bool,
    /// Produced-but-unsold units. Counts toward market supply pressure.
    pub materials_inventory: f64,
    pub quality_level: f64,

    // Market
    pub market_share: f64,
    pub reputation: f64,
    /// Units sold since the manager last reset it (once per tick).
    pub sales_this_period: f64,

    // Strategy
    pub current_goal: Goal,
    pub goal_progress: f64,
    pub risk_tolerance: f64,
    pub decision_cooldown: f64,

    // Police
    pub heat_level: f64,
    pub hiding: bool,

    // Statistics
    pub age: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_produced: f64,
    pub decisions_made: u64,
    pub successful_operations: u64,
}

impl CompetitorAgent {
    pub fn new<R: Rng>(
        name: impl Into<String>,
        personality: Personality,
        difficulty: f64,
        starting_money: f64,
        rng: &mut R,
    ) -> Self {
        Self {
            name: name.into(),
            personality,
            difficulty,
            money: starting_money,
            robots: 2,
            workstations: 1,
            technology_level: 1,
            production_rate: 1.0,
            production_active: true,
            materials_inventory: 0.0,
            quality_level: 0.7,
            market_share: 0.0,
            reputation: 50.0,
            sales_this_period: 0.0,
            current_goal: Goal::initial(personality, rng),
            goal_progress: 0.0,
            risk_tolerance: risk_tolerance(personality, difficulty),
            decision_cooldown: 0.0,
            heat_level: 0.0,
            hiding: false,
            age: 0.0,
            total_revenue: 0.0,
            total_expenses: 0.0,
            total_produced: 0.0,
            decisions_made: 0,
            successful_operations: 0,
        }
    }

    /// Advance this competitor by `dt` seconds under the given market.
    pub fn update<R: Rng>(
        &mut self,
        dt: f64,
        conditions: &MarketConditions,
        police_activity: f64,
        rng: &mut R,
    ) {
        self.age += dt;
        self.decision_cooldown -= dt;

        if self.production_active && !self.hiding {
            let produced = self.production_rate * self.workstations as f64 * dt / 3600.0;
            self.materials_inventory += produced;
            self.total_produced += produced;
        }

        self.heat_level = (self.heat_level - dt * HEAT_DECAY_PER_SEC).max(0.0);

        if self.decision_cooldown <= 0.0 {
            let situation = self.assess(conditions, police_activity);
            let decision = strategy::choose_decision(&situation, &self.decision_context(), rng);
            self.execute(decision, conditions, rng);
            self.decisions_made += 1;
            self.decision_cooldown = rng.random_range(5.0..=15.0) / (1.0 + self.difficulty);
        }

        self.update_goal_progress(dt, rng);
        self.attempt_sales(conditions, false, rng);
    }

    pub fn assess(&self, conditions: &MarketConditions, police_activity: f64) -> Situation {
        Situation {
            money: MoneySituation::classify(self.money),
            market_demand: conditions.demand,
            price_favourable: conditions.price_multiplier > FAVOURABLE_PRICE,
            police_threat: police_activity > POLICE_THREAT,
            heat_critical: self.heat_level > HEAT_CRITICAL,
            inventory_high: self.materials_inventory > INVENTORY_HIGH,
            robots_needed: self.workstations > self.robots,
            expansion_viable: self.money > EXPANSION_MONEY && self.market_share < EXPANSION_SHARE_CAP,
        }
    }

    fn decision_context(&self) -> DecisionContext {
        DecisionContext {
            personality: self.personality,
            money: self.money,
            heat: self.heat_level,
            inventory: self.materials_inventory,
        }
    }

    /// Carry out a decision. Purchases that cannot be afforded are skipped.
    pub fn execute<R: Rng>(&mut self, decision: Decision, conditions: &MarketConditions, rng: &mut R) {
        match decision {
            Decision::BuildWorkstation => {
                let cost = WORKSTATION_BASE_COST + self.workstations as f64 * WORKSTATION_COST_STEP;
                if self.spend(cost) {
                    self.workstations += 1;
                    self.heat_level += 10.0; // Building attracts attention
                }
            }
            Decision::HireRobot => {
                if self.spend(ROBOT_COST) {
                    self.robots += 1;
                }
            }
            Decision::UpgradeMachine => {
                let cost = UPGRADE_COST_PER_LEVEL * self.technology_level as f64;
                if self.spend(cost) {
                    self.technology_level += 1;
                    self.production_rate *= 1.2;
                    self.quality_level = (self.quality_level + 0.1).min(1.0);
                }
            }
            Decision::IncreaseProduction => {
                self.production_active = true;
                self.production_rate = (self.production_rate * 1.1).min(MAX_PRODUCTION_RATE);
                self.heat_level += 5.0;
            }
            Decision::DecreaseProduction => {
                self.production_rate = (self.production_rate * 0.9).max(MIN_PRODUCTION_RATE);
                self.heat_level = (self.heat_level - 10.0).max(0.0);
            }
            Decision::HideOperation => {
                self.hiding = true;
                self.production_active = false;
                self.heat_level = (self.heat_level - 20.0).max(0.0);
                if rng.random::<f64>() < 0.3 {
                    self.hiding = false;
                    self.production_active = true;
                }
            }
            Decision::SellProducts => self.attempt_sales(conditions, true, rng),
            Decision::SaveMoney => {
                self.production_rate = (self.production_rate * 0.95).max(MIN_PRODUCTION_RATE);
            }
            Decision::BribeOfficials => {
                if self.spend(BRIBE_COST) {
                    self.heat_level = (self.heat_level - 30.0).max(0.0);
                }
            }
        }

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "decision",
            name = self.name.as_str(),
            decision = decision.as_str(),
            money = self.money,
            heat = self.heat_level,
        );
    }

    fn spend(&mut self, cost: f64) -> bool {
        if self.money < cost {
            return false;
        }
        self.money -= cost;
        self.total_expenses += cost;
        true
    }

    /// Sell part of the stock if conditions (or `force`) say so.
    pub fn attempt_sales<R: Rng>(&mut self, conditions: &MarketConditions, force: bool, rng: &mut R) {
        if self.materials_inventory < 1.0 {
            return;
        }

        let demand = conditions.demand;
        let price_mult = conditions.price_multiplier;

        let should_sell = force
            || (price_mult > 1.0 && rng.random::<f64>() < 0.8)
            || self.materials_inventory > 20.0
            || self.money < 20_000.0;
        if !should_sell {
            return;
        }

        let units = self
            .materials_inventory
            .min((self.materials_inventory * 0.5 * demand).ceil());
        let unit_price = UNIT_BASE_PRICE * price_mult * (0.9 + self.quality_level * 0.2);
        let revenue = (units * unit_price).trunc();

        self.money += revenue;
        self.materials_inventory -= units;
        self.sales_this_period += units;
        self.total_revenue += revenue;
        self.heat_level += units * 0.5;
    }

    fn update_goal_progress<R: Rng>(&mut self, dt: f64, rng: &mut R) {
        self.goal_progress += dt;

        let achieved = match self.current_goal {
            Goal::ExpandProduction => self.workstations >= 5,
            Goal::MaximizeProfit => self.total_revenue > 500_000.0,
            Goal::DominateMarket => self.market_share > 0.4,
            Goal::AvoidDetection => self.heat_level < 10.0 && self.goal_progress > 300.0,
            Goal::UpgradeTechnology => self.technology_level >= 5,
            Goal::IncreaseEfficiency => false,
        };

        if achieved || self.goal_progress > GOAL_TIMEOUT {
            self.current_goal = Goal::random(rng);
            self.goal_progress = 0.0;
            self.successful_operations += 1;
        }
    }

    pub fn net_worth(&self) -> f64 {
        let assets = self.workstations as f64 * WORKSTATION_VALUE
            + self.robots as f64 * ROBOT_VALUE
            + self.technology_level as f64 * TECH_LEVEL_VALUE
            + self.materials_inventory * INVENTORY_UNIT_VALUE;
        self.money + assets
    }

    pub fn profit(&self) -> f64 {
        self.total_revenue - self.total_expenses
    }

    pub fn statistics(&self) -> CompetitorStats {
        CompetitorStats {
            name: self.name.clone(),
            personality: self.personality,
            money: self.money,
            net_worth: self.net_worth(),
            profit: self.profit(),
            robots: self.robots,
            workstations: self.workstations,
            technology_level: self.technology_level,
            production_rate: self.production_rate,
            inventory: self.materials_inventory,
            market_share: self.market_share,
            reputation: self.reputation,
            heat_level: self.heat_level,
            hiding: self.hiding,
            current_goal: self.current_goal,
            age: self.age,
            total_revenue: self.total_revenue,
            total_expenses: self.total_expenses,
            decisions_made: self.decisions_made,
            successful_operations: self.successful_operations,
        }
    }
}

/// Risk appetite from personality, nudged by difficulty, kept within [0.1, 0.9].
pub fn risk_tolerance(personality: Personality, difficulty: f64) -> f64 {
    (personality.base_risk_tolerance() + (difficulty - 0.5) * 0.3).clamp(0.1, 0.9)
}

/// Read-only view of a competitor for UI and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct CompetitorStats {
    pub name: String,
    pub personality: Personality,
    pub money: f64,
    pub net_worth: f64,
    pub profit: f64,
    pub robots: u32,
    pub workstations: u32,
    pub technology_level: u32,
    pub production_rate: f64,
    pub inventory: f64,
    pub market_share: f64,
    pub reputation: f64,
    pub heat_level: f64,
    pub hiding: bool,
    pub current_goal: Goal,
    pub age: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub decisions_made: u64,
    pub successful_operations: u64,
}
