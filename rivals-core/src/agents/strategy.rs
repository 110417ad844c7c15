use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::types::Personality;

// === THRESHOLDS ===

pub const MONEY_GOOD: f64 = 100_000.0;
pub const MONEY_TIGHT: f64 = 20_000.0;
pub const FAVOURABLE_PRICE: f64 = 1.2;
pub const POLICE_THREAT: f64 = 0.7;
pub const HEAT_CRITICAL: f64 = 70.0;
pub const HEAT_WORRYING: f64 = 50.0;
pub const INVENTORY_HIGH: f64 = 50.0;
pub const EXPANSION_MONEY: f64 = 50_000.0;
pub const EXPANSION_SHARE_CAP: f64 = 0.4;

/// Long-running objective a competitor works toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    ExpandProduction,
    IncreaseEfficiency,
    MaximizeProfit,
    AvoidDetection,
    DominateMarket,
    UpgradeTechnology,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::ExpandProduction,
        Goal::IncreaseEfficiency,
        Goal::MaximizeProfit,
        Goal::AvoidDetection,
        Goal::DominateMarket,
        Goal::UpgradeTechnology,
    ];

    /// Opening goal for a freshly spawned competitor.
    pub fn initial<R: Rng>(personality: Personality, rng: &mut R) -> Goal {
        let options: &[Goal] = match personality {
            Personality::Aggressive => &[Goal::ExpandProduction, Goal::DominateMarket],
            Personality::Cautious => &[Goal::AvoidDetection, Goal::MaximizeProfit],
            Personality::Innovator => &[Goal::UpgradeTechnology],
            Personality::Opportunist => &[Goal::MaximizeProfit],
            Personality::Balanced => &Goal::ALL,
        };
        options.choose(rng).copied().unwrap_or(Goal::MaximizeProfit)
    }

    pub fn random<R: Rng>(rng: &mut R) -> Goal {
        Goal::ALL.choose(rng).copied().unwrap_or(Goal::MaximizeProfit)
    }
}

/// One discrete action taken when a competitor's decision cooldown expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    BuildWorkstation,
    HireRobot,
    UpgradeMachine,
    IncreaseProduction,
    DecreaseProduction,
    HideOperation,
    SellProducts,
    SaveMoney,
    BribeOfficials,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::BuildWorkstation => "build_workstation",
            Decision::HireRobot => "hire_robot",
            Decision::UpgradeMachine => "upgrade_machine",
            Decision::IncreaseProduction => "increase_production",
            Decision::DecreaseProduction => "decrease_production",
            Decision::HideOperation => "hide_operation",
            Decision::SellProducts => "sell_products",
            Decision::SaveMoney => "save_money",
            Decision::BribeOfficials => "bribe_officials",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneySituation {
    Good,
    Tight,
    Critical,
}

impl MoneySituation {
    pub fn classify(money: f64) -> Self {
        if money > MONEY_GOOD {
            MoneySituation::Good
        } else if money > MONEY_TIGHT {
            MoneySituation::Tight
        } else {
            MoneySituation::Critical
        }
    }
}

/// Snapshot of what a competitor sees when deciding.
#[derive(Debug, Clone, Copy)]
pub struct Situation {
    pub money: MoneySituation,
    pub market_demand: f64,
    pub price_favourable: bool,
    pub police_threat: bool,
    pub heat_critical: bool,
    pub inventory_high: bool,
    pub robots_needed: bool,
    pub expansion_viable: bool,
}

/// Inputs the decision table reads beyond the situation flags.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext {
    pub personality: Personality,
    pub money: f64,
    pub heat: f64,
    pub inventory: f64,
}

/// Pick an action: emergencies first, then the personality table.
pub fn choose_decision<R: Rng>(situation: &Situation, ctx: &DecisionContext, rng: &mut R) -> Decision {
    if situation.money == MoneySituation::Critical {
        return if ctx.inventory > 5.0 {
            Decision::SellProducts
        } else {
            Decision::SaveMoney
        };
    }

    if situation.heat_critical || (situation.police_threat && ctx.heat > HEAT_WORRYING) {
        return Decision::HideOperation;
    }

    match ctx.personality {
        Personality::Aggressive => {
            if situation.expansion_viable && rng.random::<f64>() < 0.7 {
                pick(rng, &[Decision::BuildWorkstation, Decision::HireRobot])
            } else if situation.inventory_high {
                Decision::IncreaseProduction
            } else {
                pick(rng, &[Decision::BuildWorkstation, Decision::IncreaseProduction])
            }
        }
        Personality::Cautious => {
            if situation.police_threat {
                Decision::HideOperation
            } else if ctx.money < 30_000.0 {
                Decision::SaveMoney
            } else if situation.robots_needed {
                Decision::HireRobot
            } else if rng.random::<f64>() < 0.5 {
                Decision::IncreaseProduction
            } else {
                Decision::SaveMoney
            }
        }
        Personality::Innovator => {
            if ctx.money > 80_000.0 && rng.random::<f64>() < 0.6 {
                Decision::UpgradeMachine
            } else if situation.expansion_viable {
                Decision::BuildWorkstation
            } else {
                Decision::IncreaseProduction
            }
        }
        Personality::Opportunist => {
            if situation.price_favourable && ctx.inventory > 10.0 {
                Decision::SellProducts
            } else if situation.market_demand > 1.5 {
                Decision::IncreaseProduction
            } else if situation.expansion_viable {
                Decision::BuildWorkstation
            } else {
                Decision::SaveMoney
            }
        }
        Personality::Balanced => {
            if situation.expansion_viable && rng.random::<f64>() < 0.5 {
                Decision::BuildWorkstation
            } else if situation.robots_needed && rng.random::<f64>() < 0.6 {
                Decision::HireRobot
            } else if situation.inventory_high {
                Decision::SellProducts
            } else {
                pick(rng, &[Decision::IncreaseProduction, Decision::SaveMoney])
            }
        }
    }
}

fn pick<R: Rng>(rng: &mut R, options: &[Decision]) -> Decision {
    options.choose(rng).copied().unwrap_or(Decision::SaveMoney)
}
