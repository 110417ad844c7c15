use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::scoring::{Counter, Counters};

/// Static description of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: i64,
    /// Kept out of locked lists and progress totals until unlocked.
    pub hidden: bool,
    pub icon: &'static str,
}

const fn def(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    points: i64,
    icon: &'static str,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        points,
        hidden: false,
        icon,
    }
}

const fn hidden(mut achievement: AchievementDef) -> AchievementDef {
    achievement.hidden = true;
    achievement
}

pub static CATALOG: [AchievementDef; 29] = [
    // Money
    def("first_dollar", "First Dollar", "Earn your first dollar", 10, "💵"),
    def("millionaire", "Millionaire", "Accumulate $1,000,000", 100, "💰"),
    def("big_spender", "Big Spender", "Spend $500,000", 50, "💸"),
    // Production
    def("first_product", "First Product", "Process your first material", 10, "♻️"),
    def("mass_production", "Mass Production", "Process 10,000 materials", 100, "🏭"),
    def("recycling_master", "Recycling Master", "Process 100,000 materials", 250, "🌟"),
    // Building
    def("builder", "Builder", "Construct 10 buildings", 50, "🏗️"),
    def("architect", "Architect", "Construct 50 buildings", 150, "🏛️"),
    def("city_planner", "City Planner", "Construct 100 buildings", 300, "🌆"),
    // Exploration
    def("explorer", "Explorer", "Explore 25% of the map", 50, "🗺️"),
    def("cartographer", "Cartographer", "Explore 75% of the map", 150, "🧭"),
    def("completionist", "Completionist", "Explore 100% of the map", 300, "🌍"),
    // Stealth
    def("ghost", "Ghost", "Complete game with <20 max suspicion", 200, "👻"),
    def("invisible", "Invisible", "Never trigger inspection", 150, "🔍"),
    def("smooth_operator", "Smooth Operator", "Never fail inspection", 100, "😎"),
    // Drones
    def("drone_pilot", "Drone Pilot", "Deploy 10 drones", 50, "🚁"),
    def("air_force", "Air Force", "Own 5 drones simultaneously", 100, "✈️"),
    hidden(def("crash_test", "Crash Test", "Crash 5 drones", 25, "💥")),
    // Authorities
    def("law_abiding", "Law Abiding Citizen", "Complete game at LOCAL tier", 150, "👮"),
    def("federal_attention", "Federal Attention", "Reach FEDERAL tier", 50, "🚨"),
    def("master_negotiator", "Master Negotiator", "Successfully bribe 10 times", 100, "🤝"),
    // Endings
    def("legitimate_success", "Legitimate Success", "Win via legitimate business", 500, "🏆"),
    def("great_escape", "Great Escape", "Escape before FBI raid", 300, "✈️"),
    def("deal_maker", "Deal Maker", "Negotiate plea deal", 200, "⚖️"),
    hidden(def("caught", "Caught", "Get raided by FBI", 50, "🚔")),
    // Special
    def("speed_run", "Speed Run", "Complete game in <10 game days", 400, "⚡"),
    def("slow_burn", "Slow Burn", "Survive 100 game days", 200, "🐢"),
    def("market_master", "Market Master", "Profit from market fluctuations", 150, "📈"),
    def("weatherman", "Weatherman", "Operate through 10 different weather changes", 75, "🌤️"),
];

/// How a counter is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    AtLeast(f64),
    Above(f64),
}

impl Trigger {
    pub fn met(&self, value: f64) -> bool {
        match *self {
            Trigger::AtLeast(threshold) => value >= threshold,
            Trigger::Above(threshold) => value > threshold,
        }
    }
}

/// Achievements earned during play by a counter crossing a threshold.
/// `first_dollar` is not among them: it is awarded for a single positive earning.
pub static THRESHOLDS: [(&str, Counter, Trigger); 15] = [
    ("millionaire", Counter::MoneyEarned, Trigger::AtLeast(1_000_000.0)),
    ("big_spender", Counter::MoneySpent, Trigger::AtLeast(500_000.0)),
    ("first_product", Counter::MaterialsProcessed, Trigger::Above(0.0)),
    ("mass_production", Counter::MaterialsProcessed, Trigger::AtLeast(10_000.0)),
    ("recycling_master", Counter::MaterialsProcessed, Trigger::AtLeast(100_000.0)),
    ("builder", Counter::BuildingsBuilt, Trigger::AtLeast(10.0)),
    ("architect", Counter::BuildingsBuilt, Trigger::AtLeast(50.0)),
    ("city_planner", Counter::BuildingsBuilt, Trigger::AtLeast(100.0)),
    ("drone_pilot", Counter::DronesDeployed, Trigger::AtLeast(10.0)),
    ("air_force", Counter::PeakDronesActive, Trigger::AtLeast(5.0)),
    ("crash_test", Counter::DronesCrashed, Trigger::AtLeast(5.0)),
    ("master_negotiator", Counter::BribesSuccessful, Trigger::AtLeast(10.0)),
    ("federal_attention", Counter::PeakAuthorityTier, Trigger::AtLeast(2.0)),
    ("market_master", Counter::MarketProfit, Trigger::Above(0.0)),
    ("weatherman", Counter::WeatherChanges, Trigger::AtLeast(10.0)),
];

/// Threshold achievements whose trigger `counters` currently satisfies.
pub fn earned(counters: &Counters) -> impl Iterator<Item = &'static str> + '_ {
    THRESHOLDS
        .iter()
        .filter(|(_, counter, trigger)| trigger.met(counters.get(*counter)))
        .map(|(id, _, _)| *id)
}

/// An achievement and whether the player has it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: i64,
    pub hidden: bool,
    pub icon: String,
    pub unlocked: bool,
    pub unlock_time: f64,
}

impl From<&AchievementDef> for Achievement {
    fn from(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            points: def.points,
            hidden: def.hidden,
            icon: def.icon.to_string(),
            unlocked: false,
            unlock_time: 0.0,
        }
    }
}
