use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::ranking;
use crate::scoring::{Achievement, AuthorityTier, CATALOG, Counters, earned};

const SECONDS_PER_DAY: f64 = 86_400.0;

// ============================================================================
// Score categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    MoneyEarned,
    MaterialsProcessed,
    BuildingsBuilt,
    IllegalOperations,
    TimeSurvived,
    Efficiency,
    Stealth,
    Exploration,
    Technology,
    EndingBonus,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 10] = [
        ScoreCategory::MoneyEarned,
        ScoreCategory::MaterialsProcessed,
        ScoreCategory::BuildingsBuilt,
        ScoreCategory::IllegalOperations,
        ScoreCategory::TimeSurvived,
        ScoreCategory::Efficiency,
        ScoreCategory::Stealth,
        ScoreCategory::Exploration,
        ScoreCategory::Technology,
        ScoreCategory::EndingBonus,
    ];

    fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::MoneyEarned => "money_earned",
            ScoreCategory::MaterialsProcessed => "materials_processed",
            ScoreCategory::BuildingsBuilt => "buildings_built",
            ScoreCategory::IllegalOperations => "illegal_operations",
            ScoreCategory::TimeSurvived => "time_survived",
            ScoreCategory::Efficiency => "efficiency",
            ScoreCategory::Stealth => "stealth",
            ScoreCategory::Exploration => "exploration",
            ScoreCategory::Technology => "technology",
            ScoreCategory::EndingBonus => "ending_bonus",
        }
    }

    /// Points per unit of the category's raw value.
    pub fn multiplier(&self) -> f64 {
        match self {
            ScoreCategory::MoneyEarned => 0.01, // 1 point per $100
            ScoreCategory::MaterialsProcessed => 1.0,
            ScoreCategory::BuildingsBuilt => 50.0,
            ScoreCategory::IllegalOperations => -100.0, // Penalty
            ScoreCategory::TimeSurvived => 10.0, // Per game day
            ScoreCategory::Efficiency => 100.0,
            ScoreCategory::Stealth => 100.0,
            ScoreCategory::Exploration => 100.0,
            ScoreCategory::Technology => 25.0,
            ScoreCategory::EndingBonus => 1.0,
        }
    }
}

// ============================================================================
// Endings and ranks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndingType {
    LegitimateSuccess,
    Escape,
    PleaDeal,
    FbiRaid,
    Bankruptcy,
    InspectorFailure,
}

impl EndingType {
    pub const ALL: [EndingType; 6] = [
        EndingType::LegitimateSuccess,
        EndingType::Escape,
        EndingType::PleaDeal,
        EndingType::FbiRaid,
        EndingType::Bankruptcy,
        EndingType::InspectorFailure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EndingType::LegitimateSuccess => "LEGITIMATE_SUCCESS",
            EndingType::Escape => "ESCAPE",
            EndingType::PleaDeal => "PLEA_DEAL",
            EndingType::FbiRaid => "FBI_RAID",
            EndingType::Bankruptcy => "BANKRUPTCY",
            EndingType::InspectorFailure => "INSPECTOR_FAILURE",
        }
    }

    pub fn from_name(name: &str) -> Option<EndingType> {
        EndingType::ALL.into_iter().find(|e| e.name() == name)
    }

    pub fn bonus(&self) -> f64 {
        match self {
            EndingType::LegitimateSuccess => 5000.0,
            EndingType::Escape => 3000.0,
            EndingType::PleaDeal => 1500.0,
            EndingType::FbiRaid => 500.0,
            EndingType::Bankruptcy => 0.0,
            EndingType::InspectorFailure => 200.0,
        }
    }

    /// Achievement awarded for reaching this ending, if any.
    pub fn achievement(&self) -> Option<&'static str> {
        match self {
            EndingType::LegitimateSuccess => Some("legitimate_success"),
            EndingType::Escape => Some("great_escape"),
            EndingType::PleaDeal => Some("deal_maker"),
            EndingType::FbiRaid => Some("caught"),
            EndingType::Bankruptcy | EndingType::InspectorFailure => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub enum ScoreRank {
    Novice,
    Amateur,
    Professional,
    Expert,
    Master,
    Legend,
    Grandmaster,
}

/// Lowest score for each rank, highest first.
pub const RANK_BRACKETS: [(i64, ScoreRank); 7] = [
    (100_000, ScoreRank::Grandmaster),
    (50_000, ScoreRank::Legend),
    (25_000, ScoreRank::Master),
    (10_000, ScoreRank::Expert),
    (5_000, ScoreRank::Professional),
    (1_000, ScoreRank::Amateur),
    (0, ScoreRank::Novice),
];

impl ScoreRank {
    pub fn for_score(score: i64) -> ScoreRank {
        ranking::bracket(score, &RANK_BRACKETS).unwrap_or(ScoreRank::Novice)
    }
}

// ============================================================================
// Host-facing views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct CategoryScore {
    pub category: ScoreCategory,
    pub value: f64,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ScoringSummary {
    pub total_score: i64,
    pub rank: ScoreRank,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
    pub score_breakdown: Vec<CategoryScore>,
    pub statistics: Counters,
    pub efficiency: f64,
    pub stealth: f64,
    pub exploration: f64,
    pub game_completed: bool,
}

// ============================================================================
// Scoring Manager
// ============================================================================

/// Accumulates the player's counters and achievements over a game and turns them
/// into a final score once the game ends.
///
/// Achievements unlock one way: every `record_*` call re-checks the threshold table and
/// nothing ever re-locks an achievement.
#[derive(Debug, Clone)]
pub struct ScoringManager {
    values: [f64; 10],
    achievements: Vec<Achievement>,
    counters: Counters,
    pub efficiency_score: f64,
    pub stealth_score: f64,
    pub exploration_score: f64,
    pub total_score: i64,
    pub rank: ScoreRank,
    pub game_completed: bool,
    /// Latest game time seen, stamped on unlocks.
    clock: f64,
}

impl Default for ScoringManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringManager {
    pub fn new() -> Self {
        Self {
            values: [0.0; 10],
            achievements: CATALOG.iter().map(Achievement::from).collect(),
            counters: Counters::default(),
            efficiency_score: 0.0,
            stealth_score: 0.0,
            exploration_score: 0.0,
            total_score: 0,
            rank: ScoreRank::Novice,
            game_completed: false,
            clock: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64, game_time: f64) {
        self.counters.time_played += dt;
        self.clock = game_time;

        if game_time / SECONDS_PER_DAY >= 100.0 {
            self.unlock("slow_burn", game_time);
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    // ========================================================================
    // Recording
    // ========================================================================

    pub fn record_money_earned(&mut self, amount: f64) {
        self.counters.total_money_earned += amount;
        if amount > 0.0 {
            self.unlock("first_dollar", self.clock);
        }
        self.sweep();
    }

    pub fn record_money_spent(&mut self, amount: f64) {
        self.counters.total_money_spent += amount.abs();
        self.sweep();
    }

    /// Track the cash balance for the min/max watermarks.
    pub fn record_money_balance(&mut self, money: f64) {
        self.counters.min_money = self.counters.min_money.min(money);
        self.counters.max_money = self.counters.max_money.max(money);
    }

    pub fn record_material_collected(&mut self, quantity: f64) {
        self.counters.materials_collected += quantity;
        self.sweep();
    }

    pub fn record_material_processed(&mut self, quantity: f64) {
        self.counters.materials_processed += quantity;
        self.sweep();
    }

    pub fn record_product_sold(&mut self, quantity: f64) {
        self.counters.products_sold += quantity;
        self.sweep();
    }

    pub fn record_building_built(&mut self) {
        self.counters.buildings_built += 1;
        self.sweep();
    }

    pub fn record_building_demolished(&mut self) {
        self.counters.buildings_demolished += 1;
    }

    pub fn record_drone_deployed(&mut self) {
        self.counters.drones_deployed += 1;
        self.counters.drones_active += 1;
        self.counters.peak_drones_active = self
            .counters
            .peak_drones_active
            .max(self.counters.drones_active);
        self.sweep();
    }

    pub fn record_drone_recalled(&mut self) {
        self.counters.drones_active = self.counters.drones_active.saturating_sub(1);
    }

    pub fn record_drone_crashed(&mut self) {
        self.counters.drones_crashed += 1;
        self.counters.drones_active = self.counters.drones_active.saturating_sub(1);
        self.sweep();
    }

    pub fn record_worker_hired(&mut self) {
        self.counters.workers_hired += 1;
    }

    pub fn record_inspection_result(&mut self, passed: bool) {
        if passed {
            self.counters.inspections_passed += 1;
        } else {
            self.counters.inspections_failed += 1;
        }
    }

    pub fn record_bribe_attempt(&mut self, success: bool) {
        self.counters.bribes_attempted += 1;
        if success {
            self.counters.bribes_successful += 1;
        }
        self.sweep();
    }

    pub fn record_escape_attempt(&mut self) {
        self.counters.escape_attempts += 1;
    }

    pub fn record_tiles_explored(&mut self, tiles: u32) {
        self.counters.tiles_explored += tiles;
    }

    pub fn record_suspicion(&mut self, level: f64) {
        self.counters.max_suspicion = self.counters.max_suspicion.max(level);
    }

    pub fn record_illegal_operation(&mut self) {
        self.counters.illegal_operations += 1;
    }

    /// Technology only moves up.
    pub fn record_technology_level(&mut self, level: u32) {
        self.counters.technology_level = self.counters.technology_level.max(level);
    }

    pub fn record_weather_change(&mut self) {
        self.counters.weather_changes += 1;
        self.sweep();
    }

    /// Profit (or loss) from one market trade.
    pub fn record_market_trade(&mut self, profit: f64) {
        self.counters.market_profit += profit;
        self.sweep();
    }

    pub fn record_authority_tier(&mut self, tier: AuthorityTier) {
        let peak = self.counters.peak_authority_tier.map_or(tier, |p| p.max(tier));
        self.counters.peak_authority_tier = Some(peak);
        self.sweep();
    }

    fn sweep(&mut self) {
        let due: Vec<&'static str> = earned(&self.counters).collect();
        for id in due {
            self.unlock(id, self.clock);
        }
    }

    // ========================================================================
    // Achievements
    // ========================================================================

    /// Unlock `id`. Returns false for unknown or already unlocked achievements.
    pub fn unlock(&mut self, id: &str, game_time: f64) -> bool {
        let Some(achievement) = self.achievements.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if achievement.unlocked {
            return false;
        }
        achievement.unlocked = true;
        achievement.unlock_time = game_time;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "achievement",
            id = achievement.id.as_str(),
            name = achievement.name.as_str(),
            points = achievement.points,
            time = game_time,
        );
        true
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id && a.unlocked)
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn unlocked_achievements(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }

    /// Still-locked achievements the player is allowed to see.
    pub fn locked_achievements(&self) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| !a.unlocked && !a.hidden)
            .collect()
    }

    /// (unlocked, visible total). Unlocked hidden achievements count toward the first figure only.
    pub fn achievement_progress(&self) -> (usize, usize) {
        let unlocked = self.achievements.iter().filter(|a| a.unlocked).count();
        let total = self.achievements.iter().filter(|a| !a.hidden).count();
        (unlocked, total)
    }

    fn achievement_points(&self) -> i64 {
        self.achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.points)
            .sum()
    }

    // ========================================================================
    // Final score
    // ========================================================================

    fn set(&mut self, category: ScoreCategory, value: f64) {
        self.values[category.index()] = value;
    }

    pub fn value(&self, category: ScoreCategory) -> f64 {
        self.values[category.index()]
    }

    /// Points a category contributes: its value times its multiplier, truncated.
    pub fn points(&self, category: ScoreCategory) -> i64 {
        (self.value(category) * category.multiplier()) as i64
    }

    /// Fix the final score for a finished game.
    ///
    /// The total covers achievements unlocked so far. Achievements awarded for the way the
    /// game ended are unlocked afterwards and do not feed this total.
    pub fn calculate_final_score(
        &mut self,
        game_time: f64,
        ending: Option<EndingType>,
        current_money: f64,
        max_suspicion: f64,
        exploration_percent: f64,
    ) -> i64 {
        self.game_completed = true;
        self.clock = game_time;
        self.record_money_balance(current_money);
        self.record_suspicion(max_suspicion);

        let days_survived = game_time / SECONDS_PER_DAY;
        if self.counters.materials_collected > 0.0 {
            self.efficiency_score =
                (self.counters.materials_processed / self.counters.materials_collected).min(1.0);
        }
        self.stealth_score = (1.0 - max_suspicion / 150.0).max(0.0);
        self.exploration_score = exploration_percent / 100.0;

        self.set(ScoreCategory::MoneyEarned, self.counters.total_money_earned);
        self.set(ScoreCategory::MaterialsProcessed, self.counters.materials_processed);
        self.set(ScoreCategory::BuildingsBuilt, self.counters.buildings_built as f64);
        self.set(ScoreCategory::IllegalOperations, self.counters.illegal_operations as f64);
        self.set(ScoreCategory::TimeSurvived, days_survived);
        self.set(ScoreCategory::Efficiency, self.efficiency_score);
        self.set(ScoreCategory::Stealth, self.stealth_score);
        self.set(ScoreCategory::Exploration, self.exploration_score);
        self.set(ScoreCategory::Technology, self.counters.technology_level as f64);
        self.set(
            ScoreCategory::EndingBonus,
            ending.map(|e| e.bonus()).unwrap_or(0.0),
        );

        let category_points: i64 = ScoreCategory::ALL.iter().map(|c| self.points(*c)).sum();
        let achievement_points = self.achievement_points();
        self.total_score = (category_points + achievement_points).max(0);
        self.rank = ScoreRank::for_score(self.total_score);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "final_score",
            total = self.total_score,
            category_points = category_points,
            achievement_points = achievement_points,
            rank = ?self.rank,
            ending = ending.map(|e| e.name()).unwrap_or("UNKNOWN"),
            days = days_survived,
        );

        self.unlock_ending_achievements(game_time, ending, max_suspicion, exploration_percent);
        self.total_score
    }

    fn unlock_ending_achievements(
        &mut self,
        game_time: f64,
        ending: Option<EndingType>,
        max_suspicion: f64,
        exploration_percent: f64,
    ) {
        if let Some(id) = ending.and_then(|e| e.achievement()) {
            self.unlock(id, game_time);
        }

        if max_suspicion < 20.0 && ending != Some(EndingType::FbiRaid) {
            self.unlock("ghost", game_time);
        }

        let counters = &self.counters;
        let smooth = counters.inspections_failed == 0 && counters.inspections_passed > 0;
        let invisible = counters.inspections() == 0;
        let law_abiding = counters.peak_authority_tier.unwrap_or(AuthorityTier::Local)
            == AuthorityTier::Local;
        if smooth {
            self.unlock("smooth_operator", game_time);
        }
        if invisible {
            self.unlock("invisible", game_time);
        }
        if law_abiding {
            self.unlock("law_abiding", game_time);
        }

        for (floor, id) in [(25.0, "explorer"), (75.0, "cartographer"), (100.0, "completionist")] {
            if exploration_percent >= floor {
                self.unlock(id, game_time);
            }
        }

        if game_time / SECONDS_PER_DAY <= 10.0 {
            self.unlock("speed_run", game_time);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn breakdown(&self) -> Vec<CategoryScore> {
        ScoreCategory::ALL
            .iter()
            .map(|category| CategoryScore {
                category: *category,
                value: self.value(*category),
                points: self.points(*category),
            })
            .collect()
    }

    pub fn summary(&self) -> ScoringSummary {
        let (unlocked, total) = self.achievement_progress();
        ScoringSummary {
            total_score: self.total_score,
            rank: self.rank,
            achievements_unlocked: unlocked,
            achievements_total: total,
            score_breakdown: self.breakdown(),
            statistics: self.counters.clone(),
            efficiency: self.efficiency_score,
            stealth: self.stealth_score,
            exploration: self.exploration_score,
            game_completed: self.game_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = SECONDS_PER_DAY;

    #[test]
    fn money_milestones_unlock_once() {
        let mut scoring = ScoringManager::new();
        scoring.record_money_earned(1.0);
        assert!(scoring.is_unlocked("first_dollar"));
        assert!(!scoring.is_unlocked("millionaire"));

        scoring.record_money_earned(999_999.0);
        assert!(scoring.is_unlocked("millionaire"));
        assert!(!scoring.unlock("millionaire", 5.0));
    }

    #[test]
    fn first_dollar_follows_a_single_positive_earning() {
        let mut scoring = ScoringManager::new();
        scoring.record_money_earned(-50.0);
        assert!(!scoring.is_unlocked("first_dollar"));

        // Running total is still negative, the earning itself is not.
        scoring.record_money_earned(20.0);
        assert_eq!(scoring.counters().total_money_earned, -30.0);
        assert!(scoring.is_unlocked("first_dollar"));
    }

    #[test]
    fn spending_counts_magnitude() {
        let mut scoring = ScoringManager::new();
        scoring.record_money_spent(-300_000.0);
        scoring.record_money_spent(200_000.0);
        assert_eq!(scoring.counters().total_money_spent, 500_000.0);
        assert!(scoring.is_unlocked("big_spender"));
    }

    #[test]
    fn production_and_building_tiers() {
        let mut scoring = ScoringManager::new();
        scoring.record_material_processed(10_000.0);
        assert!(scoring.is_unlocked("first_product"));
        assert!(scoring.is_unlocked("mass_production"));
        assert!(!scoring.is_unlocked("recycling_master"));

        for _ in 0..50 {
            scoring.record_building_built();
        }
        assert!(scoring.is_unlocked("builder"));
        assert!(scoring.is_unlocked("architect"));
        assert!(!scoring.is_unlocked("city_planner"));
    }

    #[test]
    fn drones_track_peak_fleet() {
        let mut scoring = ScoringManager::new();
        for _ in 0..4 {
            scoring.record_drone_deployed();
        }
        scoring.record_drone_crashed();
        scoring.record_drone_deployed();
        assert!(!scoring.is_unlocked("air_force"));
        scoring.record_drone_deployed();
        assert_eq!(scoring.counters().peak_drones_active, 5);
        assert!(scoring.is_unlocked("air_force"));

        for _ in 0..4 {
            scoring.record_drone_crashed();
        }
        assert!(scoring.is_unlocked("crash_test"));
        assert_eq!(scoring.counters().drones_active, 1);
    }

    #[test]
    fn bribes_need_successes() {
        let mut scoring = ScoringManager::new();
        for _ in 0..20 {
            scoring.record_bribe_attempt(false);
        }
        assert!(!scoring.is_unlocked("master_negotiator"));
        for _ in 0..10 {
            scoring.record_bribe_attempt(true);
        }
        assert!(scoring.is_unlocked("master_negotiator"));
        assert_eq!(scoring.counters().bribes_attempted, 30);
    }

    #[test]
    fn authority_weather_and_market_triggers() {
        let mut scoring = ScoringManager::new();
        scoring.record_authority_tier(AuthorityTier::State);
        assert!(!scoring.is_unlocked("federal_attention"));
        scoring.record_authority_tier(AuthorityTier::Federal);
        scoring.record_authority_tier(AuthorityTier::Local);
        assert!(scoring.is_unlocked("federal_attention"));
        assert_eq!(scoring.counters().peak_authority_tier, Some(AuthorityTier::Federal));

        scoring.record_market_trade(-50.0);
        scoring.record_market_trade(40.0);
        assert!(!scoring.is_unlocked("market_master"));
        scoring.record_market_trade(20.0);
        assert!(scoring.is_unlocked("market_master"));

        for _ in 0..10 {
            scoring.record_weather_change();
        }
        assert!(scoring.is_unlocked("weatherman"));
    }

    #[test]
    fn slow_burn_at_one_hundred_days() {
        let mut scoring = ScoringManager::new();
        scoring.update(1.0, 99.0 * DAY);
        assert!(!scoring.is_unlocked("slow_burn"));
        scoring.update(1.0, 100.0 * DAY);
        assert!(scoring.is_unlocked("slow_burn"));
        let slow_burn = scoring.achievements().iter().find(|a| a.id == "slow_burn").unwrap();
        assert_eq!(slow_burn.unlock_time, 100.0 * DAY);
    }

    #[test]
    fn final_score_sums_categories_and_achievements() {
        let mut scoring = ScoringManager::new();
        scoring.record_money_earned(12_345.0); // first_dollar +10
        scoring.record_material_collected(200.0);
        scoring.record_material_processed(100.0); // first_product +10
        scoring.record_building_built();
        scoring.record_technology_level(2);

        let total = scoring.calculate_final_score(
            20.0 * DAY,
            Some(EndingType::LegitimateSuccess),
            5_000.0,
            75.0,
            10.0,
        );

        // 123 + 100 + 50 + 200 + 50 (efficiency 0.5) + 50 (stealth 0.5) + 10 + 50 + 5000 + 20
        assert_eq!(total, 5_653);
        assert_eq!(scoring.rank, ScoreRank::Professional);
        assert!(scoring.game_completed);

        // Unlocked after the total was fixed
        assert!(scoring.is_unlocked("legitimate_success"));
        assert!(scoring.is_unlocked("invisible"));
        assert!(scoring.is_unlocked("law_abiding"));
        assert!(!scoring.is_unlocked("speed_run"));
        assert!(!scoring.is_unlocked("ghost"));
        assert_eq!(scoring.total_score, 5_653);
    }

    #[test]
    fn penalties_cannot_push_below_zero() {
        let mut scoring = ScoringManager::new();
        for _ in 0..50 {
            scoring.record_illegal_operation();
        }
        let total =
            scoring.calculate_final_score(DAY, Some(EndingType::Bankruptcy), 0.0, 200.0, 0.0);
        assert_eq!(total, 0);
        assert_eq!(scoring.rank, ScoreRank::Novice);
        assert_eq!(scoring.points(ScoreCategory::IllegalOperations), -5_000);
    }

    #[test]
    fn raid_ending_blocks_ghost() {
        let mut scoring = ScoringManager::new();
        scoring.record_inspection_result(true);
        scoring.calculate_final_score(5.0 * DAY, Some(EndingType::FbiRaid), 0.0, 5.0, 100.0);
        assert!(scoring.is_unlocked("caught"));
        assert!(!scoring.is_unlocked("ghost"));
        assert!(scoring.is_unlocked("smooth_operator"));
        assert!(!scoring.is_unlocked("invisible"));
        assert!(scoring.is_unlocked("completionist"));
        assert!(scoring.is_unlocked("speed_run"));
    }

    #[test]
    fn unknown_ending_earns_no_bonus() {
        let mut scoring = ScoringManager::new();
        scoring.calculate_final_score(30.0 * DAY, EndingType::from_name("ALIENS"), 0.0, 150.0, 0.0);
        assert_eq!(scoring.value(ScoreCategory::EndingBonus), 0.0);
        // Only the time survived category scores
        assert_eq!(scoring.total_score, 300);
    }

    #[test]
    fn rank_brackets() {
        for (score, rank) in [
            (0, ScoreRank::Novice),
            (999, ScoreRank::Novice),
            (1_000, ScoreRank::Amateur),
            (9_999, ScoreRank::Professional),
            (10_000, ScoreRank::Expert),
            (49_999, ScoreRank::Master),
            (99_999, ScoreRank::Legend),
            (100_000, ScoreRank::Grandmaster),
        ] {
            assert_eq!(ScoreRank::for_score(score), rank, "score {score}");
        }
    }

    #[test]
    fn progress_hides_hidden_achievements() {
        let mut scoring = ScoringManager::new();
        assert_eq!(scoring.achievement_progress(), (0, 27));
        assert_eq!(scoring.locked_achievements().len(), 27);

        scoring.unlock("caught", 0.0);
        scoring.unlock("builder", 0.0);
        assert_eq!(scoring.achievement_progress(), (2, 27));
        assert_eq!(scoring.locked_achievements().len(), 26);
        assert_eq!(scoring.unlocked_achievements().len(), 2);
        assert!(!scoring.unlock("no_such_thing", 0.0));
    }

    #[test]
    fn summary_reports_breakdown() {
        let mut scoring = ScoringManager::new();
        scoring.record_money_earned(500.0);
        scoring.calculate_final_score(0.0, None, 500.0, 0.0, 0.0);
        let summary = scoring.summary();
        assert_eq!(summary.score_breakdown.len(), 10);
        assert_eq!(summary.score_breakdown[0].points, 5);
        assert_eq!(summary.statistics.max_money, 500.0);
        assert!(summary.game_completed);
    }
}
