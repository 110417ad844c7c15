use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tsify_next::Tsify;

use crate::agents::CompetitorAgent;
use crate::competition::{
    CompetitionMarket, MarketConditions, PLAYER_NAME, PlayerSnapshot, ScoreInputs, score,
};
use crate::config::{MatchConfig, seeded_rng};
use crate::ranking::{self, Standing};
use crate::types::{CompetitorId, GameMode, Personality, WinCondition};

/// Company names handed out to competitors, without replacement.
pub const COMPANY_NAMES: [&str; 8] = [
    "GreenCycle Solutions",
    "EcoReclaim Industries",
    "Salvage Masters Inc.",
    "Planet Renewal Corp.",
    "ResourceReborn Ltd.",
    "CleanTech Recyclers",
    "SecondLife Materials Co.",
    "Sustainable Recovery Systems",
];

// ============================================================================
// Host-facing views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub score: i64,
    pub is_player: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MatchStatistics {
    pub game_mode: GameMode,
    pub win_condition: WinCondition,
    pub num_opponents: usize,
    pub time_elapsed: f64,
    /// Only reported for tournaments.
    pub time_limit: Option<f64>,
    pub market_demand: f64,
    pub price_multiplier: f64,
    pub police_activity: f64,
    pub investigation_active: bool,
    pub bankruptcies: u32,
    pub total_production: f64,
    pub total_sales: f64,
    pub winner: Option<String>,
    pub rankings: Vec<Standing>,
}

// ============================================================================
// Opponent Manager - one competitive match
// ============================================================================

/// Runs a roster of AI competitors (and optionally the player) in a shared market.
///
/// Each [`update`](Self::update) runs, strictly in order: market conditions, competitor
/// updates, bankruptcy sweep, market shares, rankings, win check. Later steps read what
/// earlier ones wrote in the same tick.
#[derive(Debug, Clone)]
pub struct OpponentManager {
    config: MatchConfig,
    opponents: SlotMap<CompetitorId, CompetitorAgent>,
    market: CompetitionMarket,
    rankings: Vec<Standing>,
    winner: Option<String>,
    pub tick: u64,
    pub time_elapsed: f64,
    pub bankruptcies: u32,
    pub total_production: f64,
    pub total_sales: f64,
    rng: StdRng,
}

impl OpponentManager {
    pub fn new(num_opponents: i64, game_mode: GameMode, win_condition: WinCondition) -> Self {
        Self::with_config(MatchConfig::new(num_opponents, game_mode, win_condition))
    }

    pub fn with_config(config: MatchConfig) -> Self {
        let config = config.normalized();
        let mut rng = seeded_rng(config.seed);
        let opponents = spawn_opponents(&config, &mut rng);
        let market = CompetitionMarket::new(config.total_market_size);

        Self {
            config,
            opponents,
            market,
            rankings: Vec::new(),
            winner: None,
            tick: 0,
            time_elapsed: 0.0,
            bankruptcies: 0,
            total_production: 0.0,
            total_sales: 0.0,
            rng,
        }
    }

    /// Advance the match by `dt` seconds.
    pub fn update(&mut self, dt: f64, mut player: Option<&mut PlayerSnapshot>) {
        self.tick += 1;
        self.time_elapsed += dt;

        // 1. Market conditions
        let total_inventory: f64 = self.opponents.values().map(|o| o.materials_inventory).sum();
        self.market
            .advance(self.time_elapsed, total_inventory, &self.config, &mut self.rng);
        let conditions = self.market_conditions();
        let police_activity = self.market.police_activity;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "market_conditions",
            tick = self.tick,
            time = self.time_elapsed,
            demand = conditions.demand,
            price_multiplier = conditions.price_multiplier,
            police_activity = police_activity,
            investigation_active = conditions.investigation_active,
            roster = self.opponents.len() as u64,
        );

        // 2. Competitors act
        for opponent in self.opponents.values_mut() {
            let produced_before = opponent.total_produced;
            opponent.update(dt, &conditions, police_activity, &mut self.rng);
            self.total_production += opponent.total_produced - produced_before;
        }

        // 3. Bankruptcy sweep
        self.sweep_bankruptcies();

        // 4. Market shares
        self.update_market_shares(player.as_deref_mut());

        // 5. Rankings
        self.update_rankings(player.as_deref());

        // 6. Win check
        if self.config.game_mode == GameMode::Competitive && self.winner.is_none() {
            self.check_win_condition(player.as_deref());
        }
    }

    fn sweep_bankruptcies(&mut self) {
        let threshold = self.config.bankruptcy_threshold;
        let bankrupt: Vec<CompetitorId> = self
            .opponents
            .iter()
            .filter(|(_, o)| o.money < threshold)
            .map(|(id, _)| id)
            .collect();

        for id in bankrupt {
            if let Some(_removed) = self.opponents.remove(id) {
                self.bankruptcies += 1;

                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "bankruptcy",
                    tick = self.tick,
                    name = _removed.name.as_str(),
                    money = _removed.money,
                );
            }
        }
    }

    fn update_market_shares(&mut self, player: Option<&mut PlayerSnapshot>) {
        let agent_sales: f64 = self.opponents.values().map(|o| o.sales_this_period).sum();
        let player_sales = player.as_ref().map(|p| p.sales).unwrap_or(0.0);
        let total_sales = agent_sales + player_sales;
        self.total_sales += total_sales;

        if total_sales > 0.0 {
            for opponent in self.opponents.values_mut() {
                opponent.market_share = opponent.sales_this_period / total_sales;

                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "market_share",
                    tick = self.tick,
                    name = opponent.name.as_str(),
                    sales = opponent.sales_this_period,
                    share = opponent.market_share,
                );
            }
            if let Some(player) = player {
                if player.market_share.is_some() {
                    player.market_share = Some(player_sales / total_sales);
                }
            }
        }

        // Sales are a per-tick flow
        for opponent in self.opponents.values_mut() {
            opponent.sales_this_period = 0.0;
        }
    }

    fn update_rankings(&mut self, player: Option<&PlayerSnapshot>) {
        let condition = self.config.win_condition;
        let mut entrants: Vec<(String, ScoreInputs)> = self
            .opponents
            .values()
            .map(|o| (o.name.clone(), ScoreInputs::from(&o.statistics())))
            .collect();
        if let Some(player) = player {
            entrants.push((PLAYER_NAME.to_string(), player.score_inputs()));
        }

        self.rankings = ranking::rank_by(entrants, |inputs| score(inputs, condition));

        #[cfg(feature = "instrument")]
        for (position, standing) in self.rankings.iter().enumerate() {
            tracing::info!(
                target: "ranking",
                tick = self.tick,
                rank = (position + 1) as u64,
                name = standing.name.as_str(),
                score = standing.score,
            );
        }
    }

    fn check_win_condition(&mut self, player: Option<&PlayerSnapshot>) {
        let winner = match self.config.win_condition {
            WinCondition::Survival => {
                let mut remaining = self.opponents.len() as i64;
                if player.is_some_and(|p| p.money < self.config.bankruptcy_threshold) {
                    remaining -= 1;
                }
                if remaining <= 1 {
                    // A surviving competitor is preferred over the player.
                    match self.opponents.values().next() {
                        Some(survivor) => Some(survivor.name.clone()),
                        None => player.map(|_| PLAYER_NAME.to_string()),
                    }
                } else {
                    None
                }
            }
            WinCondition::TimeLimit => {
                if self.time_elapsed >= self.config.time_limit {
                    self.rankings.first().map(|s| s.name.clone())
                } else {
                    None
                }
            }
            condition => self.config.threshold_for(condition).and_then(|threshold| {
                ranking::first_at_or_above(&self.rankings, threshold).map(|s| s.name.clone())
            }),
        };

        if let Some(name) = winner {
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "winner",
                tick = self.tick,
                time = self.time_elapsed,
                name = name.as_str(),
                condition = self.config.win_condition.as_str(),
            );
            self.winner = Some(name);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn market_conditions(&self) -> MarketConditions {
        self.market.conditions(self.opponents.len())
    }

    pub fn market(&self) -> &CompetitionMarket {
        &self.market
    }

    pub fn police_activity(&self) -> f64 {
        self.market.police_activity
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn game_mode(&self) -> GameMode {
        self.config.game_mode
    }

    pub fn win_condition(&self) -> WinCondition {
        self.config.win_condition
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn rankings(&self) -> &[Standing] {
        &self.rankings
    }

    /// Competitors still in the match, in spawn order.
    pub fn opponents(&self) -> impl Iterator<Item = &CompetitorAgent> {
        self.opponents.values()
    }

    pub fn opponents_mut(&mut self) -> impl Iterator<Item = &mut CompetitorAgent> {
        self.opponents.values_mut()
    }

    pub fn opponent_count(&self) -> usize {
        self.opponents.len()
    }

    pub fn opponent(&self, name: &str) -> Option<&CompetitorAgent> {
        self.opponents.values().find(|o| o.name == name)
    }

    pub fn opponent_mut(&mut self, name: &str) -> Option<&mut CompetitorAgent> {
        self.opponents.values_mut().find(|o| o.name == name)
    }

    /// Competitor holding ranking position `rank` (0 = first place). `None` for the
    /// player's slot or out-of-range positions.
    pub fn opponent_by_rank(&self, rank: usize) -> Option<&CompetitorAgent> {
        let standing = self.rankings.get(rank)?;
        self.opponent(&standing.name)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.rankings
            .iter()
            .enumerate()
            .map(|(i, s)| LeaderboardEntry {
                rank: i + 1,
                name: s.name.clone(),
                score: s.score,
                is_player: s.name == PLAYER_NAME,
            })
            .collect()
    }

    pub fn statistics(&self) -> MatchStatistics {
        MatchStatistics {
            game_mode: self.config.game_mode,
            win_condition: self.config.win_condition,
            num_opponents: self.opponents.len(),
            time_elapsed: self.time_elapsed,
            time_limit: (self.config.game_mode == GameMode::Tournament)
                .then_some(self.config.time_limit),
            market_demand: self.market.demand_level,
            price_multiplier: self.market.price_multiplier,
            police_activity: self.market.police_activity,
            investigation_active: self.market.investigation_active,
            bankruptcies: self.bankruptcies,
            total_production: self.total_production,
            total_sales: self.total_sales,
            winner: self.winner.clone(),
            rankings: self.rankings.clone(),
        }
    }
}

/// Shuffle the name pool, take one name per competitor and rotate personalities.
fn spawn_opponents<R: Rng>(
    config: &MatchConfig,
    rng: &mut R,
) -> SlotMap<CompetitorId, CompetitorAgent> {
    let mut names = COMPANY_NAMES;
    names.shuffle(rng);

    let mut opponents = SlotMap::with_key();
    for (i, name) in names.iter().take(config.opponent_count()).enumerate() {
        let personality = Personality::ROTATION[i % Personality::ROTATION.len()];
        let difficulty = rng.random_range(config.difficulty_range());
        opponents.insert(CompetitorAgent::new(
            *name,
            personality,
            difficulty,
            config.starting_money,
            rng,
        ));
    }
    opponents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(n: i64, condition: WinCondition) -> OpponentManager {
        OpponentManager::with_config(
            MatchConfig::new(n, GameMode::Competitive, condition).with_seed(42),
        )
    }

    #[test]
    fn spawns_rotating_personalities() {
        let m = manager(5, WinCondition::NetWorth);
        let personalities: Vec<Personality> = m.opponents().map(|o| o.personality).collect();
        assert_eq!(personalities, Personality::ROTATION.to_vec());
        for o in m.opponents() {
            assert!((0.3..=0.8).contains(&o.difficulty));
            assert_eq!(o.money, 50_000.0);
        }
    }

    #[test]
    fn same_seed_same_roster() {
        let a: Vec<String> = manager(4, WinCondition::NetWorth)
            .opponents()
            .map(|o| o.name.clone())
            .collect();
        let b: Vec<String> = manager(4, WinCondition::NetWorth)
            .opponents()
            .map(|o| o.name.clone())
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_sales_leave_shares_untouched() {
        let mut m = manager(2, WinCondition::MarketShare);
        for o in m.opponents_mut() {
            o.market_share = 0.25;
            o.materials_inventory = 0.0;
            o.decision_cooldown = 1e9;
        }
        let mut player = PlayerSnapshot {
            market_share: Some(0.5),
            ..PlayerSnapshot::default()
        };
        m.update(0.001, Some(&mut player));

        assert!(m.opponents().all(|o| o.market_share == 0.25));
        assert_eq!(player.market_share, Some(0.5));
    }

    #[test]
    fn survival_prefers_competitor_over_player() {
        let mut m = manager(1, WinCondition::Survival);
        let mut player = PlayerSnapshot {
            money: -60_000.0,
            ..PlayerSnapshot::default()
        };
        m.update(1.0, Some(&mut player));
        let survivor = m.opponents().next().map(|o| o.name.clone());
        assert_eq!(m.winner(), survivor.as_deref());
    }

    #[test]
    fn survival_falls_back_to_player() {
        let mut m = manager(1, WinCondition::Survival);
        for o in m.opponents_mut() {
            o.money = -60_000.0;
        }
        let mut player = PlayerSnapshot {
            money: 10_000.0,
            ..PlayerSnapshot::default()
        };
        m.update(1.0, Some(&mut player));
        assert_eq!(m.opponent_count(), 0);
        assert_eq!(m.winner(), Some(PLAYER_NAME));
    }

    #[test]
    fn survival_waits_while_two_remain() {
        let mut m = manager(2, WinCondition::Survival);
        let mut player = PlayerSnapshot {
            money: 10_000.0,
            ..PlayerSnapshot::default()
        };
        m.update(1.0, Some(&mut player));
        assert_eq!(m.winner(), None);
    }

    #[test]
    fn time_limit_awards_leader_at_deadline() {
        let mut m = manager(3, WinCondition::TimeLimit);
        m.update(1800.0, None);
        assert_eq!(m.winner(), None);
        m.update(1800.0, None);
        let leader = m.rankings()[0].name.clone();
        assert_eq!(m.winner(), Some(leader.as_str()));
    }

    #[test]
    fn tournament_mode_reports_time_limit() {
        let m = OpponentManager::with_config(
            MatchConfig::new(2, GameMode::Tournament, WinCondition::TimeLimit).with_seed(1),
        );
        assert_eq!(m.statistics().time_limit, Some(3600.0));
        assert_eq!(manager(2, WinCondition::NetWorth).statistics().time_limit, None);
    }

    #[test]
    fn non_competitive_modes_never_declare() {
        let mut m = OpponentManager::with_config(
            MatchConfig::new(2, GameMode::Solo, WinCondition::NetWorth).with_seed(3),
        );
        for o in m.opponents_mut() {
            o.money = 5_000_000.0;
        }
        m.update(1.0, None);
        assert_eq!(m.winner(), None);
    }

    #[test]
    fn opponent_by_rank_skips_player_slot() {
        let mut m = manager(1, WinCondition::NetWorth);
        let mut player = PlayerSnapshot {
            net_worth: 10_000_000.0,
            ..PlayerSnapshot::default()
        };
        m.update(1.0, Some(&mut player));
        assert_eq!(m.rankings()[0].name, PLAYER_NAME);
        assert!(m.opponent_by_rank(0).is_none());
        assert!(m.opponent_by_rank(1).is_some());
        assert!(m.opponent_by_rank(2).is_none());
    }
}
