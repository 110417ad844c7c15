use wasm_bindgen::prelude::*;

pub mod agents;
pub mod competition;
pub mod config;
pub mod error;
pub mod market;
pub mod ranking;
pub mod scoring;
pub mod types;

pub use agents::*;
pub use competition::*;
pub use config::*;
pub use error::*;
pub use market::*;
pub use scoring::*;
pub use types::*;

#[cfg(feature = "instrument")]
pub use instrument;

// ============================================================================
// WASM API - Session
// ============================================================================

/// One game as seen by the host: the rival match, the commodity market and the
/// player's scoring, all advanced on the same clock.
#[wasm_bindgen]
pub struct Session {
    opponents: OpponentManager,
    market: MarketManager,
    scoring: ScoringManager,
    game_time: f64,
}

#[wasm_bindgen]
impl Session {
    /// Build a session from a JSON [`SessionConfig`]; an empty string uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Session, JsError> {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        let config = SessionConfig::from_json(config_json)?.seeded_with(entropy_seed());
        Ok(Self::with_config(config))
    }

    /// Advance everything by `dt` game seconds.
    ///
    /// `player` is the host's snapshot or `undefined`. Returns the snapshot with the
    /// computed market share written back (when it carried one), or `undefined`.
    #[wasm_bindgen]
    pub fn advance(&mut self, dt: f64, player: JsValue) -> Result<JsValue, JsError> {
        let mut player: Option<PlayerSnapshot> = if player.is_undefined() || player.is_null() {
            None
        } else {
            Some(
                serde_wasm_bindgen::from_value(player)
                    .map_err(|e| RivalsError::Snapshot(e.to_string()))?,
            )
        };

        self.step(dt, player.as_mut());

        Ok(serde_wasm_bindgen::to_value(&player)?)
    }

    #[wasm_bindgen]
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    #[wasm_bindgen]
    pub fn winner(&self) -> Option<String> {
        self.opponents.winner().map(str::to_string)
    }

    #[wasm_bindgen]
    pub fn leaderboard(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.opponents.leaderboard())?)
    }

    #[wasm_bindgen]
    pub fn market_conditions(&self) -> MarketConditions {
        self.opponents.market_conditions()
    }

    #[wasm_bindgen]
    pub fn statistics(&self) -> MatchStatistics {
        self.opponents.statistics()
    }

    #[wasm_bindgen]
    pub fn prices(&self) -> PriceBoard {
        self.market.all_prices()
    }

    #[wasm_bindgen]
    pub fn buy_price(&self, material: &str) -> f64 {
        self.market.buy_price(material)
    }

    #[wasm_bindgen]
    pub fn sell_price(&self, product: &str) -> f64 {
        self.market.sell_price(product)
    }

    #[wasm_bindgen]
    pub fn market_summary(&self) -> MarketSummary {
        self.market.summary()
    }

    /// Active market events with the hours each has left.
    #[wasm_bindgen]
    pub fn active_events(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.market.event_status(self.game_time))?)
    }

    /// Fire a catalog event by display name, e.g. "Metal Boom".
    #[wasm_bindgen]
    pub fn trigger_event(&mut self, name: &str) -> Result<(), JsError> {
        let kind = EventKind::parse(name)?;
        self.market.trigger_event(kind, self.game_time);
        Ok(())
    }

    /// Feed one player action into scoring.
    #[wasm_bindgen]
    pub fn record(&mut self, event: ScoreEvent) {
        self.scoring.record(event);
    }

    /// Close the game and compute the final score. Unrecognised endings earn no bonus.
    #[wasm_bindgen]
    pub fn finish(
        &mut self,
        ending: &str,
        current_money: f64,
        max_suspicion: f64,
        exploration_percent: f64,
    ) -> i64 {
        self.scoring.calculate_final_score(
            self.game_time,
            EndingType::from_name(ending),
            current_money,
            max_suspicion,
            exploration_percent,
        )
    }

    #[wasm_bindgen]
    pub fn scoring_summary(&self) -> ScoringSummary {
        self.scoring.summary()
    }
}

impl Session {
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            opponents: OpponentManager::with_config(config.match_config),
            market: MarketManager::with_config(config.market),
            scoring: ScoringManager::new(),
            game_time: 0.0,
        }
    }

    /// Market, then the rival match, then scoring.
    pub fn step(&mut self, dt: f64, player: Option<&mut PlayerSnapshot>) {
        self.game_time += dt;
        self.market.update(dt, self.game_time);
        self.opponents.update(dt, player);
        self.scoring.update(dt, self.game_time);
    }

    pub fn opponents(&self) -> &OpponentManager {
        &self.opponents
    }

    pub fn market(&self) -> &MarketManager {
        &self.market
    }

    pub fn scoring(&self) -> &ScoringManager {
        &self.scoring
    }

    pub fn scoring_mut(&mut self) -> &mut ScoringManager {
        &mut self.scoring
    }
}

/// Seed for sessions configured without one.
fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        rand::random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(json: &str) -> Session {
        let config = SessionConfig::from_json(json).unwrap();
        Session::with_config(config)
    }

    #[test]
    fn step_shares_one_clock() {
        let mut s = session(r#"{"match": {"seed": 1}, "market": {"seed": 2}}"#);
        for _ in 0..10 {
            s.step(2.0, None);
        }
        assert_eq!(s.game_time, 20.0);
        assert_eq!(s.opponents().time_elapsed, 20.0);
        assert_eq!(s.scoring().counters().time_played, 20.0);
        assert_eq!(s.market().trend_duration, 20.0);
    }

    #[test]
    fn player_share_is_written_back() {
        let mut s = session(r#"{"match": {"seed": 3, "num_opponents": 1}}"#);
        let mut player = PlayerSnapshot {
            sales: 10.0,
            market_share: Some(0.0),
            ..PlayerSnapshot::default()
        };
        s.step(1.0, Some(&mut player));
        let share = player.market_share.unwrap();
        assert!(share > 0.0 && share <= 1.0);
    }

    #[test]
    fn scripted_event_reports_time_left() {
        let mut s = session(
            r#"{"match": {"seed": 6}, "market": {"seed": 7, "event_probability": 0}}"#,
        );
        s.step(3_600.0, None);
        assert!(s.trigger_event("Metal Boom").is_ok());
        s.step(3_600.0, None);

        let status = s.market().event_status(s.game_time());
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].remaining_hours, 47.0);
        assert!(EventKind::parse("Meteor Shower").is_err());
    }

    #[test]
    fn finish_scores_through_the_session() {
        let mut s = session(r#"{"match": {"seed": 4}, "market": {"seed": 5}}"#);
        s.step(86_400.0, None);
        s.scoring_mut().record(ScoreEvent::MoneyEarned { amount: 10_000.0 });
        let total = s.finish("ESCAPE", 0.0, 150.0, 0.0);
        // 100 money + 10 for the day + 3000 escape + 10 first dollar
        assert_eq!(total, 3_120);
        assert!(s.scoring().is_unlocked("great_escape"));
    }
}
