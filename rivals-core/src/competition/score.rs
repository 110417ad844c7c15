use serde::{Deserialize, Serialize};

use crate::agents::CompetitorStats;
use crate::types::WinCondition;

/// The figures a win condition can score on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub net_worth: f64,
    pub market_share: f64,
    pub profit: f64,
    /// Seconds in business.
    pub age: f64,
    pub money: f64,
}

impl From<&CompetitorStats> for ScoreInputs {
    fn from(stats: &CompetitorStats) -> Self {
        Self {
            net_worth: stats.net_worth,
            market_share: stats.market_share,
            profit: stats.profit,
            age: stats.age,
            money: stats.money,
        }
    }
}

/// Competitive score under `condition`. Used for rankings and win thresholds alike.
///
/// Money figures are truncated to whole units; share and survival scores are rounded.
pub fn score(inputs: &ScoreInputs, condition: WinCondition) -> i64 {
    match condition {
        WinCondition::NetWorth | WinCondition::TimeLimit => inputs.net_worth as i64,
        WinCondition::MarketShare => (inputs.market_share * 1_000_000.0).round() as i64,
        WinCondition::Profit => inputs.profit as i64,
        WinCondition::Survival => (inputs.age * 100.0 + inputs.net_worth).round() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ScoreInputs {
        ScoreInputs {
            net_worth: 120_000.7,
            market_share: 0.4321234,
            profit: -2_500.9,
            age: 12.5,
            money: 10.0,
        }
    }

    #[test]
    fn each_condition_scores_its_metric() {
        let i = inputs();
        assert_eq!(score(&i, WinCondition::NetWorth), 120_000);
        assert_eq!(score(&i, WinCondition::TimeLimit), 120_000);
        assert_eq!(score(&i, WinCondition::MarketShare), 432_123);
        assert_eq!(score(&i, WinCondition::Profit), -2_500);
        assert_eq!(score(&i, WinCondition::Survival), 121_251);
    }

    #[test]
    fn missing_figures_score_zero() {
        let empty = ScoreInputs::default();
        assert_eq!(score(&empty, WinCondition::NetWorth), 0);
        assert_eq!(score(&empty, WinCondition::MarketShare), 0);
    }
}
