use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::competition::ScoreInputs;
use crate::error::RivalsError;

/// Ranking label used for the human player.
pub const PLAYER_NAME: &str = "Player";

/// The host's view of the player's factory, handed in each tick.
///
/// The manager only reads it, except for `market_share`: when the host supplies the field
/// (`Some`), the computed share is written back into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub money: f64,
    pub net_worth: f64,
    pub profit: f64,
    pub age: f64,
    /// Units sold this tick.
    pub sales: f64,
    pub market_share: Option<f64>,
}

impl PlayerSnapshot {
    pub fn from_json(json: &str) -> Result<Self, RivalsError> {
        serde_json::from_str(json).map_err(|e| RivalsError::Snapshot(e.to_string()))
    }

    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            net_worth: self.net_worth,
            market_share: self.market_share.unwrap_or(0.0),
            profit: self.profit,
            age: self.age,
            money: self.money,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_key_presence_is_preserved() {
        let without = PlayerSnapshot::from_json(r#"{"money": 100, "sales": 3}"#).unwrap();
        assert_eq!(without.market_share, None);
        assert_eq!(without.sales, 3.0);

        let with = PlayerSnapshot::from_json(r#"{"market_share": 0.0}"#).unwrap();
        assert_eq!(with.market_share, Some(0.0));
    }

    #[test]
    fn bad_snapshot_is_reported() {
        let err = PlayerSnapshot::from_json(r#"{"money": "lots"}"#).unwrap_err();
        assert!(matches!(err, RivalsError::Snapshot(_)));
    }
}
