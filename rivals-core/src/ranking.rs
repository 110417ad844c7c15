//! Ranking helpers shared by the match leaderboard and end-of-game scoring.
//!
//! Both reduce named entities to an integer score, order them descending and ask
//! "who is the first to reach a threshold?". Ties keep input order (the sort is stable),
//! so callers control tie-breaks through the order they feed entities in.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

/// One row of a ranking: an entity and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct Standing {
    pub name: String,
    pub score: i64,
}

/// Score every entity and sort descending by score.
pub fn rank_by<S>(
    entities: impl IntoIterator<Item = (String, S)>,
    score: impl Fn(&S) -> i64,
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = entities
        .into_iter()
        .map(|(name, stats)| {
            let score = score(&stats);
            Standing { name, score }
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}

/// First standing (in ranking order) whose score is at least `threshold`.
pub fn first_at_or_above(standings: &[Standing], threshold: i64) -> Option<&Standing> {
    standings.iter().find(|s| s.score >= threshold)
}

/// Label for `score` from brackets listed highest floor first.
pub fn bracket<T: Copy>(score: i64, brackets: &[(i64, T)]) -> Option<T> {
    brackets
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, label)| *label)
}
