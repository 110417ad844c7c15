/// Failures at the host boundary. The simulation itself never fails: it clamps, skips and
/// returns sentinels instead.
#[derive(Debug, thiserror::Error)]
pub enum RivalsError {
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid player snapshot: {0}")]
    Snapshot(String),
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    #[error("unknown market event: {0}")]
    UnknownEvent(String),
}

impl RivalsError {
    pub fn config(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
