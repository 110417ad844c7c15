use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::RivalsError;
use crate::types::Material;

/// The fixed catalog of market shocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ElectronicsShortage,
    PlasticSurplus,
    MetalBoom,
    PaperMillStrike,
    RubberCrisis,
    GlassGlut,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ElectronicsShortage,
        EventKind::PlasticSurplus,
        EventKind::MetalBoom,
        EventKind::PaperMillStrike,
        EventKind::RubberCrisis,
        EventKind::GlassGlut,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ElectronicsShortage => "Electronics Shortage",
            EventKind::PlasticSurplus => "Plastic Surplus",
            EventKind::MetalBoom => "Metal Boom",
            EventKind::PaperMillStrike => "Paper Mill Strike",
            EventKind::RubberCrisis => "Rubber Crisis",
            EventKind::GlassGlut => "Glass Glut",
        }
    }

    pub fn from_name(name: &str) -> Option<EventKind> {
        EventKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Strict lookup for host input that must name a catalog event.
    pub fn parse(name: &str) -> Result<EventKind, RivalsError> {
        EventKind::from_name(name).ok_or_else(|| RivalsError::UnknownEvent(name.to_string()))
    }

    pub fn description(&self) -> &'static str {
        match self {
            EventKind::ElectronicsShortage => "Global chip shortage drives up electronics prices",
            EventKind::PlasticSurplus => "Oversupply of plastic drives prices down",
            EventKind::MetalBoom => "Construction boom increases metal demand",
            EventKind::PaperMillStrike => "Worker strike reduces paper supply",
            EventKind::RubberCrisis => "Natural disaster affects rubber supply",
            EventKind::GlassGlut => "New recycling facilities oversupply glass market",
        }
    }

    /// Game seconds the event stays active.
    pub fn duration(&self) -> f64 {
        match self {
            EventKind::ElectronicsShortage => 86_400.0,
            EventKind::PlasticSurplus => 43_200.0,
            EventKind::MetalBoom => 172_800.0,
            EventKind::PaperMillStrike => 64_800.0,
            EventKind::RubberCrisis => 129_600.0,
            EventKind::GlassGlut => 86_400.0,
        }
    }

    /// Factors applied to the named materials' multipliers on trigger.
    pub fn effects(&self) -> &'static [(Material, f64)] {
        match self {
            EventKind::ElectronicsShortage => {
                &[(Material::Electronics, 1.5), (Material::Copper, 1.3)]
            }
            EventKind::PlasticSurplus => &[(Material::Plastic, 0.7)],
            EventKind::MetalBoom => &[(Material::Metal, 1.4), (Material::Copper, 1.3)],
            EventKind::PaperMillStrike => &[(Material::Paper, 1.6)],
            EventKind::RubberCrisis => &[(Material::Rubber, 1.8)],
            EventKind::GlassGlut => &[(Material::Glass, 0.6)],
        }
    }
}

/// An event instance that is currently shaping prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct MarketEvent {
    pub kind: EventKind,
    pub name: String,
    pub description: String,
    pub duration: f64,
    pub price_multipliers: Vec<(Material, f64)>,
    pub start_time: f64,
}

impl MarketEvent {
    pub fn start(kind: EventKind, start_time: f64) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            duration: kind.duration(),
            price_multipliers: kind.effects().to_vec(),
            start_time,
        }
    }

    pub fn expired(&self, game_time: f64) -> bool {
        game_time - self.start_time >= self.duration
    }

    /// Seconds left before expiry, never negative.
    pub fn remaining(&self, game_time: f64) -> f64 {
        (self.duration - (game_time - self.start_time)).max(0.0)
    }

    pub fn status(&self, game_time: f64) -> ActiveEvent {
        ActiveEvent {
            name: self.name.clone(),
            description: self.description.clone(),
            remaining_hours: self.remaining(game_time) / 3600.0,
        }
    }
}

/// What the host shows for an event still in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ActiveEvent {
    pub name: String,
    pub description: String,
    pub remaining_hours: f64,
}
