use thiserror::Error;

use crate::aspects::AspectType;

/// Errors raised while building chart values from caller input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Unknown body id: {0}")]
    UnknownBody(String),
    #[error("Unknown aspect type: {0}")]
    UnknownAspect(String),
    #[error("Unknown display mode: {0}")]
    UnknownMode(String),
    #[error("Longitude for {body} is not a finite number: {value}")]
    NonFiniteLongitude { body: String, value: f64 },
    #[error("Expected 12 house cusps, got {0}")]
    CuspCount(usize),
    #[error("House number {0} is outside 1..=12")]
    HouseOutOfRange(u8),
}

/// Errors raised while adjusting aspect or transit settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Orb {orb} for {aspect} must be within 0..={max}")]
    OrbOutOfRange {
        aspect: AspectType,
        orb: f64,
        max: f64,
    },
    #[error("Ingress orb {orb} must be within 0..={max}")]
    IngressOrbOutOfRange { orb: f64, max: f64 },
}
