//! Progressive-disclosure tiers.
//!
//! Each mode maps to one constant [`DisplayConfig`]. Switching modes is plain
//! reassignment by the caller; nothing here holds state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::aspects::AspectType;
use crate::chart::BodyKind;
use crate::error::ChartError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Big three only, plain language, no aspects or houses
    #[default]
    Novice,
    /// Personal planets and the three major harmonious/neutral aspects
    Intermediate,
    /// Everything, with houses and orbs
    Advanced,
}

/// How much interpretation text to attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailDepth {
    Emoji,
    Brief,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayConfig {
    pub max_bodies: usize,
    pub allowed_bodies: &'static [BodyKind],
    pub allowed_aspects: &'static [AspectType],
    /// A value of zero disables aspects and transits entirely
    pub max_aspect_orb: f64,
    pub show_houses: bool,
    pub show_orbs: bool,
    pub show_symbols: bool,
    pub detail_depth: DetailDepth,
    /// Cap on aspects, and separately on transits, after sorting
    pub max_relationships: usize,
}

const NOVICE: DisplayConfig = DisplayConfig {
    max_bodies: 3,
    allowed_bodies: &[BodyKind::Sun, BodyKind::Moon, BodyKind::Ascendant],
    allowed_aspects: &[],
    max_aspect_orb: 0.0,
    show_houses: false,
    show_orbs: false,
    show_symbols: false,
    detail_depth: DetailDepth::Emoji,
    max_relationships: 3,
};

const INTERMEDIATE: DisplayConfig = DisplayConfig {
    max_bodies: 5,
    allowed_bodies: &[
        BodyKind::Sun,
        BodyKind::Moon,
        BodyKind::Mercury,
        BodyKind::Venus,
        BodyKind::Mars,
    ],
    allowed_aspects: &[
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
    ],
    max_aspect_orb: 6.0,
    show_houses: false,
    show_orbs: false,
    show_symbols: true,
    detail_depth: DetailDepth::Emoji,
    max_relationships: 8,
};

const ADVANCED: DisplayConfig = DisplayConfig {
    max_bodies: 13,
    allowed_bodies: &BodyKind::ALL,
    allowed_aspects: &AspectType::ALL,
    max_aspect_orb: 10.0,
    show_houses: true,
    show_orbs: true,
    show_symbols: true,
    detail_depth: DetailDepth::Detailed,
    max_relationships: 25,
};

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Novice,
        DisplayMode::Intermediate,
        DisplayMode::Advanced,
    ];

    pub fn config(self) -> &'static DisplayConfig {
        match self {
            DisplayMode::Novice => &NOVICE,
            DisplayMode::Intermediate => &INTERMEDIATE,
            DisplayMode::Advanced => &ADVANCED,
        }
    }

    /// The next tier up, saturating at Advanced
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Novice => DisplayMode::Intermediate,
            DisplayMode::Intermediate | DisplayMode::Advanced => DisplayMode::Advanced,
        }
    }

    pub fn uses_plain_language(self) -> bool {
        self == DisplayMode::Novice
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Novice => "novice",
            DisplayMode::Intermediate => "intermediate",
            DisplayMode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        DisplayMode::ALL
            .iter()
            .copied()
            .find(|m| m.name() == lowered)
            .ok_or_else(|| ChartError::UnknownMode(s.to_string()))
    }
}

impl DisplayConfig {
    pub fn allows_body(&self, kind: BodyKind) -> bool {
        self.allowed_bodies.contains(&kind)
    }

    pub fn allows_aspect(&self, aspect: AspectType) -> bool {
        self.allowed_aspects.contains(&aspect)
    }

    pub fn allows_orb(&self, orb: f64) -> bool {
        self.max_aspect_orb > 0.0 && orb <= self.max_aspect_orb
    }
}

/// Self-assessed experience, used to pick a starting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Novice,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn recommended_mode(self) -> DisplayMode {
        match self {
            SkillLevel::Novice => DisplayMode::Novice,
            SkillLevel::Intermediate => DisplayMode::Intermediate,
            SkillLevel::Advanced => DisplayMode::Advanced,
        }
    }
}
