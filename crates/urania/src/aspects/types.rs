use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::chart::BodyKind;
use crate::error::{ChartError, SettingsError};

/// Orb under which an aspect counts as exact
pub const EXACT_ORB: f64 = 0.1;

/// Canonical angular relationships between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonic,
    Challenging,
    Neutral,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Widest orb at which the aspect is still recognized
    pub fn max_orb(self) -> f64 {
        match self {
            AspectType::Sextile => 6.0,
            AspectType::Conjunction
            | AspectType::Square
            | AspectType::Trine
            | AspectType::Opposition => 8.0,
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectType::Sextile | AspectType::Trine => AspectNature::Harmonic,
            AspectType::Square | AspectType::Opposition => AspectNature::Challenging,
            AspectType::Conjunction => AspectNature::Neutral,
        }
    }

    pub fn is_harmonic(self) -> bool {
        self.nature() == AspectNature::Harmonic
    }

    pub fn is_major(self) -> bool {
        self != AspectType::Sextile
    }

    /// Relative weight used when ranking aspects for display
    pub fn importance(self) -> f64 {
        match self {
            AspectType::Conjunction => 1.0,
            AspectType::Opposition => 0.9,
            AspectType::Square => 0.8,
            AspectType::Trine => 0.7,
            AspectType::Sextile => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        AspectType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == lowered)
            .ok_or_else(|| ChartError::UnknownAspect(s.to_string()))
    }
}

/// A detected relationship between two bodies of one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: BodyKind,
    pub body_b: BodyKind,
    pub aspect_type: AspectType,
    /// Minimal circular distance between the two longitudes
    pub separation: f64,
    /// Deviation from the exact angle, never above the aspect's orb
    pub orb: f64,
    /// Only true when both speeds are known and the orb is shrinking
    pub is_applying: bool,
}

impl Aspect {
    pub fn is_exact(&self) -> bool {
        self.orb < EXACT_ORB
    }

    pub fn involves(&self, kind: BodyKind) -> bool {
        self.body_a == kind || self.body_b == kind
    }

    /// Number of personal bodies at either end (0..=2)
    pub fn personal_count(&self) -> u32 {
        u32::from(self.body_a.is_personal()) + u32::from(self.body_b.is_personal())
    }
}

/// Which aspects to look for and how wide to let them be
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSettings {
    /// Aspect types to search, in tie-break order
    pub aspect_types: Vec<AspectType>,
    /// Per-type orb overrides; absent types use [`AspectType::max_orb`]
    #[serde(default)]
    pub orb_overrides: BTreeMap<AspectType, f64>,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            aspect_types: AspectType::ALL.to_vec(),
            orb_overrides: BTreeMap::new(),
        }
    }
}

impl AspectSettings {
    pub fn only(aspect_types: &[AspectType]) -> Self {
        Self {
            aspect_types: aspect_types.to_vec(),
            orb_overrides: BTreeMap::new(),
        }
    }

    /// Tighten the orb for one aspect type.
    ///
    /// Overrides can narrow the canonical orb but never widen it.
    pub fn with_orb(mut self, aspect: AspectType, orb: f64) -> Result<Self, SettingsError> {
        let max = aspect.max_orb();
        if !(0.0..=max).contains(&orb) {
            return Err(SettingsError::OrbOutOfRange { aspect, orb, max });
        }
        self.orb_overrides.insert(aspect, orb);
        Ok(self)
    }

    pub fn orb_for(&self, aspect: AspectType) -> f64 {
        self.orb_overrides
            .get(&aspect)
            .copied()
            .unwrap_or_else(|| aspect.max_orb())
            .min(aspect.max_orb())
    }
}
