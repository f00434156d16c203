pub mod body;
pub mod houses;
pub mod zodiac;

pub use body::{BodyClass, BodyKind, BodyRecord, CelestialBody};
pub use houses::{House, HouseCusps};
pub use zodiac::{angular_separation, normalize_degrees, Element, ZodiacPlacement, ZodiacSign};

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A set of bodies plus optional house cusps: the long-lived chart input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub bodies: Vec<CelestialBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub houses: Option<HouseCusps>,
}

impl Chart {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        Self {
            bodies,
            houses: None,
        }
    }

    pub fn with_houses(mut self, houses: HouseCusps) -> Self {
        self.houses = Some(houses);
        self
    }

    pub fn body(&self, kind: BodyKind) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.kind() == kind)
    }

    /// House number for a body, when cusps are known
    pub fn house_of(&self, kind: BodyKind) -> Option<u8> {
        let houses = self.houses.as_ref()?;
        houses.house_of(self.body(kind)?.longitude())
    }

    /// Bit-exact hash of the chart contents, stable for identical input
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_bodies(&self.bodies, &mut hasher);
        if let Some(houses) = &self.houses {
            for cusp in houses.as_slice() {
                cusp.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

/// Feed bodies into a hasher in order, using the raw float bits
pub(crate) fn hash_bodies<H: Hasher>(bodies: &[CelestialBody], hasher: &mut H) {
    bodies.len().hash(hasher);
    for body in bodies {
        body.kind().hash(hasher);
        body.longitude().to_bits().hash(hasher);
        body.speed().map(f64::to_bits).hash(hasher);
    }
}
