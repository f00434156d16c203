use serde::{Deserialize, Serialize};

use super::zodiac::{normalize_degrees, ZodiacSign};
use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// 1..=12
    pub number: u8,
    pub cusp_longitude: f64,
    pub sign: ZodiacSign,
}

/// The twelve house cusps of a chart, as produced by the ephemeris
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HouseCusps {
    cusps: [f64; 12],
}

impl HouseCusps {
    pub fn new(cusps: Vec<f64>) -> Result<Self, ChartError> {
        let cusps: [f64; 12] = cusps
            .try_into()
            .map_err(|v: Vec<f64>| ChartError::CuspCount(v.len()))?;
        if let Some((i, value)) = cusps.iter().enumerate().find(|(_, c)| !c.is_finite()) {
            return Err(ChartError::NonFiniteLongitude {
                body: format!("cusp {}", i + 1),
                value: *value,
            });
        }
        Ok(Self {
            cusps: cusps.map(normalize_degrees),
        })
    }

    /// Equal houses of 30° starting at the given ascendant
    pub fn equal(ascendant: f64) -> Self {
        let start = normalize_degrees(ascendant);
        let cusps = std::array::from_fn(|i| normalize_degrees(start + 30.0 * i as f64));
        Self { cusps }
    }

    pub fn cusp(&self, number: u8) -> Result<f64, ChartError> {
        if !(1..=12).contains(&number) {
            return Err(ChartError::HouseOutOfRange(number));
        }
        Ok(self.cusps[(number - 1) as usize])
    }

    /// House (1..=12) containing the longitude.
    ///
    /// A point belongs to the cusp it has most recently passed moving
    /// forward through the zodiac, which also covers the house that wraps
    /// past 0° Aries. A non-finite longitude has no house.
    pub fn house_of(&self, longitude: f64) -> Option<u8> {
        if !longitude.is_finite() {
            return None;
        }
        let lon = normalize_degrees(longitude);
        let mut best = 0;
        let mut best_offset = f64::INFINITY;
        for (i, cusp) in self.cusps.iter().enumerate() {
            let offset = normalize_degrees(lon - cusp);
            // `<=` hands a point on a doubled cusp to the later house
            if offset <= best_offset {
                best_offset = offset;
                best = i;
            }
        }
        Some(best as u8 + 1)
    }

    pub fn houses(&self) -> Vec<House> {
        self.cusps
            .iter()
            .enumerate()
            .map(|(i, cusp)| House {
                number: i as u8 + 1,
                cusp_longitude: *cusp,
                sign: ZodiacSign::from_longitude(*cusp),
            })
            .collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cusps
    }
}

impl TryFrom<Vec<f64>> for HouseCusps {
    type Error = ChartError;

    fn try_from(cusps: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(cusps)
    }
}

impl From<HouseCusps> for Vec<f64> {
    fn from(cusps: HouseCusps) -> Self {
        cusps.cusps.to_vec()
    }
}
