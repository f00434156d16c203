//! Zodiac geometry: degree normalization, circular separation and sign placement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of one zodiac sign in degrees
pub const SIGN_WIDTH: f64 = 30.0;

/// Reduce any angle into `[0, 360)`; negative values wrap.
///
/// Non-finite input is returned unchanged so callers can detect it.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Minimal circular distance between two longitudes, always in `[0, 180]`.
///
/// Both inputs are normalized first. `|a - b|` is taken before the modulo so
/// the result is bit-identical when the arguments are swapped.
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs() % 360.0;
    raw.min(360.0 - raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign index (0-11) counted from Aries
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        if !normalized.is_finite() {
            return ZodiacSign::Aries;
        }
        Self::from_index((normalized / SIGN_WIDTH).floor() as usize)
    }

    /// Longitude at which this sign begins
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }

    pub fn element(self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign and degree-within-sign derived from a longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub sign: ZodiacSign,
    /// Always in `[0, 30)`
    pub degree_in_sign: f64,
}

impl ZodiacPlacement {
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = normalize_degrees(longitude);
        // `%` on a non-negative float is exact, so this stays below 30
        let degree_in_sign = if normalized.is_finite() {
            normalized % SIGN_WIDTH
        } else {
            0.0
        };
        Self {
            sign: ZodiacSign::from_longitude(normalized),
            degree_in_sign,
        }
    }

    /// Distance in degrees to the nearest sign boundary
    pub fn distance_to_boundary(&self) -> f64 {
        self.degree_in_sign.min(SIGN_WIDTH - self.degree_in_sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wraps_negative_and_large() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
    }

    #[test]
    fn test_normalize_keeps_nan() {
        assert!(normalize_degrees(f64::NAN).is_nan());
    }

    #[test]
    fn test_separation_crosses_zero() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert_eq!(angular_separation(0.0, 180.0), 180.0);
        assert_eq!(angular_separation(10.0, 370.0), 0.0);
    }

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(ZodiacSign::from_longitude(0.0), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_longitude(135.0), ZodiacSign::Leo);
        assert_eq!(ZodiacSign::from_longitude(359.99), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::from_longitude(-15.0), ZodiacSign::Pisces);
    }

    #[test]
    fn test_placement_degree_in_sign() {
        let p = ZodiacPlacement::from_longitude(95.5);
        assert_eq!(p.sign, ZodiacSign::Cancer);
        assert!((p.degree_in_sign - 5.5).abs() < 1e-9);
        assert!((p.distance_to_boundary() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_elements() {
        assert_eq!(ZodiacSign::Leo.element(), Element::Fire);
        assert_eq!(ZodiacSign::Capricorn.element(), Element::Earth);
        assert_eq!(ZodiacSign::Aquarius.element(), Element::Air);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
    }
}
