//! Ovality: how far a molecule's surface area is from that of a sphere with
//! the same volume.

use std::{f64::consts::PI, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The surface area of a sphere whose volume is `volume`,
/// `(3V)^(2/3) (4π)^(1/3)`.
pub fn minimal_sphere_area(volume: f64) -> f64 {
    (3.0 * volume).powf(2.0 / 3.0) * (4.0 * PI).cbrt()
}

/// The ratio of `area` to the area of a sphere with the same `volume`. Both
/// values must be positive and finite.
pub fn ovality(area: f64, volume: f64) -> Result<f64, Error> {
    let valid = |x: f64| x.is_finite() && x > 0.0;
    if !valid(area) || !valid(volume) {
        return Err(Error::InvalidInput { area, volume });
    }
    Ok(area / minimal_sphere_area(volume))
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpheroidType {
    Prolate,
    Oblate,
}

impl SpheroidType {
    /// Anything above 1 is oblate. A perfect sphere, with an ovality of
    /// exactly 1, is counted as prolate.
    pub fn classify(ovality: f64) -> Self {
        if ovality > 1.0 {
            Self::Oblate
        } else {
            Self::Prolate
        }
    }
}

impl Display for SpheroidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpheroidType::Prolate => write!(f, "prolate"),
            SpheroidType::Oblate => write!(f, "oblate"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OvalityResult {
    pub area: f64,
    pub volume: f64,
    pub ovality: f64,
    pub spheroid_type: SpheroidType,
}

impl OvalityResult {
    pub fn new(area: f64, volume: f64) -> Result<Self, Error> {
        let ovality = ovality(area, volume)?;
        Ok(Self {
            area,
            volume,
            ovality,
            spheroid_type: SpheroidType::classify(ovality),
        })
    }
}

impl Display for OvalityResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ovality: {}", self.ovality)?;
        write!(f, "spheroid_type: {}", self.spheroid_type)
    }
}
