//! Classical orbital elements and the two-body orbit geometry built from them.
//!
//! Angles in `OrbitalElements` are stored in degrees, exactly as they are
//! edited; conversion to radians happens at the point of evaluation in
//! [`geometry`].

pub mod geometry;

#[cfg(test)]
mod proptest_orbit;

use std::ops::RangeInclusive;

pub use geometry::{orbit_path, orient, propagate, radius};

use crate::types::{DEG_TO_RAD, PATH_SAMPLE_STEP};

/// Errors raised when orbital elements cannot describe a bounded ellipse.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("{field} is not finite")]
    NonFinite { field: ElementField },

    #[error("semi-major axis must be positive (got {0})")]
    NonPositiveSemiMajorAxis(f64),

    #[error("orbit radius is singular at theta = {theta} rad (eccentricity {eccentricity})")]
    SingularRadius { theta: f64, eccentricity: f64 },

    #[error("eccentricity {0} is outside the elliptical range [0, 1)")]
    NonEllipticalEccentricity(f64),
}

/// Keplerian orbital elements for one satellite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis (scene units)
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1 for ellipse)
    pub eccentricity: f64,
    /// Inclination in degrees, applied as a rotation about X
    pub inclination: f64,
    /// Right ascension of the ascending node in degrees, applied about Y
    pub raan: f64,
    /// Argument of periapsis in degrees, applied about Z
    pub arg_periapsis: f64,
    /// Current true anomaly in degrees. Grows without wrapping.
    pub true_anomaly: f64,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self {
            semi_major_axis: 10.0,
            eccentricity: 0.0,
            inclination: 0.0,
            raan: 0.0,
            arg_periapsis: 0.0,
            true_anomaly: 0.0,
        }
    }
}

impl OrbitalElements {
    /// Circular, equatorial orbit of the given radius.
    pub fn circular(semi_major_axis: f64) -> Self {
        Self {
            semi_major_axis,
            ..Self::default()
        }
    }

    /// Equatorial ellipse with periapsis on +X.
    pub fn elliptical(semi_major_axis: f64, eccentricity: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            ..Self::default()
        }
    }

    /// Builder-style orientation setter (all angles in degrees).
    pub fn with_orientation(mut self, inclination: f64, raan: f64, arg_periapsis: f64) -> Self {
        self.inclination = inclination;
        self.raan = raan;
        self.arg_periapsis = arg_periapsis;
        self
    }

    /// Builder-style true anomaly setter (degrees).
    pub fn with_true_anomaly(mut self, true_anomaly: f64) -> Self {
        self.true_anomaly = true_anomaly;
        self
    }

    /// Read a single element by field.
    pub fn get(&self, field: ElementField) -> f64 {
        match field {
            ElementField::SemiMajorAxis => self.semi_major_axis,
            ElementField::Eccentricity => self.eccentricity,
            ElementField::Inclination => self.inclination,
            ElementField::Raan => self.raan,
            ElementField::ArgPeriapsis => self.arg_periapsis,
            ElementField::TrueAnomaly => self.true_anomaly,
        }
    }

    /// Write a single element by field.
    pub fn set(&mut self, field: ElementField, value: f64) {
        match field {
            ElementField::SemiMajorAxis => self.semi_major_axis = value,
            ElementField::Eccentricity => self.eccentricity = value,
            ElementField::Inclination => self.inclination = value,
            ElementField::Raan => self.raan = value,
            ElementField::ArgPeriapsis => self.arg_periapsis = value,
            ElementField::TrueAnomaly => self.true_anomaly = value,
        }
    }

    /// True anomaly in radians.
    pub fn true_anomaly_rad(&self) -> f64 {
        self.true_anomaly * DEG_TO_RAD
    }

    /// Periapsis distance a(1 − e).
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Apoapsis distance a(1 + e).
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Check that these elements describe a bounded ellipse.
    ///
    /// Besides the plain range checks, every sampled path angle is tested for
    /// a vanishing conic denominator `1 + e·cos(theta)`.
    pub fn validate(&self) -> Result<(), ElementError> {
        for field in ElementField::ALL {
            if !self.get(field).is_finite() {
                return Err(ElementError::NonFinite { field });
            }
        }

        if self.semi_major_axis <= 0.0 {
            return Err(ElementError::NonPositiveSemiMajorAxis(self.semi_major_axis));
        }

        let e = self.eccentricity;
        let mut theta = 0.0;
        while theta <= std::f64::consts::TAU {
            if (1.0 + e * theta.cos()).abs() <= f64::EPSILON {
                return Err(ElementError::SingularRadius {
                    theta,
                    eccentricity: e,
                });
            }
            theta += PATH_SAMPLE_STEP;
        }

        if !(0.0..1.0).contains(&e) {
            return Err(ElementError::NonEllipticalEccentricity(e));
        }

        Ok(())
    }
}

/// Individually editable orbital element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementField {
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    Raan,
    ArgPeriapsis,
    TrueAnomaly,
}

impl ElementField {
    pub const ALL: [ElementField; 6] = [
        ElementField::SemiMajorAxis,
        ElementField::Eccentricity,
        ElementField::Inclination,
        ElementField::Raan,
        ElementField::ArgPeriapsis,
        ElementField::TrueAnomaly,
    ];

    /// Whether a change to this field alters the orbit path.
    ///
    /// True anomaly only moves the satellite along the existing path.
    pub fn shapes_orbit(self) -> bool {
        !matches!(self, ElementField::TrueAnomaly)
    }

    /// Range exposed by the parameter panel sliders.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            ElementField::SemiMajorAxis => 1.0..=50.0,
            ElementField::Eccentricity => 0.0..=1.0,
            ElementField::Inclination => 0.0..=180.0,
            ElementField::Raan | ElementField::ArgPeriapsis | ElementField::TrueAnomaly => {
                0.0..=360.0
            }
        }
    }

    /// Clamp a value into [`Self::range`]. NaN passes through.
    pub fn clamp(self, value: f64) -> f64 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ElementField::SemiMajorAxis => "semiMajorAxis",
            ElementField::Eccentricity => "eccentricity",
            ElementField::Inclination => "inclination",
            ElementField::Raan => "raan",
            ElementField::ArgPeriapsis => "argPeriapsis",
            ElementField::TrueAnomaly => "trueAnomaly",
        }
    }
}

impl std::fmt::Display for ElementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A partial set of element values to merge into an existing set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementChanges {
    pub semi_major_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination: Option<f64>,
    pub raan: Option<f64>,
    pub arg_periapsis: Option<f64>,
    pub true_anomaly: Option<f64>,
}

impl ElementChanges {
    /// Changes touching exactly one field.
    pub fn single(field: ElementField, value: f64) -> Self {
        let mut changes = Self::default();
        changes.set(field, value);
        changes
    }

    pub fn set(&mut self, field: ElementField, value: f64) {
        let slot = match field {
            ElementField::SemiMajorAxis => &mut self.semi_major_axis,
            ElementField::Eccentricity => &mut self.eccentricity,
            ElementField::Inclination => &mut self.inclination,
            ElementField::Raan => &mut self.raan,
            ElementField::ArgPeriapsis => &mut self.arg_periapsis,
            ElementField::TrueAnomaly => &mut self.true_anomaly,
        };
        *slot = Some(value);
    }

    pub fn get(&self, field: ElementField) -> Option<f64> {
        match field {
            ElementField::SemiMajorAxis => self.semi_major_axis,
            ElementField::Eccentricity => self.eccentricity,
            ElementField::Inclination => self.inclination,
            ElementField::Raan => self.raan,
            ElementField::ArgPeriapsis => self.arg_periapsis,
            ElementField::TrueAnomaly => self.true_anomaly,
        }
    }

    pub fn is_empty(&self) -> bool {
        ElementField::ALL.iter().all(|&f| self.get(f).is_none())
    }

    /// Return `base` with every present field overwritten.
    pub fn merged_into(&self, base: &OrbitalElements) -> OrbitalElements {
        let mut merged = *base;
        for field in ElementField::ALL {
            if let Some(value) = self.get(field) {
                merged.set(field, value);
            }
        }
        merged
    }
}
