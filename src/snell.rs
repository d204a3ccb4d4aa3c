//! Snell's law at a single planar interface between two real media.
//!
//! Angles cross this module's boundary in degrees and are measured from the
//! surface normal. Refractive indices are dimensionless and must be strictly
//! positive. Total internal reflection is an ordinary outcome of
//! [`solve_refraction`], reported through [`Refraction::TotalInternalReflection`]
//! rather than as an error.

use serde::Serialize;
use tracing::debug;

use crate::error::{Quantity, RefractError, Result};

/// Critical angle reported when light travels into an equally or more dense
/// medium, where no incidence angle produces total internal reflection.
pub const NO_CRITICAL_ANGLE: f64 = 90.0;


/// Outcome of refracting a ray across the interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "angle", rename_all = "snake_case")]
pub enum Refraction {
    /// Transmitted ray angle from the normal, in degrees.
    Refracted(f64),
    /// No real transmitted angle satisfies Snell's law.
    TotalInternalReflection,
}

impl Refraction {
    /// The refracted angle in degrees, or `None` for total internal reflection.
    pub fn angle(&self) -> Option<f64> {
        match self {
            Refraction::Refracted(beta) => Some(*beta),
            Refraction::TotalInternalReflection => None,
        }
    }

    pub fn is_total_internal_reflection(&self) -> bool {
        matches!(self, Refraction::TotalInternalReflection)
    }
}

/// Computes the refracted angle for a ray crossing from index `n1` into `n2`.
///
/// `alpha` is the incidence angle in degrees. It is not normalized, so any
/// finite value is accepted and the sign of the result follows the sign of
/// `sin(alpha)`. When `(n1 / n2) * sin(alpha)` exceeds one in magnitude the
/// ray is totally internally reflected.
///
/// # Example
/// ```
/// use refract::snell::{solve_refraction, Refraction};
///
/// let beta = solve_refraction(30.0, 1.0, 1.5).unwrap().angle().unwrap();
/// assert!((beta - 19.47).abs() < 0.01);
/// assert_eq!(
///     solve_refraction(60.0, 1.5, 1.0).unwrap(),
///     Refraction::TotalInternalReflection
/// );
/// ```
pub fn solve_refraction(alpha: f64, n1: f64, n2: f64) -> Result<Refraction> {
    check_angle(alpha)?;
    check_index(n1, Quantity::OriginIndex)?;
    check_index(n2, Quantity::DestinationIndex)?;

    let theta1 = alpha.to_radians();
    let sin_theta2 = (n1 / n2) * theta1.sin();

    let result = if sin_theta2.abs() <= 1.0 {
        Refraction::Refracted(sin_theta2.asin().to_degrees())
    } else {
        Refraction::TotalInternalReflection
    };
    debug!(alpha, n1, n2, sin_theta2, ?result, "solved refraction");

    Ok(result)
}

/// Computes the critical angle in degrees for light travelling from `n1`
/// into `n2`.
///
/// Returns [`NO_CRITICAL_ANGLE`] when `n1 <= n2`, since every incidence angle
/// then refracts.
pub fn critical_angle(n1: f64, n2: f64) -> Result<f64> {
    check_index(n1, Quantity::OriginIndex)?;
    check_index(n2, Quantity::DestinationIndex)?;

    if n1 > n2 {
        Ok((n2 / n1).asin().to_degrees())
    } else {
        Ok(NO_CRITICAL_ANGLE)
    }
}

fn check_angle(alpha: f64) -> Result<()> {
    if alpha.is_finite() {
        Ok(())
    } else {
        Err(RefractError::InvalidInput {
            quantity: Quantity::IncidenceAngle,
            value: alpha,
            reason: "must be finite",
        })
    }
}

fn check_index(n: f64, quantity: Quantity) -> Result<()> {
    if !n.is_finite() {
        return Err(RefractError::InvalidInput {
            quantity,
            value: n,
            reason: "must be finite",
        });
    }
    if n <= 0.0 {
        return Err(RefractError::InvalidInput {
            quantity,
            value: n,
            reason: "must be greater than 0",
        });
    }
    Ok(())
}
