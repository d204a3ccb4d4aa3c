//! Parsing of raw text fields into the numbers the solvers take.

use crate::error::{Quantity, RefractError, Result};


/// The three numbers a caller supplies on every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    pub alpha: f64,
    pub n1: f64,
    pub n2: f64,
}

impl Inputs {
    /// Parses the incidence angle and both refractive indices from text.
    ///
    /// Any field that is not a finite number is rejected, so callers never
    /// reach the solvers with partial input.
    pub fn parse(alpha: &str, n1: &str, n2: &str) -> Result<Self> {
        Ok(Self {
            alpha: parse_field(alpha, Quantity::IncidenceAngle)?,
            n1: parse_field(n1, Quantity::OriginIndex)?,
            n2: parse_field(n2, Quantity::DestinationIndex)?,
        })
    }

    /// Parses a whitespace-separated `alpha n1 n2` line.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [alpha, n1, n2] => Self::parse(alpha, n1, n2),
            [_, _, rest @ ..] if !rest.is_empty() => Err(RefractError::Parse {
                quantity: Quantity::DestinationIndex,
                text: rest.join(" "),
            }),
            short => Self::parse(
                short.first().copied().unwrap_or(""),
                short.get(1).copied().unwrap_or(""),
                "",
            ),
        }
    }
}

/// Parses one text field as a finite number.
pub fn parse_field(text: &str, quantity: Quantity) -> Result<f64> {
    let value: f64 = text.trim().parse().map_err(|_| RefractError::Parse {
        quantity,
        text: text.to_string(),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RefractError::InvalidInput {
            quantity,
            value,
            reason: "must be finite",
        })
    }
}
