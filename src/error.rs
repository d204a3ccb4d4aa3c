//! Errors raised when inputs to the refraction calculator are unusable.

/// Which input a rejected value was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    IncidenceAngle,
    OriginIndex,
    DestinationIndex,
    SweepBound,
    SweepSteps,
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Quantity::IncidenceAngle => "incidence angle",
            Quantity::OriginIndex => "refractive index n1",
            Quantity::DestinationIndex => "refractive index n2",
            Quantity::SweepBound => "sweep bound",
            Quantity::SweepSteps => "sweep step count",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RefractError {
    #[error("invalid {quantity}: {value} ({reason})")]
    InvalidInput {
        quantity: Quantity,
        value: f64,
        reason: &'static str,
    },
    #[error("could not parse {quantity} from {text:?}")]
    Parse { quantity: Quantity, text: String },
}

pub type Result<T> = std::result::Result<T, RefractError>;
