//! User-facing text for one set of inputs.

use std::fmt;
use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::input::Inputs;
use crate::snell::{self, Refraction};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refracted_readout() {
        let readout = Readout::new(30.0, 1.0, 1.5).unwrap();
        assert_eq!(readout.to_string(), "Refracted Angle (β): 19.47°");
        assert_eq!(readout.critical_label(), None);
    }

    #[test]
    fn reflected_readout() {
        let readout = Readout::new(60.0, 1.5, 1.0).unwrap();
        assert_eq!(readout.to_string(), "Total Internal Reflection");
        assert_eq!(
            readout.critical_label().as_deref(),
            Some("Break Angle: 41.81°")
        );
        assert!(readout.exceeds_critical());
    }

    #[test]
    fn streamed_lines_skip_bad_input() {
        let lines = "30 1.0 1.5\n\nthirty 1.0 1.5\n60 1.5 1.0\n30 1.0 0\n";
        let mut out = Vec::new();
        let written = stream_readouts(lines.as_bytes(), &mut out).unwrap();
        assert_eq!(written, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "Refracted Angle (β): 19.47°",
                "Total Internal Reflection",
                "Break Angle: 41.81°",
            ]
        );
    }

    #[test]
    fn below_critical_does_not_exceed() {
        let readout = Readout::new(20.0, 1.5, 1.0).unwrap();
        assert!(!readout.exceeds_critical());
        assert!(readout.refraction.angle().is_some());
    }
}

/// Result and critical angle for one `(alpha, n1, n2)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readout {
    pub alpha: f64,
    pub n1: f64,
    pub n2: f64,
    pub refraction: Refraction,
    pub critical_angle: f64,
}

impl Readout {
    pub fn new(alpha: f64, n1: f64, n2: f64) -> Result<Self> {
        let refraction = snell::solve_refraction(alpha, n1, n2)?;
        let critical_angle = snell::critical_angle(n1, n2)?;
        Ok(Self {
            alpha,
            n1,
            n2,
            refraction,
            critical_angle,
        })
    }

    /// True when the incidence angle reaches or passes the critical angle.
    pub fn exceeds_critical(&self) -> bool {
        self.n1 > self.n2 && self.alpha >= self.critical_angle
    }

    /// Annotation for the critical angle, only when one exists.
    pub fn critical_label(&self) -> Option<String> {
        (self.n1 > self.n2).then(|| format!("Break Angle: {:.2}°", self.critical_angle))
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.refraction {
            Refraction::Refracted(beta) => write!(f, "Refracted Angle (β): {:.2}°", beta),
            Refraction::TotalInternalReflection => write!(f, "Total Internal Reflection"),
        }
    }
}

/// Writes a readout for every `alpha n1 n2` line of `reader`, followed by
/// the critical angle label when it is exceeded.
///
/// Blank lines are ignored. Lines that fail to parse or hold invalid values
/// are logged and skipped. Returns the number of readouts written.
pub fn stream_readouts<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> anyhow::Result<usize> {
    let mut written = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let readout = Inputs::parse_line(&line)
            .and_then(|inputs| Readout::new(inputs.alpha, inputs.n1, inputs.n2));
        match readout {
            Ok(readout) => {
                writeln!(writer, "{}", readout)?;
                if readout.exceeds_critical() {
                    if let Some(label) = readout.critical_label() {
                        writeln!(writer, "{}", label)?;
                    }
                }
                written += 1;
            }
            Err(err) => warn!("Skipping {:?}: {}", line, err),
        }
    }
    writer.flush()?;
    Ok(written)
}
