//! Tabulation of the refracted angle over a range of incidence angles.
//!
//! A sweep evaluates [`solve_refraction`] at evenly spaced incidence angles
//! for a fixed pair of media. Rows are written either as JSON or as a
//! whitespace-separated text table with one row per angle, where a totally
//! internally reflected row carries `TIR` in place of the refracted angle.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{self, Quantity, RefractError};
use crate::snell::{critical_angle, solve_refraction};

/// Largest number of incidence angles a single sweep may visit.
pub const MAX_SWEEP_STEPS: usize = 1_000_000;


/// Range of incidence angles to evaluate, in degrees, ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub alpha: f64,
    /// Refracted angle, `None` under total internal reflection.
    pub beta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepTable {
    pub n1: f64,
    pub n2: f64,
    pub critical_angle: f64,
    pub rows: Vec<SweepRow>,
}

impl Sweep {
    pub fn validate(&self) -> error::Result<()> {
        for bound in [self.start, self.end] {
            if !bound.is_finite() {
                return Err(RefractError::InvalidInput {
                    quantity: Quantity::SweepBound,
                    value: bound,
                    reason: "must be finite",
                });
            }
        }
        if self.steps < 2 {
            return Err(RefractError::InvalidInput {
                quantity: Quantity::SweepSteps,
                value: self.steps as f64,
                reason: "must be at least 2",
            });
        }
        if self.steps > MAX_SWEEP_STEPS {
            return Err(RefractError::InvalidInput {
                quantity: Quantity::SweepSteps,
                value: self.steps as f64,
                reason: "must be at most 1000000",
            });
        }
        Ok(())
    }

    /// Incidence angles visited by the sweep.
    pub fn angles(&self) -> Array1<f64> {
        Array1::linspace(self.start, self.end, self.steps)
    }

    pub fn run(&self, n1: f64, n2: f64) -> error::Result<SweepTable> {
        self.validate()?;
        let critical_angle = critical_angle(n1, n2)?;
        let rows = self
            .angles()
            .iter()
            .map(|&alpha| {
                solve_refraction(alpha, n1, n2).map(|r| SweepRow {
                    alpha,
                    beta: r.angle(),
                })
            })
            .collect::<error::Result<Vec<_>>>()?;

        Ok(SweepTable {
            n1,
            n2,
            critical_angle,
            rows,
        })
    }
}

impl SweepTable {
    /// Rows that ended in total internal reflection.
    pub fn reflected(&self) -> impl Iterator<Item = &SweepRow> {
        self.rows.iter().filter(|r| r.beta.is_none())
    }

    /// Write one `alpha beta` line per row.
    pub fn write_table<W: Write>(&self, writer: &mut W) -> Result<()> {
        for row in &self.rows {
            let beta = match row.beta {
                Some(beta) => format!("{:.6}", beta),
                None => "TIR".to_string(),
            };
            writeln!(
                writer,
                "{}",
                [format!("{:.6}", row.alpha), beta].iter().join(" ")
            )?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the table to `path`, as JSON if the extension is `json`,
    /// otherwise as text.
    pub fn writeup(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create sweep output {:?}", path))?;
        let mut writer = BufWriter::new(file);

        if path.extension().is_some_and(|ext| ext == "json") {
            self.write_json(&mut writer)?;
        } else {
            self.write_table(&mut writer)?;
        }
        writer.flush()?;

        info!(
            rows = self.rows.len(),
            reflected = self.reflected().count(),
            "wrote sweep to {:?}",
            path
        );
        Ok(())
    }
}
