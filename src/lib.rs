//! Refraction of a single ray at a planar interface between two media.
//!
//! [`snell`] holds the two solvers. Everything else wraps them for a
//! presentation layer: [`input`] parses text fields, [`readout`] formats
//! results, [`scene`] lays out the rays for drawing and [`sweep`] tabulates
//! the refracted angle over a range of incidence angles.

pub mod error;
#[cfg(feature = "visualization")]
pub mod helpers;
pub mod input;
pub mod logging;
pub mod readout;
pub mod scene;
pub mod settings;
pub mod snell;
pub mod sweep;

pub use error::{Quantity, RefractError};
pub use snell::{critical_angle, solve_refraction, Refraction};
