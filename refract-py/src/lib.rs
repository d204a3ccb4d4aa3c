use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use refract::{RefractError, Refraction};

fn to_py_err(err: RefractError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Refracted angle in degrees for a ray at `alpha` degrees crossing from
/// index `n1` into `n2`, or `None` under total internal reflection.
#[pyfunction]
fn solve_refraction(alpha: f64, n1: f64, n2: f64) -> PyResult<Option<f64>> {
    let result = refract::solve_refraction(alpha, n1, n2).map_err(to_py_err)?;
    Ok(match result {
        Refraction::Refracted(beta) => Some(beta),
        Refraction::TotalInternalReflection => None,
    })
}

/// Critical angle in degrees, 90 when `n1 <= n2`.
#[pyfunction]
fn critical_angle(n1: f64, n2: f64) -> PyResult<f64> {
    refract::critical_angle(n1, n2).map_err(to_py_err)
}

/// Snell's law refraction calculator implemented in Rust.
#[pymodule]
fn _refract_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(solve_refraction, m)?)?;
    m.add_function(wrap_pyfunction!(critical_angle, m)?)?;
    Ok(())
}
