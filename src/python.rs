use crate::constraint::Constraint;
use crate::error::DamageError;
use crate::gradient_damage::GradientDamage;
use crate::interfaces::Q;
use crate::ip_loop::IpLoop;
use crate::local_damage::LocalDamage;
use crate::parameters::DamageParameters;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;
use std::str::FromStr;

impl From<DamageError> for PyErr {
    fn from(error: DamageError) -> Self {
        match error {
            DamageError::IndexOutOfBounds { .. } => PyIndexError::new_err(error.to_string()),
            _ => PyValueError::new_err(error.to_string()),
        }
    }
}

fn constraint_from_str(constraint: &str) -> Result<Constraint, DamageError> {
    Constraint::from_str(constraint)
        .map_err(|_| DamageError::UnknownConstraint(constraint.to_string()))
}

fn q_from_str(what: &str) -> Result<Q, DamageError> {
    Q::from_str(what).map_err(|_| DamageError::UnknownQuantity(what.to_string()))
}

/// Wrapper struct for LocalDamage in python
#[pyclass(name = "LocalDamage")]
struct PyLocalDamage {
    ip_loop: IpLoop<LocalDamage>,
}

#[pymethods]
impl PyLocalDamage {
    #[new]
    #[allow(non_snake_case)]
    fn new(
        E: f64,
        nu: f64,
        constraint: &str,
        ft: f64,
        alpha: f64,
        gf: f64,
        k: f64,
    ) -> PyResult<Self> {
        let parameters = DamageParameters::with_fracture_energy(
            E,
            nu,
            constraint_from_str(constraint)?,
            ft,
            alpha,
            gf,
            k,
        );
        Ok(Self {
            ip_loop: IpLoop::new(LocalDamage::new(parameters)?),
        })
    }

    fn resize(&mut self, n: usize) {
        self.ip_loop.resize(n);
    }

    fn qdim(&self) -> usize {
        self.ip_loop.q_dim()
    }

    fn evaluate(&mut self, all_strains: PyReadonlyArray1<f64>) -> PyResult<()> {
        self.ip_loop.evaluate(&[(Q::Strain, all_strains.as_slice()?)])?;
        Ok(())
    }

    fn evaluate_some(
        &mut self,
        all_strains: PyReadonlyArray1<f64>,
        ips: Vec<usize>,
    ) -> PyResult<()> {
        self.ip_loop.evaluate_some(&[(Q::Strain, all_strains.as_slice()?)], &ips)?;
        Ok(())
    }

    fn update(&mut self, all_strains: PyReadonlyArray1<f64>) -> PyResult<()> {
        self.ip_loop.update(&[(Q::Strain, all_strains.as_slice()?)])?;
        Ok(())
    }

    fn get<'py>(&self, py: Python<'py>, what: &str) -> PyResult<&'py PyArray1<f64>> {
        Ok(PyArray1::from_slice(py, self.ip_loop.get(q_from_str(what)?)?))
    }

    fn kappa<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f64>> {
        Ok(PyArray1::from_slice(py, self.ip_loop.get(Q::Kappa)?))
    }

    fn parameters(&self) -> HashMap<String, f64> {
        self.ip_loop.model().parameters()
    }
}

/// Wrapper struct for GradientDamage in python
#[pyclass(name = "GradientDamage")]
struct PyGradientDamage {
    ip_loop: IpLoop<GradientDamage>,
}

#[pymethods]
impl PyGradientDamage {
    #[new]
    #[allow(non_snake_case)]
    fn new(
        E: f64,
        nu: f64,
        constraint: &str,
        ft: f64,
        alpha: f64,
        beta: f64,
        k: f64,
    ) -> PyResult<Self> {
        let model = GradientDamage::new_with_decay_rate(
            E,
            nu,
            constraint_from_str(constraint)?,
            ft,
            alpha,
            beta,
            k,
        )?;
        Ok(Self {
            ip_loop: IpLoop::new(model),
        })
    }

    fn resize(&mut self, n: usize) {
        self.ip_loop.resize(n);
    }

    fn qdim(&self) -> usize {
        self.ip_loop.q_dim()
    }

    fn evaluate(
        &mut self,
        all_strains: PyReadonlyArray1<f64>,
        all_neeq: PyReadonlyArray1<f64>,
    ) -> PyResult<()> {
        self.ip_loop.evaluate(&[
            (Q::Strain, all_strains.as_slice()?),
            (Q::NonlocalEeq, all_neeq.as_slice()?),
        ])?;
        Ok(())
    }

    fn update(
        &mut self,
        all_strains: PyReadonlyArray1<f64>,
        all_neeq: PyReadonlyArray1<f64>,
    ) -> PyResult<()> {
        self.ip_loop.update(&[
            (Q::Strain, all_strains.as_slice()?),
            (Q::NonlocalEeq, all_neeq.as_slice()?),
        ])?;
        Ok(())
    }

    fn get<'py>(&self, py: Python<'py>, what: &str) -> PyResult<&'py PyArray1<f64>> {
        Ok(PyArray1::from_slice(py, self.ip_loop.get(q_from_str(what)?)?))
    }

    fn kappa<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<f64>> {
        Ok(PyArray1::from_slice(py, self.ip_loop.get(Q::Kappa)?))
    }

    fn parameters(&self) -> HashMap<String, f64> {
        self.ip_loop.model().parameters()
    }
}

/// Integration point damage models for FEniCS style quadrature spaces.
#[pymodule]
fn comdamage(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyLocalDamage>()?;
    m.add_class::<PyGradientDamage>()?;
    Ok(())
}
