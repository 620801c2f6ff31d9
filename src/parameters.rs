use crate::constraint::Constraint;
use crate::error::{DamageError, DamageResult};
use std::collections::HashMap;

/// Material parameters shared by the damage models.
///
/// * `e`, `nu`: Young's modulus and Poisson ratio
/// * `ft`: tensile strength, the damage threshold is `ft / e`
/// * `alpha`: fraction of the softening that decays exponentially
/// * `beta`: decay rate of the exponential softening
/// * `k`: ratio of compressive to tensile strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageParameters {
    pub e: f64,
    pub nu: f64,
    pub constraint: Constraint,
    pub ft: f64,
    pub alpha: f64,
    pub beta: f64,
    pub k: f64,
}

fn get(parameters: &HashMap<String, f64>, name: &str) -> DamageResult<f64> {
    parameters
        .get(name)
        .copied()
        .ok_or_else(|| DamageError::MissingParameter(name.to_string()))
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl DamageParameters {
    /// Uses the fracture energy `gf` instead of the decay rate, `beta = ft / gf`.
    pub fn with_fracture_energy(
        e: f64,
        nu: f64,
        constraint: Constraint,
        ft: f64,
        alpha: f64,
        gf: f64,
        k: f64,
    ) -> Self {
        Self {
            e,
            nu,
            constraint,
            ft,
            alpha,
            beta: ft / gf,
            k,
        }
    }

    /// Reads `E`, `nu`, `ft`, `alpha`, `k` and either `beta` or `gf`.
    pub fn from_map(
        constraint: Constraint,
        parameters: &HashMap<String, f64>,
    ) -> DamageResult<Self> {
        let ft = get(parameters, "ft")?;
        let beta = match parameters.get("beta") {
            Some(beta) => *beta,
            None => ft / get(parameters, "gf")?,
        };
        Ok(Self {
            e: get(parameters, "E")?,
            nu: get(parameters, "nu")?,
            constraint,
            ft,
            alpha: get(parameters, "alpha")?,
            beta,
            k: get(parameters, "k")?,
        })
    }

    pub fn to_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("E".to_string(), self.e),
            ("nu".to_string(), self.nu),
            ("ft".to_string(), self.ft),
            ("alpha".to_string(), self.alpha),
            ("beta".to_string(), self.beta),
            ("k".to_string(), self.k),
        ])
    }

    /// Damage threshold of the equivalent strain.
    pub fn k0(&self) -> f64 {
        self.ft / self.e
    }

    pub fn validate(&self) -> DamageResult<()> {
        let checks = [
            ("E", self.e, positive(self.e), "must be positive and finite"),
            (
                "nu",
                self.nu,
                self.nu > -1.0 && self.nu < 0.5,
                "must be in (-1, 0.5)",
            ),
            ("ft", self.ft, positive(self.ft), "must be positive and finite"),
            (
                "alpha",
                self.alpha,
                (0.0..=1.0).contains(&self.alpha),
                "must be in [0, 1]",
            ),
            ("beta", self.beta, positive(self.beta), "must be positive and finite"),
            ("k", self.k, positive(self.k), "must be positive and finite"),
        ];
        match checks.iter().find(|(_, _, valid, _)| !valid) {
            Some((name, value, _, reason)) => Err(DamageError::InvalidParameter {
                name: *name,
                value: *value,
                reason: *reason,
            }),
            None => Ok(()),
        }
    }
}
