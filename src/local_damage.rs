use crate::damage_law::DamageLawExponential;
use crate::equivalent_strain::ModMisesEeq;
use crate::error::{DamageError, DamageResult};
use crate::history::evaluate_kappa;
use crate::interfaces::{ConstitutiveModel, QDim, QValueInput, QValueOutput, QValues, Q};
use crate::linear_elasticity::elastic_tangent;
use crate::parameters::DamageParameters;
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use tracing::debug;

/// Isotropic damage driven by the local modified von Mises equivalent strain.
/// The history `kappa` is the largest equivalent strain of all accepted steps.
#[derive(Debug, Clone)]
pub struct LocalDamage {
    parameters: DamageParameters,
    D: DMatrix<f64>,
    omega: DamageLawExponential,
    eeq: ModMisesEeq,
    kappa: QValues,
}

#[allow(non_snake_case)]
impl LocalDamage {
    pub fn new(parameters: DamageParameters) -> DamageResult<Self> {
        parameters.validate()?;
        let DamageParameters {
            e,
            nu,
            constraint,
            alpha,
            beta,
            k,
            ..
        } = parameters;
        debug!(%constraint, E = e, nu, k0 = parameters.k0(), "local damage model");
        Ok(Self {
            parameters,
            D: elastic_tangent(e, nu, constraint),
            omega: DamageLawExponential::new(parameters.k0(), alpha, beta),
            eeq: ModMisesEeq::new(k, nu, constraint),
            kappa: QValues::new(QDim::Scalar),
        })
    }

    /// Parameter set of the form `(E, nu, constraint, ft, alpha, gf, k)`.
    pub fn new_with_fracture_energy(
        E: f64,
        nu: f64,
        constraint: crate::constraint::Constraint,
        ft: f64,
        alpha: f64,
        gf: f64,
        k: f64,
    ) -> DamageResult<Self> {
        Self::new(DamageParameters::with_fracture_energy(
            E, nu, constraint, ft, alpha, gf, k,
        ))
    }

    pub fn elastic_tangent(&self) -> &DMatrix<f64> {
        &self.D
    }

    /// Stress and consistent tangent at point `i` for the stored history.
    pub fn evaluate(
        &self,
        strain: &DVector<f64>,
        i: usize,
    ) -> DamageResult<(DVector<f64>, DMatrix<f64>)> {
        let kappa_0 = self.kappa.get_scalar(i)?;
        let (eeq, deeq) = self.eeq.evaluate(strain);
        let (kappa, dkappa) = evaluate_kappa(eeq, kappa_0);
        let (omega, domega) = self.omega.evaluate(kappa);

        let D_strain = &self.D * strain;
        let stress = (1.0 - omega) * &D_strain;
        let tangent = (1.0 - omega) * &self.D - &D_strain * (domega * dkappa) * deeq.transpose();
        Ok((stress, tangent))
    }

    /// Commits the history of point `i`. Returns `true` on the loading branch.
    pub fn update(&mut self, strain: &DVector<f64>, i: usize) -> DamageResult<bool> {
        let kappa_0 = self.kappa.get_scalar(i)?;
        let (eeq, _) = self.eeq.evaluate(strain);
        let (kappa, dkappa) = evaluate_kappa(eeq, kappa_0);
        self.kappa.set_scalar(i, kappa)?;
        Ok(dkappa > 0.0)
    }

    /// Damage at point `i` for the stored history.
    pub fn damage(&self, i: usize) -> DamageResult<f64> {
        Ok(self.omega.evaluate(self.kappa.get_scalar(i)?).0)
    }

    /// Stored history of all points.
    pub fn history(&self) -> &[f64] {
        self.kappa.as_slice()
    }

    pub fn parameters(&self) -> HashMap<String, f64> {
        self.parameters.to_map()
    }
}

impl ConstitutiveModel for LocalDamage {
    fn q_dim(&self) -> usize {
        self.D.nrows()
    }

    fn resize(&mut self, n: usize) {
        self.kappa.resize(n);
    }

    fn n_quadrature_points(&self) -> usize {
        self.kappa.n()
    }

    fn define_input(&self) -> HashMap<Q, QDim> {
        HashMap::from([(Q::Strain, QDim::Vector(self.q_dim()))])
    }

    fn define_output(&self) -> HashMap<Q, QDim> {
        let q = self.q_dim();
        HashMap::from([
            (Q::Stress, QDim::Vector(q)),
            (Q::DstressDstrain, QDim::Matrix(q, q)),
        ])
    }

    fn evaluate_ip(
        &self,
        ip: usize,
        input: &QValueInput,
        output: &mut QValueOutput,
    ) -> DamageResult<()> {
        let strain = input.get_vector(Q::Strain, ip)?;
        let (stress, tangent) = self.evaluate(&strain, ip)?;
        output.set(Q::Stress, ip, &stress)?;
        output.set(Q::DstressDstrain, ip, &tangent)
    }

    fn history_values(&self, q: Q) -> DamageResult<&QValues> {
        match q {
            Q::Kappa => Ok(&self.kappa),
            _ => Err(DamageError::UnknownOutput(q)),
        }
    }

    fn update_ip(&mut self, ip: usize, input: &QValueInput) -> DamageResult<bool> {
        let strain = input.get_vector(Q::Strain, ip)?;
        self.update(&strain, ip)
    }
}
