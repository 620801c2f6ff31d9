use crate::constraint::Constraint;
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

/// Quadrature values of the gradient enhanced damage model at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDamageIp {
    pub stress: DVector<f64>,
    /// Secant stiffness `(1 - omega) D`. The damage evolution enters the
    /// linearization through `dstress_dnonlocal_eeq` only.
    pub dstress_dstrain: DMatrix<f64>,
    /// Local equivalent strain, the source term of the nonlocal equation.
    pub eeq: f64,
    pub deeq_dstrain: DVector<f64>,
    pub dstress_dnonlocal_eeq: DVector<f64>,
}

/// Implicit gradient enhanced damage. The history is driven by a nonlocal
/// equivalent strain that is solved for by the caller.
#[derive(Debug, Clone)]
pub struct GradientDamage {
    parameters: DamageParameters,
    D: DMatrix<f64>,
    omega: DamageLawExponential,
    strain_norm: ModMisesEeq,
    kappa: QValues,
}

#[allow(non_snake_case)]
impl GradientDamage {
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
        debug!(%constraint, E = e, nu, k0 = parameters.k0(), "gradient damage model");
        Ok(Self {
            parameters,
            D: elastic_tangent(e, nu, constraint),
            omega: DamageLawExponential::new(parameters.k0(), alpha, beta),
            strain_norm: ModMisesEeq::new(k, nu, constraint),
            kappa: QValues::new(QDim::Scalar),
        })
    }

    /// Parameter set of the form `(E, nu, constraint, ft, alpha, beta, k)`.
    pub fn new_with_decay_rate(
        E: f64,
        nu: f64,
        constraint: Constraint,
        ft: f64,
        alpha: f64,
        beta: f64,
        k: f64,
    ) -> DamageResult<Self> {
        Self::new(DamageParameters {
            e: E,
            nu,
            constraint,
            ft,
            alpha,
            beta,
            k,
        })
    }

    pub fn elastic_tangent(&self) -> &DMatrix<f64> {
        &self.D
    }

    /// Evaluates point `i` for the nonlocal equivalent strain `e` and the stored history.
    pub fn evaluate(
        &self,
        strain: &DVector<f64>,
        e: f64,
        i: usize,
    ) -> DamageResult<GradientDamageIp> {
        let (kappa, dkappa) = evaluate_kappa(e, self.kappa.get_scalar(i)?);
        let (omega, domega) = self.omega.evaluate(kappa);
        let (eeq, deeq_dstrain) = self.strain_norm.evaluate(strain);

        let D_strain = &self.D * strain;
        Ok(GradientDamageIp {
            stress: (1.0 - omega) * &D_strain,
            dstress_dstrain: (1.0 - omega) * &self.D,
            eeq,
            deeq_dstrain,
            dstress_dnonlocal_eeq: -D_strain * (domega * dkappa),
        })
    }

    /// Commits the history of point `i` from the nonlocal equivalent strain
    /// `e`. Returns `true` on the loading branch.
    pub fn update(&mut self, _strain: &DVector<f64>, e: f64, i: usize) -> DamageResult<bool> {
        let (kappa, dkappa) = evaluate_kappa(e, self.kappa.get_scalar(i)?);
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

impl ConstitutiveModel for GradientDamage {
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
        HashMap::from([
            (Q::Strain, QDim::Vector(self.q_dim())),
            (Q::NonlocalEeq, QDim::Scalar),
        ])
    }

    fn define_output(&self) -> HashMap<Q, QDim> {
        let q = self.q_dim();
        HashMap::from([
            (Q::Stress, QDim::Vector(q)),
            (Q::DstressDstrain, QDim::Matrix(q, q)),
            (Q::Eeq, QDim::Scalar),
            (Q::DeeqDstrain, QDim::Vector(q)),
            (Q::DstressDnonlocalEeq, QDim::Vector(q)),
        ])
    }

    fn evaluate_ip(
        &self,
        ip: usize,
        input: &QValueInput,
        output: &mut QValueOutput,
    ) -> DamageResult<()> {
        let strain = input.get_vector(Q::Strain, ip)?;
        let e = input.get_scalar(Q::NonlocalEeq, ip)?;
        let values = self.evaluate(&strain, e, ip)?;
        output.set_scalar(Q::Eeq, ip, values.eeq)?;
        output.set(Q::Stress, ip, &values.stress)?;
        output.set(Q::DeeqDstrain, ip, &values.deeq_dstrain)?;
        output.set(Q::DstressDnonlocalEeq, ip, &values.dstress_dnonlocal_eeq)?;
        output.set(Q::DstressDstrain, ip, &values.dstress_dstrain)
    }

    fn history_values(&self, q: Q) -> DamageResult<&QValues> {
        match q {
            Q::Kappa => Ok(&self.kappa),
            _ => Err(DamageError::UnknownOutput(q)),
        }
    }

    fn update_ip(&mut self, ip: usize, input: &QValueInput) -> DamageResult<bool> {
        let strain = input.get_vector(Q::Strain, ip)?;
        let e = input.get_scalar(Q::NonlocalEeq, ip)?;
        self.update(&strain, e, ip)
    }
}
