use crate::error::DamageResult;
use crate::interfaces::{ConstitutiveModel, QValueInput, QValueOutput, QValues, Q};
use tracing::{debug, trace};

/// Evaluates a constitutive model at all integration points and owns the
/// flattened output buffers.
///
/// Inputs are passed as `(quantity, flattened values)` pairs, e.g.
/// `[(Q::Strain, &strains[..]), (Q::NonlocalEeq, &neeq[..])]`, where point `i`
/// occupies the block `i * size..(i + 1) * size` of each array.
#[derive(Debug)]
pub struct IpLoop<M: ConstitutiveModel> {
    model: M,
    outputs: QValueOutput,
    n: usize,
}

impl<M: ConstitutiveModel> IpLoop<M> {
    pub fn new(model: M) -> Self {
        let outputs = QValueOutput::new(&model.define_output());
        Self {
            model,
            outputs,
            n: 0,
        }
    }

    /// Sets the number of integration points. Zeroes all outputs and the
    /// history of the model.
    pub fn resize(&mut self, n: usize) {
        debug!(n, q_dim = self.model.q_dim(), "resize integration points");
        self.n = n;
        self.outputs.resize(n);
        self.model.resize(n);
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn q_dim(&self) -> usize {
        self.model.q_dim()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    fn input<'a>(&self, values: &[(Q, &'a [f64])]) -> DamageResult<QValueInput<'a>> {
        QValueInput::new(&self.model.define_input(), values, self.n)
    }

    /// Fills the outputs of all points. The history is not modified.
    pub fn evaluate(&mut self, values: &[(Q, &[f64])]) -> DamageResult<()> {
        let input = self.input(values)?;
        self.model.evaluate(&input, &mut self.outputs)
    }

    /// Like `evaluate`, but only the blocks of the points in `ips` are
    /// rewritten. Inputs still have to cover all points.
    pub fn evaluate_some(&mut self, values: &[(Q, &[f64])], ips: &[usize]) -> DamageResult<()> {
        let input = self.input(values)?;
        self.model.evaluate_some(&input, &mut self.outputs, ips)
    }

    /// Commits the history of all points after an accepted step.
    pub fn update(&mut self, values: &[(Q, &[f64])]) -> DamageResult<()> {
        let input = self.input(values)?;
        let loading = self.model.update(&input)?;
        trace!(loading, n = self.n, "history updated");
        Ok(())
    }

    /// Flattened values of an output or a history variable for all points.
    pub fn get(&self, q: Q) -> DamageResult<&[f64]> {
        Ok(self.values(q)?.as_slice())
    }

    pub fn values(&self, q: Q) -> DamageResult<&QValues> {
        self.outputs.get(q).or_else(|_| self.model.history_values(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::error::DamageError;
    use crate::gradient_damage::GradientDamage;
    use crate::interfaces::QDim;
    use crate::local_damage::LocalDamage;
    use crate::parameters::DamageParameters;
    use nalgebra::DVector;

    fn parameters(constraint: Constraint) -> DamageParameters {
        DamageParameters::with_fracture_energy(20000.0, 0.2, constraint, 2.0, 0.99, 0.02, 10.0)
    }

    fn local_loop(constraint: Constraint) -> IpLoop<LocalDamage> {
        IpLoop::new(LocalDamage::new(parameters(constraint)).unwrap())
    }

    #[test]
    fn test_local_loop_matches_single_point() {
        let mut ip_loop = local_loop(Constraint::PlaneStrain);
        let n = 4;
        ip_loop.resize(n);
        let strains: Vec<f64> = (0..3 * n).map(|i| 1e-4 * (i as f64 - 4.0)).collect();
        ip_loop.update(&[(Q::Strain, &strains[..])]).unwrap();
        ip_loop.evaluate(&[(Q::Strain, &strains[..])]).unwrap();

        let stress = ip_loop.values(Q::Stress).unwrap();
        let tangent = ip_loop.values(Q::DstressDstrain).unwrap();
        for i in 0..n {
            let strain = DVector::from_column_slice(&strains[3 * i..3 * i + 3]);
            let (s, t) = ip_loop.model().evaluate(&strain, i).unwrap();
            assert_eq!(stress.get(i).unwrap().column(0), s);
            assert_eq!(tangent.get(i).unwrap(), t);
        }
        assert_eq!(ip_loop.get(Q::Stress).unwrap().len(), 3 * n);
        assert_eq!(ip_loop.get(Q::DstressDstrain).unwrap().len(), 9 * n);
    }

    #[test]
    fn test_gradient_loop_outputs() {
        let mut ip_loop = IpLoop::new(GradientDamage::new(parameters(Constraint::Full)).unwrap());
        ip_loop.resize(2);
        let strains = vec![1e-4; 12];
        let neeq = [0.0, 5e-4];
        ip_loop
            .evaluate(&[(Q::Strain, &strains[..]), (Q::NonlocalEeq, &neeq[..])])
            .unwrap();
        assert_eq!(ip_loop.get(Q::Eeq).unwrap().len(), 2);
        assert_eq!(ip_loop.get(Q::DeeqDstrain).unwrap().len(), 12);
        assert_eq!(ip_loop.get(Q::DstressDnonlocalEeq).unwrap().len(), 12);
        assert_eq!(ip_loop.get(Q::DstressDstrain).unwrap().len(), 72);

        let sensitivity = ip_loop.values(Q::DstressDnonlocalEeq).unwrap();
        assert!(sensitivity.get(0).unwrap().iter().all(|v| *v == 0.0));
        assert!(sensitivity.get(1).unwrap().iter().any(|v| *v != 0.0));
        assert_eq!(ip_loop.model().history(), &[0.0, 0.0]);
    }

    #[test]
    fn test_input_errors() {
        let model = GradientDamage::new(parameters(Constraint::PlaneStress)).unwrap();
        let mut ip_loop = IpLoop::new(model);
        ip_loop.resize(2);
        let strains = vec![0.0; 6];
        assert_eq!(
            ip_loop.evaluate(&[(Q::Strain, &strains[..])]),
            Err(DamageError::MissingInput(Q::NonlocalEeq))
        );
        let neeq = [0.0; 3];
        assert_eq!(
            ip_loop.update(&[(Q::Strain, &strains[..]), (Q::NonlocalEeq, &neeq[..])]),
            Err(DamageError::InputLength {
                q: Q::NonlocalEeq,
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            ip_loop.get(Q::NonlocalEeq),
            Err(DamageError::UnknownOutput(Q::NonlocalEeq))
        );
    }

    #[test]
    fn test_evaluate_some_only_touches_listed_points() {
        let mut ip_loop = local_loop(Constraint::UniaxialStress);
        ip_loop.resize(4);
        let strains = [1e-5, 2e-5, 3e-5, 4e-5];
        ip_loop.evaluate_some(&[(Q::Strain, &strains[..])], &[1, 3]).unwrap();
        let stress = ip_loop.get(Q::Stress).unwrap();
        assert_eq!(stress[0], 0.0);
        assert_eq!(stress[1], 20000.0 * 2e-5);
        assert_eq!(stress[2], 0.0);
        assert_eq!(stress[3], 20000.0 * 4e-5);

        assert_eq!(
            ip_loop.evaluate_some(&[(Q::Strain, &strains[..])], &[4]),
            Err(DamageError::IndexOutOfBounds { index: 4, n: 4 })
        );
    }

    #[test]
    fn test_history_readable_as_kappa() {
        let mut ip_loop = local_loop(Constraint::UniaxialStress);
        ip_loop.resize(3);
        assert_eq!(ip_loop.get(Q::Kappa).unwrap(), &[0.0, 0.0, 0.0]);

        let strains = [1e-4, -2e-4, 5e-5];
        ip_loop.update(&[(Q::Strain, &strains[..])]).unwrap();
        assert_eq!(ip_loop.get(Q::Kappa).unwrap(), ip_loop.model().history());
        assert!(ip_loop.get(Q::Kappa).unwrap().iter().all(|kappa| *kappa > 0.0));
        assert_eq!(ip_loop.values(Q::Kappa).unwrap().dim(), QDim::Scalar);
    }
}
