use crate::constraint::Constraint;
use crate::stress_strain::{invariant_i1, invariant_j2};
use nalgebra::{DVector, Matrix6xX, SVector};

/// Keeps the norm differentiable at zero strain.
const REGULARIZATION: f64 = 1e-14;

/// Modified von Mises equivalent strain. `k` is the ratio of compressive to
/// tensile strength.
#[derive(Debug, Clone)]
pub struct ModMisesEeq {
    k1: f64,
    k2: f64,
    t3d: Matrix6xX<f64>,
}

impl ModMisesEeq {
    pub fn new(k: f64, nu: f64, constraint: Constraint) -> Self {
        Self {
            k1: (k - 1.0) / (2.0 * k * (1.0 - 2.0 * nu)),
            k2: 3.0 / (k * (1.0 + nu) * (1.0 + nu)),
            t3d: constraint.t3d(nu),
        }
    }

    pub fn q_dim(&self) -> usize {
        self.t3d.ncols()
    }

    /// Returns the equivalent strain and its gradient with respect to the
    /// reduced strain vector.
    pub fn evaluate(&self, strain: &DVector<f64>) -> (f64, DVector<f64>) {
        assert_eq!(
            strain.nrows(),
            self.q_dim(),
            "strain has {} components, the constraint requires {}",
            strain.nrows(),
            self.q_dim()
        );
        let strain3d: SVector<f64, 6> = &self.t3d * strain;
        let (i1, di1) = invariant_i1(&strain3d);
        let (j2, dj2) = invariant_j2(&strain3d);

        let a = (self.k1 * self.k1 * i1 * i1 + self.k2 * j2).sqrt() + REGULARIZATION;
        let eeq = self.k1 * i1 + a;
        let deeq_di1 = self.k1 + self.k1 * self.k1 * i1 / a;
        let deeq_dj2 = self.k2 / (2.0 * a);

        let deeq3d = deeq_di1 * di1 + deeq_dj2 * dj2;
        (eeq, self.t3d.tr_mul(&deeq3d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use strum::IntoEnumIterator;

    fn finite_difference(norm: &ModMisesEeq, strain: &DVector<f64>) -> DVector<f64> {
        let h = 1e-9;
        DVector::from_fn(strain.nrows(), |j, _| {
            let mut sp = strain.clone();
            let mut sm = strain.clone();
            sp[j] += h;
            sm[j] -= h;
            (norm.evaluate(&sp).0 - norm.evaluate(&sm).0) / (2.0 * h)
        })
    }

    #[test]
    fn test_zero_strain_is_regularized() {
        let norm = ModMisesEeq::new(10.0, 0.2, Constraint::Full);
        let (eeq, deeq) = norm.evaluate(&DVector::zeros(6));
        assert_eq!(eeq, REGULARIZATION);
        assert!(deeq.iter().all(|d| d.is_finite()));
    }

    #[test]
    fn test_k_one_uniaxial_strain() {
        // k = 1 removes the I1 term: eeq = sqrt(K2 * J2) with J2 = eps^2 / 3
        let nu = 0.2;
        let norm = ModMisesEeq::new(1.0, nu, Constraint::Full);
        let eps = 2e-4;
        let strain = DVector::from_vec(vec![eps, 0., 0., 0., 0., 0.]);
        let expected = (3.0 / ((1.0 + nu) * (1.0 + nu)) / 3.0).sqrt() * eps;
        assert_relative_eq!(norm.evaluate(&strain).0, expected, max_relative = 1e-8);
    }

    #[test]
    fn test_tension_exceeds_compression() {
        let norm = ModMisesEeq::new(10.0, 0.2, Constraint::UniaxialStress);
        let tension = norm.evaluate(&DVector::from_vec(vec![1e-3])).0;
        let compression = norm.evaluate(&DVector::from_vec(vec![-1e-3])).0;
        assert!(tension > compression);
        assert_relative_eq!(tension, 1e-3, max_relative = 1e-8);
        assert_relative_eq!(compression, 1e-4, max_relative = 1e-8);
    }

    #[test]
    fn test_gradient_finite_difference() {
        let mut rng = StdRng::seed_from_u64(42);
        for c in Constraint::iter() {
            let norm = ModMisesEeq::new(10.0, 0.2, c);
            for _ in 0..5 {
                let strain =
                    DVector::from_fn(c.q_dim(), |_, _| rng.gen_range(-1e-3..1e-3));
                let (_, deeq) = norm.evaluate(&strain);
                let fd = finite_difference(&norm, &strain);
                assert_eq!(deeq.nrows(), c.q_dim());
                assert_relative_eq!(deeq, fd, epsilon = 1e-5);
            }
        }
    }

    #[test]
    #[should_panic(expected = "the constraint requires 3")]
    fn test_wrong_dimension_panics() {
        let norm = ModMisesEeq::new(10.0, 0.2, Constraint::PlaneStrain);
        norm.evaluate(&DVector::zeros(6));
    }
}
