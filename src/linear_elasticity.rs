use crate::constraint::Constraint;
use nalgebra::DMatrix;

/// Elastic stiffness for the reduced strain vector of `constraint`. Shear
/// components are engineering strains, so the shear entries are `mu`.
#[allow(non_snake_case)]
pub fn elastic_tangent(E: f64, nu: f64, constraint: Constraint) -> DMatrix<f64> {
    let q = constraint.q_dim();
    let mut D = DMatrix::<f64>::zeros(q, q);
    let mu = E / (2.0 * (1.0 + nu));
    let lambda = E * nu / ((1.0 + nu) * (1.0 - 2.0 * nu));
    match constraint {
        Constraint::UniaxialStress => {
            D[(0, 0)] = E;
        }
        Constraint::UniaxialStrain => {
            D[(0, 0)] = E * (1.0 - nu) / ((1.0 + nu) * (1.0 - 2.0 * nu));
        }
        Constraint::PlaneStress => {
            let c11 = E / (1.0 - nu * nu);
            D[(0, 0)] = c11;
            D[(0, 1)] = c11 * nu;
            D[(1, 0)] = c11 * nu;
            D[(1, 1)] = c11;
            D[(2, 2)] = c11 * 0.5 * (1.0 - nu);
        }
        Constraint::PlaneStrain => {
            D[(0, 0)] = lambda + 2.0 * mu;
            D[(0, 1)] = lambda;
            D[(1, 0)] = lambda;
            D[(1, 1)] = lambda + 2.0 * mu;
            D[(2, 2)] = mu;
        }
        Constraint::Full => {
            for i in 0..3 {
                for j in 0..3 {
                    D[(i, j)] = lambda;
                }
                D[(i, i)] = lambda + 2.0 * mu;
                D[(i + 3, i + 3)] = mu;
            }
        }
    }
    D
}
