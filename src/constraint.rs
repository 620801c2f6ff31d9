use nalgebra::{Matrix6xX, SMatrix};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Reduced stress/strain state of an integration point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Constraint {
    UniaxialStrain,
    UniaxialStress,
    PlaneStrain,
    PlaneStress,
    Full,
}

impl Constraint {
    /// Number of components of the reduced strain/stress vector.
    pub const fn q_dim(&self) -> usize {
        match self {
            Constraint::UniaxialStrain | Constraint::UniaxialStress => 1,
            Constraint::PlaneStrain | Constraint::PlaneStress => 3,
            Constraint::Full => 6,
        }
    }

    /// Embeds a reduced strain vector into the six Voigt components
    /// `(xx, yy, zz, yz, xz, xy)`. Plane stress is singular for `nu == 1`.
    pub fn t3d(&self, nu: f64) -> Matrix6xX<f64> {
        let mut t = Matrix6xX::<f64>::zeros(self.q_dim());
        match self {
            Constraint::UniaxialStrain => {
                t[(0, 0)] = 1.0;
            }
            Constraint::UniaxialStress => {
                t[(0, 0)] = 1.0;
                t[(1, 0)] = -nu;
                t[(2, 0)] = -nu;
            }
            Constraint::PlaneStrain => {
                t[(0, 0)] = 1.0;
                t[(1, 1)] = 1.0;
                t[(5, 2)] = 1.0;
            }
            Constraint::PlaneStress => {
                t[(0, 0)] = 1.0;
                t[(1, 1)] = 1.0;
                t[(2, 0)] = nu / (nu - 1.0);
                t[(2, 1)] = nu / (nu - 1.0);
                t[(5, 2)] = 1.0;
            }
            Constraint::Full => {
                t.copy_from(&SMatrix::<f64, 6, 6>::identity());
            }
        }
        t
    }
}
