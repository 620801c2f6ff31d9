/// Exponential softening law. Below the threshold `k0` the material is
/// undamaged; above it the damage approaches `1` with a residual stiffness
/// controlled by `alpha` and a decay rate `beta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageLawExponential {
    k0: f64,
    alpha: f64,
    beta: f64,
}

impl DamageLawExponential {
    pub fn new(k0: f64, alpha: f64, beta: f64) -> Self {
        Self { k0, alpha, beta }
    }

    pub fn k0(&self) -> f64 {
        self.k0
    }

    /// Damage `omega` and its derivative with respect to `kappa`.
    pub fn evaluate(&self, kappa: f64) -> (f64, f64) {
        if kappa <= self.k0 {
            return (0.0, 0.0);
        }
        let decay = self.alpha * (self.beta * (self.k0 - kappa)).exp();
        let omega = 1.0 - self.k0 / kappa * (1.0 - self.alpha + decay);
        let domega = self.k0 / kappa
            * ((1.0 / kappa + self.beta) * decay + (1.0 - self.alpha) / kappa);
        (omega, domega)
    }
}
