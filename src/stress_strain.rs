use nalgebra::SVector;

/// Voigt identity `(1, 1, 1, 0, 0, 0)`.
pub const VOIGT_IDENTITY: SVector<f64, 6> = SVector::<f64, 6>::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);

/// First invariant of a Voigt strain vector and its gradient.
pub fn invariant_i1(v: &SVector<f64, 6>) -> (f64, SVector<f64, 6>) {
    (v.x + v.y + v.z, VOIGT_IDENTITY)
}

/// Second invariant of the deviator of a Voigt strain vector with
/// engineering shear components `(w, a, b)`, and its gradient.
pub fn invariant_j2(v: &SVector<f64, 6>) -> (f64, SVector<f64, 6>) {
    let j2 = ((v.x - v.y).powi(2) + (v.y - v.z).powi(2) + (v.z - v.x).powi(2)) / 6.
        + 0.25 * (v.w * v.w + v.a * v.a + v.b * v.b);
    let dj2 = SVector::<f64, 6>::new(
        (2. * v.x - v.y - v.z) / 3.,
        (2. * v.y - v.z - v.x) / 3.,
        (2. * v.z - v.x - v.y) / 3.,
        0.5 * v.w,
        0.5 * v.a,
        0.5 * v.b,
    );
    (j2, dj2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hydrostatic_has_no_deviator() {
        let v = SVector::<f64, 6>::new(2.0, 2.0, 2.0, 0.0, 0.0, 0.0);
        let (i1, _) = invariant_i1(&v);
        let (j2, dj2) = invariant_j2(&v);
        assert_eq!(i1, 6.0);
        assert_eq!(j2, 0.0);
        assert_eq!(dj2, SVector::<f64, 6>::zeros());
    }

    #[test]
    fn test_pure_shear() {
        // engineering shear gamma = 2 eps_xy, so J2 = eps_xy^2
        let v = SVector::<f64, 6>::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.4);
        let (j2, _) = invariant_j2(&v);
        assert_relative_eq!(j2, 0.04, epsilon = 1e-14);
    }

    #[test]
    fn test_j2_gradient_finite_difference() {
        let v = SVector::<f64, 6>::new(0.3, -0.1, 0.7, 0.2, -0.5, 0.05);
        let (_, dj2) = invariant_j2(&v);
        let h = 1e-6;
        for j in 0..6 {
            let mut vp = v;
            let mut vm = v;
            vp[j] += h;
            vm[j] -= h;
            let fd = (invariant_j2(&vp).0 - invariant_j2(&vm).0) / (2. * h);
            assert_relative_eq!(fd, dj2[j], epsilon = 1e-8);
        }
    }
}
