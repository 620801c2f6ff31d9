/// Irreversible history update. Returns the new `kappa` and its derivative
/// with respect to the driving value: `1` on the loading branch, `0` when the
/// history is frozen.
pub fn evaluate_kappa(eeq: f64, kappa: f64) -> (f64, f64) {
    if eeq >= kappa {
        (eeq, 1.0)
    } else {
        (kappa, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_branches() {
        assert_eq!(evaluate_kappa(2.0, 1.0), (2.0, 1.0));
        assert_eq!(evaluate_kappa(1.0, 1.0), (1.0, 1.0));
        assert_eq!(evaluate_kappa(0.5, 1.0), (1.0, 0.0));
    }

    #[test]
    fn test_running_maximum() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut kappa = 0.0;
        let mut maximum: f64 = 0.0;
        for _ in 0..100 {
            let eeq = rng.gen_range(0.0..1e-3);
            let (new_kappa, _) = evaluate_kappa(eeq, kappa);
            maximum = maximum.max(eeq);
            assert!(new_kappa >= kappa);
            assert_eq!(new_kappa, maximum);
            kappa = new_kappa;
        }
    }
}
