//! Easing curves for the tween system.
//!
//! `t` is normalized progress in [0, 1]; the return value may overshoot
//! 1.0 for `BackOut`.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic deceleration
    Power3Out,
    /// Decelerates past the target then springs back; the parameter is
    /// the overshoot amount (1.7 matches the page's entrance feel)
    BackOut(f32),
}

impl Ease {
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
            Ease::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_curves_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power3Out, Ease::BackOut(1.7)] {
            assert!((ease.apply(0.0)).abs() < 1e-6);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn back_out_overshoots_mid_curve() {
        let ease = Ease::BackOut(1.7);
        let peak = (1..100)
            .map(|i| ease.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn power3_out_is_monotone() {
        let ease = Ease::Power3Out;
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
