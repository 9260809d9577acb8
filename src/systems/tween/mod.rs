//! Minimal tween engine.
//!
//! A `Tween` interpolates one scalar from `from` to `to` over a fixed
//! duration, optionally repeating with yoyo reversal (used by the field
//! shake). Like everything else in the core it is sampled on virtual
//! time: `value_at(now_ms)` is pure and `is_done(now_ms)` tells the
//! orchestrator when a transition has finished.

use crate::core::easing::Ease;

#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    starts_at: f64,
    duration_ms: f64,
    ease: Ease,
    /// Extra cycles after the first (GSAP-style `repeat`)
    repeat: u32,
    yoyo: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, starts_at: f64, duration_ms: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            starts_at,
            duration_ms,
            ease,
            repeat: 0,
            yoyo: false,
        }
    }

    pub fn with_repeat(mut self, repeat: u32, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    pub fn value_at(&self, now_ms: f64) -> f32 {
        if now_ms <= self.starts_at {
            return self.from;
        }
        if self.is_done(now_ms) {
            return self.end_value();
        }

        let elapsed = now_ms - self.starts_at;
        let cycle = (elapsed / self.duration_ms) as u32;
        let t = ((elapsed % self.duration_ms) / self.duration_ms) as f32;
        let eased = self.ease.apply(t);

        let reversed = self.yoyo && cycle % 2 == 1;
        if reversed {
            self.to + (self.from - self.to) * eased
        } else {
            self.from + (self.to - self.from) * eased
        }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        now_ms >= self.starts_at + self.duration_ms * (self.repeat as f64 + 1.0)
    }

    /// Resting value once all cycles are exhausted.
    pub fn end_value(&self) -> f32 {
        let last_cycle_reversed = self.yoyo && self.repeat % 2 == 1;
        if last_cycle_reversed {
            self.from
        } else {
            self.to
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_start_value_until_delay_elapses() {
        let tw = Tween::new(0.0, 1.0, 200.0, 1000.0, Ease::Linear);
        assert_eq!(tw.value_at(0.0), 0.0);
        assert_eq!(tw.value_at(199.0), 0.0);
        assert!((tw.value_at(700.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn finishes_at_target() {
        let tw = Tween::new(0.8, 1.0, 0.0, 500.0, Ease::BackOut(1.7));
        assert!(tw.is_done(500.0));
        assert_eq!(tw.value_at(500.0), 1.0);
        assert_eq!(tw.value_at(9999.0), 1.0);
    }

    #[test]
    fn yoyo_repeat_alternates_direction() {
        // the shake: -5 -> 5 over 100ms, 3 repeats, yoyo
        let tw = Tween::new(-5.0, 5.0, 0.0, 100.0, Ease::Linear).with_repeat(3, true);
        assert!((tw.value_at(50.0) - 0.0).abs() < 1e-6);
        // second cycle runs backwards
        assert!(tw.value_at(125.0) > tw.value_at(175.0));
        assert!(!tw.is_done(399.0));
        assert!(tw.is_done(400.0));
        // odd repeat count ends back at the start value
        assert_eq!(tw.value_at(400.0), -5.0);
    }
}
