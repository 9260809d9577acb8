/// Random number generator (xorshift32)
///
/// Deterministic and seedable so particle placement and glitch symbols
/// are reproducible in tests.
#[derive(Clone, Copy, Debug)]
pub struct Rng32 {
    state: u32,
}

impl Rng32 {
    pub fn new(seed: u32) -> Self {
        // xorshift must never sit at zero
        Self { state: if seed == 0 { 0xDEAD_BEEF } else { seed } }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform f32 in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform f32 in [lo, hi)
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.next_u32() & 1 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_f32_stays_in_unit_range() {
        let mut rng = Rng32::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn range_f32_respects_bounds() {
        let mut rng = Rng32::new(7);
        for _ in 0..10_000 {
            let v = rng.range_f32(-0.25, 0.25);
            assert!((-0.25..0.25).contains(&v));
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = Rng32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }
}
