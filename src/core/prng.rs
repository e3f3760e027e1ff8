// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It drives edge weights and the `random` firing pattern, and a fixed seed
// makes a run reproducible.

const ZERO_STATE_REPLACEMENT: u64 = 0x9E3779B97F4A7C15;

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 {
            ZERO_STATE_REPLACEMENT
        } else {
            seed
        };
        Self { state: seed }
    }

    /// Seed from the wall clock; used when no explicit seed is configured.
    pub fn from_entropy() -> Self {
        let nanos = crate::time::SystemTime::now()
            .duration_since(crate::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(ZERO_STATE_REPLACEMENT);
        Self::new(nanos ^ 0xD1B5_4A32_D192_ED03)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    #[inline]
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64_01()
    }

    /// Bernoulli trial; `p <= 0` never fires, `p >= 1` always does.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64_01() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..64 {
            assert_eq!(a.next_f64_01().to_bits(), b.next_f64_01().to_bits());
        }
    }

    #[test]
    fn zero_seed_is_usable() {
        let mut p = Prng::new(0);
        let draws: Vec<f64> = (0..8).map(|_| p.next_f64_01()).collect();
        assert!(draws.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn range_and_chance_bounds() {
        let mut p = Prng::new(42);
        for _ in 0..10_000 {
            let w = p.gen_range_f64(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&w));
        }
        assert!(!(0..1000).any(|_| p.chance(0.0)));
        assert!((0..1000).all(|_| p.chance(1.0)));
    }
}
