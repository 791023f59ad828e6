//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Source of uniform random numbers. Every random consumer in the engine
/// takes `&mut impl RandomSource`, so tests can inject scripted values.
pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn next_f32(&mut self) -> f32;

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform value in [-1, 1).
    fn signed_unit(&mut self) -> f32 {
        self.range(-1.0, 1.0)
    }
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
