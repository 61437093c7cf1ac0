/// SplitMix64 generator. Only ever constructed per call, never stored across frames.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Value noise in `[0, 1)` for a lattice point `(x, y)` under `seed`.
pub(crate) fn noise01(seed: u64, x: u64, y: u64) -> f64 {
    let key = seed
        ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93)
        ^ y.wrapping_mul(0xA076_1D64_78BD_642F);
    Rng64::new(key).next_f64_01()
}
