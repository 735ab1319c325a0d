// field.rs - Heightfield queries and transforms
//
// Everything here reads a finished heightfield; nothing feeds back into the
// deposit loop.

/// Rolling checksum over the exact IEEE-754 bit patterns of the field.
///
/// Two runs agree iff every cell is bit-identical, which makes this the
/// regression oracle for the whole engine: a client that drifts anywhere in
/// the hash, the generator, or the relaxation produces a different value.
pub fn checksum(field: &[f32]) -> u32 {
    let mut hash: u32 = 0;
    for &v in field {
        hash = hash
            .wrapping_mul(1_664_525)
            .wrapping_add(v.to_bits())
            .wrapping_add(1_013_904_223);
    }
    hash
}

/// Edge-clamped box blur; a radius above 1 gets a second radius-1 pass for a
/// slightly more Gaussian falloff. Renderers use this to soften the crest
/// while the raw field keeps the sharp deterministic silhouette.
pub fn smooth(src: &[f32], radius: usize) -> Vec<f32> {
    let n = src.len();
    let r = radius.max(1) as isize;
    let mut dst = vec![0.0f32; n];
    for (i, out) in dst.iter_mut().enumerate() {
        let mut sum = 0.0f64;
        let mut count = 0u32;
        for k in -r..=r {
            let idx = i as isize + k;
            if idx >= 0 && (idx as usize) < n {
                sum += f64::from(src[idx as usize]);
                count += 1;
            }
        }
        *out = (sum / f64::from(count)) as f32;
    }
    if r > 1 { smooth(&dst, 1) } else { dst }
}

/// Largest height difference between adjacent cells.
#[inline]
pub fn max_slope(field: &[f32]) -> f32 {
    field
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).abs())
        .fold(0.0, f32::max)
}

/// Tallest cell, 0 for an empty field.
#[inline]
pub fn max_height(field: &[f32]) -> f32 {
    field.iter().copied().fold(0.0, f32::max)
}
