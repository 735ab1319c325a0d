// melt.rs - Uniform melt applied after deposition

/// Add `rate_per_day * days` to every cell, floored at zero. A zero rate (or
/// zero elapsed days) leaves the field bit-identical, not merely close.
pub(crate) fn apply(field: &mut [f32], rate_per_day: f64, days: u32) {
    if rate_per_day == 0.0 {
        return;
    }
    let melt = rate_per_day * f64::from(days);
    if melt == 0.0 {
        return;
    }
    for cell in field.iter_mut() {
        *cell = (f64::from(*cell) + melt).max(0.0) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_a_no_op() {
        let mut field = [1.0, 2.0, 3.0];
        apply(&mut field, 0.0, 10);
        assert_eq!(field, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_days_is_a_no_op() {
        let mut field = [1.0, 2.0, 3.0];
        apply(&mut field, -0.5, 0);
        assert_eq!(field, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn negative_rate_thins_and_floors() {
        let mut field = [5.0, 0.5, 0.0];
        apply(&mut field, -0.5, 4);
        assert_eq!(field, [3.0, 0.0, 0.0]);
    }

    #[test]
    fn positive_rate_thickens_uniformly() {
        let mut field = [1.0, 0.0];
        apply(&mut field, 0.25, 8);
        assert_eq!(field, [3.0, 2.0]);
    }
}
