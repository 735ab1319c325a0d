// schedule.rs - Calendar arithmetic and sizing presets
//
// The engine never looks at a clock. Callers resolve "now" into a day count
// here, pick a cell count for their canvas, and hand both to the simulator.

/// Milliseconds per UTC day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Launch of the footer: 2025-11-01T00:00:00Z.
pub const DEFAULT_START_MS: i64 = 1_761_955_200_000;

/// Default accumulation rate and the matching cost cap.
pub const DEFAULT_DROPS_PER_DAY: f64 = 2000.0;
pub const DEFAULT_MAX_DROPS: u32 = 200_000;

/// Whole UTC days elapsed between two epoch-millisecond instants, with both
/// ends floored to UTC midnight first and the result clamped at zero.
/// `div_euclid` keeps pre-1970 instants on their correct calendar day.
pub fn days_since_utc(start_ms: i64, now_ms: i64) -> u32 {
    let elapsed = now_ms.div_euclid(MS_PER_DAY) - start_ms.div_euclid(MS_PER_DAY);
    elapsed.clamp(0, i64::from(u32::MAX)) as u32
}

/// Heightfield resolution presets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    pub fn parse(s: &str) -> Option<Quality> {
        match s {
            "low" => Some(Quality::Low),
            "medium" => Some(Quality::Medium),
            "high" => Some(Quality::High),
            _ => None,
        }
    }

    /// Cell count at 1x device pixel ratio.
    pub fn base_cells(self) -> u32 {
        match self {
            Quality::Low => 192,
            Quality::Medium => 320,
            Quality::High => 512,
        }
    }

    /// Cell count scaled by the device pixel ratio, capped at 2x. Headless
    /// contexts report a ratio of 0; that falls back to 1.
    pub fn width_cells(self, device_ratio: f64) -> u32 {
        let ratio = if device_ratio > 0.0 {
            device_ratio.min(2.0)
        } else {
            1.0
        };
        (f64::from(self.base_cells()) * ratio).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_is_zero() {
        let noon = 20_000 * MS_PER_DAY + 12 * 3_600_000;
        assert_eq!(days_since_utc(noon, noon), 0);
        assert_eq!(days_since_utc(20_000 * MS_PER_DAY, noon), 0);
    }

    #[test]
    fn future_start_clamps_to_zero() {
        assert_eq!(days_since_utc(20_010 * MS_PER_DAY, 20_000 * MS_PER_DAY), 0);
    }

    #[test]
    fn counts_midnight_boundaries_not_elapsed_hours() {
        // 13:00 one day to 01:00 the next is twelve hours but one UTC day.
        let start = 20_000 * MS_PER_DAY + 13 * 3_600_000;
        let now = 20_001 * MS_PER_DAY + 3_600_000;
        assert_eq!(days_since_utc(start, now), 1);
    }

    #[test]
    fn multi_day_spans() {
        assert_eq!(
            days_since_utc(DEFAULT_START_MS, DEFAULT_START_MS + 10 * MS_PER_DAY),
            10
        );
    }

    #[test]
    fn pre_epoch_instants_floor_correctly() {
        // One millisecond before the epoch is the previous UTC day.
        assert_eq!(days_since_utc(-1, 0), 1);
    }

    #[test]
    fn quality_widths() {
        assert_eq!(Quality::Medium.width_cells(1.0), 320);
        assert_eq!(Quality::High.width_cells(2.0), 1024);
        assert_eq!(Quality::Low.width_cells(1.5), 288);
        // Ratio capped at 2x, zero falls back to 1x.
        assert_eq!(Quality::Medium.width_cells(3.0), 640);
        assert_eq!(Quality::Medium.width_cells(0.0), 320);
    }

    #[test]
    fn quality_parse() {
        assert_eq!(Quality::parse("high"), Some(Quality::High));
        assert_eq!(Quality::parse("ultra"), None);
    }
}
