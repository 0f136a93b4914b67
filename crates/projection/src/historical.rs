//! Historical sea level (piecewise-linear over the anchor table).

use crate::config::SeaLevelConfig;

/// Sea level in `year`, in mm above the baseline.
///
/// - at or before the baseline year: 0
/// - at or after the reference year: linear extrapolation at the current rate
/// - otherwise: interpolation between the two bracketing anchors
///
/// Total over all integers.
pub fn height_at(config: &SeaLevelConfig, year: i32) -> f64 {
    let reference = &config.reference;
    if year <= config.min_year {
        return 0.0;
    }
    if year >= reference.year {
        return reference.height_mm + f64::from(year - reference.year) * reference.rate_mm_per_year;
    }

    // Half-open brackets so every anchor is returned from the segment it starts.
    for pair in config.historical.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if year >= a.year && year < b.year {
            return a.height_mm
                + (b.height_mm - a.height_mm) * f64::from(year - a.year) / f64::from(b.year - a.year);
        }
    }
    reference.height_mm
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Anchor;

    #[test]
    fn test_baseline_is_zero() {
        let config = SeaLevelConfig::default();
        assert_eq!(height_at(&config, 1900), 0.0);
        assert_eq!(height_at(&config, 1800), 0.0);
        assert_eq!(height_at(&config, i32::MIN), 0.0);
    }

    #[test]
    fn test_reference_year_is_reference_height() {
        let config = SeaLevelConfig::default();
        assert_eq!(height_at(&config, 2025), 240.0);
    }

    #[test]
    fn test_every_anchor_is_exact() {
        let config = SeaLevelConfig::default();
        for anchor in &config.historical {
            assert_eq!(
                height_at(&config, anchor.year),
                anchor.height_mm,
                "anchor {} should be returned verbatim",
                anchor.year
            );
        }
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let config = SeaLevelConfig::default();
        // 1950:62 -> 1960:85
        let h = height_at(&config, 1955);
        assert!((h - 73.5).abs() < 1e-9, "got {h}");
        // 1990:129 -> 1993:131
        let h = height_at(&config, 1991);
        assert!((h - (129.0 + 2.0 / 3.0)).abs() < 1e-9, "got {h}");
    }

    #[test]
    fn test_extrapolates_at_current_rate_after_reference() {
        let config = SeaLevelConfig::default();
        assert!((height_at(&config, 2035) - 285.0).abs() < 1e-9);
        assert!((height_at(&config, 2026) - 244.5).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_future_year_is_finite() {
        let config = SeaLevelConfig::default();
        assert!(height_at(&config, i32::MAX).is_finite());
    }

    #[test]
    fn test_gap_before_first_anchor_falls_back_to_reference() {
        let mut config = SeaLevelConfig::default();
        config.historical = vec![
            Anchor {
                year: 1950,
                height_mm: 60.0,
            },
            Anchor {
                year: 2025,
                height_mm: 240.0,
            },
        ];
        // No bracket for 1920, result is still defined.
        assert_eq!(height_at(&config, 1920), 240.0);
        assert_eq!(height_at(&config, 1950), 60.0);
    }
}
