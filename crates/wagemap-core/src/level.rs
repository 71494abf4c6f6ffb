// crates/wagemap-core/src/level.rs

//! Prevailing wage level classification.

use crate::model::WageThresholds;
use serde::{Serialize, Serializer};
use std::fmt;

/// Wage level of a salary against one area/occupation's thresholds.
///
/// "No data" is not a level: call sites hold an `Option<WageLevel>` and
/// treat `None` as unknown, distinct from [`WageLevel::BelowLevel1`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WageLevel {
    BelowLevel1 = 0,
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
}

impl WageLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            0 => Some(Self::BelowLevel1),
            1 => Some(Self::Level1),
            2 => Some(Self::Level2),
            3 => Some(Self::Level3),
            4 => Some(Self::Level4),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BelowLevel1 => "Below Level I",
            Self::Level1 => "Level I",
            Self::Level2 => "Level II",
            Self::Level3 => "Level III",
            Self::Level4 => "Level IV",
        }
    }

    /// The next level up, `None` at level 4.
    pub fn next(self) -> Option<Self> {
        Self::from_u8(self.as_u8() + 1)
    }
}

impl fmt::Display for WageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Renderers expect the plain number 0-4.
impl Serialize for WageLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Classify `salary` top-down with `>=` comparisons: a salary equal to a
/// threshold belongs to the higher level.
///
/// ```rust
/// use wagemap_core::level::{classify, WageLevel};
/// use wagemap_core::WageThresholds;
///
/// let t = WageThresholds::new(120_000, 150_000, 180_000, 210_000).unwrap();
/// assert_eq!(classify(150_000, &t), WageLevel::Level2);
/// assert_eq!(classify(95_000, &t), WageLevel::BelowLevel1);
/// ```
pub fn classify(salary: u64, t: &WageThresholds) -> WageLevel {
    if salary >= t.l4 {
        WageLevel::Level4
    } else if salary >= t.l3 {
        WageLevel::Level3
    } else if salary >= t.l2 {
        WageLevel::Level2
    } else if salary >= t.l1 {
        WageLevel::Level1
    } else {
        WageLevel::BelowLevel1
    }
}

/// Amount still needed to reach the level above `level`; `0` at level 4.
///
/// Only meaningful for the level [`classify`] just returned; a mismatched
/// level saturates at `0` instead of going negative.
pub fn gap_to_next(salary: u64, t: &WageThresholds, level: WageLevel) -> u64 {
    match level.next() {
        Some(next) => t
            .level(next.as_u8())
            .map_or(0, |target| target.saturating_sub(salary)),
        None => 0,
    }
}

/// Thresholds, level and gap for one salary at one area/occupation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelAssessment {
    pub level: WageLevel,
    pub gap_to_next: u64,
    pub thresholds: WageThresholds,
}

impl LevelAssessment {
    pub fn new(salary: u64, thresholds: WageThresholds) -> Self {
        let level = classify(salary, &thresholds);
        Self {
            level,
            gap_to_next: gap_to_next(salary, &thresholds, level),
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sf() -> WageThresholds {
        WageThresholds::new(120_000, 150_000, 180_000, 210_000).unwrap()
    }

    #[test]
    fn boundaries_belong_to_the_higher_level() {
        let t = sf();
        assert_eq!(classify(119_999, &t), WageLevel::BelowLevel1);
        assert_eq!(classify(120_000, &t), WageLevel::Level1);
        assert_eq!(classify(150_000, &t), WageLevel::Level2);
        assert_eq!(classify(180_000, &t), WageLevel::Level3);
        assert_eq!(classify(210_000, &t), WageLevel::Level4);
        assert_eq!(classify(u64::MAX, &t), WageLevel::Level4);
    }

    #[test]
    fn gaps_follow_the_next_threshold() {
        let t = sf();
        assert_eq!(gap_to_next(150_000, &t, WageLevel::Level2), 30_000);
        assert_eq!(gap_to_next(95_000, &t, WageLevel::BelowLevel1), 25_000);
        assert_eq!(gap_to_next(250_000, &t, WageLevel::Level4), 0);
        assert_eq!(gap_to_next(200_000, &t, WageLevel::Level3), 10_000);
    }

    #[test]
    fn mismatched_level_does_not_underflow() {
        assert_eq!(gap_to_next(500_000, &sf(), WageLevel::Level1), 0);
    }

    #[test]
    fn equal_thresholds_jump_straight_up() {
        let t = WageThresholds::new(100, 100, 100, 200).unwrap();
        assert_eq!(classify(100, &t), WageLevel::Level3);
        assert_eq!(gap_to_next(100, &t, WageLevel::Level3), 100);
    }

    #[test]
    fn assessment_bundles_level_and_gap() {
        let a = LevelAssessment::new(150_000, sf());
        assert_eq!(a.level, WageLevel::Level2);
        assert_eq!(a.gap_to_next, 30_000);
        assert_eq!(
            serde_json::to_value(a).unwrap()["level"],
            serde_json::json!(2)
        );
    }

    fn thresholds() -> impl Strategy<Value = WageThresholds> {
        prop::array::uniform4(0u64..1_000_000).prop_map(|mut v| {
            v.sort_unstable();
            WageThresholds::new(v[0], v[1], v[2], v[3]).unwrap()
        })
    }

    proptest! {
        /// The reached threshold is never above the salary, and the next one
        /// (if any) is above it.
        #[test]
        fn level_brackets_salary(t in thresholds(), salary in 0u64..1_200_000) {
            let level = classify(salary, &t);
            if let Some(reached) = t.level(level.as_u8()) {
                prop_assert!(salary >= reached);
            }
            if let Some(next) = level.next().and_then(|n| t.level(n.as_u8())) {
                prop_assert!(salary < next);
                prop_assert_eq!(gap_to_next(salary, &t, level), next - salary);
            } else {
                prop_assert_eq!(gap_to_next(salary, &t, level), 0);
            }
        }

        #[test]
        fn level_is_monotonic_in_salary(t in thresholds(), a in 0u64..1_200_000, b in 0u64..1_200_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo, &t) <= classify(hi, &t));
        }
    }
}
