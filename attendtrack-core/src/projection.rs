use serde::{Deserialize, Serialize};

use crate::percentage;

/// The inputs of the "how many classes do I need" calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub attended: u32,
    pub total: u32,
    /// The percentage to reach, between 0 and 100
    pub target_percentage: u32,
    /// How many classes are still going to happen
    pub future_total: u32,
}

impl Projection {
    /// The default target used by the calculator
    pub const DEFAULT_TARGET: u32 = 75;

    pub fn new(attended: u32, total: u32, target_percentage: u32, future_total: u32) -> Self {
        Self {
            attended,
            total,
            target_percentage,
            future_total,
        }
    }

    /// How many classes must have been attended, in total, once the future classes are over
    pub fn needed_attended(&self) -> u32 {
        let all_classes = self.total as u64 + self.future_total as u64;
        let scaled = self.target_percentage as u64 * all_classes;

        // ceil(target / 100 * classes) without going through floats
        u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
    }

    /// How many of the future classes must be attended to reach the target.
    ///
    /// This can exceed [Projection::future_total], in which case the target is unreachable.
    pub fn required(&self) -> u32 {
        self.needed_attended().saturating_sub(self.attended)
    }

    /// Whether attending every future class is enough to reach the target
    pub fn is_feasible(&self) -> bool {
        self.required() <= self.future_total
    }

    /// The percentage after missing the next class
    pub fn if_missed_next(&self) -> u32 {
        percentage(self.attended, self.total.saturating_add(1))
    }

    /// The percentage after attending the next `classes` classes
    pub fn if_attended_next(&self, classes: u32) -> u32 {
        percentage(
            self.attended.saturating_add(classes),
            self.total.saturating_add(classes),
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(0, 0, Self::DEFAULT_TARGET, 0)
    }
}

/// Shorthand for [Projection::required]
pub fn required_classes(attended: u32, total: u32, target_percentage: u32, future_total: u32) -> u32 {
    Projection::new(attended, total, target_percentage, future_total).required()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn required_to_reach_target() {
        // Needs 30 of 40, already has 20
        assert_eq!(required_classes(20, 30, 75, 10), 10);
        assert_eq!(Projection::new(20, 30, 75, 10).needed_attended(), 30);
    }

    #[test]
    fn never_negative() {
        assert_eq!(required_classes(30, 30, 75, 10), 0);
        assert_eq!(required_classes(0, 0, 0, 0), 0);
    }

    #[test]
    fn rounds_up() {
        // 75% of 33 is 24.75
        assert_eq!(Projection::new(0, 30, 75, 3).needed_attended(), 25);
    }

    #[test]
    fn infeasible_is_reported_not_clamped() {
        let projection = Projection::new(5, 30, 75, 10);

        assert_eq!(projection.required(), 25);
        assert!(!projection.is_feasible());
        assert!(Projection::new(20, 30, 75, 10).is_feasible());
    }

    #[test]
    fn what_if() {
        let projection = Projection::new(25, 30, 75, 0);

        // 25 of 31
        assert_eq!(projection.if_missed_next(), 81);
        // 30 of 35
        assert_eq!(projection.if_attended_next(5), 86);

        let empty = Projection::default();
        assert_eq!(empty.if_missed_next(), 0);
        assert_eq!(empty.if_attended_next(5), 100);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        let projection = Projection::new(0, u32::MAX, 100, 1);

        assert_eq!(projection.needed_attended(), u32::MAX);
        assert!(!projection.is_feasible());
    }
}
