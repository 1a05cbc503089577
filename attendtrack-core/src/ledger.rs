use serde::{Deserialize, Serialize};

/// Percentages at or above this are considered good standing
pub const GOOD_THRESHOLD: u32 = 75;
/// Percentages at or above this, but below [GOOD_THRESHOLD], are a warning
pub const WARNING_THRESHOLD: u32 = 60;
/// Percentages at or above this get the "excellent" remark
pub const EXCELLENT_THRESHOLD: u32 = 90;

/// Returns the attendance percentage rounded to the nearest integer.
///
/// A course with no classes yet has a percentage of 0.
pub fn percentage(attended: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }

    (attended as f64 / total as f64 * 100.).round() as u32
}

/// How healthy an attendance percentage is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    Good,
    Warning,
    Critical,
}

impl AttendanceStatus {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= GOOD_THRESHOLD {
            Self::Good
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn from_counts(attended: u32, total: u32) -> Self {
        Self::from_percentage(percentage(attended, total))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// A human readable remark for a percentage, as shown by the calculator
pub fn remark(percentage: u32) -> &'static str {
    if percentage >= EXCELLENT_THRESHOLD {
        "Excellent! Keep up the good attendance."
    } else if percentage >= GOOD_THRESHOLD {
        "Good attendance. You're meeting the requirements."
    } else if percentage >= WARNING_THRESHOLD {
        "Warning: Your attendance is getting low."
    } else {
        "Critical: Your attendance is below the minimum requirement."
    }
}

/// Present/absent totals over one or more courses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub total: u32,
}

impl AttendanceSummary {
    /// Summarizes a single course from its cached counts
    pub fn single(attended: u32, total: u32) -> Self {
        Self {
            present: attended,
            absent: total.saturating_sub(attended),
            total,
        }
    }

    /// Summarizes every course together.
    /// Each item is a pair of `(attended, total)`.
    pub fn combined<I>(courses: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let (present, total) = courses
            .into_iter()
            .fold((0, 0), |(present, total), (a, t)| (present + a, total + t));

        Self::single(present, total)
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.present, self.total)
    }

    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::from_percentage(self.percentage())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn percentage_rounds() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(25, 30), 83);
        assert_eq!(percentage(22, 30), 73);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(30, 30), 100);
    }

    #[test]
    fn banding() {
        assert_eq!(AttendanceStatus::from_percentage(100), AttendanceStatus::Good);
        assert_eq!(AttendanceStatus::from_percentage(75), AttendanceStatus::Good);
        assert_eq!(AttendanceStatus::from_percentage(74), AttendanceStatus::Warning);
        assert_eq!(AttendanceStatus::from_percentage(60), AttendanceStatus::Warning);
        assert_eq!(AttendanceStatus::from_percentage(59), AttendanceStatus::Critical);
        assert_eq!(AttendanceStatus::from_counts(0, 0), AttendanceStatus::Critical);
    }

    #[test]
    fn remarks() {
        assert_eq!(remark(95), "Excellent! Keep up the good attendance.");
        assert_eq!(remark(80), "Good attendance. You're meeting the requirements.");
        assert_eq!(remark(61), "Warning: Your attendance is getting low.");
        assert_eq!(
            remark(10),
            "Critical: Your attendance is below the minimum requirement."
        );
    }

    #[test]
    fn combined_summary() {
        let summary = AttendanceSummary::combined([(25, 30), (22, 30)]);

        assert_eq!(
            summary,
            AttendanceSummary {
                present: 47,
                absent: 13,
                total: 60
            }
        );
        assert_eq!(summary.percentage(), 78);
        assert_eq!(AttendanceSummary::combined([]), AttendanceSummary::default());
    }
}
