use attendtrack_core::{percentage, AttendanceStatus, FriendStatus, Vote};
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The type used for record identifiers
pub type RecordId = String;

/// A student account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: RecordId,
    pub username: String,
    /// The unique identifier used to log in
    pub roll_number: String,
    pub year: u8,
    pub course: String,
    pub section: String,
}

impl UserData {
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.username, self.roll_number)
    }

    pub fn academic_info(&self) -> String {
        format!("{} Year - {} Section", self.year, self.section)
    }

    /// The first two letters of the username, for avatars
    pub fn initials(&self) -> String {
        self.username.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// A registered roll number and its hashed password
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialData {
    pub roll_number: String,
    /// PHC string of the password hash
    pub password: String,
}

/// Login session data for authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// The session token, or key if you will
    pub token: String,
    /// The user that is logged in
    pub user: UserData,
}

/// A weekly slot a course takes place in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub total_classes: u32,
    /// Cached count of present records, see [crate::Courses::mark_attendance]
    pub attended_classes: u32,
    pub schedule: Vec<ClassSchedule>,
}

impl CourseData {
    pub fn attendance_percentage(&self) -> u32 {
        percentage(self.attended_classes, self.total_classes)
    }

    pub fn attendance_status(&self) -> AttendanceStatus {
        AttendanceStatus::from_percentage(self.attendance_percentage())
    }

    /// Returns the slots of this course on a given day
    pub fn classes_for_day(&self, day: Weekday) -> Vec<&ClassSchedule> {
        self.schedule.iter().filter(|s| s.day == day).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    Present,
    Absent,
    Excused,
}

/// A single day of attendance for a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordData {
    pub id: RecordId,
    pub course_id: RecordId,
    pub date: DateTime<Utc>,
    pub status: RecordStatus,
}

/// Counts of each record status for a course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub present: u32,
    pub absent: u32,
    pub excused: u32,
    /// The total classes of the course, not the number of records
    pub total: u32,
}

/// A poll to collectively skip a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassBunkPollData {
    pub id: RecordId,
    pub course_id: RecordId,
    /// The class session that would be skipped
    pub date: DateTime<Utc>,
    pub creator_id: RecordId,
    pub description: String,
    pub votes: Vec<Vote>,
}

/// Another student in a user's friend list.
/// The id is the friend's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendData {
    pub id: RecordId,
    pub username: String,
    pub roll_number: String,
    pub year: u8,
    pub course: String,
    pub section: String,
    pub status: FriendStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub id: RecordId,
    /// The recipient
    pub user_id: RecordId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
