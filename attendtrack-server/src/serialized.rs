//! All schemas that are exposed from endpoints are defined here
//! along with the conversions from collab data

use attendtrack_collab::{
    AttendanceRecordData, ClassSchedule, CourseData, RecordStatus, SessionData, UserData,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    username: String,
    roll_number: String,
    year: u8,
    course: String,
    section: String,
    display_name: String,
    academic_info: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResult {
    token: String,
    user: User,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    day: String,
    start_time: String,
    end_time: String,
    room: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: String,
    code: String,
    name: String,
    instructor: String,
    total_classes: u32,
    attended_classes: u32,
    attendance_percentage: u32,
    /// One of "good", "warning" or "critical"
    attendance_status: String,
    schedule: Vec<Schedule>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    id: String,
    course_id: String,
    #[schema(value_type = String, format = DateTime)]
    date: DateTime<Utc>,
    status: String,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for Vec<I>
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<User> for UserData {
    fn to_serialized(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            roll_number: self.roll_number.clone(),
            year: self.year,
            course: self.course.clone(),
            section: self.section.clone(),
            display_name: self.display_name(),
            academic_info: self.academic_info(),
        }
    }
}

impl ToSerialized<LoginResult> for SessionData {
    fn to_serialized(&self) -> LoginResult {
        LoginResult {
            token: self.token.clone(),
            user: self.user.to_serialized(),
        }
    }
}

impl ToSerialized<Schedule> for ClassSchedule {
    fn to_serialized(&self) -> Schedule {
        Schedule {
            day: self.day.to_string(),
            start_time: self.start_time.format("%H:%M").to_string(),
            end_time: self.end_time.format("%H:%M").to_string(),
            room: self.room.clone(),
        }
    }
}

impl ToSerialized<Course> for CourseData {
    fn to_serialized(&self) -> Course {
        Course {
            id: self.id.clone(),
            code: self.code.clone(),
            name: self.name.clone(),
            instructor: self.instructor.clone(),
            total_classes: self.total_classes,
            attended_classes: self.attended_classes,
            attendance_percentage: self.attendance_percentage(),
            attendance_status: self.attendance_status().as_str().to_string(),
            schedule: self.schedule.to_serialized(),
        }
    }
}

impl ToSerialized<AttendanceRecord> for AttendanceRecordData {
    fn to_serialized(&self) -> AttendanceRecord {
        let status = match self.status {
            RecordStatus::Present => "present",
            RecordStatus::Absent => "absent",
            RecordStatus::Excused => "excused",
        };

        AttendanceRecord {
            id: self.id.clone(),
            course_id: self.course_id.clone(),
            date: self.date,
            status: status.to_string(),
        }
    }
}
