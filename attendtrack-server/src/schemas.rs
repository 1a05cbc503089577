use attendtrack_collab::{ClassSchedule, CourseData, NewCourse, NewPlainUser, RecordStatus};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServerError;

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginSchema {
    #[validate(length(min = 1, max = 32))]
    pub roll_number: String,
    #[validate(length(max = 64))]
    pub password: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterSchema {
    #[validate(length(min = 2, max = 128))]
    pub username: String,
    #[validate(length(min = 1, max = 32))]
    pub roll_number: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(range(min = 1, max = 5))]
    pub year: u8,
    #[validate(length(min = 1, max = 128))]
    pub course: String,
    #[validate(length(equal = 1))]
    pub section: String,
}

impl From<RegisterSchema> for NewPlainUser {
    fn from(value: RegisterSchema) -> Self {
        Self {
            username: value.username,
            roll_number: value.roll_number,
            password: value.password,
            year: value.year,
            course: value.course,
            section: value.section,
        }
    }
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScheduleSchema {
    /// Day of the week, e.g. "Monday"
    pub day: String,
    /// 24 hour time, e.g. "13:00"
    pub start_time: String,
    pub end_time: String,
    #[validate(length(max = 64))]
    pub room: String,
}

impl TryFrom<ScheduleSchema> for ClassSchedule {
    type Error = ServerError;

    fn try_from(value: ScheduleSchema) -> Result<Self, Self::Error> {
        let day: Weekday = value
            .day
            .parse()
            .map_err(|_| ServerError::Invalid(format!("{} is not a day", value.day)))?;

        let time = |raw: &str| {
            NaiveTime::parse_from_str(raw, "%H:%M")
                .map_err(|_| ServerError::Invalid(format!("{raw} is not a time")))
        };

        Ok(Self {
            day,
            start_time: time(&value.start_time)?,
            end_time: time(&value.end_time)?,
            room: value.room,
        })
    }
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CourseSchema {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 128))]
    pub instructor: String,
    pub total_classes: u32,
    #[serde(default)]
    pub attended_classes: u32,
    #[serde(default)]
    #[validate(nested)]
    pub schedule: Vec<ScheduleSchema>,
}

impl TryFrom<CourseSchema> for NewCourse {
    type Error = ServerError;

    fn try_from(value: CourseSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            code: value.code,
            name: value.name,
            instructor: value.instructor,
            total_classes: value.total_classes,
            attended_classes: value.attended_classes,
            schedule: parse_schedule(value.schedule)?,
        })
    }
}

/// The editable fields of a course. Attended classes follow the attendance records.
#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatedCourseSchema {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(max = 128))]
    pub instructor: String,
    pub total_classes: u32,
    #[serde(default)]
    #[validate(nested)]
    pub schedule: Vec<ScheduleSchema>,
}

impl UpdatedCourseSchema {
    /// Applies the changes to a course, keeping its id and attended classes
    pub fn apply_to(self, course: CourseData) -> Result<CourseData, ServerError> {
        Ok(CourseData {
            code: self.code,
            name: self.name,
            instructor: self.instructor,
            total_classes: self.total_classes,
            schedule: parse_schedule(self.schedule)?,
            ..course
        })
    }
}

fn parse_schedule(schedule: Vec<ScheduleSchema>) -> Result<Vec<ClassSchedule>, ServerError> {
    schedule.into_iter().map(ClassSchedule::try_from).collect()
}

#[derive(Debug, Clone, Copy, ToSchema, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatusSchema {
    Present,
    Absent,
    Excused,
}

impl From<RecordStatusSchema> for RecordStatus {
    fn from(value: RecordStatusSchema) -> Self {
        match value {
            RecordStatusSchema::Present => Self::Present,
            RecordStatusSchema::Absent => Self::Absent,
            RecordStatusSchema::Excused => Self::Excused,
        }
    }
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttendanceSchema {
    #[schema(value_type = String, format = DateTime)]
    pub date: DateTime<Utc>,
    pub status: RecordStatusSchema,
}

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted_json: Json<T> = Json::from_request(req, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "JSON parse failed"))?;

        extracted_json
            .0
            .validate()
            .map_err(|_| (StatusCode::BAD_REQUEST, "Request body is invalid"))?;

        Ok(Self(extracted_json.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn slot(day: &str, start: &str) -> ScheduleSchema {
        ScheduleSchema {
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: "11:30".to_string(),
            room: "CS-301".to_string(),
        }
    }

    #[test]
    fn schedule_parsing() {
        let parsed = ClassSchedule::try_from(slot("Monday", "10:00")).unwrap();

        assert_eq!(parsed.day, Weekday::Mon);
        assert_eq!(parsed.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        assert!(ClassSchedule::try_from(slot("Someday", "10:00")).is_err());
        assert!(ClassSchedule::try_from(slot("Monday", "ten")).is_err());
    }

    #[test]
    fn register_validation() {
        let schema: RegisterSchema = serde_json::from_str(
            r#"{
                "username": "alice",
                "rollNumber": "20CS101",
                "password": "hunter22",
                "year": 7,
                "course": "Computer Science",
                "section": "A"
            }"#,
        )
        .unwrap();

        assert!(schema.validate().is_err());
    }

    #[test]
    fn updates_keep_attended_classes() {
        let course = CourseData {
            id: "1".to_string(),
            code: "CS101".to_string(),
            name: "Introduction to Programming".to_string(),
            instructor: "Dr. Smith".to_string(),
            total_classes: 30,
            attended_classes: 25,
            schedule: vec![],
        };

        let changes: UpdatedCourseSchema = serde_json::from_str(
            r#"{ "code": "CS102", "name": "Programming II", "instructor": "Dr. Smith", "totalClasses": 32 }"#,
        )
        .unwrap();
        let updated = changes.apply_to(course).unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.code, "CS102");
        assert_eq!(updated.total_classes, 32);
        assert_eq!(updated.attended_classes, 25);

        let with_count = serde_json::from_str::<UpdatedCourseSchema>(
            r#"{ "code": "CS102", "name": "Programming II", "instructor": "", "totalClasses": 32, "attendedClasses": 0 }"#,
        );
        assert!(with_count.is_err());
    }
}
