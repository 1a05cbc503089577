use attendtrack_core::{same_day, AttendanceSummary};
use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::{
    demo, util::new_id, AttendanceRecordData, AttendanceStats, ClassSchedule, CourseData, Key,
    RecordId, RecordStatus, Storage, StorageError, TrackerContext, UserData,
};

/// The attendance ledger of every user
pub struct Courses<S> {
    context: TrackerContext<S>,
}

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Attendance for course {course_id} is already marked on {date}")]
    AlreadyMarked { course_id: RecordId, date: String },
    #[error("course:{0} doesn't exist")]
    NotFound(RecordId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CourseResult<T> = std::result::Result<T, CourseError>;

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub name: String,
    pub instructor: String,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub schedule: Vec<ClassSchedule>,
}

impl<S> Courses<S>
where
    S: Storage,
{
    pub fn new(context: &TrackerContext<S>) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// Returns every course of the user
    pub fn list(&self, user: &UserData) -> CourseResult<Vec<CourseData>> {
        Ok(self
            .context
            .load_list(&Key::Courses(user.id.clone()), demo::courses)?)
    }

    pub fn course_by_id(&self, user: &UserData, course_id: &str) -> CourseResult<CourseData> {
        self.list(user)?
            .into_iter()
            .find(|c| c.id == course_id)
            .ok_or_else(|| CourseError::NotFound(course_id.to_string()))
    }

    pub fn add_course(&self, user: &UserData, new_course: NewCourse) -> CourseResult<CourseData> {
        let course = CourseData {
            id: new_id(),
            code: new_course.code,
            name: new_course.name,
            instructor: new_course.instructor,
            total_classes: new_course.total_classes,
            attended_classes: new_course.attended_classes,
            schedule: new_course.schedule,
        };

        let mut courses = self.list(user)?;
        courses.push(course.clone());
        self.save_courses(user, &courses)?;

        info!("{} added course {}", user.display_name(), course.code);

        Ok(course)
    }

    /// Replaces the course with the same id. Unknown courses are left alone.
    pub fn update_course(&self, user: &UserData, updated: CourseData) -> CourseResult<()> {
        let courses: Vec<_> = self
            .list(user)?
            .into_iter()
            .map(|c| if c.id == updated.id { updated.clone() } else { c })
            .collect();

        self.save_courses(user, &courses)
    }

    /// Deletes a course along with its attendance records
    pub fn delete_course(&self, user: &UserData, course_id: &str) -> CourseResult<()> {
        let mut courses = self.list(user)?;
        courses.retain(|c| c.id != course_id);
        self.save_courses(user, &courses)?;

        let mut records = self.records(user)?;
        records.retain(|r| r.course_id != course_id);
        self.save_records(user, &records)
    }

    /// Returns every attendance record of the user
    pub fn records(&self, user: &UserData) -> CourseResult<Vec<AttendanceRecordData>> {
        Ok(self
            .context
            .load_list(&Key::Attendance(user.id.clone()), Vec::new)?)
    }

    pub fn records_for_course(
        &self,
        user: &UserData,
        course_id: &str,
    ) -> CourseResult<Vec<AttendanceRecordData>> {
        let mut records = self.records(user)?;
        records.retain(|r| r.course_id == course_id);

        Ok(records)
    }

    /// Whether a record exists for the course on the calendar day of `date`
    pub fn is_attendance_marked(
        &self,
        user: &UserData,
        course_id: &str,
        date: &DateTime<Utc>,
    ) -> CourseResult<bool> {
        Ok(self
            .records(user)?
            .iter()
            .any(|r| r.course_id == course_id && same_day(&r.date, date)))
    }

    /// Marks attendance for a course, refusing to touch a day that is already marked
    pub fn mark_attendance(
        &self,
        user: &UserData,
        course_id: &str,
        date: DateTime<Utc>,
        status: RecordStatus,
    ) -> CourseResult<AttendanceRecordData> {
        if self.is_attendance_marked(user, course_id, &date)? {
            return Err(CourseError::AlreadyMarked {
                course_id: course_id.to_string(),
                date: date.date_naive().to_string(),
            });
        }

        self.upsert_attendance(user, course_id, date, status)
    }

    /// Sets the status of the course on the calendar day of `date`, creating the record if needed.
    ///
    /// The attended classes of the course are recounted afterwards.
    pub fn upsert_attendance(
        &self,
        user: &UserData,
        course_id: &str,
        date: DateTime<Utc>,
        status: RecordStatus,
    ) -> CourseResult<AttendanceRecordData> {
        let mut records = self.records(user)?;

        let existing = records
            .iter()
            .position(|r| r.course_id == course_id && same_day(&r.date, &date));

        let record = match existing {
            Some(index) => {
                records[index].status = status;
                records[index].clone()
            }
            None => {
                let record = AttendanceRecordData {
                    id: new_id(),
                    course_id: course_id.to_string(),
                    date,
                    status,
                };

                records.push(record.clone());
                record
            }
        };

        self.save_records(user, &records)?;
        self.recount(user, course_id, &records)?;

        Ok(record)
    }

    /// Returns counts of each status for a course, or zeroes if it doesn't exist
    pub fn attendance_stats(&self, user: &UserData, course_id: &str) -> CourseResult<AttendanceStats> {
        let Some(course) = self.find(user, course_id)? else {
            return Ok(AttendanceStats::default());
        };

        let records = self.records_for_course(user, course_id)?;
        let count = |status: RecordStatus| records.iter().filter(|r| r.status == status).count() as u32;

        Ok(AttendanceStats {
            present: count(RecordStatus::Present),
            absent: count(RecordStatus::Absent),
            excused: count(RecordStatus::Excused),
            total: course.total_classes,
        })
    }

    /// Returns the attendance percentage of a course, or 0 if it doesn't exist
    pub fn attendance_percentage(&self, user: &UserData, course_id: &str) -> CourseResult<u32> {
        Ok(self
            .find(user, course_id)?
            .map(|c| c.attendance_percentage())
            .unwrap_or(0))
    }

    /// Summarizes a single course, or every course when `course_id` is [None]
    pub fn summary(&self, user: &UserData, course_id: Option<&str>) -> CourseResult<AttendanceSummary> {
        let summary = match course_id {
            Some(id) => self
                .find(user, id)?
                .map(|c| AttendanceSummary::single(c.attended_classes, c.total_classes))
                .unwrap_or_default(),
            None => AttendanceSummary::combined(
                self.list(user)?
                    .iter()
                    .map(|c| (c.attended_classes, c.total_classes)),
            ),
        };

        Ok(summary)
    }

    fn find(&self, user: &UserData, course_id: &str) -> CourseResult<Option<CourseData>> {
        Ok(self.list(user)?.into_iter().find(|c| c.id == course_id))
    }

    /// Keeps the attended classes cache equal to the number of present records
    fn recount(
        &self,
        user: &UserData,
        course_id: &str,
        records: &[AttendanceRecordData],
    ) -> CourseResult<()> {
        let Some(mut course) = self.find(user, course_id)? else {
            return Ok(());
        };

        course.attended_classes = records
            .iter()
            .filter(|r| r.course_id == course_id && r.status == RecordStatus::Present)
            .count() as u32;

        self.update_course(user, course)
    }

    fn save_courses(&self, user: &UserData, courses: &[CourseData]) -> CourseResult<()> {
        Ok(self
            .context
            .save_list(&Key::Courses(user.id.clone()), courses)?)
    }

    fn save_records(&self, user: &UserData, records: &[AttendanceRecordData]) -> CourseResult<()> {
        Ok(self
            .context
            .save_list(&Key::Attendance(user.id.clone()), records)?)
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, NaiveTime, TimeZone, Weekday};

    use crate::testing::{student, tracker};

    use super::*;

    fn new_course(code: &str) -> NewCourse {
        NewCourse {
            code: code.to_string(),
            name: "Data Structures".to_string(),
            instructor: "Dr. Johnson".to_string(),
            total_classes: 30,
            attended_classes: 0,
            schedule: vec![ClassSchedule {
                day: Weekday::Tue,
                start_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
                room: "CS-302".to_string(),
            }],
        }
    }

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, n, 10, 0, 0).unwrap()
    }

    #[test]
    fn marking_twice_on_the_same_day_is_rejected() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");
        let course = tracker.courses.add_course(&alice, new_course("CS201")).unwrap();

        tracker
            .courses
            .mark_attendance(&alice, &course.id, day(3), RecordStatus::Present)
            .unwrap();

        let later_that_day = day(3) + Duration::hours(5);
        let second =
            tracker
                .courses
                .mark_attendance(&alice, &course.id, later_that_day, RecordStatus::Absent);

        assert!(matches!(second, Err(CourseError::AlreadyMarked { .. })));
        assert_eq!(tracker.courses.records(&alice).unwrap().len(), 1);
    }

    #[test]
    fn attended_classes_follow_present_records() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");
        let course = tracker.courses.add_course(&alice, new_course("CS201")).unwrap();

        for n in 1..=4 {
            tracker
                .courses
                .mark_attendance(&alice, &course.id, day(n), RecordStatus::Present)
                .unwrap();
        }
        tracker
            .courses
            .mark_attendance(&alice, &course.id, day(5), RecordStatus::Absent)
            .unwrap();

        let course = tracker.courses.course_by_id(&alice, &course.id).unwrap();
        assert_eq!(course.attended_classes, 4);

        // Changing a day through the upsert recounts as well
        tracker
            .courses
            .upsert_attendance(&alice, &course.id, day(1), RecordStatus::Excused)
            .unwrap();

        let course = tracker.courses.course_by_id(&alice, &course.id).unwrap();
        assert_eq!(course.attended_classes, 3);
        assert_eq!(tracker.courses.records(&alice).unwrap().len(), 5);

        let stats = tracker.courses.attendance_stats(&alice, &course.id).unwrap();
        assert_eq!(
            stats,
            AttendanceStats {
                present: 3,
                absent: 1,
                excused: 1,
                total: 30
            }
        );
        assert_eq!(tracker.courses.attendance_percentage(&alice, &course.id).unwrap(), 10);
    }

    #[test]
    fn missing_courses_degrade_to_zero() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");

        assert_eq!(tracker.courses.attendance_percentage(&alice, "nope").unwrap(), 0);
        assert_eq!(
            tracker.courses.attendance_stats(&alice, "nope").unwrap(),
            AttendanceStats::default()
        );
        assert_eq!(
            tracker.courses.summary(&alice, Some("nope")).unwrap(),
            AttendanceSummary::default()
        );
        assert!(matches!(
            tracker.courses.course_by_id(&alice, "nope"),
            Err(CourseError::NotFound(_))
        ));

        // Records for unknown courses are still kept
        tracker
            .courses
            .mark_attendance(&alice, "nope", day(1), RecordStatus::Present)
            .unwrap();
        assert!(tracker
            .courses
            .is_attendance_marked(&alice, "nope", &day(1))
            .unwrap());
    }

    #[test]
    fn deleting_a_course_deletes_its_records() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");
        let kept = tracker.courses.add_course(&alice, new_course("CS101")).unwrap();
        let deleted = tracker.courses.add_course(&alice, new_course("CS201")).unwrap();

        for course in [&kept, &deleted] {
            tracker
                .courses
                .mark_attendance(&alice, &course.id, day(1), RecordStatus::Present)
                .unwrap();
        }

        tracker.courses.delete_course(&alice, &deleted.id).unwrap();

        let courses = tracker.courses.list(&alice).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, kept.id);

        let records = tracker.courses.records(&alice).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_id, kept.id);
    }

    #[test]
    fn summaries_and_schedule() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");

        let mut first = new_course("CS101");
        first.attended_classes = 25;
        let mut second = new_course("CS201");
        second.attended_classes = 22;

        let first = tracker.courses.add_course(&alice, first).unwrap();
        tracker.courses.add_course(&alice, second).unwrap();

        let single = tracker.courses.summary(&alice, Some(&first.id)).unwrap();
        assert_eq!(single.percentage(), 83);

        let all = tracker.courses.summary(&alice, None).unwrap();
        assert_eq!((all.present, all.absent, all.total), (47, 13, 60));

        assert_eq!(first.classes_for_day(Weekday::Tue).len(), 1);
        assert!(first.classes_for_day(Weekday::Mon).is_empty());
    }

    #[test]
    fn ledgers_are_per_user() {
        let tracker = tracker();
        let alice = student(&tracker, "20CS101");
        let bob = student(&tracker, "20CS102");

        tracker.courses.add_course(&alice, new_course("CS101")).unwrap();

        assert_eq!(tracker.courses.list(&alice).unwrap().len(), 1);
        assert!(tracker.courses.list(&bob).unwrap().is_empty());
    }
}
