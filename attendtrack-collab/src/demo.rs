//! Demonstration data for empty accounts

use attendtrack_core::{FriendStatus, Vote, VoteStatus};
use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};

use crate::{
    ClassSchedule, CourseData, FriendData, MassBunkPollData, NotificationData, NotificationKind,
};

fn slot(day: Weekday, start: (u32, u32), end: (u32, u32), room: &str) -> ClassSchedule {
    ClassSchedule {
        day,
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or_default(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or_default(),
        room: room.to_string(),
    }
}

pub fn courses() -> Vec<CourseData> {
    vec![
        CourseData {
            id: "1".to_string(),
            code: "CS101".to_string(),
            name: "Introduction to Programming".to_string(),
            instructor: "Dr. Smith".to_string(),
            total_classes: 30,
            attended_classes: 25,
            schedule: vec![
                slot(Weekday::Mon, (10, 0), (11, 30), "CS-301"),
                slot(Weekday::Wed, (10, 0), (11, 30), "CS-301"),
            ],
        },
        CourseData {
            id: "2".to_string(),
            code: "CS201".to_string(),
            name: "Data Structures".to_string(),
            instructor: "Dr. Johnson".to_string(),
            total_classes: 30,
            attended_classes: 22,
            schedule: vec![
                slot(Weekday::Tue, (13, 0), (14, 30), "CS-302"),
                slot(Weekday::Thu, (13, 0), (14, 30), "CS-302"),
            ],
        },
    ]
}

pub fn polls(now: DateTime<Utc>) -> Vec<MassBunkPollData> {
    let vote = |user_id: &str, status| Vote {
        user_id: user_id.to_string(),
        status,
    };

    vec![MassBunkPollData {
        id: "1".to_string(),
        course_id: "2".to_string(),
        date: now + Duration::days(2),
        creator_id: "2".to_string(),
        description: "Let's skip Data Structures this Friday!".to_string(),
        votes: vec![
            vote("2", VoteStatus::Yes),
            vote("3", VoteStatus::Yes),
            vote("4", VoteStatus::Maybe),
        ],
    }]
}

pub fn friends() -> Vec<FriendData> {
    let friend = |id: &str, username: &str, roll_number: &str, section: &str, status| FriendData {
        id: id.to_string(),
        username: username.to_string(),
        roll_number: roll_number.to_string(),
        year: 2,
        course: "Computer Science".to_string(),
        section: section.to_string(),
        status,
    };

    vec![
        friend("2", "johndoe", "20CS101", "A", FriendStatus::Accepted),
        friend("3", "janedoe", "20CS102", "A", FriendStatus::Accepted),
        friend("4", "bobsmith", "20CS103", "B", FriendStatus::Pending),
    ]
}

pub fn notifications(user_id: &str, now: DateTime<Utc>) -> Vec<NotificationData> {
    vec![
        NotificationData {
            id: "1".to_string(),
            user_id: user_id.to_string(),
            message: "Welcome to the Student Attendance Tracker!".to_string(),
            kind: NotificationKind::Info,
            read: false,
            created_at: now,
            link: None,
        },
        NotificationData {
            id: "2".to_string(),
            user_id: user_id.to_string(),
            message: "New mass bunk poll for Data Structures class on Friday".to_string(),
            kind: NotificationKind::Warning,
            read: false,
            created_at: now - Duration::hours(1),
            link: Some("/massbunk/2".to_string()),
        },
    ]
}
