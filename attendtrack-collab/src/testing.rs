use crate::{MemoryStorage, NewPlainUser, Tracker, TrackerConfig, UserData};

pub fn tracker() -> Tracker<MemoryStorage> {
    Tracker::new(MemoryStorage::new(), TrackerConfig::default())
}

pub fn new_student(roll_number: &str) -> NewPlainUser {
    NewPlainUser {
        username: format!("student_{}", roll_number.to_lowercase()),
        roll_number: roll_number.to_string(),
        password: "hunter22".to_string(),
        year: 2,
        course: "Computer Science".to_string(),
        section: "A".to_string(),
    }
}

/// Registers a student and returns their profile
pub fn student(tracker: &Tracker<MemoryStorage>, roll_number: &str) -> UserData {
    tracker
        .auth
        .register(new_student(roll_number))
        .expect("student is registered")
        .user
}
