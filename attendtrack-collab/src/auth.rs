use argon2::{
    password_hash::{Encoding, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use attendtrack_core::{validate_profile, validate_required, ValidationError};
use log::info;
use rand::rngs::OsRng;
use std::sync::Arc;
use thiserror::Error;

use crate::{
    util::{new_id, random_string},
    CredentialData, Key, SessionData, Storage, StorageError, StorageExt, TrackerContext, UserData,
};

pub struct Auth<S> {
    storage: Arc<S>,
    argon: Argon2<'static>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("User already registered with this roll number")]
    AlreadyRegistered,
    #[error("User not registered. Please register first.")]
    NotRegistered,
    /// Roll number or password is incorrect
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The credentials exist, but the profile they belong to doesn't
    #[error("User data not found")]
    UserDataMissing,
    #[error("Not logged in")]
    NoSession,
    #[error("HashError: {0}")]
    HashError(String),
    /// Something else went wrong with the storage
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl<S> Auth<S>
where
    S: Storage,
{
    const TOKEN_LENGTH: usize = 32;

    pub fn new(context: &TrackerContext<S>) -> Self {
        Self {
            storage: context.storage.clone(),
            argon: Argon2::default(),
        }
    }

    /// Registers a student and logs them in
    pub fn register(&self, new_user: NewPlainUser) -> Result<SessionData, AuthError> {
        validate_required([
            ("username", new_user.username.as_str()),
            ("rollNumber", new_user.roll_number.as_str()),
            ("course", new_user.course.as_str()),
            ("section", new_user.section.as_str()),
            ("password", new_user.password.as_str()),
        ])?;
        validate_profile(new_user.year, &new_user.section)?;

        let mut credentials = self.credentials()?;

        if credentials
            .iter()
            .any(|c| c.roll_number == new_user.roll_number)
        {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = UserData {
            id: new_id(),
            username: new_user.username,
            roll_number: new_user.roll_number,
            year: new_user.year,
            course: new_user.course,
            section: new_user.section,
        };

        credentials.push(CredentialData {
            roll_number: user.roll_number.clone(),
            password: self.hash_password(&new_user.password)?,
        });

        self.storage.save(&Key::RegisteredUsers, &credentials)?;
        self.storage
            .save(&Key::UserData(user.roll_number.clone()), &user)?;

        info!("Registered {}", user.display_name());

        self.start_session(user)
    }

    /// Logs in a student, returning a new session
    pub fn login(&self, credentials: Credentials) -> Result<SessionData, AuthError> {
        let registered = self
            .credentials()?
            .into_iter()
            .find(|c| c.roll_number == credentials.roll_number)
            .ok_or(AuthError::NotRegistered)?;

        let stored_password = PasswordHash::parse(&registered.password, Encoding::default())
            .map_err(|e| AuthError::HashError(e.to_string()))?;

        self.argon
            .verify_password(credentials.password.as_bytes(), &stored_password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_by_roll_number(&credentials.roll_number)?
            .ok_or(AuthError::UserDataMissing)?;

        self.start_session(user)
    }

    /// Ends the current session, if there is one
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.delete(&Key::CurrentSession)
    }

    /// Returns the current session, if anyone is logged in
    pub fn current_session(&self) -> Result<Option<SessionData>, StorageError> {
        self.storage.load(&Key::CurrentSession)
    }

    /// Returns the current session if it matches the token
    pub fn session(&self, token: &str) -> Result<SessionData, AuthError> {
        self.current_session()?
            .filter(|s| s.token == token)
            .ok_or(AuthError::NoSession)
    }

    /// Updates the profile of a user, returning the updated user
    pub fn update_user(&self, user: &UserData, updated: UpdatedUser) -> Result<UserData, AuthError> {
        let updated_user = UserData {
            id: user.id.clone(),
            roll_number: user.roll_number.clone(),
            username: updated.username.unwrap_or_else(|| user.username.clone()),
            year: updated.year.unwrap_or(user.year),
            course: updated.course.unwrap_or_else(|| user.course.clone()),
            section: updated.section.unwrap_or_else(|| user.section.clone()),
        };

        validate_required([
            ("username", updated_user.username.as_str()),
            ("course", updated_user.course.as_str()),
        ])?;
        validate_profile(updated_user.year, &updated_user.section)?;

        self.storage
            .save(&Key::UserData(updated_user.roll_number.clone()), &updated_user)?;

        // Keep the session copy in sync when the user is the one logged in
        if let Some(session) = self.current_session()? {
            if session.user.id == updated_user.id {
                self.storage.save(
                    &Key::CurrentSession,
                    &SessionData {
                        token: session.token,
                        user: updated_user.clone(),
                    },
                )?;
            }
        }

        Ok(updated_user)
    }

    /// Returns the profile registered with a roll number
    pub fn user_by_roll_number(&self, roll_number: &str) -> Result<Option<UserData>, StorageError> {
        self.storage.load(&Key::UserData(roll_number.to_string()))
    }

    fn credentials(&self) -> Result<Vec<CredentialData>, StorageError> {
        Ok(self
            .storage
            .load(&Key::RegisteredUsers)?
            .unwrap_or_default())
    }

    fn start_session(&self, user: UserData) -> Result<SessionData, AuthError> {
        let session = SessionData {
            token: random_string(Self::TOKEN_LENGTH),
            user,
        };

        self.storage.save(&Key::CurrentSession, &session)?;

        Ok(session)
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }
}

#[derive(Debug)]
pub struct Credentials {
    pub roll_number: String,
    pub password: String,
}

#[derive(Debug)]
pub struct NewPlainUser {
    pub username: String,
    pub roll_number: String,
    pub password: String,
    pub year: u8,
    pub course: String,
    pub section: String,
}

/// Profile fields to change, [None] keeps the current value
#[derive(Debug, Default)]
pub struct UpdatedUser {
    pub username: Option<String>,
    pub year: Option<u8>,
    pub course: Option<String>,
    pub section: Option<String>,
}

#[cfg(test)]
mod test {
    use crate::testing::{new_student, tracker};

    use super::*;

    #[test]
    fn register_then_login() {
        let tracker = tracker();

        let registered = tracker.auth.register(new_student("20CS101")).unwrap();
        assert_eq!(registered.user.roll_number, "20CS101");

        tracker.auth.logout().unwrap();
        assert_eq!(tracker.auth.current_session().unwrap(), None);

        let session = tracker
            .auth
            .login(Credentials {
                roll_number: "20CS101".to_string(),
                password: "hunter22".to_string(),
            })
            .unwrap();

        assert_eq!(session.user, registered.user);
        assert_ne!(session.token, registered.token);
        assert_eq!(tracker.auth.session(&session.token).unwrap(), session);
        assert!(tracker.auth.session(&registered.token).is_err());
    }

    #[test]
    fn passwords_are_hashed() {
        let tracker = tracker();
        tracker.auth.register(new_student("20CS101")).unwrap();

        let raw = tracker.storage().read("registeredUsers").unwrap().unwrap();
        assert!(!raw.contains("hunter22"));
        assert!(raw.contains("$argon2"));
    }

    #[test]
    fn rejects_bad_logins() {
        let tracker = tracker();
        tracker.auth.register(new_student("20CS101")).unwrap();

        let wrong_password = tracker.auth.login(Credentials {
            roll_number: "20CS101".to_string(),
            password: "nope".to_string(),
        });
        let unknown = tracker.auth.login(Credentials {
            roll_number: "20CS999".to_string(),
            password: "hunter22".to_string(),
        });

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AuthError::NotRegistered)));
    }

    #[test]
    fn rejects_duplicates_and_invalid_profiles() {
        let tracker = tracker();
        tracker.auth.register(new_student("20CS101")).unwrap();

        let duplicate = tracker.auth.register(new_student("20CS101"));
        assert!(matches!(duplicate, Err(AuthError::AlreadyRegistered)));

        let mut bad_year = new_student("20CS102");
        bad_year.year = 9;
        assert!(matches!(
            tracker.auth.register(bad_year),
            Err(AuthError::Invalid(ValidationError::InvalidYear))
        ));

        let mut missing_name = new_student("20CS103");
        missing_name.username = " ".to_string();
        assert!(matches!(
            tracker.auth.register(missing_name),
            Err(AuthError::Invalid(ValidationError::Required("username")))
        ));
    }

    #[test]
    fn update_keeps_identity() {
        let tracker = tracker();
        let session = tracker.auth.register(new_student("20CS101")).unwrap();

        let updated = tracker
            .auth
            .update_user(
                &session.user,
                UpdatedUser {
                    section: Some("B".to_string()),
                    year: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, session.user.id);
        assert_eq!(updated.academic_info(), "3 Year - B Section");
        assert_eq!(
            tracker.auth.user_by_roll_number("20CS101").unwrap(),
            Some(updated.clone())
        );
        assert_eq!(
            tracker.auth.current_session().unwrap().map(|s| s.user),
            Some(updated)
        );
    }

    #[test]
    fn display_helpers() {
        let tracker = tracker();
        let user = tracker.auth.register(new_student("20CS101")).unwrap().user;

        assert_eq!(user.display_name(), "student_20cs101 (20CS101)");
        assert_eq!(user.initials(), "ST");
    }
}
