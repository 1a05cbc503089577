use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

mod file;
pub use file::*;

mod memory;
pub use memory::*;

pub type Result<T> = std::result::Result<T, StorageError>;
pub type BoxedStorage = Box<dyn Storage>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A stored value could not be read or written as JSON
    #[error("Could not (de)serialize {key}: {source}")]
    Serialization {
        key: String,
        source: serde_json::Error,
    },
}

/// Represents a key/value store that attendtrack state is persisted to.
///
/// Values are opaque strings, every write replaces the previous value.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl Storage for BoxedStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Helper trait to reduce boilerplate when storing JSON values
pub trait StorageExt {
    /// Reads and deserializes a value, returning [None] if the key is not set
    fn load<T: DeserializeOwned>(&self, key: &Key) -> Result<Option<T>>;
    /// Serializes and overwrites a value
    fn save<T: Serialize + ?Sized>(&self, key: &Key, value: &T) -> Result<()>;
    fn delete(&self, key: &Key) -> Result<()>;
}

impl<S> StorageExt for S
where
    S: Storage + ?Sized,
{
    fn load<T: DeserializeOwned>(&self, key: &Key) -> Result<Option<T>> {
        let key = key.to_string();

        self.read(&key)?
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|source| StorageError::Serialization { key, source })
            })
            .transpose()
    }

    fn save<T: Serialize + ?Sized>(&self, key: &Key, value: &T) -> Result<()> {
        let key = key.to_string();
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
            key: key.clone(),
            source,
        })?;

        self.write(&key, &raw)
    }

    fn delete(&self, key: &Key) -> Result<()> {
        self.remove(&key.to_string())
    }
}

/// Every key attendtrack writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// The global list of credentials
    RegisteredUsers,
    /// The currently logged in session
    CurrentSession,
    /// The profile of a user, by roll number
    UserData(String),
    Courses(String),
    Attendance(String),
    MassBunks(String),
    Friends(String),
    Notifications(String),
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::RegisteredUsers => write!(f, "registeredUsers"),
            Key::CurrentSession => write!(f, "user"),
            Key::UserData(roll_number) => write!(f, "userData_{roll_number}"),
            Key::Courses(user_id) => write!(f, "courses-{user_id}"),
            Key::Attendance(user_id) => write!(f, "attendance-{user_id}"),
            Key::MassBunks(user_id) => write!(f, "massBunks-{user_id}"),
            Key::Friends(user_id) => write!(f, "friends-{user_id}"),
            Key::Notifications(user_id) => write!(f, "notifications-{user_id}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(Key::RegisteredUsers.to_string(), "registeredUsers");
        assert_eq!(Key::CurrentSession.to_string(), "user");
        assert_eq!(Key::UserData("20CS101".into()).to_string(), "userData_20CS101");
        assert_eq!(Key::Courses("42".into()).to_string(), "courses-42");
        assert_eq!(Key::Notifications("42".into()).to_string(), "notifications-42");
    }

    #[test]
    fn json_helpers() {
        let storage = MemoryStorage::default();
        let key = Key::Friends("1".into());

        assert_eq!(storage.load::<Vec<u32>>(&key).unwrap(), None);

        storage.save(&key, &vec![1, 2, 3]).unwrap();
        assert_eq!(storage.load::<Vec<u32>>(&key).unwrap(), Some(vec![1, 2, 3]));

        storage.write("friends-1", "not json").unwrap();
        assert!(matches!(
            storage.load::<Vec<u32>>(&key),
            Err(StorageError::Serialization { .. })
        ));

        storage.delete(&key).unwrap();
        assert_eq!(storage.load::<Vec<u32>>(&key).unwrap(), None);
    }
}
