mod auth;
mod courses;
mod data;
mod demo;
mod mass_bunk;
mod notifications;
mod storage;
mod util;

#[cfg(test)]
mod testing;

use std::sync::Arc;

pub use auth::*;
pub use courses::*;
pub use data::*;
pub use mass_bunk::*;
pub use notifications::*;
pub use storage::*;

use log::info;
use serde::{de::DeserializeOwned, Serialize};

/// The attendtrack system, facilitating authentication, attendance, mass bunks, and notifications.
pub struct Tracker<S> {
    storage: Arc<S>,

    pub auth: Auth<S>,
    pub courses: Courses<S>,
    pub mass_bunk: MassBunk<S>,
    pub notifications: Notifications<S>,
}

/// Behaviour toggles for the tracker
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    /// Fill empty per-user lists with demonstration data on first load
    pub seed_demo_data: bool,
}

/// A type passed to the services of the tracker, to access storage and configuration.
pub struct TrackerContext<S> {
    pub storage: Arc<S>,
    pub config: TrackerConfig,
}

impl<S> Tracker<S>
where
    S: Storage,
{
    pub fn new(storage: S, config: TrackerConfig) -> Self {
        let storage = Arc::new(storage);

        let context = TrackerContext {
            storage: storage.clone(),
            config,
        };

        let notifications = Notifications::new(&context);

        Self {
            auth: Auth::new(&context),
            courses: Courses::new(&context),
            mass_bunk: MassBunk::new(&context, &notifications),
            notifications,
            storage,
        }
    }

    /// The storage the tracker persists to
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

impl<S> TrackerContext<S>
where
    S: Storage,
{
    /// Loads a per-user list.
    ///
    /// If the key has never been written and demo data is enabled, the list is seeded and persisted.
    pub(crate) fn load_list<T, F>(&self, key: &Key, seed: F) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> Vec<T>,
    {
        if let Some(list) = self.storage.load(key)? {
            return Ok(list);
        }

        if !self.config.seed_demo_data {
            return Ok(Vec::new());
        }

        info!("Seeding {} with demo data", key);

        let list = seed();
        self.storage.save(key, &list)?;

        Ok(list)
    }

    pub(crate) fn save_list<T>(&self, key: &Key, list: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        self.storage.save(key, list)
    }
}

impl<S> Clone for TrackerContext<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            config: self.config.clone(),
        }
    }
}
