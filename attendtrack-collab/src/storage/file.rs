use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::info;
use parking_lot::Mutex;
use url::form_urlencoded::byte_serialize;

use crate::{Result, Storage};

/// Stores every key as a JSON file in a directory
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
    /// Writes go through a temporary file, this keeps two writers from sharing it
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens the directory, creating it if it doesn't exist
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;

        info!("Using file storage at {}", root.display());

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Maps a key to its file. Every key gets its own file name, and none of them escape the root.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = byte_serialize(key.as_bytes()).collect();

        self.root.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temporary = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        fs::write(&temporary, value)?;
        fs::rename(&temporary, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
