use std::path::PathBuf;

use crate::core::db::DEFAULT_STORAGE_KEY;

/// The signed-in administrator shown in greetings and the settings profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            id: "USR001".into(),
            name: "Admin".into(),
            email: "admin@megapro.com".into(),
            role: "administrador".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite file backing local storage.
    pub data_file: PathBuf,
    pub storage_key: String,
    pub user: CurrentUser,
}

impl AppConfig {
    /// `<local data dir>/megaprop/storage.db`, or the working directory when
    /// the platform has no data directory.
    pub fn default_data_file() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("megaprop")
            .join("storage.db")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: Self::default_data_file(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            user: CurrentUser::default(),
        }
    }
}
