use derive_getters::Getters;
use std::path::PathBuf;

/// Where members and their images are stored.
#[derive(Debug, Getters, Clone, PartialEq)]
pub struct StorageConfig {
    members_file: PathBuf,
    images_folder: PathBuf,
}

impl StorageConfig {
    pub fn new(members_file: PathBuf, images_folder: PathBuf) -> Self {
        Self {
            members_file,
            images_folder,
        }
    }
}
