pub mod config;
pub mod error;
pub mod image;
pub mod record;
pub mod store;
pub mod submission;

const DEFAULT_MEMBERS_FILE: &str = "membership_info.csv";
const DEFAULT_IMAGES_FOLDER: &str = "images";

/// Default members file, relative to the working directory.
pub fn get_default_members_file() -> &'static str {
    DEFAULT_MEMBERS_FILE
}

/// Default images folder, relative to the working directory.
pub fn get_default_images_folder() -> &'static str {
    DEFAULT_IMAGES_FOLDER
}
