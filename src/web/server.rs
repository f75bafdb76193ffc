use crate::error::Result;
use crate::member::config::StorageConfig;
use crate::member::image::create_images_folder;
use crate::member::store::MemberStore;
use crate::member::{get_default_images_folder, get_default_members_file};
use crate::tools::env_args::retrieve_arg_value;
use crate::web::frontend::server::configure;
use rocket::data::{Limits, ToByteUnit};
use rocket::{Build, Rocket};
use std::path::PathBuf;
use std::sync::Mutex;

const PORT_ENV_ARG: &str = "--port";
const PORT_SHORT_ENV_ARG: &str = "-p";
const DEFAULT_PORT: u16 = 8000;
const MEMBERS_FILE_ENV_ARG: &str = "--members-file";
const IMAGES_FOLDER_ENV_ARG: &str = "--images-folder";
const FILE_LIMIT_MIB: u64 = 10;
const DATA_FORM_LIMIT_MIB: u64 = 12;

/// Load members from the members file and build the server around them.
/// The images folder is created if needed.
pub fn build_server() -> Result<Rocket<Build>> {
    let storage_config = build_storage_config();
    create_images_folder(storage_config.images_folder())?;
    let store = MemberStore::load(storage_config.members_file())?;

    let rocket_build = rocket::build().configure(
        rocket::Config::figment()
            .merge(("port", get_port()))
            .merge(("limits", build_limits())),
    );

    Ok(configure(
        rocket_build
            .manage(storage_config)
            .manage(Mutex::new(store)),
    ))
}

fn build_storage_config() -> StorageConfig {
    let members_file = retrieve_arg_value(MEMBERS_FILE_ENV_ARG)
        .filter(|value| !value.is_empty())
        .unwrap_or(get_default_members_file().to_owned());
    let images_folder = retrieve_arg_value(IMAGES_FOLDER_ENV_ARG)
        .filter(|value| !value.is_empty())
        .unwrap_or(get_default_images_folder().to_owned());

    StorageConfig::new(PathBuf::from(members_file), PathBuf::from(images_folder))
}

fn build_limits() -> Limits {
    Limits::default()
        .limit("file", FILE_LIMIT_MIB.mebibytes())
        .limit("data-form", DATA_FORM_LIMIT_MIB.mebibytes())
}

fn get_port() -> u16 {
    retrieve_arg_value(vec![PORT_SHORT_ENV_ARG, PORT_ENV_ARG])
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
