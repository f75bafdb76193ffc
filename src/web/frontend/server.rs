use crate::web::frontend::frontend_controller;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

const STATIC_FILES_FOLDER: &str = "./public/static";

/// Mount the form page, the member images and the static files.
/// Expects a [crate::member::config::StorageConfig] and a `Mutex<MemberStore>` to be managed.
pub fn configure(rocket_build: Rocket<Build>) -> Rocket<Build> {
    rocket_build
        .mount(
            "/",
            routes![
                frontend_controller::index,
                frontend_controller::submit_member,
                frontend_controller::member_image,
            ],
        )
        .mount("/", FileServer::from(STATIC_FILES_FOLDER))
        .register("/", catchers![frontend_controller::not_found])
        .attach(Template::fairing())
}
