mod error;
mod member;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::web::start_server;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    match start_server() {
        Ok(rocket_build) => rocket_build,
        Err(error) => {
            error!("{error:#?}");
            panic!("Initialization failed, aborting.");
        }
    }
}
