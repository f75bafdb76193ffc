use crate::error::Result;
use crate::web::server::build_server;
use rocket::{Build, Rocket};

mod frontend;
mod server;

pub fn start_server() -> Result<Rocket<Build>> {
    build_server()
}
