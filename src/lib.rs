use std::sync::Arc;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};

pub mod admission;
pub mod config;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod store;
pub mod utils;

use admission::AdmissionController;
use config::Config;
use store::BookingStore;

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

/// Assembles the Rocket instance over any store; `main` passes a
/// [`store::MongoStore`], the integration tests a [`store::MemoryStore`].
pub fn build_rocket(store: Arc<dyn BookingStore>, config: Config) -> Rocket<Build> {
    let admission = AdmissionController::new(store.clone(), config.policy());

    rocket::build()
        .manage(config)
        .manage(store)
        .manage(admission)
        .attach(CORS)
        .mount("/api", routes::api_routes())
}
