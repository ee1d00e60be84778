use std::sync::Arc;

use dotenvy::dotenv;
use rocket::launch;
use tracing_subscriber::EnvFilter;

use booking_app::build_rocket;
use booking_app::config::Config;
use booking_app::db::init_db;
use booking_app::store::{BookingStore, MongoStore};

#[launch]
async fn rocket() -> _ {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let db = init_db(&config).await.expect("failed to connect to MongoDB");
    let store: Arc<dyn BookingStore> = Arc::new(MongoStore::new(db));

    build_rocket(store, config)
}
