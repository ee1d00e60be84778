use mongodb::{options::ClientOptions, Client, Database};

use crate::config::Config;
use crate::error::Error;

pub async fn init_db(config: &Config) -> Result<Database, Error> {
    let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
    client_options.app_name = Some("booking_app".to_string());

    let client = Client::with_options(client_options)?;
    let db_name = config.mongodb_uri.split('/').last().unwrap_or("booking_app");
    Ok(client.database(db_name))
}
