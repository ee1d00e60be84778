use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use mongodb::bson::doc;

use booking_app::config::Config;
use booking_app::db::init_db;
use booking_app::models::event::Event;
use booking_app::store::{BookingStore, MongoStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = Config::from_env();
    let db = init_db(&config).await?;

    db.collection::<Event>("events").delete_many(doc! {}, None).await?;

    let store = Arc::new(MongoStore::new(db));
    let now = Utc::now();

    let events = vec![
        Event {
            id: None,
            title: "Rust Meetup: Fearless Concurrency".to_string(),
            description: Some("Talks on async Rust and lock discipline.".to_string()),
            location: Some("Community Hall A".to_string()),
            start_at: now + Duration::days(14),
            end_at: Some(now + Duration::days(14) + Duration::hours(3)),
            capacity: 40,
            created_at: now,
        },
        Event {
            id: None,
            title: "Open Air Concert".to_string(),
            description: Some("Free entry, no seat limit.".to_string()),
            location: Some("Riverside Park".to_string()),
            start_at: now + Duration::days(30),
            end_at: Some(now + Duration::days(30) + Duration::hours(5)),
            capacity: 0,
            created_at: now,
        },
        Event {
            id: None,
            title: "Sourdough Workshop".to_string(),
            description: Some("Hands-on baking, small group.".to_string()),
            location: Some("The Bakery".to_string()),
            start_at: now + Duration::days(7),
            end_at: Some(now + Duration::days(7) + Duration::hours(2)),
            capacity: 5,
            created_at: now,
        },
    ];

    for event in events {
        let event = store.insert_event(event).await?;
        println!("🎟️ Seeded event: {} (capacity {})", event.title, event.capacity);
    }

    println!("\n🎉 Seeding complete!");
    Ok(())
}
