use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::config::Config;
use crate::error::Error;
use crate::models::event::{CreateEventPayload, Event, EventWithBookings};
use crate::store::BookingStore;

#[post("/events", data = "<payload>")]
pub async fn create_event(
    store: &State<Arc<dyn BookingStore>>,
    config: &State<Config>,
    payload: Json<CreateEventPayload>,
) -> Result<Created<Json<Event>>, Error> {
    let event = payload
        .into_inner()
        .into_event(config.require_end_after_start)?;
    let event = store.insert_event(event).await?;

    let location = event
        .id
        .map(|id| format!("/api/events/{}", id.to_hex()))
        .unwrap_or_else(|| "/api/events".to_string());
    Ok(Created::new(location).body(Json(event)))
}

#[get("/events")]
pub async fn get_events(
    store: &State<Arc<dyn BookingStore>>,
) -> Result<Json<Vec<EventWithBookings>>, Error> {
    let events = store.list_events().await?;

    let mut out = Vec::with_capacity(events.len());
    for event in events {
        let bookings = match event.id {
            Some(id) => store.bookings_for_event(id).await?,
            None => Vec::new(),
        };
        out.push(EventWithBookings { event, bookings });
    }
    Ok(Json(out))
}

#[get("/events/<id>")]
pub async fn get_event(
    store: &State<Arc<dyn BookingStore>>,
    id: &str,
) -> Result<Json<EventWithBookings>, Error> {
    let event_id = ObjectId::parse_str(id).map_err(|_| Error::NotFound)?;
    let event = store.find_event(event_id).await?.ok_or(Error::NotFound)?;
    let bookings = store.bookings_for_event(event_id).await?;

    Ok(Json(EventWithBookings { event, bookings }))
}
