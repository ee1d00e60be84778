use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::admission::{AdmissionController, BookingRequest};
use crate::error::Error;
use crate::models::booking::{Booking, CreateBookingPayload};
use crate::store::BookingStore;

#[post("/bookings", data = "<payload>")]
pub async fn create_booking(
    admission: &State<AdmissionController>,
    payload: Json<CreateBookingPayload>,
) -> Result<Created<Json<Booking>>, Error> {
    let payload = payload.into_inner();
    let (event_id, name, email) = match (payload.event_id, payload.name, payload.email) {
        (Some(event_id), Some(name), Some(email)) => (event_id, name, email),
        _ => return Err(Error::InvalidInput("Missing required fields".into())),
    };
    let event_id = ObjectId::parse_str(&event_id).map_err(|_| Error::NotFound)?;

    let booking = admission
        .submit_booking(BookingRequest {
            event_id,
            name,
            email,
            seats: payload.seats.unwrap_or(1),
        })
        .await?;

    Ok(Created::new("/api/bookings").body(Json(booking)))
}

#[get("/bookings")]
pub async fn get_bookings(
    store: &State<Arc<dyn BookingStore>>,
) -> Result<Json<Vec<Booking>>, Error> {
    Ok(Json(store.list_bookings().await?))
}
