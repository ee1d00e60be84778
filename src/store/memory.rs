use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::Error;
use crate::models::booking::Booking;
use crate::models::event::Event;
use crate::store::BookingStore;

/// In-memory store backing the test suite. Same contract as [`MongoStore`](
/// crate::store::MongoStore), no external process required.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    bookings: Vec<Booking>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_event(&self, mut event: Event) -> Result<Event, Error> {
        event.id.get_or_insert_with(ObjectId::new);
        self.inner.lock().unwrap().events.push(event.clone());
        Ok(event)
    }

    async fn find_event(&self, id: ObjectId) -> Result<Option<Event>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.iter().find(|e| e.id == Some(id)).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, Error> {
        let mut events = self.inner.lock().unwrap().events.clone();
        events.sort_by(|a, b| a.start_at.cmp(&b.start_at));
        Ok(events)
    }

    async fn insert_booking(&self, mut booking: Booking) -> Result<Booking, Error> {
        booking.id.get_or_insert_with(ObjectId::new);
        self.inner.lock().unwrap().bookings.push(booking.clone());
        Ok(booking)
    }

    async fn bookings_for_event(&self, event_id: ObjectId) -> Result<Vec<Booking>, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn booked_seats(&self, event_id: ObjectId) -> Result<i64, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookings
            .iter()
            .filter(|b| b.event_id == event_id)
            .map(|b| i64::from(b.seats))
            .sum())
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        let mut bookings = self.inner.lock().unwrap().bookings.clone();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn has_booking_for_email(
        &self,
        event_id: ObjectId,
        email: &str,
    ) -> Result<bool, Error> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bookings
            .iter()
            .any(|b| b.event_id == event_id && b.email == email))
    }
}
