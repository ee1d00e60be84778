use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

use crate::error::Error;
use crate::models::booking::Booking;
use crate::models::event::Event;
use crate::store::BookingStore;

/// MongoDB-backed store. Events live in the `events` collection, bookings in
/// `bookings`, with booked seats computed by an aggregation over the latter.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn events(&self) -> Collection<Event> {
        self.db.collection("events")
    }

    fn bookings(&self) -> Collection<Booking> {
        self.db.collection("bookings")
    }
}

// $sum yields an int or a long depending on the operands.
fn seat_total(doc: &Document) -> i64 {
    doc.get_i64("total")
        .or_else(|_| doc.get_i32("total").map(i64::from))
        .unwrap_or(0)
}

#[async_trait]
impl BookingStore for MongoStore {
    async fn insert_event(&self, mut event: Event) -> Result<Event, Error> {
        event.id.get_or_insert_with(ObjectId::new);
        self.events().insert_one(&event, None).await?;
        Ok(event)
    }

    async fn find_event(&self, id: ObjectId) -> Result<Option<Event>, Error> {
        Ok(self.events().find_one(doc! { "_id": id }, None).await?)
    }

    async fn list_events(&self) -> Result<Vec<Event>, Error> {
        let find_options = FindOptions::builder().sort(doc! { "startAt": 1 }).build();
        let mut cursor = self.events().find(doc! {}, find_options).await?;

        let mut events = Vec::new();
        while let Some(event) = cursor.try_next().await? {
            events.push(event);
        }
        Ok(events)
    }

    async fn insert_booking(&self, mut booking: Booking) -> Result<Booking, Error> {
        booking.id.get_or_insert_with(ObjectId::new);
        self.bookings().insert_one(&booking, None).await?;
        Ok(booking)
    }

    async fn bookings_for_event(&self, event_id: ObjectId) -> Result<Vec<Booking>, Error> {
        let find_options = FindOptions::builder().sort(doc! { "createdAt": 1 }).build();
        let mut cursor = self
            .bookings()
            .find(doc! { "eventId": event_id }, find_options)
            .await?;

        let mut bookings = Vec::new();
        while let Some(booking) = cursor.try_next().await? {
            bookings.push(booking);
        }
        Ok(bookings)
    }

    async fn booked_seats(&self, event_id: ObjectId) -> Result<i64, Error> {
        let pipeline = vec![
            doc! { "$match": { "eventId": event_id } },
            doc! { "$group": { "_id": null, "total": { "$sum": "$seats" } } },
        ];
        let mut cursor = self.bookings().aggregate(pipeline, None).await?;

        Ok(match cursor.try_next().await? {
            Some(doc) => seat_total(&doc),
            None => 0,
        })
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        let find_options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let mut cursor = self.bookings().find(doc! {}, find_options).await?;

        let mut bookings = Vec::new();
        while let Some(booking) = cursor.try_next().await? {
            bookings.push(booking);
        }
        Ok(bookings)
    }

    async fn has_booking_for_email(
        &self,
        event_id: ObjectId,
        email: &str,
    ) -> Result<bool, Error> {
        let existing = self
            .bookings()
            .find_one(doc! { "eventId": event_id, "email": email }, None)
            .await?;
        Ok(existing.is_some())
    }
}
