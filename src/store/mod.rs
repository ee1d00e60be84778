use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::Error;
use crate::models::booking::Booking;
use crate::models::event::Event;

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Persistence seam for events and bookings. Production runs on
/// [`MongoStore`]; the test suite drives the same admission code through
/// [`MemoryStore`].
///
/// Stores only read and write; serialization of the check-then-write
/// sequence is the admission controller's job.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists the event, assigning an id if it has none.
    async fn insert_event(&self, event: Event) -> Result<Event, Error>;

    async fn find_event(&self, id: ObjectId) -> Result<Option<Event>, Error>;

    /// All events, start time ascending.
    async fn list_events(&self) -> Result<Vec<Event>, Error>;

    /// Persists the booking, assigning an id if it has none.
    async fn insert_booking(&self, booking: Booking) -> Result<Booking, Error>;

    async fn bookings_for_event(&self, event_id: ObjectId) -> Result<Vec<Booking>, Error>;

    /// Sum of `seats` over the event's bookings.
    async fn booked_seats(&self, event_id: ObjectId) -> Result<i64, Error>;

    /// All bookings, newest first.
    async fn list_bookings(&self) -> Result<Vec<Booking>, Error>;

    async fn has_booking_for_email(&self, event_id: ObjectId, email: &str)
        -> Result<bool, Error>;
}
