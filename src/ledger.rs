use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::error::Error;
use crate::store::BookingStore;

/// Remaining seats for an event, as seen by the admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unlimited,
    Seats(i64),
}

/// Pure remainder computation. `capacity == 0` is the unlimited sentinel;
/// otherwise the remainder is clamped at zero.
pub fn available_seats(capacity: i32, booked: i64) -> Availability {
    if capacity == 0 {
        Availability::Unlimited
    } else {
        Availability::Seats((i64::from(capacity) - booked).max(0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CapacitySnapshot {
    pub capacity: i32,
    pub booked_seats: i64,
}

/// Authoritative count of seats committed against each event, derived on
/// demand from the booking records.
pub struct CapacityLedger {
    store: Arc<dyn BookingStore>,
}

impl CapacityLedger {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Declared capacity and currently booked seats for one event.
    ///
    /// Fails with [`Error::NotFound`] if the event does not exist. The
    /// snapshot is a sound basis for admission only while the caller holds
    /// that event's admission lock across the subsequent write.
    pub async fn snapshot(&self, event_id: ObjectId) -> Result<CapacitySnapshot, Error> {
        let event = self
            .store
            .find_event(event_id)
            .await?
            .ok_or(Error::NotFound)?;
        let booked_seats = self.store.booked_seats(event_id).await?;

        Ok(CapacitySnapshot {
            capacity: event.capacity,
            booked_seats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn zero_capacity_means_unlimited() {
        assert_eq!(available_seats(0, 0), Availability::Unlimited);
        assert_eq!(available_seats(0, 10_000), Availability::Unlimited);
    }

    #[test]
    fn remainder_is_capacity_minus_booked() {
        assert_eq!(available_seats(10, 3), Availability::Seats(7));
        assert_eq!(available_seats(5, 5), Availability::Seats(0));
    }

    #[test]
    fn remainder_clamps_at_zero() {
        assert_eq!(available_seats(3, 7), Availability::Seats(0));
    }

    #[test]
    fn repeated_calls_agree() {
        let first = available_seats(8, 2);
        let second = available_seats(8, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn snapshot_of_unknown_event_is_not_found() {
        let ledger = CapacityLedger::new(Arc::new(MemoryStore::new()));
        let err = ledger.snapshot(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }
}
