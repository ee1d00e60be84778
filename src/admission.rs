use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::{info, warn};

use crate::error::Error;
use crate::ledger::{available_seats, Availability, CapacityLedger};
use crate::models::booking::Booking;
use crate::store::BookingStore;

/// Tunable admission rules, fed from [`Config`](crate::config::Config).
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    pub max_seats_per_booking: i32,
    /// When set, a second booking with the same email for the same event is
    /// rejected.
    pub reject_duplicate_email: bool,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            max_seats_per_booking: 10,
            reject_duplicate_email: false,
        }
    }
}

/// A validated-shape booking request; field content is checked by
/// [`AdmissionController::submit_booking`].
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub event_id: ObjectId,
    pub name: String,
    pub email: String,
    pub seats: i32,
}

/// Sole gateway through which bookings are created.
///
/// The capacity check and the booking insert run under a per-event async
/// lock, so concurrent requests against one event are strictly serialized
/// and can never oversell it, while requests against different events do not
/// contend. Nothing but the store read, aggregate, and insert happens inside
/// the critical section.
pub struct AdmissionController {
    store: Arc<dyn BookingStore>,
    ledger: CapacityLedger,
    locks: Mutex<HashMap<ObjectId, Arc<tokio::sync::Mutex<()>>>>,
    policy: AdmissionPolicy,
}

impl AdmissionController {
    pub fn new(store: Arc<dyn BookingStore>, policy: AdmissionPolicy) -> Self {
        Self {
            ledger: CapacityLedger::new(store.clone()),
            store,
            locks: Mutex::new(HashMap::new()),
            policy,
        }
    }

    fn event_lock(&self, event_id: ObjectId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry(event_id).or_default().clone()
    }

    // Field validation runs before the ledger is touched and has no side
    // effects.
    fn validate(&self, req: &BookingRequest) -> Result<(), Error> {
        if crate::utils::validation::is_blank(&req.name) {
            return Err(Error::InvalidInput("Name is required".into()));
        }
        if !crate::utils::validation::is_valid_email(&req.email) {
            return Err(Error::InvalidInput("Invalid email".into()));
        }
        if req.seats < 1 || req.seats > self.policy.max_seats_per_booking {
            return Err(Error::InvalidInput(format!(
                "Seats must be between 1 and {}",
                self.policy.max_seats_per_booking
            )));
        }
        Ok(())
    }

    /// Admits or rejects the request against the event's remaining capacity.
    ///
    /// On success exactly one booking is persisted; every rejection path
    /// writes nothing.
    pub async fn submit_booking(&self, req: BookingRequest) -> Result<Booking, Error> {
        self.validate(&req)?;

        let lock = self.event_lock(req.event_id);
        let _guard = lock.lock().await;

        let snapshot = self.ledger.snapshot(req.event_id).await?;

        if self.policy.reject_duplicate_email
            && self
                .store
                .has_booking_for_email(req.event_id, &req.email)
                .await?
        {
            return Err(Error::InvalidInput(
                "A booking with this email already exists for this event".into(),
            ));
        }

        match available_seats(snapshot.capacity, snapshot.booked_seats) {
            Availability::Unlimited => {}
            Availability::Seats(remaining) if i64::from(req.seats) <= remaining => {}
            Availability::Seats(remaining) => {
                warn!(
                    event_id = %req.event_id,
                    requested = req.seats,
                    remaining,
                    "booking rejected: not enough seats"
                );
                return Err(Error::CapacityExceeded);
            }
        }

        let booking = Booking {
            id: Some(ObjectId::new()),
            event_id: req.event_id,
            name: req.name,
            email: req.email,
            seats: req.seats,
            created_at: Utc::now(),
        };
        let booking = self.store.insert_booking(booking).await?;

        info!(event_id = %req.event_id, seats = booking.seats, "booking admitted");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;
    use crate::store::MemoryStore;
    use chrono::Duration;

    fn controller_with(policy: AdmissionPolicy) -> (Arc<MemoryStore>, AdmissionController) {
        let store = Arc::new(MemoryStore::new());
        let controller = AdmissionController::new(store.clone(), policy);
        (store, controller)
    }

    async fn seed_event(store: &MemoryStore, capacity: i32) -> ObjectId {
        let now = Utc::now();
        let event = Event {
            id: None,
            title: "Test Event".to_string(),
            description: None,
            location: None,
            start_at: now + Duration::days(7),
            end_at: Some(now + Duration::days(7) + Duration::hours(2)),
            capacity,
            created_at: now,
        };
        store.insert_event(event).await.unwrap().id.unwrap()
    }

    fn request(event_id: ObjectId, email: &str, seats: i32) -> BookingRequest {
        BookingRequest {
            event_id,
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            seats,
        }
    }

    #[tokio::test]
    async fn boundary_fills_to_exact_capacity() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 3).await;

        controller
            .submit_booking(request(event_id, "a@example.com", 2))
            .await
            .unwrap();
        controller
            .submit_booking(request(event_id, "b@example.com", 1))
            .await
            .unwrap();

        let err = controller
            .submit_booking(request(event_id, "c@example.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded));
        assert_eq!(store.booked_seats(event_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn oversized_request_is_rejected_without_write() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 5).await;

        controller
            .submit_booking(request(event_id, "a@example.com", 3))
            .await
            .unwrap();
        let err = controller
            .submit_booking(request(event_id, "b@example.com", 3))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CapacityExceeded));
        assert_eq!(store.list_bookings().await.unwrap().len(), 1);
        assert_eq!(store.booked_seats(event_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unlimited_event_admits_any_count() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 0).await;

        for i in 0..20 {
            controller
                .submit_booking(request(event_id, &format!("guest{i}@example.com"), 10))
                .await
                .unwrap();
        }
        assert_eq!(store.booked_seats(event_id).await.unwrap(), 200);

        // Per-booking bound still applies.
        let err = controller
            .submit_booking(request(event_id, "big@example.com", 11))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn field_validation_fails_before_the_ledger() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 5).await;

        for bad in [
            request(event_id, "a@example.com", 0),
            request(event_id, "a@example.com", -2),
            request(event_id, "a@example.com", 11),
            request(event_id, "not-an-email", 1),
            BookingRequest {
                name: "   ".to_string(),
                ..request(event_id, "a@example.com", 1)
            },
        ] {
            let err = controller.submit_booking(bad).await.unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }

        // No partial effects from any rejection.
        assert!(store.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let err = controller
            .submit_booking(request(ObjectId::new(), "a@example.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound));
        assert!(store.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_policy_is_enforced_when_enabled() {
        let (store, controller) = controller_with(AdmissionPolicy {
            reject_duplicate_email: true,
            ..AdmissionPolicy::default()
        });
        let event_id = seed_event(&store, 10).await;

        controller
            .submit_booking(request(event_id, "a@example.com", 1))
            .await
            .unwrap();
        let err = controller
            .submit_booking(request(event_id, "a@example.com", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        // Default policy allows repeats.
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 10).await;
        controller
            .submit_booking(request(event_id, "a@example.com", 1))
            .await
            .unwrap();
        controller
            .submit_booking(request(event_id, "a@example.com", 1))
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_requests_never_oversell() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let event_id = seed_event(&store, 5).await;
        let controller = Arc::new(controller);

        let mut handles = Vec::new();
        for i in 0..10 {
            let controller = controller.clone();
            handles.push(tokio::spawn(async move {
                controller
                    .submit_booking(request(event_id, &format!("guest{i}@example.com"), 1))
                    .await
            }));
        }

        let mut admitted = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(Error::CapacityExceeded) => rejected += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(admitted, 5);
        assert_eq!(rejected, 5);
        assert_eq!(store.booked_seats(event_id).await.unwrap(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn independent_events_admit_in_parallel() {
        let (store, controller) = controller_with(AdmissionPolicy::default());
        let first = seed_event(&store, 5).await;
        let second = seed_event(&store, 5).await;
        let controller = Arc::new(controller);

        let mut handles = Vec::new();
        for (i, event_id) in (0..10).zip([first, second].into_iter().cycle()) {
            let controller = controller.clone();
            handles.push(tokio::spawn(async move {
                controller
                    .submit_booking(request(event_id, &format!("guest{i}@example.com"), 1))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.booked_seats(first).await.unwrap(), 5);
        assert_eq!(store.booked_seats(second).await.unwrap(), 5);
    }
}
