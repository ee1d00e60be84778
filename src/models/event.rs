use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::booking::Booking;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    /// 0 means unlimited seats.
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

/// An event together with its bookings, as served by the listing endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithBookings {
    #[serde(flatten)]
    pub event: Event,
    pub bookings: Vec<Booking>,
}

/// Body of `POST /events`. Required fields are modeled as `Option` so the
/// handler can report a missing field instead of failing at deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

impl CreateEventPayload {
    pub fn into_event(self, require_end_after_start: bool) -> Result<Event, Error> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => return Err(Error::InvalidInput("Missing required fields".into())),
        };
        let start_at = self
            .start_at
            .ok_or_else(|| Error::InvalidInput("Missing required fields".into()))?;

        let capacity = self.capacity.unwrap_or(0);
        if capacity < 0 {
            return Err(Error::InvalidInput("Capacity must be non-negative".into()));
        }

        if require_end_after_start {
            if let Some(end_at) = self.end_at {
                if end_at < start_at {
                    return Err(Error::InvalidInput(
                        "End time must not be before start time".into(),
                    ));
                }
            }
        }

        Ok(Event {
            id: None,
            title,
            description: self.description,
            location: self.location,
            start_at,
            end_at: self.end_at,
            capacity,
            created_at: Utc::now(),
        })
    }
}
