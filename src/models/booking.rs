use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub event_id: ObjectId,
    pub name: String,
    pub email: String,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /bookings`. `seats` defaults to 1 when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    pub event_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub seats: Option<i32>,
}
