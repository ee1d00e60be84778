use std::env;
use std::str::FromStr;

use crate::admission::AdmissionPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub max_seats_per_booking: i32,
    pub reject_duplicate_email: bool,
    pub require_end_after_start: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            mongodb_uri: env::var("MONGODB_URI").expect("MONGODB_URI must be set"),
            max_seats_per_booking: env_or("SEATS_PER_BOOKING_MAX", 10),
            reject_duplicate_email: env_or("REJECT_DUPLICATE_EMAIL", false),
            require_end_after_start: env_or("REQUIRE_END_AFTER_START", true),
        }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        AdmissionPolicy {
            max_seats_per_booking: self.max_seats_per_booking,
            reject_duplicate_email: self.reject_duplicate_email,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mongodb_uri: "mongodb://localhost:27017/booking_app".to_string(),
            max_seats_per_booking: 10,
            reject_duplicate_email: false,
            require_end_after_start: true,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
