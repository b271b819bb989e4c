use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend-assigned ride identifier.
///
/// The backend owns the format; some deployments hand out integers, others
/// strings. The client never interprets it beyond echoing it back in
/// `/api/rides/{id}/requests`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RideId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideId::Number(n) => write!(f, "{}", n),
            RideId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RideId {
    fn from(value: i64) -> Self {
        RideId::Number(value)
    }
}

impl From<&str> for RideId {
    fn from(value: &str) -> Self {
        RideId::Text(value.to_string())
    }
}

/// A ride offer as returned by `GET /api/rides`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideOffer {
    pub id: RideId,
    #[serde(default, deserialize_with = "string_or_null")]
    pub driver_name: String,
    #[serde(default)]
    pub car_model: Option<String>,
    pub origin: String,
    pub destination: String,
    pub seats_available: u32,
    /// Server-echoed timestamp, normally RFC 3339
    pub departure_time: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub contact: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RideOffer {
    /// Car model, treating an empty string the same as a missing one
    pub fn car_model(&self) -> Option<&str> {
        non_blank(self.car_model.as_deref())
    }

    /// Notes, treating an empty string the same as missing ones
    pub fn notes(&self) -> Option<&str> {
        non_blank(self.notes.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Missing or `null` reads as an empty string
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/rides`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRideOffer {
    pub driver_name: String,
    pub car_model: String,
    pub seats_available: u32,
    pub origin: String,
    pub destination: String,
    /// ISO-8601 UTC instant, e.g. `2025-01-01T10:00:00.000Z`
    pub departure_time: String,
    pub contact: String,
    pub notes: String,
}

/// Body of `POST /api/rides/{id}/requests`; the ride id travels in the path
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewRideRequest {
    pub requester_name: String,
    pub contact: String,
    pub message: String,
}
