//! # Ride Form State
//!
//! Draft and submission state for posting a ride offer.
//!
//! Every transition takes the current snapshot and returns the next one, so
//! the async controller and the UI share one source of truth and tests can
//! drive the machine without a backend.
//!
//! ## Lifecycle:
//! 1. `update_field` edits the draft
//! 2. `begin_submit` validates, normalizes the departure time and hands back
//!    the payload to send (at most one submission in flight)
//! 3. `finish_submit` applies the backend outcome: reset + event on success,
//!    draft preserved on failure

use chrono::{DateTime, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use shared::NewRideOffer;
use std::str::FromStr;
use thiserror::Error;

use crate::services::api::OperationError;

pub const RIDE_POSTED: &str = "Ride posted!";

/// Editable fields of a ride draft, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideField {
    DriverName,
    CarModel,
    SeatsAvailable,
    Origin,
    Destination,
    DepartureTime,
    Contact,
    Notes,
}

impl RideField {
    pub const ALL: [RideField; 8] = [
        RideField::DriverName,
        RideField::CarModel,
        RideField::Origin,
        RideField::Destination,
        RideField::SeatsAvailable,
        RideField::DepartureTime,
        RideField::Contact,
        RideField::Notes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RideField::DriverName => "driver_name",
            RideField::CarModel => "car_model",
            RideField::SeatsAvailable => "seats_available",
            RideField::Origin => "origin",
            RideField::Destination => "destination",
            RideField::DepartureTime => "departure_time",
            RideField::Contact => "contact",
            RideField::Notes => "notes",
        }
    }

    /// Human-readable label, also used as input placeholder
    pub fn label(self) -> &'static str {
        match self {
            RideField::DriverName => "Your name",
            RideField::CarModel => "Car model",
            RideField::SeatsAvailable => "Seats",
            RideField::Origin => "From",
            RideField::Destination => "To",
            RideField::DepartureTime => "Departure time",
            RideField::Contact => "Contact (phone/email)",
            RideField::Notes => "Notes (optional)",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, RideField::CarModel | RideField::Notes)
    }
}

impl FromStr for RideField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RideField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{} is required", .0.label())]
    Missing(RideField),

    #[error("At least one seat must be available")]
    NoSeats,

    #[error("Departure time is not a valid date")]
    InvalidDepartureTime,
}

/// A ride offer being edited, before the backend has assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDraft {
    pub driver_name: String,
    pub car_model: String,
    pub seats_available: u32,
    pub origin: String,
    pub destination: String,
    /// As typed, usually a `datetime-local` value like `2025-01-01T10:00`
    pub departure_time: String,
    pub contact: String,
    pub notes: String,
}

impl Default for RideDraft {
    fn default() -> Self {
        Self {
            driver_name: String::new(),
            car_model: String::new(),
            seats_available: 1,
            origin: String::new(),
            destination: String::new(),
            departure_time: String::new(),
            contact: String::new(),
            notes: String::new(),
        }
    }
}

impl RideDraft {
    /// Write a raw input value into the draft.
    ///
    /// Seats are coerced like a browser number input: anything that is not
    /// a non-negative integer becomes 0. No other checks happen here.
    pub fn with_field(&self, field: RideField, raw: &str) -> Self {
        let mut next = self.clone();
        match field {
            RideField::DriverName => next.driver_name = raw.to_string(),
            RideField::CarModel => next.car_model = raw.to_string(),
            RideField::SeatsAvailable => next.seats_available = coerce_seats(raw),
            RideField::Origin => next.origin = raw.to_string(),
            RideField::Destination => next.destination = raw.to_string(),
            RideField::DepartureTime => next.departure_time = raw.to_string(),
            RideField::Contact => next.contact = raw.to_string(),
            RideField::Notes => next.notes = raw.to_string(),
        }
        next
    }

    pub fn value(&self, field: RideField) -> String {
        match field {
            RideField::DriverName => self.driver_name.clone(),
            RideField::CarModel => self.car_model.clone(),
            RideField::SeatsAvailable => self.seats_available.to_string(),
            RideField::Origin => self.origin.clone(),
            RideField::Destination => self.destination.clone(),
            RideField::DepartureTime => self.departure_time.clone(),
            RideField::Contact => self.contact.clone(),
            RideField::Notes => self.notes.clone(),
        }
    }

    /// Presence and shape checks, then conversion into the wire payload.
    ///
    /// Wall-clock departure times are read in `tz`. A departure in the past
    /// is accepted.
    pub fn validate<Tz: TimeZone>(&self, tz: &Tz) -> Result<NewRideOffer, DraftError> {
        for field in RideField::ALL {
            if field.is_required()
                && field != RideField::SeatsAvailable
                && self.value(field).trim().is_empty()
            {
                return Err(DraftError::Missing(field));
            }
        }
        if self.seats_available < 1 {
            return Err(DraftError::NoSeats);
        }
        let departure = normalize_departure_time(&self.departure_time, tz)?;

        Ok(NewRideOffer {
            driver_name: self.driver_name.clone(),
            car_model: self.car_model.clone(),
            seats_available: self.seats_available,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_time: departure.to_rfc3339_opts(SecondsFormat::Millis, true),
            contact: self.contact.clone(),
            notes: self.notes.clone(),
        })
    }
}

fn coerce_seats(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Resolve a departure time to an absolute instant.
///
/// Accepts RFC 3339 instants as-is and `datetime-local` values
/// (`YYYY-MM-DDTHH:MM[:SS]`) as wall-clock time in `tz`. Inside a DST fold
/// the earlier instant wins; times inside a DST gap are rejected.
pub fn normalize_departure_time<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, DraftError> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or(DraftError::InvalidDepartureTime)?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) | LocalResult::Ambiguous(local, _) => {
            Ok(local.with_timezone(&Utc))
        }
        LocalResult::None => Err(DraftError::InvalidDepartureTime),
    }
}

/// Emitted when a ride has been accepted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideFormEvent {
    RideCreated,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RideFormState {
    pub draft: RideDraft,
    pub submitting: bool,
    pub last_error: Option<String>,
    pub last_success: Option<String>,
}

impl RideFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_field(&self, field: RideField, raw: &str) -> Self {
        Self {
            draft: self.draft.with_field(field, raw),
            ..self.clone()
        }
    }

    /// Start a submission.
    ///
    /// Returns the payload to send, or `None` when nothing should be sent:
    /// either a submission is already in flight (state unchanged) or the
    /// draft failed validation (error recorded, draft kept).
    pub fn begin_submit<Tz: TimeZone>(&self, tz: &Tz) -> (Self, Option<NewRideOffer>) {
        if self.submitting {
            return (self.clone(), None);
        }

        match self.draft.validate(tz) {
            Ok(payload) => (
                Self {
                    draft: self.draft.clone(),
                    submitting: true,
                    last_error: None,
                    last_success: None,
                },
                Some(payload),
            ),
            Err(e) => (
                Self {
                    draft: self.draft.clone(),
                    submitting: false,
                    last_error: Some(e.to_string()),
                    last_success: None,
                },
                None,
            ),
        }
    }

    /// Apply the backend outcome of the in-flight submission
    pub fn finish_submit(
        &self,
        outcome: Result<(), OperationError>,
    ) -> (Self, Option<RideFormEvent>) {
        if !self.submitting {
            return (self.clone(), None);
        }

        match outcome {
            Ok(()) => (
                Self {
                    draft: RideDraft::default(),
                    submitting: false,
                    last_error: None,
                    last_success: Some(RIDE_POSTED.to_string()),
                },
                Some(RideFormEvent::RideCreated),
            ),
            Err(e) => (
                Self {
                    draft: self.draft.clone(),
                    submitting: false,
                    last_error: Some(e.to_string()),
                    last_success: None,
                },
                None,
            ),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Posting..."
        } else {
            "Post Ride"
        }
    }
}
