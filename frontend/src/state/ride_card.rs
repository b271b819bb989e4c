use chrono::{DateTime, NaiveDateTime, TimeZone};
use shared::{RideId, RideOffer};
use std::fmt;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display-ready projection of one ride offer
#[derive(Debug, Clone, PartialEq)]
pub struct RideCard {
    pub id: RideId,
    pub route: String,
    pub departure: String,
    pub driver: String,
    pub seats: u32,
    pub notes: Option<String>,
    pub contact: String,
}

impl RideCard {
    pub fn new<Tz>(ride: &RideOffer, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let driver = match ride.car_model() {
            Some(car) => format!("Driver: {} · {}", ride.driver_name, car),
            None => format!("Driver: {}", ride.driver_name),
        };

        Self {
            id: ride.id.clone(),
            route: route(ride),
            departure: format_departure(&ride.departure_time, tz),
            driver,
            seats: ride.seats_available,
            notes: ride.notes().map(str::to_string),
            contact: format!("Contact: {}", ride.contact),
        }
    }

    pub fn seats_label(&self) -> String {
        format!("Seats: {}", self.seats)
    }
}

pub fn route(ride: &RideOffer) -> String {
    format!("{} → {}", ride.origin, ride.destination)
}

/// Render a departure timestamp in `tz`.
///
/// Timestamps without an offset are shown as given; anything unparseable is
/// shown verbatim rather than hidden.
pub fn format_departure<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}
