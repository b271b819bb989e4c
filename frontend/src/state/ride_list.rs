//! # Ride Listing State
//!
//! Idle → Loading → {Loaded, Failed}. A successful load replaces the ride set
//! wholesale; a failed one records the error and keeps whatever was shown.
//!
//! Each load is tagged with a [`LoadTicket`] so overlapping refreshes can be
//! reconciled according to the configured [`RefreshPolicy`].

use chrono::TimeZone;
use shared::RideOffer;
use std::fmt;
use std::str::FromStr;

use crate::services::api::OperationError;
use crate::state::ride_card::RideCard;

/// How completions of overlapping loads are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Only the most recently started load may update the listing; results
    /// of older loads are dropped.
    #[default]
    LatestIssuedWins,
    /// Every completion is applied, so whichever load resolves last wins,
    /// even if it was started first.
    LastResolvedWins,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest-issued-wins" => Ok(RefreshPolicy::LatestIssuedWins),
            "last-resolved-wins" => Ok(RefreshPolicy::LastResolvedWins),
            other => Err(format!("Unknown refresh policy: {}", other)),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshPolicy::LatestIssuedWins => write!(f, "latest-issued-wins"),
            RefreshPolicy::LastResolvedWins => write!(f, "last-resolved-wins"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Identifies one `load()`; tickets are issued in strictly increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct RideListState {
    pub phase: ListingPhase,
    pub rides: Vec<RideOffer>,
    pub error: Option<String>,
    pub policy: RefreshPolicy,
    last_issued: u64,
}

impl RideListState {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            phase: ListingPhase::Idle,
            rides: Vec::new(),
            error: None,
            policy,
            last_issued: 0,
        }
    }

    pub fn begin_load(&self) -> (Self, LoadTicket) {
        let ticket = LoadTicket(self.last_issued + 1);
        let next = Self {
            phase: ListingPhase::Loading,
            error: None,
            last_issued: ticket.0,
            ..self.clone()
        };
        (next, ticket)
    }

    /// Whether a completion for `ticket` would be applied right now
    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        match self.policy {
            RefreshPolicy::LastResolvedWins => true,
            RefreshPolicy::LatestIssuedWins => ticket.0 == self.last_issued,
        }
    }

    pub fn finish_load(
        &self,
        ticket: LoadTicket,
        outcome: Result<Vec<RideOffer>, OperationError>,
    ) -> Self {
        if !self.accepts(ticket) {
            return self.clone();
        }

        match outcome {
            Ok(rides) => Self {
                phase: ListingPhase::Loaded,
                rides,
                error: None,
                ..self.clone()
            },
            Err(e) => Self {
                phase: ListingPhase::Failed,
                error: Some(e.to_string()),
                ..self.clone()
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    pub fn cards<Tz>(&self, tz: &Tz) -> Vec<RideCard>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.rides.iter().map(|ride| RideCard::new(ride, tz)).collect()
    }
}

impl Default for RideListState {
    fn default() -> Self {
        Self::new(RefreshPolicy::default())
    }
}
