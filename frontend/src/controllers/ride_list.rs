use chrono::{Local, TimeZone};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::ChangeListener;
use crate::services::api::{Operation, OperationError, RideBackend};
use crate::state::ride_card::RideCard;
use crate::state::ride_list::{RefreshPolicy, RideListState};

/// Drives the ride listing.
///
/// Loads are not deduplicated: each call starts its own fetch and the
/// [`RefreshPolicy`] decides which completions reach the listing.
pub struct RideListController<B, Tz: TimeZone = Local> {
    backend: Rc<B>,
    tz: Tz,
    state: RefCell<RideListState>,
    on_change: ChangeListener,
}

impl<B: RideBackend> RideListController<B> {
    pub fn new(backend: Rc<B>, policy: RefreshPolicy) -> Self {
        Self::with_time_zone(backend, policy, Local)
    }
}

impl<B: RideBackend, Tz: TimeZone> RideListController<B, Tz> {
    pub fn with_time_zone(backend: Rc<B>, policy: RefreshPolicy, tz: Tz) -> Self {
        Self {
            backend,
            tz,
            state: RefCell::new(RideListState::new(policy)),
            on_change: ChangeListener::default(),
        }
    }

    pub fn state(&self) -> RideListState {
        self.state.borrow().clone()
    }

    pub fn set_on_change(&self, listener: impl Fn() + 'static) {
        self.on_change.set(listener);
    }

    fn replace(&self, next: RideListState) {
        *self.state.borrow_mut() = next;
        self.on_change.notify();
    }

    /// Fetch the full ride collection and apply the result
    pub async fn load(&self) {
        let (next, ticket) = self.state.borrow().begin_load();
        self.replace(next);
        debug!("Loading rides ({:?})", ticket);

        let outcome = self
            .backend
            .list_rides()
            .await
            .map_err(|e| OperationError::new(Operation::LoadRides, e));

        if !self.state.borrow().accepts(ticket) {
            debug!("Dropping stale ride listing ({:?})", ticket);
            return;
        }

        match &outcome {
            Ok(rides) => info!("Loaded {} rides", rides.len()),
            Err(e) => warn!("{}: {}", e, e.source),
        }

        let next = self.state.borrow().finish_load(ticket, outcome);
        self.replace(next);
    }

    pub fn cards(&self) -> Vec<RideCard>
    where
        Tz::Offset: fmt::Display,
    {
        self.state.borrow().cards(&self.tz)
    }
}
