use chrono::{Local, TimeZone};
use log::{info, warn};
use std::cell::RefCell;
use std::rc::Rc;

use super::{ChangeListener, EventBus};
use crate::services::api::{Operation, OperationError, RideBackend};
use crate::state::ride_form::{DraftError, RideField, RideFormEvent, RideFormState};

/// Drives the ride offer form: one submission at a time, one backend call
/// per submission.
pub struct RideFormController<B, Tz: TimeZone = Local> {
    backend: Rc<B>,
    events: EventBus<RideFormEvent>,
    tz: Tz,
    state: RefCell<RideFormState>,
    on_change: ChangeListener,
}

impl<B: RideBackend> RideFormController<B> {
    /// Controller that reads wall-clock departure times in the local zone
    pub fn new(backend: Rc<B>, events: EventBus<RideFormEvent>) -> Self {
        Self::with_time_zone(backend, events, Local)
    }
}

impl<B: RideBackend, Tz: TimeZone> RideFormController<B, Tz> {
    pub fn with_time_zone(backend: Rc<B>, events: EventBus<RideFormEvent>, tz: Tz) -> Self {
        Self {
            backend,
            events,
            tz,
            state: RefCell::new(RideFormState::new()),
            on_change: ChangeListener::default(),
        }
    }

    pub fn state(&self) -> RideFormState {
        self.state.borrow().clone()
    }

    pub fn set_on_change(&self, listener: impl Fn() + 'static) {
        self.on_change.set(listener);
    }

    fn replace(&self, next: RideFormState) {
        *self.state.borrow_mut() = next;
        self.on_change.notify();
    }

    /// Write a raw input value into the draft, addressed by wire field name
    pub fn update_field(&self, name: &str, raw: &str) -> Result<(), DraftError> {
        let field: RideField = name.parse()?;
        let next = self.state.borrow().update_field(field, raw);
        self.replace(next);
        Ok(())
    }

    /// Submit the current draft.
    ///
    /// Returns immediately without a backend call if a submission is already
    /// in flight or the draft is invalid.
    pub async fn submit(&self) {
        let (next, payload) = self.state.borrow().begin_submit(&self.tz);
        self.replace(next);

        let Some(payload) = payload else {
            if let Some(error) = self.state.borrow().last_error.as_deref() {
                info!("Ride not submitted: {}", error);
            }
            return;
        };

        info!(
            "Posting ride {} → {} departing {}",
            payload.origin, payload.destination, payload.departure_time
        );

        let outcome = self
            .backend
            .create_ride(&payload)
            .await
            .map_err(|e| OperationError::new(Operation::CreateRide, e));

        match &outcome {
            Ok(()) => info!("Ride posted"),
            Err(e) => warn!("{}: {}", e, e.source),
        }

        let (next, event) = self.state.borrow().finish_submit(outcome);
        self.replace(next);

        if let Some(event) = event {
            self.events.publish(&event);
        }
    }
}
