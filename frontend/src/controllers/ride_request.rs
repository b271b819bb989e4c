use log::{info, warn};
use shared::RideOffer;
use std::cell::RefCell;
use std::rc::Rc;

use super::ChangeListener;
use crate::services::api::{Operation, OperationError, RideBackend};
use crate::state::ride_request::{Notice, RequestField, RequestFlow, RequestFlowError};

/// Drives the "request a seat" dialog for one selected ride
pub struct RideRequestController<B> {
    backend: Rc<B>,
    flow: RefCell<RequestFlow>,
    last_notice: RefCell<Option<Notice>>,
    on_change: ChangeListener,
}

impl<B: RideBackend> RideRequestController<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            flow: RefCell::new(RequestFlow::Closed),
            last_notice: RefCell::new(None),
            on_change: ChangeListener::default(),
        }
    }

    pub fn flow(&self) -> RequestFlow {
        self.flow.borrow().clone()
    }

    /// The most recent confirmation or failure shown to the user
    pub fn last_notice(&self) -> Option<Notice> {
        self.last_notice.borrow().clone()
    }

    pub fn set_on_change(&self, listener: impl Fn() + 'static) {
        self.on_change.set(listener);
    }

    fn replace(&self, next: RequestFlow) {
        *self.flow.borrow_mut() = next;
        self.on_change.notify();
    }

    pub fn open(&self, ride: RideOffer) {
        let next = self.flow.borrow().open(ride);
        self.replace(next);
    }

    pub fn update_field(&self, name: &str, value: &str) -> Result<(), RequestFlowError> {
        let field: RequestField = name.parse()?;
        let next = self.flow.borrow().update_field(field, value);
        self.replace(next);
        Ok(())
    }

    pub fn cancel(&self) -> Result<(), RequestFlowError> {
        let next = self.flow.borrow().cancel()?;
        self.replace(next);
        Ok(())
    }

    /// Send the drafted request for the selected ride.
    ///
    /// Precondition failures (no ride selected, already sending, blank
    /// required fields) come back as `Err` and no request is issued.
    /// Otherwise exactly one call is made and its outcome is returned as the
    /// notice to show.
    pub async fn submit(&self) -> Result<Notice, RequestFlowError> {
        let (next, request) = self.flow.borrow().begin_send();
        self.replace(next);
        let request = request?;

        info!("Sending ride request for ride {}", request.ride_id);
        let outcome = self
            .backend
            .create_request(&request.ride_id, &request.body)
            .await
            .map_err(|e| OperationError::new(Operation::SendRequest, e));

        let notice = match &outcome {
            Ok(()) => {
                info!("Ride request sent for ride {}", request.ride_id);
                Notice::RequestSent
            }
            Err(e) => {
                warn!("{} (ride {}): {}", e, request.ride_id, e.source);
                Notice::SendFailed(e.to_string())
            }
        };

        *self.last_notice.borrow_mut() = Some(notice.clone());
        let (next, _) = self.flow.borrow().finish_send(outcome);
        self.replace(next);
        Ok(notice)
    }
}
