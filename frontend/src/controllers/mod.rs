//! # Controllers
//!
//! Async drivers that run the state machines in `state/` against a
//! [`RideBackend`](crate::services::api::RideBackend).
//!
//! Each controller keeps the current snapshot in a `RefCell` and swaps it for
//! the next one on every transition. Borrows never live across an `.await`,
//! so overlapping operations on one controller (two refreshes, or a refresh
//! during a request) interleave safely on the single UI thread. After every
//! transition the change listener, if any, is called so the view can
//! re-render.

use std::cell::RefCell;
use std::rc::Rc;

pub mod events;
pub mod ride_form;
pub mod ride_list;
pub mod ride_request;

pub use events::{EventBus, SubscriptionId};
pub use ride_form::RideFormController;
pub use ride_list::RideListController;
pub use ride_request::RideRequestController;

/// Optional re-render hook shared by the controllers
#[derive(Default)]
pub(crate) struct ChangeListener {
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ChangeListener {
    pub(crate) fn set(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub(crate) fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}
