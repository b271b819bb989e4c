//! Pure state machines behind the ride form, the listing and the request
//! dialog. Transitions take a snapshot and return the next one; no I/O.

pub mod ride_card;
pub mod ride_form;
pub mod ride_list;
pub mod ride_request;

pub use ride_card::RideCard;
pub use ride_form::{DraftError, RideDraft, RideField, RideFormEvent, RideFormState};
pub use ride_list::{ListingPhase, LoadTicket, RefreshPolicy, RideListState};
pub use ride_request::{Notice, RequestField, RequestFlow, RequestFlowError, SendRequest};
