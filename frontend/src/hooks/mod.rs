pub mod use_ride_form;
pub mod use_ride_list;
pub mod use_ride_request;

pub use use_ride_form::use_ride_form;
pub use use_ride_list::{use_ride_list, RideListOptions, UseRideListResult};
pub use use_ride_request::use_ride_request;
