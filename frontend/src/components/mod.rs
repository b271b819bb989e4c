use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

pub mod request_modal;
pub mod ride_card;
pub mod ride_form;
pub mod ride_list;

pub use request_modal::RequestModal;
pub use ride_card::RideCardView;
pub use ride_form::RideForm;
pub use ride_list::RideList;

/// `name` and current value of the input or textarea that fired `e`
pub(crate) fn named_value(e: &InputEvent) -> Option<(String, String)> {
    if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
        return Some((input.name(), input.value()));
    }
    e.target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| (area.name(), area.value()))
}

/// Blocking browser alert, as used for request confirmations
pub(crate) fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("No window to show alert: {}", message);
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        log::warn!("Failed to show alert: {:?}", e);
    }
}
