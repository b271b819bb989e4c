use std::rc::Rc;
use yew::prelude::*;

use crate::controllers::{EventBus, RideFormController};
use crate::services::api::ApiClient;
use crate::state::RideFormEvent;

/// Ride form controller bound to the component's lifetime; every state
/// change re-renders the component.
#[hook]
pub fn use_ride_form(
    api_client: &ApiClient,
    events: &EventBus<RideFormEvent>,
) -> Rc<RideFormController<ApiClient>> {
    let update = use_force_update();
    let controller = {
        let api_client = api_client.clone();
        let events = events.clone();
        use_memo((), move |_| RideFormController::new(Rc::new(api_client), events))
    };

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            controller.set_on_change(move || update.force_update());
            || ()
        });
    }

    controller
}
