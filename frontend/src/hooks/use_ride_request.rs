use std::rc::Rc;
use yew::prelude::*;

use crate::controllers::RideRequestController;
use crate::services::api::ApiClient;

#[hook]
pub fn use_ride_request(api_client: &ApiClient) -> Rc<RideRequestController<ApiClient>> {
    let update = use_force_update();
    let controller = {
        let api_client = api_client.clone();
        use_memo((), move |_| RideRequestController::new(Rc::new(api_client)))
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
