use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::controllers::{EventBus, RideListController};
use crate::services::api::ApiClient;
use crate::state::{RefreshPolicy, RideFormEvent};

#[derive(Clone, PartialEq)]
pub struct RideListOptions {
    pub policy: RefreshPolicy,
    /// Reload when the ride form reports a newly posted ride
    pub refresh_on_create: bool,
}

pub struct UseRideListResult {
    pub controller: Rc<RideListController<ApiClient>>,
    pub refresh: Callback<()>,
}

/// Ride listing controller that loads once on mount and, optionally, again
/// after every posted ride.
#[hook]
pub fn use_ride_list(
    api_client: &ApiClient,
    events: &EventBus<RideFormEvent>,
    options: RideListOptions,
) -> UseRideListResult {
    let update = use_force_update();
    let controller = {
        let api_client = api_client.clone();
        let policy = options.policy;
        use_memo((), move |_| RideListController::new(Rc::new(api_client), policy))
    };

    let refresh = {
        let controller = controller.clone();
        use_callback((), move |_, _| {
            let controller = controller.clone();
            spawn_local(async move {
                controller.load().await;
            });
        })
    };

    {
        let controller = controller.clone();
        let events = events.clone();
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            controller.set_on_change(move || update.force_update());
            refresh.emit(());

            let subscription = options.refresh_on_create.then(|| {
                let refresh = refresh.clone();
                events.subscribe(move |event: &RideFormEvent| match event {
                    RideFormEvent::RideCreated => refresh.emit(()),
                })
            });

            move || {
                if let Some(id) = subscription {
                    events.unsubscribe(id);
                }
            }
        });
    }

    UseRideListResult { controller, refresh }
}
