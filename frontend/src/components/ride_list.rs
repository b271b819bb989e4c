use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{alert, named_value, RequestModal, RideCardView};
use crate::controllers::EventBus;
use crate::hooks::{use_ride_list, use_ride_request, RideListOptions};
use crate::services::api::ApiClient;
use crate::state::{RefreshPolicy, RequestFlowError, RideFormEvent};

#[derive(Properties, PartialEq)]
pub struct RideListProps {
    pub api_client: ApiClient,
    pub events: EventBus<RideFormEvent>,
    #[prop_or_default]
    pub policy: RefreshPolicy,
    #[prop_or(true)]
    pub refresh_on_create: bool,
}

#[function_component(RideList)]
pub fn ride_list(props: &RideListProps) -> Html {
    let listing = use_ride_list(
        &props.api_client,
        &props.events,
        RideListOptions {
            policy: props.policy,
            refresh_on_create: props.refresh_on_create,
        },
    );
    let requests = use_ride_request(&props.api_client);

    let state = listing.controller.state();
    let flow = requests.flow();

    let on_refresh = {
        let refresh = listing.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let on_request_input = {
        let requests = requests.clone();
        Callback::from(move |e: InputEvent| {
            let Some((name, value)) = named_value(&e) else {
                return;
            };
            if let Err(err) = requests.update_field(&name, &value) {
                log::warn!("Ignoring input: {}", err);
            }
        })
    };

    let on_request_submit = {
        let requests = requests.clone();
        Callback::from(move |_: ()| {
            let requests = requests.clone();
            spawn_local(async move {
                match requests.submit().await {
                    Ok(notice) => alert(notice.message()),
                    Err(RequestFlowError::Missing(field)) => {
                        log::debug!("Request incomplete: {} missing", field.name());
                    }
                    Err(err) => log::warn!("Request not sent: {}", err),
                }
            });
        })
    };

    let on_request_cancel = {
        let requests = requests.clone();
        Callback::from(move |_: ()| {
            if let Err(err) = requests.cancel() {
                log::warn!("{}", err);
            }
        })
    };

    let cards = listing.controller.cards();

    html! {
        <section class="ride-list-section">
            <div class="ride-list-header">
                <h2>{"Latest Rides"}</h2>
                <button class="btn btn-link" onclick={on_refresh}>{"Refresh"}</button>
            </div>

            {if state.is_loading() {
                html! { <p class="loading">{"Loading rides..."}</p> }
            } else { html! {} }}

            {if let Some(error) = state.error.as_ref() {
                html! { <p class="form-message error">{error.clone()}</p> }
            } else { html! {} }}

            <div class="ride-grid">
                {for cards.into_iter().zip(state.rides.iter().cloned()).map(|(card, ride)| {
                    let key = card.id.to_string();
                    let on_request = {
                        let requests = requests.clone();
                        Callback::from(move |_: ()| requests.open(ride.clone()))
                    };
                    html! { <RideCardView key={key} card={card} on_request={on_request} /> }
                })}
            </div>

            <RequestModal
                flow={flow}
                on_input={on_request_input}
                on_submit={on_request_submit}
                on_cancel={on_request_cancel}
            />
        </section>
    }
}
