use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::named_value;
use crate::controllers::EventBus;
use crate::hooks::use_ride_form;
use crate::services::api::ApiClient;
use crate::state::{RideDraft, RideField, RideFormEvent};

#[derive(Properties, PartialEq)]
pub struct RideFormProps {
    pub api_client: ApiClient,
    /// Receives `RideCreated` after every successful post
    pub events: EventBus<RideFormEvent>,
}

fn field_input(field: RideField, draft: &RideDraft, oninput: &Callback<InputEvent>) -> Html {
    let value = draft.value(field);
    match field {
        RideField::Notes => html! {
            <textarea
                name={field.name()}
                placeholder={field.label()}
                rows="3"
                value={value}
                oninput={oninput.clone()}
            />
        },
        RideField::SeatsAvailable => html! {
            <input
                type="number"
                min="1"
                name={field.name()}
                placeholder={field.label()}
                value={value}
                oninput={oninput.clone()}
                required={true}
            />
        },
        RideField::DepartureTime => html! {
            <input
                type="datetime-local"
                name={field.name()}
                value={value}
                oninput={oninput.clone()}
                required={true}
            />
        },
        _ => html! {
            <input
                type="text"
                name={field.name()}
                placeholder={field.label()}
                value={value}
                oninput={oninput.clone()}
                required={field.is_required()}
            />
        },
    }
}

#[function_component(RideForm)]
pub fn ride_form(props: &RideFormProps) -> Html {
    let controller = use_ride_form(&props.api_client, &props.events);
    let state = controller.state();

    let on_input = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let Some((name, value)) = named_value(&e) else {
                return;
            };
            if let Err(err) = controller.update_field(&name, &value) {
                log::warn!("Ignoring input: {}", err);
            }
        })
    };

    let on_submit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            spawn_local(async move {
                controller.submit().await;
            });
        })
    };

    html! {
        <section class="ride-form-section">
            <h2>{"Share a Ride"}</h2>

            {if let Some(error) = state.last_error.as_ref() {
                html! { <p class="form-message error">{error.clone()}</p> }
            } else { html! {} }}

            {if let Some(success) = state.last_success.as_ref() {
                html! { <p class="form-message success">{success.clone()}</p> }
            } else { html! {} }}

            <form class="ride-form" onsubmit={on_submit}>
                {for RideField::ALL.into_iter().map(|field| field_input(field, &state.draft, &on_input))}
                <button type="submit" class="btn btn-primary" disabled={!state.can_submit()}>
                    {state.submit_label()}
                </button>
            </form>
        </section>
    }
}
