use chrono::Local;
use yew::prelude::*;

use crate::state::ride_card::{format_departure, route};
use crate::state::{RequestField, RequestFlow};

#[derive(Properties, PartialEq)]
pub struct RequestModalProps {
    pub flow: RequestFlow,
    pub on_input: Callback<InputEvent>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(RequestModal)]
pub fn request_modal(props: &RequestModalProps) -> Html {
    let (Some(ride), Some(draft)) = (props.flow.target(), props.flow.draft()) else {
        return html! {};
    };
    let sending = props.flow.is_sending();

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-overlay">
            <div class="modal">
                <h3>{"Request Ride"}</h3>
                <p class="modal-subtitle">
                    {format!("{} · {}", route(ride), format_departure(&ride.departure_time, &Local))}
                </p>

                {if let Some(error) = props.flow.error() {
                    html! { <p class="form-message error">{error.to_string()}</p> }
                } else { html! {} }}

                <form class="request-form" onsubmit={on_submit}>
                    <input
                        name={RequestField::RequesterName.name()}
                        placeholder={RequestField::RequesterName.label()}
                        value={draft.requester_name.clone()}
                        oninput={props.on_input.clone()}
                        required={true}
                    />
                    <input
                        name={RequestField::Contact.name()}
                        placeholder={RequestField::Contact.label()}
                        value={draft.contact.clone()}
                        oninput={props.on_input.clone()}
                        required={true}
                    />
                    <textarea
                        name={RequestField::Message.name()}
                        placeholder={RequestField::Message.label()}
                        rows="3"
                        value={draft.message.clone()}
                        oninput={props.on_input.clone()}
                    />
                    <div class="modal-actions">
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={sending}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={sending}>
                            {props.flow.send_label()}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
