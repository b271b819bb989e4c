use yew::prelude::*;

use crate::state::RideCard;

#[derive(Properties, PartialEq)]
pub struct RideCardViewProps {
    pub card: RideCard,
    pub on_request: Callback<()>,
}

#[function_component(RideCardView)]
pub fn ride_card_view(props: &RideCardViewProps) -> Html {
    let card = &props.card;
    let on_click = {
        let on_request = props.on_request.clone();
        Callback::from(move |_: MouseEvent| on_request.emit(()))
    };

    html! {
        <div class="ride-card">
            <div class="ride-card-header">
                <h3 class="ride-route">{card.route.clone()}</h3>
                <span class="ride-departure">{card.departure.clone()}</span>
            </div>
            <p class="ride-driver">{card.driver.clone()}</p>
            <p class="ride-seats">{card.seats_label()}</p>
            {if let Some(notes) = card.notes.as_ref() {
                html! { <p class="ride-notes">{notes.clone()}</p> }
            } else { html! {} }}
            <div class="ride-card-actions">
                <button class="btn btn-request" onclick={on_click}>{"Request"}</button>
                <span class="ride-contact">{card.contact.clone()}</span>
            </div>
        </div>
    }
}
