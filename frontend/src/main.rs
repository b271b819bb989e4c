use log::{info, warn};
use yew::prelude::*;

use ridewave_frontend::components::{RideForm, RideList};
use ridewave_frontend::controllers::EventBus;
use ridewave_frontend::services::api::ApiClient;
use ridewave_frontend::services::config::AppConfig;
use ridewave_frontend::services::logging;
use ridewave_frontend::state::RideFormEvent;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_env());
    let api_client = ApiClient::with_base_url(config.backend_url.clone());
    let events = use_memo((), |_| EventBus::<RideFormEvent>::new());

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"RideWave"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container ride-layout">
                    <RideForm api_client={api_client.clone()} events={(*events).clone()} />
                    <RideList
                        api_client={api_client}
                        events={(*events).clone()}
                        policy={config.refresh_policy}
                        refresh_on_create={config.refresh_on_create}
                    />
                </div>
            </main>

            <footer class="footer">
                <div class="container">
                    {"Share your ride, meet new people, and save on travel."}
                </div>
            </footer>
        </>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    if let Err(e) = logging::init(config.log_level) {
        gloo::console::warn!("Console logger not installed:", e.to_string());
    }

    info!("Starting RideWave against {}", config.backend_url);
    if config.backend_url == ridewave_frontend::services::config::DEFAULT_BACKEND_URL {
        warn!("RIDEWAVE_BACKEND_URL not set at build time, using the default");
    }

    yew::Renderer::<App>::new().render();
}
