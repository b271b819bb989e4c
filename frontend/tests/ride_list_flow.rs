#![cfg(not(target_arch = "wasm32"))]

mod common;

use chrono::Utc;
use common::{ride, server_error, Call, MockBackend};
use ridewave_frontend::controllers::{EventBus, RideFormController, RideListController};
use ridewave_frontend::state::{ListingPhase, RefreshPolicy, RideFormEvent};
use shared::{RideId, RideOffer};
use std::rc::Rc;
use tokio::task::{spawn_local, yield_now, LocalSet};

fn list_controller(
    backend: &Rc<MockBackend>,
    policy: RefreshPolicy,
) -> Rc<RideListController<MockBackend, Utc>> {
    Rc::new(RideListController::with_time_zone(backend.clone(), policy, Utc))
}

#[tokio::test]
async fn test_single_ride_is_rendered_as_one_card() {
    let backend = Rc::new(MockBackend::new());
    let payload: Vec<RideOffer> = serde_json::from_str(
        r#"[{"id":1,"origin":"X","destination":"Y","seats_available":2,
            "departure_time":"2025-01-01T10:00:00Z","driver_name":"Ana","contact":"a@b.com"}]"#,
    )
    .unwrap();
    backend.reply_list_rides(Ok(payload));
    let controller = list_controller(&backend, RefreshPolicy::default());

    assert_eq!(controller.state().phase, ListingPhase::Idle);
    controller.load().await;

    let state = controller.state();
    assert_eq!(state.phase, ListingPhase::Loaded);
    let cards = controller.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, RideId::Number(1));
    assert_eq!(cards[0].route, "X → Y");
    assert_eq!(cards[0].seats.to_string(), "2");
    assert_eq!(cards[0].driver, "Driver: Ana");
    assert_eq!(cards[0].departure, "2025-01-01 10:00");
}

#[tokio::test]
async fn test_repeated_loads_of_a_stable_backend_are_identical() {
    let backend = Rc::new(MockBackend::new());
    let rides = vec![ride(1, "X", "Y"), ride(2, "Y", "Z")];
    backend.reply_list_rides(Ok(rides.clone()));
    backend.reply_list_rides(Ok(rides.clone()));
    let controller = list_controller(&backend, RefreshPolicy::default());

    controller.load().await;
    let first = controller.state().rides;
    controller.load().await;
    let second = controller.state().rides;

    assert_eq!(first, rides);
    assert_eq!(first, second);
    assert_eq!(backend.calls(), vec![Call::ListRides, Call::ListRides]);
}

#[tokio::test]
async fn test_refresh_discards_stale_entries() {
    let backend = Rc::new(MockBackend::new());
    backend.reply_list_rides(Ok(vec![ride(1, "X", "Y"), ride(2, "Y", "Z")]));
    backend.reply_list_rides(Ok(vec![ride(3, "A", "B")]));
    let controller = list_controller(&backend, RefreshPolicy::default());

    controller.load().await;
    controller.load().await;

    assert_eq!(controller.state().rides, vec![ride(3, "A", "B")]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_what_was_shown() {
    let backend = Rc::new(MockBackend::new());
    backend.reply_list_rides(Ok(vec![ride(1, "X", "Y")]));
    backend.reply_list_rides(Err(server_error(502)));
    let controller = list_controller(&backend, RefreshPolicy::default());

    controller.load().await;
    controller.load().await;

    let state = controller.state();
    assert_eq!(state.phase, ListingPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("Failed to load rides"));
    assert_eq!(state.rides, vec![ride(1, "X", "Y")]);
    assert_eq!(controller.cards().len(), 1);
}

#[tokio::test]
async fn test_first_load_failure() {
    let backend = Rc::new(MockBackend::new());
    backend.reply_list_rides(Err(server_error(500)));
    let controller = list_controller(&backend, RefreshPolicy::default());

    controller.load().await;

    let state = controller.state();
    assert_eq!(state.phase, ListingPhase::Failed);
    assert!(state.rides.is_empty());
}

/// Starts two overlapping loads, resolves the second one with `set_a`
/// and only then the first one with `set_b`.
async fn race(policy: RefreshPolicy, set_a: Vec<RideOffer>, set_b: Vec<RideOffer>) -> Vec<RideOffer> {
    let backend = Rc::new(MockBackend::new());
    let first_reply = backend.defer_list_rides();
    let second_reply = backend.defer_list_rides();
    let controller = list_controller(&backend, policy);

    LocalSet::new()
        .run_until(async {
            let first = {
                let controller = controller.clone();
                spawn_local(async move { controller.load().await })
            };
            let second = {
                let controller = controller.clone();
                spawn_local(async move { controller.load().await })
            };
            yield_now().await;
            assert!(controller.state().is_loading());

            second_reply.send(Ok(set_a)).unwrap();
            second.await.unwrap();
            assert_eq!(controller.state().phase, ListingPhase::Loaded);

            first_reply.send(Ok(set_b)).unwrap();
            first.await.unwrap();
        })
        .await;

    assert_eq!(backend.calls().len(), 2);
    controller.state().rides
}

#[tokio::test]
async fn test_overlapping_loads_last_resolved_wins() {
    let set_a = vec![ride(1, "A", "A")];
    let set_b = vec![ride(2, "B", "B")];

    let shown = race(RefreshPolicy::LastResolvedWins, set_a, set_b.clone()).await;
    assert_eq!(shown, set_b);
}

#[tokio::test]
async fn test_overlapping_loads_latest_issued_wins() {
    let set_a = vec![ride(1, "A", "A")];
    let set_b = vec![ride(2, "B", "B")];

    let shown = race(RefreshPolicy::LatestIssuedWins, set_a.clone(), set_b).await;
    assert_eq!(shown, set_a);
}

#[tokio::test]
async fn test_stale_failure_does_not_mark_listing_failed() {
    let backend = Rc::new(MockBackend::new());
    let first_reply = backend.defer_list_rides();
    let second_reply = backend.defer_list_rides();
    let controller = list_controller(&backend, RefreshPolicy::LatestIssuedWins);

    LocalSet::new()
        .run_until(async {
            let first = {
                let controller = controller.clone();
                spawn_local(async move { controller.load().await })
            };
            let second = {
                let controller = controller.clone();
                spawn_local(async move { controller.load().await })
            };
            yield_now().await;

            first_reply.send(Err(server_error(500))).unwrap();
            first.await.unwrap();
            assert!(controller.state().is_loading());
            assert_eq!(controller.state().error, None);

            second_reply.send(Ok(vec![ride(1, "X", "Y")])).unwrap();
            second.await.unwrap();
        })
        .await;

    let state = controller.state();
    assert_eq!(state.phase, ListingPhase::Loaded);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_posting_a_ride_can_trigger_a_refresh() {
    let backend = Rc::new(MockBackend::new());
    backend.reply_create_ride(Ok(()));
    backend.reply_list_rides(Ok(vec![ride(5, "X", "Y")]));

    let events = EventBus::<RideFormEvent>::new();
    let form = RideFormController::with_time_zone(backend.clone(), events.clone(), Utc);
    let listing = list_controller(&backend, RefreshPolicy::default());

    LocalSet::new()
        .run_until(async {
            let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();
            let done_tx = std::cell::RefCell::new(Some(done_tx));
            {
                let listing = listing.clone();
                events.subscribe(move |_: &RideFormEvent| {
                    let listing = listing.clone();
                    let done_tx = done_tx.borrow_mut().take();
                    spawn_local(async move {
                        listing.load().await;
                        if let Some(done_tx) = done_tx {
                            let _ = done_tx.send(());
                        }
                    });
                });
            }

            for (name, value) in [
                ("driver_name", "Ana"),
                ("origin", "X"),
                ("destination", "Y"),
                ("departure_time", "2025-01-01T10:00"),
                ("contact", "a@b.com"),
            ] {
                form.update_field(name, value).unwrap();
            }
            form.submit().await;
            done_rx.await.unwrap();
        })
        .await;

    assert_eq!(listing.state().rides, vec![ride(5, "X", "Y")]);
    assert!(matches!(backend.calls().as_slice(), [Call::CreateRide(_), Call::ListRides]));
}
