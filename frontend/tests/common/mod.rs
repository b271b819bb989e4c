#![allow(dead_code)]

use async_trait::async_trait;
use ridewave_frontend::services::api::{ApiError, RideBackend};
use shared::{NewRideOffer, NewRideRequest, RideId, RideOffer};
use std::cell::RefCell;
use std::collections::VecDeque;
use tokio::sync::oneshot;

/// What the mock answers to one call
pub enum Reply<T> {
    Ready(Result<T, ApiError>),
    /// Resolves when the test sends on the paired channel
    Deferred(oneshot::Receiver<Result<T, ApiError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, ApiError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string()))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateRide(NewRideOffer),
    ListRides,
    CreateRequest(RideId, NewRideRequest),
}

/// Scripted in-memory backend that records every call it receives
#[derive(Default)]
pub struct MockBackend {
    calls: RefCell<Vec<Call>>,
    create_ride: RefCell<VecDeque<Reply<()>>>,
    list_rides: RefCell<VecDeque<Reply<Vec<RideOffer>>>>,
    create_request: RefCell<VecDeque<Reply<()>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn reply_create_ride(&self, result: Result<(), ApiError>) {
        self.create_ride.borrow_mut().push_back(Reply::Ready(result));
    }

    pub fn defer_create_ride(&self) -> oneshot::Sender<Result<(), ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.create_ride.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn reply_list_rides(&self, result: Result<Vec<RideOffer>, ApiError>) {
        self.list_rides.borrow_mut().push_back(Reply::Ready(result));
    }

    pub fn defer_list_rides(&self) -> oneshot::Sender<Result<Vec<RideOffer>, ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.list_rides.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn defer_create_request(&self) -> oneshot::Sender<Result<(), ApiError>> {
        let (tx, rx) = oneshot::channel();
        self.create_request.borrow_mut().push_back(Reply::Deferred(rx));
        tx
    }

    pub fn reply_create_request(&self, result: Result<(), ApiError>) {
        self.create_request.borrow_mut().push_back(Reply::Ready(result));
    }

    fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Reply<T> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Reply::Ready(Err(ApiError::Network("no scripted reply".to_string()))))
    }
}

#[async_trait(?Send)]
impl RideBackend for MockBackend {
    async fn create_ride(&self, ride: &NewRideOffer) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::CreateRide(ride.clone()));
        Self::next(&self.create_ride).resolve().await
    }

    async fn list_rides(&self) -> Result<Vec<RideOffer>, ApiError> {
        self.calls.borrow_mut().push(Call::ListRides);
        Self::next(&self.list_rides).resolve().await
    }

    async fn create_request(
        &self,
        ride_id: &RideId,
        request: &NewRideRequest,
    ) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(Call::CreateRequest(ride_id.clone(), request.clone()));
        Self::next(&self.create_request).resolve().await
    }
}

pub fn server_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        message: "Internal Server Error".to_string(),
    }
}

pub fn ride(id: i64, origin: &str, destination: &str) -> RideOffer {
    RideOffer {
        id: RideId::Number(id),
        driver_name: "Ana".to_string(),
        car_model: None,
        origin: origin.to_string(),
        destination: destination.to_string(),
        seats_available: 2,
        departure_time: "2025-01-01T10:00:00Z".to_string(),
        contact: "a@b.com".to_string(),
        notes: None,
    }
}
