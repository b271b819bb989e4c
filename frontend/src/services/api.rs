use async_trait::async_trait;
use gloo::net::http::{Request, Response};
use log::warn;
use shared::{NewRideOffer, NewRideRequest, RideId, RideOffer};
use thiserror::Error;

use crate::services::config::AppConfig;

/// Low-level failure of a single backend call.
///
/// Kept detailed for logging; users only ever see the collapsed
/// [`OperationError`] message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

/// The three backend operations this client performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateRide,
    LoadRides,
    SendRequest,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateRide => "Failed to create ride",
            Operation::LoadRides => "Failed to load rides",
            Operation::SendRequest => "Failed to send request",
        }
    }
}

/// A failed operation as the user sees it: one fixed message per operation,
/// whatever the underlying cause.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .operation.failure_message())]
pub struct OperationError {
    pub operation: Operation,
    #[source]
    pub source: ApiError,
}

impl OperationError {
    pub fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }
}

/// The ride backend as seen from the client (see `GET/POST /api/rides`).
#[async_trait(?Send)]
pub trait RideBackend {
    /// `POST /api/rides`; the response body is discarded
    async fn create_ride(&self, ride: &NewRideOffer) -> Result<(), ApiError>;

    /// `GET /api/rides`
    async fn list_rides(&self) -> Result<Vec<RideOffer>, ApiError>;

    /// `POST /api/rides/{id}/requests`; the response body is discarded
    async fn create_request(
        &self,
        ride_id: &RideId,
        request: &NewRideRequest,
    ) -> Result<(), ApiError>;
}

/// API client for communicating with the ride backend
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client pointed at the configured backend
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_env().backend_url)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rides_url(&self) -> String {
        format!("{}/api/rides", self.base_url)
    }

    pub fn requests_url(&self, ride_id: &RideId) -> String {
        format!("{}/api/rides/{}/requests", self.base_url, ride_id)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Status { status, message })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a ride listing one record at a time. A record that doesn't fit
/// the ride shape is logged and left out; the rest of the listing still
/// shows.
pub fn decode_rides(records: Vec<serde_json::Value>) -> Vec<RideOffer> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(ride) => Some(ride),
            Err(e) => {
                warn!("Skipping malformed ride at index {}: {}", index, e);
                None
            }
        })
        .collect()
}

#[async_trait(?Send)]
impl RideBackend for ApiClient {
    async fn create_ride(&self, ride: &NewRideOffer) -> Result<(), ApiError> {
        let response = Request::post(&self.rides_url())
            .json(ride)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }

    async fn list_rides(&self) -> Result<Vec<RideOffer>, ApiError> {
        let response = Request::get(&self.rides_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::ensure_success(response)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await
            .map(decode_rides)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_request(
        &self,
        ride_id: &RideId,
        request: &NewRideRequest,
    ) -> Result<(), ApiError> {
        let response = Request::post(&self.requests_url(ride_id))
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::ensure_success(response).await.map(|_| ())
    }
}
