//! # Ride Request Flow
//!
//! Closed → Open → Sending → {Closed + confirmation, Open + error}.
//!
//! The target ride is captured when the flow opens and dropped in the same
//! transition that closes it. Requests are addressed by ride id only, so a
//! listing refresh while the flow is open cannot affect them.

use shared::{NewRideRequest, RideId, RideOffer};
use std::str::FromStr;
use thiserror::Error;

use crate::services::api::OperationError;

pub const REQUEST_SENT: &str = "Request sent to driver!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    RequesterName,
    Contact,
    Message,
}

impl RequestField {
    pub fn name(self) -> &'static str {
        match self {
            RequestField::RequesterName => "requester_name",
            RequestField::Contact => "contact",
            RequestField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestField::RequesterName => "Your name",
            RequestField::Contact => "Contact",
            RequestField::Message => "Message (optional)",
        }
    }
}

impl FromStr for RequestField {
    type Err = RequestFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester_name" => Ok(RequestField::RequesterName),
            "contact" => Ok(RequestField::Contact),
            "message" => Ok(RequestField::Message),
            other => Err(RequestFlowError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFlowError {
    #[error("No ride selected")]
    NoRideSelected,

    #[error("A request is already being sent")]
    AlreadySending,

    #[error("Cannot cancel while the request is being sent")]
    CancelWhileSending,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{} is required", .0.label())]
    Missing(RequestField),
}

/// Something the user should be told once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RequestSent,
    SendFailed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::RequestSent => REQUEST_SENT,
            Notice::SendFailed(message) => message,
        }
    }
}

/// Everything needed to issue `POST /api/rides/{id}/requests`
#[derive(Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub ride_id: RideId,
    pub body: NewRideRequest,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestFlow {
    #[default]
    Closed,
    Open {
        ride: RideOffer,
        draft: NewRideRequest,
        error: Option<String>,
    },
    Sending {
        ride: RideOffer,
        draft: NewRideRequest,
    },
}

impl RequestFlow {
    /// Select `ride` and start with an empty draft. Ignored unless closed.
    pub fn open(&self, ride: RideOffer) -> Self {
        match self {
            RequestFlow::Closed => RequestFlow::Open {
                ride,
                draft: NewRideRequest::default(),
                error: None,
            },
            _ => self.clone(),
        }
    }

    pub fn update_field(&self, field: RequestField, value: &str) -> Self {
        match self {
            RequestFlow::Open { ride, draft, error } => {
                let mut draft = draft.clone();
                match field {
                    RequestField::RequesterName => draft.requester_name = value.to_string(),
                    RequestField::Contact => draft.contact = value.to_string(),
                    RequestField::Message => draft.message = value.to_string(),
                }
                RequestFlow::Open {
                    ride: ride.clone(),
                    draft,
                    error: error.clone(),
                }
            }
            _ => self.clone(),
        }
    }

    /// Move to `Sending` and hand back the request to issue.
    ///
    /// Without a selected ride, or while already sending, nothing changes and
    /// nothing may be sent. Blank required fields keep the flow open with the
    /// validation message.
    pub fn begin_send(&self) -> (Self, Result<SendRequest, RequestFlowError>) {
        let (ride, draft) = match self {
            RequestFlow::Closed => return (self.clone(), Err(RequestFlowError::NoRideSelected)),
            RequestFlow::Sending { .. } => {
                return (self.clone(), Err(RequestFlowError::AlreadySending))
            }
            RequestFlow::Open { ride, draft, .. } => (ride, draft),
        };

        let missing = if draft.requester_name.trim().is_empty() {
            Some(RequestField::RequesterName)
        } else if draft.contact.trim().is_empty() {
            Some(RequestField::Contact)
        } else {
            None
        };

        if let Some(field) = missing {
            let err = RequestFlowError::Missing(field);
            let next = RequestFlow::Open {
                ride: ride.clone(),
                draft: draft.clone(),
                error: Some(err.to_string()),
            };
            return (next, Err(err));
        }

        let request = SendRequest {
            ride_id: ride.id.clone(),
            body: draft.clone(),
        };
        let next = RequestFlow::Sending {
            ride: ride.clone(),
            draft: draft.clone(),
        };
        (next, Ok(request))
    }

    /// Apply the backend outcome of the in-flight request
    pub fn finish_send(&self, outcome: Result<(), OperationError>) -> (Self, Option<Notice>) {
        let RequestFlow::Sending { ride, draft } = self else {
            return (self.clone(), None);
        };

        match outcome {
            Ok(()) => (RequestFlow::Closed, Some(Notice::RequestSent)),
            Err(e) => {
                let message = e.to_string();
                let next = RequestFlow::Open {
                    ride: ride.clone(),
                    draft: draft.clone(),
                    error: Some(message.clone()),
                };
                (next, Some(Notice::SendFailed(message)))
            }
        }
    }

    /// Discard the draft and the selected ride
    pub fn cancel(&self) -> Result<Self, RequestFlowError> {
        match self {
            RequestFlow::Sending { .. } => Err(RequestFlowError::CancelWhileSending),
            _ => Ok(RequestFlow::Closed),
        }
    }

    /// Whether the request dialog is on screen
    pub fn is_open(&self) -> bool {
        !matches!(self, RequestFlow::Closed)
    }

    pub fn is_sending(&self) -> bool {
        matches!(self, RequestFlow::Sending { .. })
    }

    pub fn target(&self) -> Option<&RideOffer> {
        match self {
            RequestFlow::Closed => None,
            RequestFlow::Open { ride, .. } | RequestFlow::Sending { ride, .. } => Some(ride),
        }
    }

    pub fn draft(&self) -> Option<&NewRideRequest> {
        match self {
            RequestFlow::Closed => None,
            RequestFlow::Open { draft, .. } | RequestFlow::Sending { draft, .. } => Some(draft),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestFlow::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn send_label(&self) -> &'static str {
        if self.is_sending() {
            "Sending..."
        } else {
            "Send Request"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::{ApiError, Operation};

    fn ride_one() -> RideOffer {
        RideOffer {
            id: RideId::Number(1),
            driver_name: "Ana".to_string(),
            car_model: None,
            origin: "X".to_string(),
            destination: "Y".to_string(),
            seats_available: 2,
            departure_time: "2025-01-01T10:00:00Z".to_string(),
            contact: "a@b.com".to_string(),
            notes: None,
        }
    }

    fn filled() -> RequestFlow {
        RequestFlow::Closed
            .open(ride_one())
            .update_field(RequestField::RequesterName, "Bo")
            .update_field(RequestField::Contact, "bo@x.com")
    }

    fn send_failure() -> OperationError {
        OperationError::new(
            Operation::SendRequest,
            ApiError::Status {
                status: 500,
                message: String::new(),
            },
        )
    }

    #[test]
    fn test_open_starts_with_empty_draft() {
        let flow = RequestFlow::default().open(ride_one());

        assert!(flow.is_open());
        assert_eq!(flow.target(), Some(&ride_one()));
        assert_eq!(flow.draft(), Some(&NewRideRequest::default()));
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_open_is_ignored_when_already_open() {
        let flow = filled();
        let other = RideOffer {
            id: RideId::Number(2),
            ..ride_one()
        };
        assert_eq!(flow.open(other), flow);
    }

    #[test]
    fn test_field_names() {
        for field in [
            RequestField::RequesterName,
            RequestField::Contact,
            RequestField::Message,
        ] {
            assert_eq!(field.name().parse::<RequestField>(), Ok(field));
        }
        assert_eq!(
            "ride_id".parse::<RequestField>(),
            Err(RequestFlowError::UnknownField("ride_id".to_string()))
        );
    }

    #[test]
    fn test_update_field_only_while_open() {
        let closed = RequestFlow::Closed.update_field(RequestField::Message, "hi");
        assert_eq!(closed, RequestFlow::Closed);

        let (sending, _) = filled().begin_send();
        assert_eq!(sending.update_field(RequestField::Message, "hi"), sending);
    }

    #[test]
    fn test_send_without_selection_is_rejected() {
        let (next, request) = RequestFlow::Closed.begin_send();
        assert_eq!(next, RequestFlow::Closed);
        assert_eq!(request, Err(RequestFlowError::NoRideSelected));
    }

    #[test]
    fn test_send_builds_request_for_target_ride() {
        let flow = filled().update_field(RequestField::Message, "Can I bring a bike?");
        let (next, request) = flow.begin_send();

        assert!(next.is_sending());
        assert_eq!(next.send_label(), "Sending...");
        assert_eq!(
            request,
            Ok(SendRequest {
                ride_id: RideId::Number(1),
                body: NewRideRequest {
                    requester_name: "Bo".to_string(),
                    contact: "bo@x.com".to_string(),
                    message: "Can I bring a bike?".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_send_twice_is_rejected() {
        let (sending, _) = filled().begin_send();
        let (again, request) = sending.begin_send();
        assert_eq!(again, sending);
        assert_eq!(request, Err(RequestFlowError::AlreadySending));
    }

    #[test]
    fn test_blank_contact_keeps_flow_open() {
        let flow = filled().update_field(RequestField::Contact, " ");
        let (next, request) = flow.begin_send();

        assert_eq!(request, Err(RequestFlowError::Missing(RequestField::Contact)));
        assert!(!next.is_sending());
        assert_eq!(next.error(), Some("Contact is required"));
        assert_eq!(next.draft(), flow.draft());
    }

    #[test]
    fn test_success_closes_and_drops_target() {
        let (sending, _) = filled().begin_send();
        let (next, notice) = sending.finish_send(Ok(()));

        assert_eq!(next, RequestFlow::Closed);
        assert_eq!(next.target(), None);
        assert_eq!(notice, Some(Notice::RequestSent));
        assert_eq!(Notice::RequestSent.message(), "Request sent to driver!");
    }

    #[test]
    fn test_failure_reopens_with_draft_preserved() {
        let before = filled();
        let (sending, _) = before.begin_send();
        let (next, notice) = sending.finish_send(Err(send_failure()));

        assert!(next.is_open());
        assert!(!next.is_sending());
        assert_eq!(next.draft(), before.draft());
        assert_eq!(next.target(), before.target());
        assert_eq!(next.error(), Some("Failed to send request"));
        assert_eq!(
            notice,
            Some(Notice::SendFailed("Failed to send request".to_string()))
        );
    }

    #[test]
    fn test_retry_after_failure() {
        let (sending, _) = filled().begin_send();
        let (reopened, _) = sending.finish_send(Err(send_failure()));
        let (_, request) = reopened.begin_send();
        assert!(request.is_ok());
    }

    #[test]
    fn test_cancel() {
        assert_eq!(filled().cancel(), Ok(RequestFlow::Closed));
        assert_eq!(RequestFlow::Closed.cancel(), Ok(RequestFlow::Closed));

        let (sending, _) = filled().begin_send();
        assert_eq!(sending.cancel(), Err(RequestFlowError::CancelWhileSending));
    }

    #[test]
    fn test_stray_completion_is_ignored() {
        let flow = filled();
        assert_eq!(flow.finish_send(Ok(())), (flow.clone(), None));
    }
}
