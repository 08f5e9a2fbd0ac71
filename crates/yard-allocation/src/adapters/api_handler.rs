//! # JSON Request Handler
//!
//! Stand-in for the request layer: one JSON object in, one JSON object out.
//!
//! ## Supported Methods
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `suggestion` | yard, container_number, attributes | Position |
//! | `placement` | yard, block, slot, row, tier, container_number, attributes? | - |
//! | `pickup` | yard, container_number | - |
//! | `yard_plans` | yard | plans with blocks |
//! | `health` | - | store and cache status |
//!
//! ## Status Mapping
//!
//! | Error kind | Status |
//! |------------|--------|
//! | NotFound | 404 |
//! | OutOfBounds, malformed request | 400 |
//! | Conflict | 409 |
//! | Exhausted | 422 |
//! | TransientStoreFailure, unhealthy | 503 |

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AllocationError, ErrorKind};
use crate::ports::{PickupRequest, PlacementRequest, SuggestionRequest, YardAllocationApi};

/// A request, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ApiRequest {
    Suggestion(SuggestionRequest),
    Placement(PlacementRequest),
    Pickup(PickupRequest),
    YardPlans { yard: String },
    Health,
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            ApiRequest::Suggestion(_) => "suggestion",
            ApiRequest::Placement(_) => "placement",
            ApiRequest::Pickup(_) => "pickup",
            ApiRequest::YardPlans { .. } => "yard_plans",
            ApiRequest::Health => "health",
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        fn blank(s: &str) -> bool {
            s.trim().is_empty()
        }
        match self {
            ApiRequest::Suggestion(r) if blank(&r.yard) => Some("yard"),
            ApiRequest::Suggestion(r) if blank(&r.container_number) => Some("container_number"),
            ApiRequest::Placement(r) if blank(&r.yard) => Some("yard"),
            ApiRequest::Placement(r) if blank(&r.block) => Some("block"),
            ApiRequest::Placement(r) if blank(&r.container_number) => Some("container_number"),
            ApiRequest::Pickup(r) if blank(&r.yard) => Some("yard"),
            ApiRequest::Pickup(r) if blank(&r.container_number) => Some("container_number"),
            ApiRequest::YardPlans { yard } if blank(yard) => Some("yard"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Stable code, e.g. `POSITION_OCCUPIED`.
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub request_id: Uuid,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl ApiResponse {
    fn ok(request_id: Uuid, result: Option<serde_json::Value>) -> Self {
        Self {
            request_id,
            status: 200,
            result,
            error: None,
        }
    }

    fn rejected(request_id: Uuid, status: u16, code: &str, message: String) -> Self {
        Self {
            request_id,
            status,
            result: None,
            error: Some(ApiErrorBody {
                code: code.to_string(),
                message,
            }),
        }
    }

    fn from_error(request_id: Uuid, err: &AllocationError) -> Self {
        Self::rejected(request_id, status_for(err.kind()), err.code(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::NotFound => 404,
        ErrorKind::OutOfBounds => 400,
        ErrorKind::Conflict => 409,
        ErrorKind::Exhausted => 422,
        ErrorKind::TransientStoreFailure => 503,
    }
}

/// Routes decoded requests to a [`YardAllocationApi`].
pub struct ApiHandler<A: YardAllocationApi> {
    api: Arc<A>,
}

impl<A: YardAllocationApi> ApiHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Decode one JSON object and handle it.
    ///
    /// A `request_id` field, if present and a valid UUID, is echoed back;
    /// otherwise a fresh one is assigned.
    pub async fn handle_json(&self, raw: &str) -> ApiResponse {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                return ApiResponse::rejected(
                    Uuid::new_v4(),
                    400,
                    "INVALID_REQUEST",
                    format!("malformed JSON: {e}"),
                )
            }
        };

        let request_id = value
            .get("request_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        match serde_json::from_value::<ApiRequest>(value) {
            Ok(request) => self.handle(request_id, request).await,
            Err(e) => {
                warn!(%request_id, error = %e, "[yard] undecodable request");
                ApiResponse::rejected(request_id, 400, "INVALID_REQUEST", e.to_string())
            }
        }
    }

    pub async fn handle(&self, request_id: Uuid, request: ApiRequest) -> ApiResponse {
        let method = request.method();
        debug!(%request_id, method, "[yard] request received");

        if let Some(field) = request.missing_field() {
            return ApiResponse::rejected(
                request_id,
                400,
                "INVALID_REQUEST",
                format!("{field} must not be empty"),
            );
        }

        let response = match request {
            ApiRequest::Suggestion(r) => match self.api.get_suggestion(r).await {
                Ok(position) => ApiResponse::ok(request_id, to_value(&position)),
                Err(e) => ApiResponse::from_error(request_id, &e),
            },
            ApiRequest::Placement(r) => match self.api.place_container(r).await {
                Ok(()) => ApiResponse::ok(request_id, None),
                Err(e) => ApiResponse::from_error(request_id, &e),
            },
            ApiRequest::Pickup(r) => match self.api.pickup_container(r).await {
                Ok(()) => ApiResponse::ok(request_id, None),
                Err(e) => ApiResponse::from_error(request_id, &e),
            },
            ApiRequest::YardPlans { yard } => match self.api.yard_plans(&yard).await {
                Ok(plans) => ApiResponse::ok(request_id, to_value(&plans)),
                Err(e) => ApiResponse::from_error(request_id, &e),
            },
            ApiRequest::Health => {
                let report = self.api.health().await;
                let mut response = ApiResponse::ok(request_id, to_value(&report));
                if !report.is_healthy() {
                    response.status = 503;
                }
                response
            }
        };

        debug!(%request_id, method, status = response.status, "[yard] request handled");
        response
    }
}

fn to_value<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}
