//! HTTP adapter mapping for domain errors.
//!
//! Every failed request ends here. The domain error's tier decides the
//! envelope:
//!
//! - rejections answer `401` with `{error, message, paginationInfo?}`;
//! - unexpected failures answer `400` with
//!   `{error, message: "Internal Server Error", errorobj}`, echoing the raw
//!   failure object unchanged.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorTier, INTERNAL_ERROR_MESSAGE};
use crate::middleware::trace::TraceId;

pub use crate::domain::ApiResult;

/// Envelope for a domain rejection (HTTP 401).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectionEnvelope {
    /// Always `true`.
    pub error: bool,
    #[schema(example = "Invalid page number")]
    pub message: String,
    /// Present only when the rejected request was a page request.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<crate::inbound::http::schemas::PaginationInfoSchema>)]
    pub pagination_info: Option<Value>,
}

/// Envelope for an unexpected failure (HTTP 400).
#[derive(Debug, Serialize, ToSchema)]
pub struct FailureEnvelope {
    /// Always `true`.
    pub error: bool,
    #[schema(example = "Internal Server Error")]
    pub message: String,
    /// The underlying failure, e.g.
    /// `{"name": "DuplicateKeyError", "message": "..."}`.
    pub errorobj: Value,
}

fn status_for(tier: ErrorTier) -> StatusCode {
    match tier {
        ErrorTier::Rejection => StatusCode::UNAUTHORIZED,
        ErrorTier::Unexpected => StatusCode::BAD_REQUEST,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code().tier())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let mut builder = HttpResponse::build(self.status_code());
        match self.code().tier() {
            ErrorTier::Rejection => {
                warn!(code = ?self.code(), message = self.message(), ?trace_id, "request rejected");
                builder.json(RejectionEnvelope {
                    error: true,
                    message: self.message().to_owned(),
                    pagination_info: self.details().cloned(),
                })
            }
            ErrorTier::Unexpected => {
                let errorobj = self.details().cloned().unwrap_or_else(|| {
                    json!({ "name": "Error", "message": self.message() })
                });
                error!(%errorobj, ?trace_id, "request failed");
                builder.json(FailureEnvelope {
                    error: true,
                    message: INTERNAL_ERROR_MESSAGE.to_owned(),
                    errorobj,
                })
            }
        }
    }
}

/// Route malformed JSON bodies through the failure envelope instead of
/// actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::unexpected("JsonPayloadError", err.to_string(), None).into()
}
