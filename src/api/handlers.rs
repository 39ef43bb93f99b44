// Navigation document handlers

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;

use super::response::json_response;
use super::types::{
    FailureBody, MessageBody, ValidationFailedBody, MSG_BODY_TOO_LARGE, MSG_BODY_UNREADABLE,
    MSG_INVALID_DOCUMENT, MSG_INVALID_JSON, MSG_READ_FAILED, MSG_SAVED, MSG_WRITE_FAILED,
};
use crate::config::AppState;
use crate::logger;
use crate::navigation::validate;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a request body could not be turned into a JSON value
#[derive(Debug, Error)]
enum BodyError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("{0}")]
    Unreadable(String),
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl BodyError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unreadable(_) | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
        }
    }

    const fn message(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => MSG_BODY_TOO_LARGE,
            Self::Unreadable(_) => MSG_BODY_UNREADABLE,
            Self::InvalidJson(_) => MSG_INVALID_JSON,
        }
    }
}

/// GET/HEAD: return the stored document as-is
pub async fn get_navigation(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let cors = state.enable_cors();

    match state.store.load().await {
        Ok(document) => json_response(StatusCode::OK, &document, cors, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to read navigation data: {e}"));
            let body = FailureBody {
                message: MSG_READ_FAILED,
                detail: e.to_string(),
            };
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &body, cors, is_head)
        }
    }
}

/// PUT: validate the submitted document and, if it passes, replace the stored one
pub async fn put_navigation<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let cors = state.enable_cors();
    let limit = state.max_body_size();

    let payload = match read_json_body(req, limit).await {
        Ok(payload) => payload,
        Err(e) => {
            logger::log_warning(&format!("Rejected navigation update body: {e}"));
            let body = FailureBody {
                message: e.message(),
                detail: e.to_string(),
            };
            return json_response(e.status(), &body, cors, false);
        }
    };

    let validation = validate(&payload);
    if !validation.is_valid() {
        logger::log_info(&format!(
            "Rejected navigation update: {} validation error(s)",
            validation.errors.len()
        ));
        let body = ValidationFailedBody {
            message: MSG_INVALID_DOCUMENT,
            errors: &validation.errors,
        };
        return json_response(StatusCode::BAD_REQUEST, &body, cors, false);
    }

    match state.store.save(&validation.document).await {
        Ok(()) => {
            let categories = validation.document.as_array().map_or(0, Vec::len);
            logger::log_info(&format!("Navigation data saved ({categories} categories)"));
            json_response(StatusCode::OK, &MessageBody { message: MSG_SAVED }, cors, false)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to write navigation data: {e}"));
            let body = FailureBody {
                message: MSG_WRITE_FAILED,
                detail: e.to_string(),
            };
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &body, cors, false)
        }
    }
}

/// Collect at most `limit` bytes of body and parse them as JSON
///
/// An empty body is read as an empty object, which the validator then
/// rejects as a non-array root.
async fn read_json_body<B>(req: Request<B>, limit: u64) -> Result<Value, BodyError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    if declared_length(&req).is_some_and(|length| length > limit) {
        return Err(BodyError::TooLarge { limit });
    }

    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    let collected = Limited::new(req.into_body(), max)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                BodyError::TooLarge { limit }
            } else {
                BodyError::Unreadable(e.to_string())
            }
        })?;

    let bytes = collected.to_bytes();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Content-Length as sent by the client, if present and numeric
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    let value = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    match value.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(length) => Some(length),
        None => {
            logger::log_warning(&format!(
                "Invalid Content-Length value {value:?}, relying on the body limit"
            ));
            None
        }
    }
}
