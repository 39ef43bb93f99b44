// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http::response::finish;
use crate::logger;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Build JSON response; `is_head` keeps the headers but drops the body
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    enable_cors: bool,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"message":"Internal server error"}"#),
                enable_cors,
                false,
            );
        }
    };

    raw_json(status, Bytes::from(json), enable_cors, is_head)
}

fn raw_json(
    status: StatusCode,
    json: Bytes,
    enable_cors: bool,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", json.len())
        .header("Cache-Control", "no-store");

    if enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    let body = if is_head { Bytes::new() } else { json };
    finish(builder, body, status.as_str())
}
