// API module entry
// REST endpoint for reading and replacing the navigation document

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ALLOW};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;

pub const NAVIGATION_PATH: &str = "/api/navigation";

const ALLOWED_METHODS: &str = "GET, HEAD, PUT, OPTIONS";

/// API route handler for `/api/navigation`
///
/// Dispatches to handler functions based on request method
pub async fn handle_navigation<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let cors = state.enable_cors();
    let method = req.method().clone();

    let response = match method {
        Method::GET => handlers::get_navigation(&state, false).await,
        Method::HEAD => handlers::get_navigation(&state, true).await,
        Method::PUT => handlers::put_navigation(req, &state).await,
        Method::OPTIONS => http::build_options_response(ALLOWED_METHODS, cors),
        _ => {
            logger::log_warning(&format!("Method not allowed on {NAVIGATION_PATH}: {method}"));
            let body = types::MessageBody {
                message: types::MSG_METHOD_NOT_ALLOWED,
            };
            let mut response =
                response::json_response(StatusCode::METHOD_NOT_ALLOWED, &body, cors, false);
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
            response
        }
    };

    Ok(response)
}
