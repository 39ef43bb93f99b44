// 连接处理模块
// 以 HTTP/1.1 服务单个已接受的 TCP 连接

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::SERVER;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppState;
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Handle a single connection in a spawned task.
///
/// The whole connection, keep-alive included, is bounded by the larger of
/// the read and write timeouts.
pub fn handle_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    logger::log_debug(&format!("Accepted connection from {peer_addr}"));

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let keep_alive_timeout = state.config.performance.keep_alive_timeout;
        let timeout_duration = Duration::from_secs(std::cmp::max(
            state.config.performance.read_timeout,
            state.config.performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        builder.keep_alive(keep_alive_timeout > 0);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| serve_request(req, peer_addr, Arc::clone(&state))),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} closed after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}

/// Per-request wrapper: dispatch, stamp the `Server` header, write the access log
async fn serve_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let mut entry = state
        .config
        .logging
        .access_log
        .then(|| AccessLogEntry::from_request(&req, peer_addr));

    let mut response = handler::handle_request(req, Arc::clone(&state)).await?;

    if let Some(ref server) = state.server_header {
        response.headers_mut().insert(SERVER, server.clone());
    }

    if let Some(ref mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_server_header_is_added() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mainPage.html"), "<h1>nav</h1>").unwrap();
        let state = Arc::new(AppState::new(&Config::for_root(dir.path())));

        let req = Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = serve_request(req, "127.0.0.1:4000".parse().unwrap(), state)
            .await
            .unwrap();
        assert_eq!(response.headers()[SERVER], "navigation-server");
    }
}
