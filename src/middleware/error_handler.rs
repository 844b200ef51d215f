use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

// 记录 5xx 响应体时读取的字节上限
const MAX_LOGGED_BODY_BYTES: usize = 4096;

/// 记录所有 5xx 响应的请求行、状态和响应体，然后原样重建响应
pub async fn log_server_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(
                "{} {} failed with {}, response body unreadable: {}",
                method, uri, parts.status, e
            );
            return Response::from_parts(parts, Body::empty());
        }
    };

    error!(
        "{} {} failed with {}: {}",
        method,
        uri,
        parts.status,
        String::from_utf8_lossy(&bytes)
    );

    // 响应体已被消费，去掉旧的 Content-Length 再重建
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
