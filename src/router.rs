use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{AppState, middleware::log_server_errors, routes};

// 访问量相关的路由
fn visits_routes() -> Router<AppState> {
    Router::new().route(
        "/visits",
        get(routes::visits::get_user_visits).options(routes::visits::options_ok),
    )
}

/// 创建主路由：业务路由挂在配置的基础路径下，外层套错误日志与 CORS
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest(&state.config.api_base_uri, visits_routes())
        .layer(axum::middleware::from_fn(log_server_errors))
        .layer(cors)
        .with_state(state)
}
