use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{AppState, error::ApiError};

use super::model::{VisitSummary, VisitsResponse};

#[derive(Debug, Deserialize)]
pub struct VisitsQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

// userId 必须非空且全部为十进制数字
fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty() && user_id.bytes().all(|b| b.is_ascii_digit())
}

#[axum::debug_handler]
pub async fn get_user_visits(
    State(state): State<AppState>,
    Query(query): Query<VisitsQuery>,
) -> Result<Json<VisitsResponse>, ApiError> {
    let user_id = query.user_id.ok_or(ApiError::MissingUserId)?;
    if !is_valid_user_id(&user_id) {
        return Err(ApiError::InvalidUserId(user_id));
    }

    // 命中缓存直接返回，时间戳保持缓存时的值，不访问上游
    if let Some(summary) = state.cache.lock().await.get(&user_id) {
        debug!("visit summary cache hit for user {}", user_id);
        return Ok(Json(VisitsResponse::from(summary)));
    }

    // 聚合在独立任务中执行：分支内的上游失败已被聚合器容忍，
    // 逃出聚合器的意外 panic 在这里被接住并作为整体失败上报
    let roblox = state.roblox.clone();
    let id = user_id.clone();
    let summary = match tokio::spawn(async move { VisitSummary::aggregate(&roblox, &id).await })
        .await
    {
        Ok(summary) => summary,
        Err(e) => {
            return Err(ApiError::AggregationFailed {
                user_id,
                details: e.to_string(),
            });
        }
    };

    info!(
        "aggregated {} visits across {} games for user {}",
        summary.total_visits,
        summary.personal_game_count + summary.group_game_count,
        user_id
    );

    state.cache.lock().await.put(&user_id, summary.clone());
    Ok(Json(VisitsResponse::from(summary)))
}

// 非预检的 OPTIONS 请求返回空 200，预检由 CORS 层应答
pub async fn options_ok() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_must_be_decimal_digits() {
        assert!(is_valid_user_id("1"));
        assert!(is_valid_user_id("261"));
        assert!(is_valid_user_id("00123456789"));

        assert!(!is_valid_user_id(""));
        assert!(!is_valid_user_id("abc"));
        assert!(!is_valid_user_id("12a"));
        assert!(!is_valid_user_id("-5"));
        assert!(!is_valid_user_id("12 3"));
    }
}
