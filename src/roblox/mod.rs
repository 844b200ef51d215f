use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum RobloxError {
    // 网络错误、非 2xx 状态和响应体解析失败统一归为上游失败
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
pub struct GamesPage {
    #[serde(default)]
    pub data: Vec<GameEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    // 上游偶尔缺失访问计数，缺失按 0 处理
    #[serde(default)]
    pub place_visits: u64,
}

#[derive(Debug, Deserialize)]
struct GroupRolesPage {
    #[serde(default)]
    data: Vec<GroupMembership>,
}

#[derive(Debug, Deserialize)]
pub struct GroupMembership {
    pub group: GroupRef,
    pub role: RoleRef,
}

#[derive(Debug, Deserialize)]
pub struct GroupRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleRef {
    pub name: String,
}

/// Roblox 公开 API 客户端，三个只读端点各取单页（最多 50 条），不重试
#[derive(Clone)]
pub struct RobloxClient {
    http: reqwest::Client,
    games_api: String,
    groups_api: String,
}

impl RobloxClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            games_api: config.games_api_base.trim_end_matches('/').to_string(),
            groups_api: config.groups_api_base.trim_end_matches('/').to_string(),
        }
    }

    /// 用户个人名下的公开游戏（accessFilter=2）
    pub async fn fetch_user_games(&self, user_id: &str) -> Result<GamesPage, RobloxError> {
        let url = format!(
            "{}/v2/users/{}/games?accessFilter=2&limit=50&sortOrder=Desc",
            self.games_api, user_id
        );
        let page = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }

    /// 用户的群组角色列表
    pub async fn fetch_group_roles(&self, user_id: &str) -> Result<Vec<GroupMembership>, RobloxError> {
        let url = format!("{}/v1/users/{}/groups/roles", self.groups_api, user_id);
        let page: GroupRolesPage = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page.data)
    }

    /// 群组名下的游戏（accessFilter=1）
    pub async fn fetch_group_games(&self, group_id: u64) -> Result<GamesPage, RobloxError> {
        let url = format!(
            "{}/v2/groups/{}/games?accessFilter=1&limit=50&sortOrder=Desc",
            self.games_api, group_id
        );
        let page = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(page)
    }
}
