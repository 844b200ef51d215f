use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::roblox::{GamesPage, RobloxClient};

// 识别"开发者级"角色的关键词表，忽略大小写按子串匹配
const DEVELOPER_ROLE_KEYWORDS: [&str; 11] = [
    "developer",
    "builder",
    "scripter",
    "programmer",
    "lead developer",
    "co-owner",
    "owner",
    "dev",
    "game developer",
    "lead scripter",
    "head developer",
];

pub fn is_developer_role(role_name: &str) -> bool {
    let name = role_name.to_lowercase();
    DEVELOPER_ROLE_KEYWORDS
        .iter()
        .any(|keyword| name.contains(keyword))
}

// 返回给前端的固定说明文字：只统计每个归属方的前 50 个游戏，结果是近似值
pub const APPROXIMATION_NOTE: &str =
    "Visit counts are approximate: only the top 50 games per owner are counted.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitSummary {
    pub total_visits: u64,
    pub personal_visits: u64,
    pub group_visits: u64,
    pub personal_game_count: u64,
    pub group_game_count: u64,
    pub timestamp: DateTime<Utc>,
}

impl VisitSummary {
    /// 聚合一个用户的访问量：个人游戏 + 开发者级群组名下的游戏。
    /// 每个上游分支各自容错，单个失败只把该分支计为 0，不中断整体聚合；
    /// 每个上游调用每轮至多尝试一次，不做重试。
    pub async fn aggregate(roblox: &RobloxClient, user_id: &str) -> Self {
        let mut personal_visits = 0u64;
        let mut personal_game_count = 0u64;
        match roblox.fetch_user_games(user_id).await {
            Ok(page) => (personal_visits, personal_game_count) = fold_visits(&page),
            Err(e) => warn!("failed to fetch games for user {}: {}", user_id, e),
        }

        // 群组角色获取失败时按"无群组"处理，跳过整个群组分支
        let memberships = match roblox.fetch_group_roles(user_id).await {
            Ok(memberships) => memberships,
            Err(e) => {
                warn!("failed to fetch group roles for user {}: {}", user_id, e);
                Vec::new()
            }
        };

        let mut group_visits = 0u64;
        let mut group_game_count = 0u64;
        for membership in memberships {
            if !is_developer_role(&membership.role.name) {
                continue;
            }
            // 单个群组的失败只跳过该群组，其余群组继续
            match roblox.fetch_group_games(membership.group.id).await {
                Ok(page) => {
                    let (visits, count) = fold_visits(&page);
                    group_visits += visits;
                    group_game_count += count;
                }
                Err(e) => warn!(
                    "failed to fetch games for group {} ({}): {}",
                    membership.group.id, membership.group.name, e
                ),
            }
        }

        Self {
            total_visits: personal_visits + group_visits,
            personal_visits,
            group_visits,
            personal_game_count,
            group_game_count,
            timestamp: Utc::now(),
        }
    }
}

fn fold_visits(page: &GamesPage) -> (u64, u64) {
    let visits = page.data.iter().map(|game| game.place_visits).sum();
    (visits, page.data.len() as u64)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitsResponse {
    pub success: bool,
    pub total_visits: u64,
    pub breakdown: Breakdown,
    pub note: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub personal_visits: u64,
    pub group_visits: u64,
    pub total_games: u64,
    pub personal_games: u64,
    pub group_games: u64,
}

impl From<VisitSummary> for VisitsResponse {
    fn from(summary: VisitSummary) -> Self {
        Self {
            success: true,
            total_visits: summary.total_visits,
            breakdown: Breakdown {
                personal_visits: summary.personal_visits,
                group_visits: summary.group_visits,
                total_games: summary.personal_game_count + summary.group_game_count,
                personal_games: summary.personal_game_count,
                group_games: summary.group_game_count,
            },
            note: APPROXIMATION_NOTE,
            timestamp: summary.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roblox::GameEntry;

    #[test]
    fn developer_role_matching_is_case_insensitive_substring() {
        assert!(is_developer_role("Co-Owner"));
        assert!(is_developer_role("LEAD SCRIPTER"));
        assert!(is_developer_role("Senior Game Developer"));
        assert!(is_developer_role("dev"));

        assert!(!is_developer_role("Moderator"));
        assert!(!is_developer_role("Member"));
        assert!(!is_developer_role(""));
    }

    #[test]
    fn fold_visits_sums_counters_and_counts_entries() {
        let page = GamesPage {
            data: vec![
                GameEntry { place_visits: 100 },
                GameEntry { place_visits: 50 },
                GameEntry { place_visits: 0 },
            ],
        };

        assert_eq!(fold_visits(&page), (150, 3));
        assert_eq!(fold_visits(&GamesPage { data: vec![] }), (0, 0));
    }

    #[test]
    fn response_totals_match_breakdown() {
        let summary = VisitSummary {
            total_visits: 450,
            personal_visits: 150,
            group_visits: 300,
            personal_game_count: 3,
            group_game_count: 1,
            timestamp: Utc::now(),
        };

        let response = VisitsResponse::from(summary);
        assert!(response.success);
        assert_eq!(
            response.total_visits,
            response.breakdown.personal_visits + response.breakdown.group_visits
        );
        assert_eq!(
            response.breakdown.total_games,
            response.breakdown.personal_games + response.breakdown.group_games
        );
    }
}
