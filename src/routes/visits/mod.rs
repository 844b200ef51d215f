mod handler;
mod model;

pub use handler::{get_user_visits, options_ok};
pub use model::{Breakdown, VisitSummary, VisitsResponse, is_developer_role};
