use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review left on a listing. Reviews are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: String,
    /// Id of the reviewed listing.
    pub business_id: String,
    #[schema(example = "Bold")]
    pub author: String,
    pub avatar: String,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    #[schema(example = "Great")]
    pub comment: String,
    /// Calendar date of submission, `YYYY-MM-DD`.
    #[schema(example = "2025-10-14")]
    pub date: String,
    pub created_at: DateTime<Utc>,
}
