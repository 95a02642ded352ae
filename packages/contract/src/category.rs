use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A business category.
///
/// `icon` is an opaque identifier; resolving it to a glyph is up to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    #[schema(example = "Ресторан")]
    pub name: String,
    #[schema(example = "utensils")]
    pub icon: String,
    /// Shown on the home page when set.
    pub is_primary: bool,
    /// Sort key among primary categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub created_at: DateTime<Utc>,
}
