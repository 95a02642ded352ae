use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Icon given to categories created without one.
pub const DEFAULT_ICON: &str = "more-horizontal";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub name: String,
    pub icon: String,

    #[sea_orm(default_value = false)]
    pub is_primary: bool,
    /// Position among primary categories. NULL sorts last.
    pub sort_order: Option<i32>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
