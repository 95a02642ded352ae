use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub business_id: String,
    #[sea_orm(belongs_to, from = "business_id", to = "id")]
    pub listing: HasOne<super::listing::Entity>,

    pub author: String,
    pub avatar: String,
    pub rating: i32, // 1..=5
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub date: String, // YYYY-MM-DD

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
