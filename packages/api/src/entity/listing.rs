use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Flat storage row of a business listing.
///
/// Nested API sub-objects are spread over `address_*`, `location_*` and
/// `contact_*` columns; list and map fields are kept as JSONB.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// JSON array of category names.
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: serde_json::Value,

    pub address_city: String,
    pub address_district: String,
    pub address_khoroo: String,
    #[sea_orm(column_type = "Text")]
    pub address_full: String,

    pub location_lat: f64,
    pub location_lng: f64,

    /// JSON array of phone numbers.
    #[sea_orm(column_type = "JsonBinary")]
    pub contact_phone: serde_json::Value,
    pub contact_email: Option<String>,
    pub contact_website: Option<String>,

    /// JSON object of day label to schedule.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub hours: Option<serde_json::Value>,
    /// JSON array of image URLs.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images: Option<serde_json::Value>,
    pub logo: Option<String>,

    // derived from the review table
    #[sea_orm(default_value = 0.0)]
    pub rating: f64,
    #[sea_orm(default_value = 0)]
    pub review_count: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
