use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// City assumed when a new listing does not name one.
pub const DEFAULT_CITY: &str = "Улаанбаатар";

/// Central Ulaanbaatar, used when a new listing has no coordinates.
pub const DEFAULT_LOCATION: Location = Location {
    lat: 47.9184,
    lng: 106.9177,
};

/// Postal address of a business.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Address {
    #[schema(example = "Улаанбаатар")]
    #[serde(default)]
    pub city: String,
    #[schema(example = "Сүхбаатар")]
    #[serde(default)]
    pub district: String,
    /// Sub-district.
    #[schema(example = "1-р хороо")]
    #[serde(default)]
    pub khoroo: String,
    /// Free-form address line.
    #[schema(example = "Сүхбаатар дүүрэг, 1-р хороо, Чингисийн өргөн чөлөө")]
    pub full: String,
}

/// Geographic coordinates in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    #[schema(example = 47.918, minimum = -90, maximum = 90)]
    pub lat: f64,
    #[schema(example = 106.917, minimum = -180, maximum = 180)]
    pub lng: f64,
}

impl Location {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Contact {
    #[schema(example = json!(["7011-0393"]))]
    #[serde(default)]
    pub phone: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// A business entry as exposed by the API.
///
/// `rating` and `reviewCount` are derived from the listing's reviews and are
/// never accepted from clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[schema(example = "0192f1c4-7a3e-7c55-a1f0-6d1e2b9c4f10")]
    pub id: String,
    #[schema(example = "Modern Nomads")]
    pub name: String,
    pub description: String,
    #[schema(example = json!(["Ресторан", "Монгол хоол"]))]
    pub categories: Vec<String>,
    pub address: Address,
    pub location: Location,
    pub contact: Contact,
    /// Day label to free-text schedule, e.g. `"Даваа-Баасан": "10:00 - 22:00"`.
    #[serde(default)]
    pub hours: BTreeMap<String, String>,
    #[schema(example = 4.5, minimum = 0, maximum = 5)]
    pub rating: f64,
    #[schema(example = 12, minimum = 0)]
    pub review_count: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingView {
    /// Exact membership test against the listing's category names.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}
