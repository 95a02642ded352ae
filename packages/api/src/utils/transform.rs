//! Conversion between the flat `listing` row and the nested [`ListingView`].

use std::collections::BTreeMap;

use contract::{Address, Contact, ListingView, Location};
use sea_orm::{ActiveModelTrait, IntoActiveModel};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::entity::listing;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("listing {id}: column `{column}` is malformed: {source}")]
    MalformedRecord {
        id: String,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode a JSONB column into `T`.
///
/// `NULL`, JSON `null` and an empty string decode to `T::default()`. A JSON
/// string holding encoded JSON (rows written as text blobs) is decoded one
/// level deeper. Anything else that does not fit `T` is an error.
fn decode_column<T>(id: &str, column: &'static str, value: Option<&Value>) -> Result<T, TransformError>
where
    T: DeserializeOwned + Default,
{
    let malformed = |source| TransformError::MalformedRecord {
        id: id.to_string(),
        column,
        source,
    };

    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(T::default()),
        Some(Value::String(s)) => serde_json::from_str(s).map_err(malformed),
        Some(v) => serde_json::from_value(v.clone()).map_err(malformed),
    }
}

/// Encode a string list as a JSON array column.
pub fn encode_strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

pub fn encode_hours(hours: &BTreeMap<String, String>) -> Value {
    Value::Object(
        hours
            .iter()
            .map(|(day, schedule)| (day.clone(), Value::String(schedule.clone())))
            .collect(),
    )
}

/// Storage row → API shape.
pub fn listing_to_view(row: listing::Model) -> Result<ListingView, TransformError> {
    let categories = decode_column(&row.id, "categories", Some(&row.categories))?;
    let phone = decode_column(&row.id, "contact_phone", Some(&row.contact_phone))?;
    let hours = decode_column(&row.id, "hours", row.hours.as_ref())?;
    let images = decode_column(&row.id, "images", row.images.as_ref())?;

    Ok(ListingView {
        id: row.id,
        name: row.name,
        description: row.description,
        categories,
        address: Address {
            city: row.address_city,
            district: row.address_district,
            khoroo: row.address_khoroo,
            full: row.address_full,
        },
        location: Location {
            lat: row.location_lat,
            lng: row.location_lng,
        },
        contact: Contact {
            phone,
            email: row.contact_email,
            website: row.contact_website,
        },
        hours,
        rating: row.rating,
        review_count: row.review_count,
        images,
        logo: row.logo,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// API shape → storage row. Exact inverse of [`listing_to_view`].
pub fn listing_row_from_view(view: &ListingView) -> listing::Model {
    listing::Model {
        id: view.id.clone(),
        name: view.name.clone(),
        description: view.description.clone(),
        categories: encode_strings(&view.categories),
        address_city: view.address.city.clone(),
        address_district: view.address.district.clone(),
        address_khoroo: view.address.khoroo.clone(),
        address_full: view.address.full.clone(),
        location_lat: view.location.lat,
        location_lng: view.location.lng,
        contact_phone: encode_strings(&view.contact.phone),
        contact_email: view.contact.email.clone(),
        contact_website: view.contact.website.clone(),
        hours: Some(encode_hours(&view.hours)),
        images: Some(encode_strings(&view.images)),
        logo: view.logo.clone(),
        rating: view.rating,
        review_count: view.review_count,
        created_at: view.created_at,
        updated_at: view.updated_at,
    }
}

/// API shape → insertable active model with every column set.
pub fn listing_active_from_view(view: &ListingView) -> listing::ActiveModel {
    listing_row_from_view(view).into_active_model().reset_all()
}
