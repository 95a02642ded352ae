use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use contract::{
    Address, Contact, DEFAULT_CITY, DEFAULT_LOCATION, ListingView, Location, ReviewView,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::search::ListingSearch;

use super::shared::{
    blank_as_none, double_option, looks_like_email, non_blank, validate_max_chars, validate_url,
};

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
const MAX_CATEGORY_CHARS: usize = 100;
const MAX_ADDRESS_CHARS: usize = 500;
const MAX_ADDRESS_PART_CHARS: usize = 100;
const MAX_PHONE_CHARS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct AddressInput {
    /// Defaults to Улаанбаатар.
    pub city: Option<String>,
    pub district: Option<String>,
    pub khoroo: Option<String>,
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct ContactInput {
    pub phone: Option<Vec<String>>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateListingRequest {
    #[schema(example = "Modern Nomads")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = json!(["Ресторан"]))]
    pub categories: Option<Vec<String>>,
    pub address: Option<AddressInput>,
    /// Defaults to central Ulaanbaatar.
    pub location: Option<Location>,
    pub contact: Option<ContactInput>,
    pub hours: Option<BTreeMap<String, String>>,
    pub images: Option<Vec<String>>,
    pub logo: Option<String>,
}

/// Every field is optional. `address`, `location` and `contact` replace the
/// stored value as a whole.
#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
pub struct UpdateListingRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub address: Option<AddressInput>,
    pub location: Option<Location>,
    pub contact: Option<ContactInput>,
    pub hours: Option<BTreeMap<String, String>>,
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub logo: Option<Option<String>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingListQuery {
    /// Free text matched against name, description and categories.
    pub q: Option<String>,
    /// Alias for `q`.
    pub search: Option<String>,
    /// Matched against city, district, khoroo and the full address.
    pub loc: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// 1-100, default 20.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub limit: Option<i64>,
    /// Default 0.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub offset: Option<i64>,
}

impl ListingListQuery {
    pub fn to_search(&self) -> ListingSearch {
        let text = self
            .q
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .or(self.search.as_deref());
        ListingSearch::new(text, self.loc.as_deref(), self.category.as_deref())
    }
}

/// A listing together with its reviews, newest first.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: ListingView,
    pub reviews: Vec<ReviewView>,
}

/// Validated content of a new listing, before it gets an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub address: Address,
    pub location: Location,
    pub contact: Contact,
    pub hours: BTreeMap<String, String>,
    pub images: Vec<String>,
    pub logo: Option<String>,
}

impl ListingDraft {
    pub fn into_view(self, id: String, now: DateTime<Utc>) -> ListingView {
        ListingView {
            id,
            name: self.name,
            description: self.description,
            categories: self.categories,
            address: self.address,
            location: self.location,
            contact: self.contact,
            hours: self.hours,
            rating: 0.0,
            review_count: 0,
            images: self.images,
            logo: self.logo,
            created_at: now,
            updated_at: now,
        }
    }
}

fn required_text(field: &str, value: Option<&str>, max: usize) -> Result<String, AppError> {
    let value = non_blank(value).ok_or_else(|| AppError::MissingFields(vec![field.into()]))?;
    validate_max_chars(field, &value, max)?;
    Ok(value)
}

/// Trim entries, drop blanks and duplicates, keep first-seen order.
fn normalize_list(field: &str, values: &[String], max: usize) -> Result<Vec<String>, AppError> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() || out.iter().any(|v| v == value) {
            continue;
        }
        validate_max_chars(field, value, max)?;
        out.push(value.to_string());
    }
    Ok(out)
}

fn normalize_categories(values: &[String]) -> Result<Vec<String>, AppError> {
    let categories = normalize_list("categories", values, MAX_CATEGORY_CHARS)?;
    if categories.is_empty() {
        return Err(AppError::MissingFields(vec!["categories".into()]));
    }
    Ok(categories)
}

fn normalize_address(input: &AddressInput) -> Result<Address, AppError> {
    let full = required_text("address.full", input.full.as_deref(), MAX_ADDRESS_CHARS)?;
    let city = non_blank(input.city.as_deref()).unwrap_or_else(|| DEFAULT_CITY.to_string());
    let district = non_blank(input.district.as_deref()).unwrap_or_default();
    let khoroo = non_blank(input.khoroo.as_deref()).unwrap_or_default();
    for (field, value) in [
        ("address.city", &city),
        ("address.district", &district),
        ("address.khoroo", &khoroo),
    ] {
        validate_max_chars(field, value, MAX_ADDRESS_PART_CHARS)?;
    }
    Ok(Address {
        city,
        district,
        khoroo,
        full,
    })
}

fn validate_location(location: Location) -> Result<Location, AppError> {
    if !location.is_valid() {
        return Err(AppError::Validation(
            "location.lat must be within [-90, 90] and location.lng within [-180, 180]".into(),
        ));
    }
    Ok(location)
}

fn normalize_contact(input: &ContactInput) -> Result<Contact, AppError> {
    let phone = normalize_list(
        "contact.phone",
        input.phone.as_deref().unwrap_or_default(),
        MAX_PHONE_CHARS,
    )?;
    if phone.is_empty() {
        return Err(AppError::MissingFields(vec!["contact.phone".into()]));
    }

    let email = non_blank(input.email.as_deref());
    if let Some(ref email) = email
        && !looks_like_email(email)
    {
        return Err(AppError::Validation(
            "contact.email must be a valid email address".into(),
        ));
    }

    let website = non_blank(input.website.as_deref());
    if let Some(ref website) = website {
        validate_url("contact.website", website)?;
    }

    Ok(Contact {
        phone,
        email,
        website,
    })
}

fn normalize_hours(hours: &BTreeMap<String, String>) -> Result<BTreeMap<String, String>, AppError> {
    let mut out = BTreeMap::new();
    for (day, schedule) in hours {
        let day = day.trim();
        if day.is_empty() {
            return Err(AppError::Validation("hours keys must not be empty".into()));
        }
        if out.insert(day.to_string(), schedule.trim().to_string()).is_some() {
            return Err(AppError::Validation(format!(
                "hours has duplicate day \"{day}\""
            )));
        }
    }
    Ok(out)
}

fn normalize_images(images: &[String]) -> Result<Vec<String>, AppError> {
    let mut out = Vec::with_capacity(images.len());
    for image in images.iter().map(|i| i.trim()).filter(|i| !i.is_empty()) {
        validate_url("images", image)?;
        out.push(image.to_string());
    }
    Ok(out)
}

fn normalize_logo(logo: Option<&str>) -> Result<Option<String>, AppError> {
    let logo = non_blank(logo);
    if let Some(ref logo) = logo {
        validate_url("logo", logo)?;
    }
    Ok(logo)
}

fn missing_create_fields(req: &CreateListingRequest) -> Vec<String> {
    let blank = |v: &Option<String>| non_blank(v.as_deref()).is_none();
    let mut missing = Vec::new();

    if blank(&req.name) {
        missing.push("name".to_string());
    }
    if blank(&req.description) {
        missing.push("description".to_string());
    }
    if req
        .categories
        .as_ref()
        .is_none_or(|c| c.iter().all(|c| c.trim().is_empty()))
    {
        missing.push("categories".to_string());
    }
    match req.address {
        None => missing.push("address".to_string()),
        Some(ref a) if blank(&a.full) => missing.push("address.full".to_string()),
        Some(_) => {}
    }
    match req.contact {
        None => missing.push("contact".to_string()),
        Some(ref c)
            if c.phone
                .as_ref()
                .is_none_or(|p| p.iter().all(|p| p.trim().is_empty())) =>
        {
            missing.push("contact.phone".to_string())
        }
        Some(_) => {}
    }
    missing
}

/// Check a creation payload and normalise it into a [`ListingDraft`].
///
/// All missing required fields are reported together.
pub fn validate_create_listing(req: &CreateListingRequest) -> Result<ListingDraft, AppError> {
    let missing = missing_create_fields(req);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    Ok(ListingDraft {
        name: required_text("name", req.name.as_deref(), MAX_NAME_CHARS)?,
        description: required_text(
            "description",
            req.description.as_deref(),
            MAX_DESCRIPTION_CHARS,
        )?,
        categories: normalize_categories(req.categories.as_deref().unwrap_or_default())?,
        address: normalize_address(req.address.as_ref().unwrap_or(&AddressInput::default()))?,
        location: validate_location(req.location.unwrap_or(DEFAULT_LOCATION))?,
        contact: normalize_contact(req.contact.as_ref().unwrap_or(&ContactInput::default()))?,
        hours: normalize_hours(&req.hours.clone().unwrap_or_default())?,
        images: normalize_images(req.images.as_deref().unwrap_or_default())?,
        logo: normalize_logo(req.logo.as_deref())?,
    })
}

/// Merge an update payload into `view`. Fields absent from the payload are
/// left untouched; `updated_at` is not changed here.
pub fn apply_listing_update(
    view: &mut ListingView,
    req: &UpdateListingRequest,
) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        view.name = required_text("name", Some(name), MAX_NAME_CHARS)?;
    }
    if let Some(ref description) = req.description {
        view.description =
            required_text("description", Some(description), MAX_DESCRIPTION_CHARS)?;
    }
    if let Some(ref categories) = req.categories {
        view.categories = normalize_categories(categories)?;
    }
    if let Some(ref address) = req.address {
        view.address = normalize_address(address)?;
    }
    if let Some(location) = req.location {
        view.location = validate_location(location)?;
    }
    if let Some(ref contact) = req.contact {
        view.contact = normalize_contact(contact)?;
    }
    if let Some(ref hours) = req.hours {
        view.hours = normalize_hours(hours)?;
    }
    if let Some(ref images) = req.images {
        view.images = normalize_images(images)?;
    }
    if let Some(ref logo) = req.logo {
        view.logo = normalize_logo(logo.as_deref())?;
    }
    Ok(())
}
