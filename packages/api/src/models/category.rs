use contract::CategoryView;
use serde::Deserialize;

use crate::entity::category;
use crate::error::AppError;

use super::shared::{double_option, non_blank, validate_max_chars};

pub const MAX_CATEGORY_NAME_CHARS: usize = 100;
pub const MAX_ICON_CHARS: usize = 50;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[schema(example = "Ресторан")]
    pub name: Option<String>,
    /// Lucide icon name. Defaults to `more-horizontal`.
    #[schema(example = "utensils")]
    pub icon: Option<String>,
    pub is_primary: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub is_primary: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub order: Option<Option<i32>>,
}

/// Normalised creation payload.
#[derive(Debug, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
    pub is_primary: bool,
    pub order: Option<i32>,
}

impl From<category::Model> for CategoryView {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            icon: m.icon,
            is_primary: m.is_primary,
            order: m.sort_order,
            created_at: m.created_at,
        }
    }
}

pub fn validate_category_name(name: Option<&str>) -> Result<String, AppError> {
    let name = non_blank(name).ok_or_else(|| AppError::MissingFields(vec!["name".into()]))?;
    validate_max_chars("name", &name, MAX_CATEGORY_NAME_CHARS)?;
    Ok(name)
}

fn validate_icon(icon: &str) -> Result<String, AppError> {
    let icon = icon.trim();
    if icon.is_empty() {
        return Err(AppError::Validation("icon must not be empty".into()));
    }
    validate_max_chars("icon", icon, MAX_ICON_CHARS)?;
    Ok(icon.to_string())
}

pub fn validate_create_category(req: &CreateCategoryRequest) -> Result<CategoryDraft, AppError> {
    let name = validate_category_name(req.name.as_deref())?;
    let icon = match req.icon.as_deref().map(str::trim) {
        None | Some("") => category::DEFAULT_ICON.to_string(),
        Some(icon) => validate_icon(icon)?,
    };
    Ok(CategoryDraft {
        name,
        icon,
        is_primary: req.is_primary.unwrap_or(false),
        order: req.order,
    })
}

pub fn validate_update_category(req: &UpdateCategoryRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_category_name(Some(name))?;
    }
    if let Some(ref icon) = req.icon {
        validate_icon(icon)?;
    }
    Ok(())
}
