use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of items matching the filter, ignoring pagination.
    #[schema(example = 47)]
    pub total: u64,
    #[schema(example = 20)]
    pub limit: u64,
    #[schema(example = 0)]
    pub offset: u64,
    /// `offset + limit < total`.
    pub has_more: bool,
}

/// Validated `limit`/`offset` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    /// Defaults to 20 items; `limit` is clamped to 1-100.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Result<Self, AppError> {
        let limit = match limit {
            Some(l) => l.clamp(1, MAX_PAGE_LIMIT as i64) as u64,
            None => DEFAULT_PAGE_LIMIT,
        };
        let offset = match offset {
            Some(o) if o < 0 => {
                return Err(AppError::Validation("offset must be >= 0".into()));
            }
            Some(o) => o as u64,
            None => 0,
        };
        Ok(Self { limit, offset })
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            total,
            limit: self.limit,
            offset: self.offset,
            has_more: self.offset + self.limit < total,
        }
    }
}

/// `{ data, message? }` envelope.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// `{ data, pagination }` envelope.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeletedId {
    pub id: String,
}

/// Body returned by every delete endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Business deleted successfully")]
    pub message: String,
    pub data: DeletedId,
}

impl DeletedResponse {
    pub fn new(message: impl Into<String>, id: String) -> Self {
        Self {
            message: message.into(),
            data: DeletedId { id },
        }
    }
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Optional integer query parameter. An empty value (`?limit=`) counts as
/// absent; anything else must parse.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid integer `{raw}`: {e}"))),
    }
}

/// Trimmed value of an optional string, `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Reject strings longer than `max` Unicode characters.
pub fn validate_max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Absolute `http` or `https` URL with a non-empty host part.
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty() && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// `local@domain.tld` with no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

pub fn validate_url(field: &str, value: &str) -> Result<(), AppError> {
    if !is_http_url(value) {
        return Err(AppError::Validation(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(())
}
