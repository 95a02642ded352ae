use contract::{MAX_RATING, MIN_RATING, ReviewView};
use serde::{Deserialize, Serialize};

use crate::entity::review;
use crate::error::AppError;
use crate::reviews::NewReview;

use super::shared::{non_blank, validate_max_chars, validate_url};

pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MAX_COMMENT_CHARS: usize = 500;

pub const REVIEW_CREATED_MESSAGE: &str = "Сэтгэгдэл амжилттай нэмэгдлээ!";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub business_id: Option<String>,
    #[schema(example = "Bold")]
    pub author: Option<String>,
    /// Whole number from 1 to 5.
    #[schema(value_type = Option<i32>, example = 5)]
    pub rating: Option<f64>,
    #[schema(example = "Great")]
    pub comment: Option<String>,
    /// Defaults to a generated picture seeded by the author name.
    pub avatar: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreateReviewResponse {
    pub success: bool,
    pub data: ReviewView,
    #[schema(example = "Сэтгэгдэл амжилттай нэмэгдлээ!")]
    pub message: String,
}

impl From<review::Model> for ReviewView {
    fn from(m: review::Model) -> Self {
        Self {
            id: m.id,
            business_id: m.business_id,
            author: m.author,
            avatar: m.avatar,
            rating: m.rating,
            comment: m.comment,
            date: m.date,
            created_at: m.created_at,
        }
    }
}

/// Whole-number rating within the allowed range.
pub fn validate_rating(rating: f64) -> Result<i32, AppError> {
    if rating.fract() != 0.0 || !(f64::from(MIN_RATING)..=f64::from(MAX_RATING)).contains(&rating)
    {
        return Err(AppError::Validation(format!(
            "rating must be a whole number from {MIN_RATING} to {MAX_RATING}"
        )));
    }
    Ok(rating as i32)
}

pub fn validate_create_review(req: &CreateReviewRequest) -> Result<NewReview, AppError> {
    let business_id = non_blank(req.business_id.as_deref());
    let author = non_blank(req.author.as_deref());
    let comment = non_blank(req.comment.as_deref());

    let missing: Vec<String> = [
        ("businessId", business_id.is_none()),
        ("author", author.is_none()),
        ("rating", req.rating.is_none()),
        ("comment", comment.is_none()),
    ]
    .into_iter()
    .filter(|(_, absent)| *absent)
    .map(|(field, _)| field.to_string())
    .collect();

    let (Some(business_id), Some(author), Some(rating), Some(comment)) =
        (business_id, author, req.rating, comment)
    else {
        return Err(AppError::MissingFields(missing));
    };

    validate_max_chars("author", &author, MAX_AUTHOR_CHARS)?;
    validate_max_chars("comment", &comment, MAX_COMMENT_CHARS)?;
    let rating = validate_rating(rating)?;

    let avatar = non_blank(req.avatar.as_deref());
    if let Some(ref avatar) = avatar {
        validate_url("avatar", avatar)?;
    }

    Ok(NewReview {
        business_id,
        author,
        avatar,
        rating,
        comment,
    })
}
