use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use contract::ReviewView;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::review::*;
use crate::models::shared::DataResponse;
use crate::reviews::ReviewService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Review a business",
    description = "Stores the review and recomputes the listing's `rating` (mean, one decimal) and `reviewCount` in the same transaction.",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = CreateReviewResponse),
        (status = 400, description = "Missing or invalid fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(business_id = ?payload.business_id))]
pub async fn create_review(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = validate_create_review(&payload)?;

    let model = ReviewService::new(&state.db).record(new).await?;

    info!(id = %model.id, rating = model.rating, "Review created");
    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            success: true,
            data: model.into(),
            message: REVIEW_CREATED_MESSAGE.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{businessId}",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List reviews of a business",
    description = "Newest first. An unknown business yields an empty list.",
    params(("businessId" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Reviews", body = DataResponse<Vec<ReviewView>>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(business_id): Path<String>,
) -> Result<Json<DataResponse<Vec<ReviewView>>>, AppError> {
    let data = ReviewService::new(&state.db)
        .list_for_listing(&business_id)
        .await?
        .into_iter()
        .map(ReviewView::from)
        .collect();

    Ok(Json(DataResponse::new(data)))
}
