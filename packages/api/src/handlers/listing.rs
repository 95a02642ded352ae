use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use contract::{ListingView, ReviewView};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entity::{listing, review};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::listing::*;
use crate::models::shared::{DataResponse, DeletedResponse, ListResponse, PageRequest};
use crate::reviews::ReviewService;
use crate::state::AppState;
use crate::utils::search::build_listing_filter;
use crate::utils::transform::{listing_active_from_view, listing_to_view};

#[utoipa::path(
    get,
    path = "/",
    tag = "Listings",
    operation_id = "listListings",
    summary = "Search and page through business listings",
    description = "`q` (or `search`) matches name, description and category names; `loc` matches the address fields; `category` is an exact category name. All text matching is case-insensitive. Results are newest first.",
    params(ListingListQuery),
    responses(
        (status = 200, description = "Page of listings", body = ListResponse<ListingView>),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Stored listing unreadable (MALFORMED_RECORD)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(q = ?query.q, loc = ?query.loc, category = ?query.category))]
pub async fn list_listings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListingListQuery>,
) -> Result<Json<ListResponse<ListingView>>, AppError> {
    let page = PageRequest::from_query(query.limit, query.offset)?;
    let search = query.to_search();

    let select = listing::Entity::find().filter(build_listing_filter(&search));
    let total = select.clone().count(&state.db).await?;

    let rows = select
        .order_by_desc(listing::Column::CreatedAt)
        .order_by_desc(listing::Column::Id)
        .offset(Some(page.offset))
        .limit(Some(page.limit))
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .map(listing_to_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListResponse {
        data,
        pagination: page.pagination(total),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Listings",
    operation_id = "createListing",
    summary = "Create a business listing",
    description = "Required: `name`, `description`, `categories`, `address.full`, `contact.phone`. `address.city` defaults to Улаанбаатар and `location` to central Ulaanbaatar. `rating` and `reviewCount` start at zero and are maintained from reviews.",
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created", body = DataResponse<ListingView>),
        (status = 400, description = "Missing or invalid fields (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = ?payload.name))]
pub async fn create_listing(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateListingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = validate_create_listing(&payload)?;

    let view = draft.into_view(Uuid::now_v7().to_string(), Utc::now());
    let model = listing_active_from_view(&view).insert(&state.db).await?;
    let view = listing_to_view(model)?;

    info!(id = %view.id, "Listing created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(view, "Business created successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Listings",
    operation_id = "getListing",
    summary = "Get a listing with its reviews",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing with reviews, newest first", body = DataResponse<ListingDetail>),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Stored listing unreadable (MALFORMED_RECORD)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<ListingDetail>>, AppError> {
    let row = find_listing(&state.db, &id).await?;
    let listing = listing_to_view(row)?;

    let reviews = ReviewService::new(&state.db)
        .list_for_listing(&id)
        .await?
        .into_iter()
        .map(ReviewView::from)
        .collect();

    Ok(Json(DataResponse::new(ListingDetail { listing, reviews })))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Listings",
    operation_id = "updateListing",
    summary = "Update a listing",
    description = "Fields absent from the body keep their stored value. `address`, `location` and `contact` are replaced as whole objects. An empty body returns the listing unchanged.",
    params(("id" = String, Path, description = "Listing ID")),
    request_body = UpdateListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = DataResponse<ListingView>),
        (status = 400, description = "Invalid fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateListingRequest>,
) -> Result<Json<DataResponse<ListingView>>, AppError> {
    if payload == UpdateListingRequest::default() {
        let existing = listing_to_view(find_listing(&state.db, &id).await?)?;
        return Ok(Json(DataResponse::with_message(
            existing,
            "Business updated successfully",
        )));
    }

    let txn = state.db.begin().await?;

    let existing = find_listing_for_update(&txn, &id).await?;
    let mut view = listing_to_view(existing)?;
    apply_listing_update(&mut view, &payload)?;
    view.updated_at = Utc::now();

    let model = listing_active_from_view(&view).update(&txn).await?;
    txn.commit().await?;

    Ok(Json(DataResponse::with_message(
        listing_to_view(model)?,
        "Business updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Listings",
    operation_id = "deleteListing",
    summary = "Delete a listing and its reviews",
    params(("id" = String, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing deleted", body = DeletedResponse),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let txn = state.db.begin().await?;

    find_listing_for_update(&txn, &id).await?;

    let removed = review::Entity::delete_many()
        .filter(review::Column::BusinessId.eq(id.as_str()))
        .exec(&txn)
        .await?;
    listing::Entity::delete_by_id(id.clone()).exec(&txn).await?;

    txn.commit().await?;

    info!(reviews = removed.rows_affected, "Listing deleted");
    Ok(Json(DeletedResponse::new("Business deleted successfully", id)))
}

fn listing_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Business with ID {id} does not exist"))
}

async fn find_listing<C: ConnectionTrait>(db: &C, id: &str) -> Result<listing::Model, AppError> {
    listing::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| listing_not_found(id))
}

async fn find_listing_for_update(
    txn: &DatabaseTransaction,
    id: &str,
) -> Result<listing::Model, AppError> {
    listing::Entity::find_by_id(id.to_string())
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| listing_not_found(id))
}
