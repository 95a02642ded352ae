use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use contract::CategoryView;
use sea_orm::sea_query::NullOrdering;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::category;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::category::*;
use crate::models::shared::{DataResponse, DeletedResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "listCategories",
    summary = "List all categories",
    description = "Primary categories first, then by `order` (unset last), then by name.",
    responses(
        (status = 200, description = "All categories", body = DataResponse<Vec<CategoryView>>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<CategoryView>>>, AppError> {
    let data = category::Entity::find()
        .order_by_desc(category::Column::IsPrimary)
        .order_by_with_nulls(category::Column::SortOrder, Order::Asc, NullOrdering::Last)
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(CategoryView::from)
        .collect();

    Ok(Json(DataResponse::new(data)))
}

#[utoipa::path(
    get,
    path = "/primary",
    tag = "Categories",
    operation_id = "listPrimaryCategories",
    summary = "List primary categories",
    responses(
        (status = 200, description = "Primary categories by `order`", body = DataResponse<Vec<CategoryView>>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_primary_categories(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<CategoryView>>>, AppError> {
    let data = category::Entity::find()
        .filter(category::Column::IsPrimary.eq(true))
        .order_by_with_nulls(category::Column::SortOrder, Order::Asc, NullOrdering::Last)
        .order_by_asc(category::Column::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(CategoryView::from)
        .collect();

    Ok(Json(DataResponse::new(data)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    operation_id = "getCategory",
    summary = "Get a category by ID",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = DataResponse<CategoryView>),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<CategoryView>>, AppError> {
    let model = find_category(&state.db, &id).await?;
    Ok(Json(DataResponse::with_message(
        model.into(),
        "Category retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "Category names are unique. `icon` defaults to `more-horizontal` and `isPrimary` to false.",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = DataResponse<CategoryView>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = ?payload.name))]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = validate_create_category(&payload)?;

    ensure_name_available(&state.db, &draft.name, None).await?;

    let name = draft.name.clone();
    let model = category::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        name: Set(draft.name),
        icon: Set(draft.icon),
        is_primary: Set(draft.is_primary),
        sort_order: Set(draft.order),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| map_unique_violation(e, &name))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            CategoryView::from(model),
            "Category created successfully",
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Update a category",
    description = "Only fields present in the body change. `order: null` clears the position.",
    params(("id" = String, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = DataResponse<CategoryView>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Name already taken (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<DataResponse<CategoryView>>, AppError> {
    validate_update_category(&payload)?;

    let existing = find_category(&state.db, &id).await?;
    if payload == UpdateCategoryRequest::default() {
        return Ok(Json(DataResponse::with_message(
            existing.into(),
            "Category updated successfully",
        )));
    }

    let new_name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| *n != existing.name)
        .map(String::from);
    if let Some(ref name) = new_name {
        ensure_name_available(&state.db, name, Some(&id)).await?;
    }

    let mut active: category::ActiveModel = existing.clone().into();
    if let Some(ref name) = new_name {
        active.name = Set(name.clone());
    }
    if let Some(ref icon) = payload.icon {
        active.icon = Set(icon.trim().to_string());
    }
    if let Some(is_primary) = payload.is_primary {
        active.is_primary = Set(is_primary);
    }
    if let Some(order) = payload.order {
        active.sort_order = Set(order);
    }
    if !active.is_changed() {
        return Ok(Json(DataResponse::with_message(
            existing.into(),
            "Category updated successfully",
        )));
    }

    let model = active
        .update(&state.db)
        .await
        .map_err(|e| map_unique_violation(e, new_name.as_deref().unwrap_or_default()))?;

    Ok(Json(DataResponse::with_message(
        model.into(),
        "Category updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Listings keep the category name in their own category list.",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let result = category::Entity::delete_by_id(id.clone())
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(category_not_found(&id));
    }

    Ok(Json(DeletedResponse::new("Category deleted successfully", id)))
}

fn category_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Category with ID {id} does not exist"))
}

fn category_exists(name: &str) -> AppError {
    AppError::Conflict(format!("Category \"{name}\" already exists"))
}

/// A concurrent insert can pass the pre-check; the unique index catches it.
fn map_unique_violation(err: DbErr, name: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => category_exists(name),
        _ => err.into(),
    }
}

async fn ensure_name_available<C: ConnectionTrait>(
    db: &C,
    name: &str,
    except_id: Option<&str>,
) -> Result<(), AppError> {
    let mut query = category::Entity::find().filter(category::Column::Name.eq(name));
    if let Some(id) = except_id {
        query = query.filter(category::Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(category_exists(name));
    }
    Ok(())
}

async fn find_category<C: ConnectionTrait>(db: &C, id: &str) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| category_not_found(id))
}
