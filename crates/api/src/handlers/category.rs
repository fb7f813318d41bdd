//! Handlers for the `/categories` resource, including nested subcategory
//! creation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitebook_core::error::CoreError;
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_STRING_LEN};
use sitebook_db::models::category::{
    Category, CategoryWithSubcategories, CreateCategory, CreateSubcategory, NewCategory,
    NewSubcategory, Subcategory, UpdateCategory,
};
use sitebook_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::{ItemResponse, MessageResponse, StatusMessage};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ItemResponse<Vec<CategoryWithSubcategories>>>> {
    let categories = CategoryRepo::list_with_subcategories(&state.pool).await?;
    Ok(Json(ItemResponse::new(categories)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemResponse<CategoryWithSubcategories>>> {
    let category = CategoryRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(ItemResponse::new(category)))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<MessageResponse<Category>>)> {
    let new = validate_create(input)?;
    let category = CategoryRepo::create(&state.pool, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Category created successfully",
            category,
        )),
    ))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<MessageResponse<Category>>> {
    validate_update(&input)?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(MessageResponse::new(
        "Category updated successfully",
        category,
    )))
}

/// DELETE /api/v1/categories/{id}
///
/// Cascades to the category's subcategories and expenses; the repository
/// resyncs every affected project expense total in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    Ok(Json(StatusMessage::new("Category deleted successfully")))
}

/// POST /api/v1/categories/{id}/subcategories
pub async fn create_subcategory(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSubcategory>,
) -> AppResult<(StatusCode, Json<MessageResponse<Subcategory>>)> {
    if CategoryRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    let new = validate_create_subcategory(input)?;
    let subcategory = CategoryRepo::create_subcategory(&state.pool, id, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Subcategory created successfully",
            subcategory,
        )),
    ))
}

fn validate_create(input: CreateCategory) -> Result<NewCategory, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_string(&mut errors, "name", input.name.as_deref(), MAX_STRING_LEN);
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_color_code(&mut errors, "color_code", input.color_code.as_deref());
    errors.into_result()?;

    match input.name {
        Some(name) => Ok(NewCategory {
            name,
            description: input.description,
            color_code: input.color_code,
        }),
        None => Err(CoreError::Internal(
            "category payload missing required fields after validation".into(),
        )),
    }
}

fn validate_update(input: &UpdateCategory) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = input.name.as_deref() {
        validation::require_string(&mut errors, "name", Some(name), MAX_STRING_LEN);
    }
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_color_code(&mut errors, "color_code", input.color_code.as_deref());
    errors.into_result()
}

fn validate_create_subcategory(input: CreateSubcategory) -> Result<NewSubcategory, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_string(&mut errors, "name", input.name.as_deref(), MAX_STRING_LEN);
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()?;

    match input.name {
        Some(name) => Ok(NewSubcategory {
            name,
            description: input.description,
        }),
        None => Err(CoreError::Internal(
            "subcategory payload missing required fields after validation".into(),
        )),
    }
}
