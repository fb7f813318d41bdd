//! Handlers for the `/expenses` resource.
//!
//! Category and subcategory are validated independently; a subcategory is
//! not required to belong to the chosen category, only to exist.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitebook_core::error::CoreError;
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_STRING_LEN};
use sitebook_db::models::expense::{
    CreateExpense, Expense, ExpenseWithCategory, ExpenseWithProject, NewExpense, UpdateExpense,
};
use sitebook_db::repositories::{CategoryRepo, ExpenseRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::{ItemResponse, MessageResponse, StatusMessage};
use crate::state::AppState;

/// GET /api/v1/expenses
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ItemResponse<Vec<ExpenseWithProject>>>> {
    let expenses = ExpenseRepo::list(&state.pool).await?;
    Ok(Json(ItemResponse::new(expenses)))
}

/// GET /api/v1/expenses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Expense>>> {
    let expense = ExpenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id,
        }))?;
    Ok(Json(ItemResponse::new(expense)))
}

/// GET /api/v1/expenses/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Vec<ExpenseWithCategory>>>> {
    let expenses = ExpenseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ItemResponse::new(expenses)))
}

/// GET /api/v1/expenses/category/{category_id}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Vec<ExpenseWithProject>>>> {
    let expenses = ExpenseRepo::list_by_category(&state.pool, category_id).await?;
    Ok(Json(ItemResponse::new(expenses)))
}

/// POST /api/v1/expenses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateExpense>,
) -> AppResult<(StatusCode, Json<MessageResponse<Expense>>)> {
    let new = validate_create(input)?;
    check_parents(
        &state,
        Some(new.project_id),
        Some(new.category_id),
        Some(new.subcategory_id),
    )
    .await?;

    let expense = ExpenseRepo::create(&state.pool, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Expense created successfully", expense)),
    ))
}

/// PUT /api/v1/expenses/{id}
///
/// Moving the expense to another project resyncs both the old and new
/// project totals inside the repository transaction.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<MessageResponse<Expense>>> {
    validate_update(&input)?;
    check_parents(&state, input.project_id, input.category_id, input.subcategory_id).await?;

    let expense = ExpenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id,
        }))?;
    Ok(Json(MessageResponse::new(
        "Expense updated successfully",
        expense,
    )))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    let deleted = ExpenseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Expense",
            id,
        }));
    }
    Ok(Json(StatusMessage::new("Expense deleted successfully")))
}

/// Reject payload parent ids that do not resolve to a row.
async fn check_parents(
    state: &AppState,
    project_id: Option<DbId>,
    category_id: Option<DbId>,
    subcategory_id: Option<DbId>,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if let Some(project_id) = project_id {
        if ProjectRepo::find_by_id(&state.pool, project_id)
            .await?
            .is_none()
        {
            validation::missing_referent(&mut errors, "project_id");
        }
    }
    if let Some(category_id) = category_id {
        if CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            validation::missing_referent(&mut errors, "category_id");
        }
    }
    if let Some(subcategory_id) = subcategory_id {
        if CategoryRepo::find_subcategory_by_id(&state.pool, subcategory_id)
            .await?
            .is_none()
        {
            validation::missing_referent(&mut errors, "subcategory_id");
        }
    }
    errors.into_result()?;
    Ok(())
}

fn validate_create(input: CreateExpense) -> Result<NewExpense, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_id(&mut errors, "project_id", input.project_id);
    validation::require_id(&mut errors, "category_id", input.category_id);
    validation::require_id(&mut errors, "subcategory_id", input.subcategory_id);
    validation::require_amount(&mut errors, "amount", input.amount);
    validation::require_string(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_STRING_LEN,
    );
    validation::require_date(&mut errors, "expense_date", input.expense_date);
    validation::optional_string(
        &mut errors,
        "vendor_name",
        input.vendor_name.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "invoice_number",
        input.invoice_number.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "payment_method",
        input.payment_method.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "receipt_path",
        input.receipt_path.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()?;

    match (
        input.project_id,
        input.category_id,
        input.subcategory_id,
        input.amount,
        input.description,
        input.expense_date,
    ) {
        (
            Some(project_id),
            Some(category_id),
            Some(subcategory_id),
            Some(amount),
            Some(description),
            Some(expense_date),
        ) => Ok(NewExpense {
            project_id,
            category_id,
            subcategory_id,
            amount,
            description,
            expense_date,
            vendor_name: input.vendor_name,
            invoice_number: input.invoice_number,
            payment_method: input.payment_method,
            receipt_path: input.receipt_path,
        }),
        _ => Err(CoreError::Internal(
            "expense payload missing required fields after validation".into(),
        )),
    }
}

fn validate_update(input: &UpdateExpense) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    validation::optional_amount(&mut errors, "amount", input.amount);
    if let Some(description) = input.description.as_deref() {
        validation::require_string(&mut errors, "description", Some(description), MAX_STRING_LEN);
    }
    validation::optional_string(
        &mut errors,
        "vendor_name",
        input.vendor_name.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "invoice_number",
        input.invoice_number.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "payment_method",
        input.payment_method.as_deref(),
        MAX_STRING_LEN,
    );
    validation::optional_string(
        &mut errors,
        "receipt_path",
        input.receipt_path.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()
}
