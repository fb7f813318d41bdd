//! Handlers for the `/investments` resource.
//!
//! Parent ids in the payload are checked before the write so a dangling
//! `project_id` or `investor_id` comes back as a per-field validation
//! error instead of a foreign-key failure.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sitebook_core::error::CoreError;
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_STRING_LEN};
use sitebook_db::models::investment::{
    CreateInvestment, Investment, InvestmentWithInvestor, InvestmentWithParties, NewInvestment,
    UpdateInvestment,
};
use sitebook_db::repositories::{InvestmentRepo, InvestorRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::response::{ItemResponse, MessageResponse, StatusMessage};
use crate::state::AppState;

/// GET /api/v1/investments
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ItemResponse<Vec<InvestmentWithParties>>>> {
    let investments = InvestmentRepo::list(&state.pool).await?;
    Ok(Json(ItemResponse::new(investments)))
}

/// GET /api/v1/investments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Investment>>> {
    let investment = InvestmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investment",
            id,
        }))?;
    Ok(Json(ItemResponse::new(investment)))
}

/// GET /api/v1/investments/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Vec<InvestmentWithInvestor>>>> {
    let investments = InvestmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ItemResponse::new(investments)))
}

/// GET /api/v1/investments/investor/{investor_id}
pub async fn list_by_investor(
    State(state): State<AppState>,
    Path(investor_id): Path<DbId>,
) -> AppResult<Json<ItemResponse<Vec<InvestmentWithParties>>>> {
    let investments = InvestmentRepo::list_by_investor(&state.pool, investor_id).await?;
    Ok(Json(ItemResponse::new(investments)))
}

/// POST /api/v1/investments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInvestment>,
) -> AppResult<(StatusCode, Json<MessageResponse<Investment>>)> {
    let new = validate_create(input)?;
    check_parents(&state, Some(new.project_id), Some(new.investor_id)).await?;

    let investment = InvestmentRepo::create(&state.pool, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Investment created successfully",
            investment,
        )),
    ))
}

/// PUT /api/v1/investments/{id}
///
/// Re-parenting (changing `project_id` or `investor_id`) resyncs both the
/// old and new parents inside the repository transaction.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvestment>,
) -> AppResult<Json<MessageResponse<Investment>>> {
    validate_update(&input)?;
    check_parents(&state, input.project_id, input.investor_id).await?;

    let investment = InvestmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investment",
            id,
        }))?;
    Ok(Json(MessageResponse::new(
        "Investment updated successfully",
        investment,
    )))
}

/// DELETE /api/v1/investments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    let deleted = InvestmentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Investment",
            id,
        }));
    }
    Ok(Json(StatusMessage::new("Investment deleted successfully")))
}

/// Reject payload parent ids that do not resolve to a row.
async fn check_parents(
    state: &AppState,
    project_id: Option<DbId>,
    investor_id: Option<DbId>,
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
    if let Some(investor_id) = investor_id {
        if InvestorRepo::find_by_id(&state.pool, investor_id)
            .await?
            .is_none()
        {
            validation::missing_referent(&mut errors, "investor_id");
        }
    }
    errors.into_result()?;
    Ok(())
}

fn validate_create(input: CreateInvestment) -> Result<NewInvestment, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_id(&mut errors, "project_id", input.project_id);
    validation::require_id(&mut errors, "investor_id", input.investor_id);
    validation::require_amount(&mut errors, "amount", input.amount);
    validation::require_date(&mut errors, "investment_date", input.investment_date);
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
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
        "reference_number",
        input.reference_number.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()?;

    match (
        input.project_id,
        input.investor_id,
        input.amount,
        input.investment_date,
    ) {
        (Some(project_id), Some(investor_id), Some(amount), Some(investment_date)) => {
            Ok(NewInvestment {
                project_id,
                investor_id,
                amount,
                investment_date,
                description: input.description,
                payment_method: input.payment_method,
                reference_number: input.reference_number,
            })
        }
        _ => Err(CoreError::Internal(
            "investment payload missing required fields after validation".into(),
        )),
    }
}

fn validate_update(input: &UpdateInvestment) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    validation::optional_amount(&mut errors, "amount", input.amount);
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
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
        "reference_number",
        input.reference_number.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()
}
