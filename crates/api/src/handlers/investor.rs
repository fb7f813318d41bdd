//! Handlers for the `/investors` resource.
//!
//! Email uniqueness is checked before the write so a duplicate surfaces as
//! a per-field validation error. The database constraint remains the
//! backstop for races; `classify_sqlx_error` maps that case to the same
//! response shape.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use sitebook_core::error::CoreError;
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_PHONE_LEN, MAX_STRING_LEN};
use sitebook_db::models::investor::{
    CreateInvestor, Investor, NewInvestor, ProjectInvestmentGroup, UpdateInvestor,
};
use sitebook_db::repositories::InvestorRepo;

use crate::error::{AppError, AppResult};
use crate::response::{ItemResponse, MessageResponse, StatusMessage};
use crate::state::AppState;

/// Detail payload: the investor with their holdings grouped per project.
#[derive(Debug, Serialize)]
pub struct InvestorDetailResponse {
    pub success: bool,
    pub data: Investor,
    pub total_investment: Decimal,
    pub investments_by_project: Vec<ProjectInvestmentGroup>,
}

/// GET /api/v1/investors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ItemResponse<Vec<Investor>>>> {
    let investors = InvestorRepo::list(&state.pool).await?;
    Ok(Json(ItemResponse::new(investors)))
}

/// GET /api/v1/investors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<InvestorDetailResponse>> {
    let investor = InvestorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }))?;

    let groups = InvestorRepo::investments_by_project(&state.pool, id).await?;
    // Live sum over the rows; equal to the stored aggregate whenever the
    // maintenance invariant holds.
    let total_investment = InvestorRepo::total_invested(&state.pool, id).await?;

    Ok(Json(InvestorDetailResponse {
        success: true,
        data: investor,
        total_investment,
        investments_by_project: groups,
    }))
}

/// POST /api/v1/investors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInvestor>,
) -> AppResult<(StatusCode, Json<MessageResponse<Investor>>)> {
    let new = validate_create(input)?;

    let mut errors = FieldErrors::new();
    if InvestorRepo::find_by_email(&state.pool, &new.email, None)
        .await?
        .is_some()
    {
        errors.push("email", "The email has already been taken");
    }
    errors.into_result()?;

    let investor = InvestorRepo::create(&state.pool, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Investor created successfully",
            investor,
        )),
    ))
}

/// PUT /api/v1/investors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvestor>,
) -> AppResult<Json<MessageResponse<Investor>>> {
    validate_update(&input)?;

    if let Some(email) = input.email.as_deref() {
        let mut errors = FieldErrors::new();
        if InvestorRepo::find_by_email(&state.pool, email, Some(id))
            .await?
            .is_some()
        {
            errors.push("email", "The email has already been taken");
        }
        errors.into_result()?;
    }

    let investor = InvestorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }))?;
    Ok(Json(MessageResponse::new(
        "Investor updated successfully",
        investor,
    )))
}

/// DELETE /api/v1/investors/{id}
///
/// Cascades to the investor's investments; the repository resyncs every
/// affected project total in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    let deleted = InvestorRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Investor",
            id,
        }));
    }
    Ok(Json(StatusMessage::new("Investor deleted successfully")))
}

fn validate_create(input: CreateInvestor) -> Result<NewInvestor, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_string(&mut errors, "name", input.name.as_deref(), MAX_STRING_LEN);
    validation::require_string(&mut errors, "email", input.email.as_deref(), MAX_STRING_LEN);
    if let Some(email) = input.email.as_deref() {
        if !email.trim().is_empty() {
            validation::email_format(&mut errors, "email", email);
        }
    }
    validation::optional_string(&mut errors, "phone", input.phone.as_deref(), MAX_PHONE_LEN);
    validation::optional_string(
        &mut errors,
        "address",
        input.address.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()?;

    match (input.name, input.email) {
        (Some(name), Some(email)) => Ok(NewInvestor {
            name,
            email,
            phone: input.phone,
            address: input.address,
        }),
        _ => Err(CoreError::Internal(
            "investor payload missing required fields after validation".into(),
        )),
    }
}

fn validate_update(input: &UpdateInvestor) -> Result<(), CoreError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = input.name.as_deref() {
        validation::require_string(&mut errors, "name", Some(name), MAX_STRING_LEN);
    }
    if let Some(email) = input.email.as_deref() {
        validation::require_string(&mut errors, "email", Some(email), MAX_STRING_LEN);
        if !email.trim().is_empty() {
            validation::email_format(&mut errors, "email", email);
        }
    }
    validation::optional_string(&mut errors, "phone", input.phone.as_deref(), MAX_PHONE_LEN);
    validation::optional_string(
        &mut errors,
        "address",
        input.address.as_deref(),
        MAX_STRING_LEN,
    );
    errors.into_result()
}
