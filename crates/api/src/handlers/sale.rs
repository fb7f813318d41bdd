//! Handlers for the `/projects/{id}/sale` singleton.
//!
//! A project has at most one sale record. PUT creates or replaces it;
//! the project's own `is_sold` flag is managed separately through the
//! project update endpoint.

use axum::extract::{Path, State};
use axum::Json;
use sitebook_core::error::CoreError;
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_PHONE_LEN, MAX_STRING_LEN};
use sitebook_db::models::sale::{NewProjectSale, ProjectSale, UpsertProjectSale};
use sitebook_db::repositories::{ProjectRepo, ProjectSaleRepo};

use crate::error::{AppError, AppResult};
use crate::response::{ItemResponse, MessageResponse, StatusMessage};
use crate::state::AppState;

/// GET /api/v1/projects/{id}/sale
pub async fn get_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<ItemResponse<ProjectSale>>> {
    ensure_project_exists(&state, project_id).await?;
    let sale = ProjectSaleRepo::find_by_project(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectSale",
            id: project_id,
        }))?;
    Ok(Json(ItemResponse::new(sale)))
}

/// PUT /api/v1/projects/{id}/sale
///
/// Creates the sale record or replaces the existing one; the project
/// keeps a single sale row either way.
pub async fn upsert(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpsertProjectSale>,
) -> AppResult<Json<MessageResponse<ProjectSale>>> {
    ensure_project_exists(&state, project_id).await?;
    let new = validate_upsert(input)?;
    let sale = ProjectSaleRepo::upsert_for_project(&state.pool, project_id, &new).await?;
    Ok(Json(MessageResponse::new(
        "Project sale recorded successfully",
        sale,
    )))
}

/// DELETE /api/v1/projects/{id}/sale
pub async fn delete(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    ensure_project_exists(&state, project_id).await?;
    let deleted = ProjectSaleRepo::delete_for_project(&state.pool, project_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectSale",
            id: project_id,
        }));
    }
    Ok(Json(StatusMessage::new("Project sale deleted successfully")))
}

async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    if ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    Ok(())
}

fn validate_upsert(input: UpsertProjectSale) -> Result<NewProjectSale, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_string(
        &mut errors,
        "buyer_name",
        input.buyer_name.as_deref(),
        MAX_STRING_LEN,
    );
    if let Some(email) = input.buyer_email.as_deref() {
        validation::email_format(&mut errors, "buyer_email", email);
    }
    validation::optional_string(
        &mut errors,
        "buyer_phone",
        input.buyer_phone.as_deref(),
        MAX_PHONE_LEN,
    );
    validation::optional_string(
        &mut errors,
        "buyer_address",
        input.buyer_address.as_deref(),
        MAX_STRING_LEN,
    );
    validation::require_amount(&mut errors, "total_sale_price", input.total_sale_price);
    validation::require_amount(&mut errors, "cash_amount", input.cash_amount);
    validation::optional_amount(&mut errors, "credit_amount", input.credit_amount);
    validation::require_date(&mut errors, "sale_date", input.sale_date);
    validation::optional_string(&mut errors, "notes", input.notes.as_deref(), MAX_STRING_LEN);
    errors.into_result()?;

    match (
        input.buyer_name,
        input.total_sale_price,
        input.cash_amount,
        input.sale_date,
    ) {
        (Some(buyer_name), Some(total_sale_price), Some(cash_amount), Some(sale_date)) => {
            Ok(NewProjectSale {
                buyer_name,
                buyer_email: input.buyer_email,
                buyer_phone: input.buyer_phone,
                buyer_address: input.buyer_address,
                total_sale_price,
                cash_amount,
                credit_amount: input.credit_amount.unwrap_or_default(),
                sale_date,
                notes: input.notes,
            })
        }
        _ => Err(CoreError::Internal(
            "sale payload missing required fields after validation".into(),
        )),
    }
}
