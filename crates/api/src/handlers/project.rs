//! Handlers for the `/projects` resource.
//!
//! The detail endpoint recomputes profit figures from the stored aggregates
//! on every read; nothing about profit is persisted.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use sitebook_core::error::CoreError;
use sitebook_core::listing;
use sitebook_core::pagination::{page_offset, PageLinks, PageMeta};
use sitebook_core::profit::{calculate_profit, profit_distribution, InvestmentStake, ProfitShare};
use sitebook_core::types::DbId;
use sitebook_core::validation::{self, FieldErrors, MAX_STRING_LEN};
use sitebook_db::models::project::{
    CreateProject, NewProject, Project, ProjectDetail, ProjectStatistics, UpdateProject,
};
use sitebook_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::query::ProjectListParams;
use crate::response::{ItemResponse, MessageResponse, PagedResponse, StatusMessage};
use crate::state::AppState;

/// Detail payload: the project with its children plus profit figures
/// recomputed from the stored aggregates and the recorded sale.
#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    pub success: bool,
    pub data: ProjectDetail,
    pub profit: Decimal,
    pub profit_distribution: Vec<ProfitShare>,
}

/// GET /api/v1/projects
///
/// Supports `?search=`, `?sort_by=`, `?sort_direction=`, `?page=` and
/// `?per_page=`. Out-of-range or unknown values fall back to defaults
/// rather than erroring.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<PagedResponse<Project>>> {
    let sort_column = listing::resolve_sort_column(params.sort_by.as_deref());
    let direction = listing::resolve_sort_direction(params.sort_direction.as_deref());
    let per_page = listing::clamp_per_page(params.per_page);
    let page = listing::clamp_page(params.page);

    let result = ProjectRepo::search(
        &state.pool,
        params.search.as_deref(),
        sort_column,
        direction,
        per_page,
        page_offset(page, per_page),
    )
    .await?;

    let meta = PageMeta::new(result.total, per_page, page);
    let links = PageLinks::build("/api/v1/projects", &meta);
    Ok(Json(PagedResponse::new(result.rows, meta, links)))
}

/// GET /api/v1/projects/statistics
pub async fn statistics(
    State(state): State<AppState>,
) -> AppResult<Json<ItemResponse<ProjectStatistics>>> {
    let stats = ProjectRepo::statistics(&state.pool).await?;
    Ok(Json(ItemResponse::new(stats)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetailResponse>> {
    let detail = ProjectRepo::detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let stakes: Vec<InvestmentStake> = detail
        .investments
        .iter()
        .map(|i| InvestmentStake {
            investor_id: i.investor_id,
            investor_name: i.investor_name.clone(),
            amount: i.amount,
        })
        .collect();

    let cash_received = detail.sale.as_ref().map(|s| s.cash_amount);
    let profit = calculate_profit(
        detail.project.total_investment,
        detail.project.total_expenses,
        cash_received,
    );
    let distribution = profit_distribution(profit, detail.project.total_investment, &stakes);

    Ok(Json(ProjectDetailResponse {
        success: true,
        data: detail,
        profit,
        profit_distribution: distribution,
    }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<MessageResponse<Project>>)> {
    let new = validate_create(input)?;
    let project = ProjectRepo::create(&state.pool, &new).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Project created successfully", project)),
    ))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<MessageResponse<Project>>> {
    validate_update(&input)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(MessageResponse::new(
        "Project updated successfully",
        project,
    )))
}

/// DELETE /api/v1/projects/{id}
///
/// Cascades to the project's investments, expenses and sale record; the
/// repository resyncs every affected investor total in the same
/// transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StatusMessage>> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(Json(StatusMessage::new("Project deleted successfully")))
}

fn validate_create(input: CreateProject) -> Result<NewProject, CoreError> {
    let mut errors = FieldErrors::new();
    validation::require_string(&mut errors, "name", input.name.as_deref(), MAX_STRING_LEN);
    validation::optional_string(
        &mut errors,
        "description",
        input.description.as_deref(),
        MAX_STRING_LEN,
    );
    validation::require_string(
        &mut errors,
        "location",
        input.location.as_deref(),
        MAX_STRING_LEN,
    );
    validation::require_date(&mut errors, "start_date", input.start_date);
    validation::date_after(&mut errors, "end_date", input.start_date, input.end_date);
    errors.into_result()?;

    match (input.name, input.location, input.start_date) {
        (Some(name), Some(location), Some(start_date)) => Ok(NewProject {
            name,
            description: input.description,
            location,
            start_date,
            end_date: input.end_date,
        }),
        _ => Err(CoreError::Internal(
            "project payload missing required fields after validation".into(),
        )),
    }
}

fn validate_update(input: &UpdateProject) -> Result<(), CoreError> {
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
    if let Some(location) = input.location.as_deref() {
        validation::require_string(&mut errors, "location", Some(location), MAX_STRING_LEN);
    }
    validation::date_after(&mut errors, "end_date", input.start_date, input.end_date);
    errors.into_result()
}
