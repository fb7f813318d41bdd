//! Route definitions for the investment ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::investment;
use crate::state::AppState;

/// Routes mounted at `/investments`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /project/{project_id}    -> list_by_project
/// GET    /investor/{investor_id}  -> list_by_investor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(investment::list).post(investment::create))
        .route(
            "/{id}",
            get(investment::get_by_id)
                .put(investment::update)
                .delete(investment::delete),
        )
        .route("/project/{project_id}", get(investment::list_by_project))
        .route("/investor/{investor_id}", get(investment::list_by_investor))
}
