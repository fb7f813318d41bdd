//! Route definitions for the expense ledger.

use axum::routing::get;
use axum::Router;

use crate::handlers::expense;
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /project/{project_id}    -> list_by_project
/// GET    /category/{category_id}  -> list_by_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expense::list).post(expense::create))
        .route(
            "/{id}",
            get(expense::get_by_id)
                .put(expense::update)
                .delete(expense::delete),
        )
        .route("/project/{project_id}", get(expense::list_by_project))
        .route("/category/{category_id}", get(expense::list_by_category))
}
