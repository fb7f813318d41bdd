//! Route definitions for projects and the nested sale singleton.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, sale};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /statistics      -> statistics
/// GET    /{id}            -> get_by_id (detail with profit)
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/sale       -> sale::get_for_project
/// PUT    /{id}/sale       -> sale::upsert
/// DELETE /{id}/sale       -> sale::delete
/// ```
///
/// `/statistics` must be registered alongside `/{id}`; axum routes the
/// literal segment first.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/statistics", get(project::statistics))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/sale",
            get(sale::get_for_project)
                .put(sale::upsert)
                .delete(sale::delete),
        )
}
