pub mod category;
pub mod expense;
pub mod health;
pub mod investment;
pub mod investor;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                        list, create
/// /projects/statistics             portfolio-wide counters and sums
/// /projects/{id}                   detail (with profit), update, delete
/// /projects/{id}/sale              sale singleton: get, upsert, delete
///
/// /investors                       list, create
/// /investors/{id}                  detail (grouped holdings), update, delete
///
/// /investments                     list, create
/// /investments/{id}                get, update, delete
/// /investments/project/{id}        ledger rows for a project
/// /investments/investor/{id}       ledger rows for an investor
///
/// /expenses                        list, create
/// /expenses/{id}                   get, update, delete
/// /expenses/project/{id}           ledger rows for a project
/// /expenses/category/{id}          ledger rows for a category
///
/// /categories                      list (with subcategories), create
/// /categories/{id}                 detail, update, delete
/// /categories/{id}/subcategories   create subcategory
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/investors", investor::router())
        .nest("/investments", investment::router())
        .nest("/expenses", expense::router())
        .nest("/categories", category::router())
}
