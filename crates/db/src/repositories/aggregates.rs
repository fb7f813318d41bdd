//! Aggregate maintenance: stored running totals on parent rows.
//!
//! Every helper performs a full re-sum from the persisted child rows (never
//! an incremental add/subtract, so rounding drift or a missed event cannot
//! accumulate) and takes `&mut PgConnection` so it composes inside the
//! caller's transaction. The parent `UPDATE` takes a row lock, which is what
//! serializes concurrent mutations against the same project or investor.

use sitebook_core::types::DbId;
use sqlx::PgConnection;

/// Re-sum `projects.total_investment` from the project's investment rows.
pub async fn resync_project_investment(
    conn: &mut PgConnection,
    project_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE projects
         SET total_investment = (
             SELECT COALESCE(SUM(amount), 0) FROM investments WHERE project_id = $1
         ),
         updated_at = NOW()
         WHERE id = $1",
    )
    .bind(project_id)
    .execute(&mut *conn)
    .await?;
    tracing::debug!(project_id, "Resynced project investment total");
    Ok(())
}

/// Re-sum `projects.total_expenses` from the project's expense rows.
pub async fn resync_project_expenses(
    conn: &mut PgConnection,
    project_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE projects
         SET total_expenses = (
             SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE project_id = $1
         ),
         updated_at = NOW()
         WHERE id = $1",
    )
    .bind(project_id)
    .execute(&mut *conn)
    .await?;
    tracing::debug!(project_id, "Resynced project expense total");
    Ok(())
}

/// Re-sum `investors.total_investment` from the investor's investment rows
/// across all projects.
pub async fn resync_investor_investment(
    conn: &mut PgConnection,
    investor_id: DbId,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE investors
         SET total_investment = (
             SELECT COALESCE(SUM(amount), 0) FROM investments WHERE investor_id = $1
         ),
         updated_at = NOW()
         WHERE id = $1",
    )
    .bind(investor_id)
    .execute(&mut *conn)
    .await?;
    tracing::debug!(investor_id, "Resynced investor investment total");
    Ok(())
}

/// The deduplicated union of an old and a (possibly changed) new parent id.
///
/// On re-parenting both parents must be re-summed so neither is left stale;
/// when the id did not change this collapses to a single entry.
pub fn affected_ids(old_id: DbId, new_id: DbId) -> Vec<DbId> {
    if old_id == new_id {
        vec![old_id]
    } else {
        vec![old_id, new_id]
    }
}
