//! Queries for `shift_definition`.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::connection::DbConnection;
use crate::db::schema::shift_definition;
use crate::model::shift::{NewShiftDefinition, ShiftDefinition};

/// ## Summary
/// Lists configured shifts in display order.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_ordered(conn: &mut DbConnection<'_>) -> QueryResult<Vec<ShiftDefinition>> {
    shift_definition::table
        .order((shift_definition::position.asc(), shift_definition::id.asc()))
        .select(ShiftDefinition::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Replaces the whole shift configuration with `shifts`.
///
/// ## Errors
/// Returns an error if the database operation fails. Nothing is changed in
/// that case.
///
/// ## Side Effects
/// Runs in a single transaction: readers see either the old or the new list.
pub async fn replace_all(
    conn: &mut DbConnection<'_>,
    shifts: &[NewShiftDefinition<'_>],
) -> QueryResult<()> {
    let conn: &mut diesel_async::AsyncPgConnection = conn;
    conn.transaction::<_, diesel::result::Error, _>(|tx| {
        async move {
            diesel::delete(shift_definition::table).execute(tx).await?;
            if !shifts.is_empty() {
                diesel::insert_into(shift_definition::table)
                    .values(shifts)
                    .execute(tx)
                    .await?;
            }
            Ok(())
        }
        .scope_boxed()
    })
    .await
}
