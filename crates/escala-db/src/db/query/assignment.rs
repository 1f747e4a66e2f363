//! Queries for `shift_assignment`.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::shift_assignment;
use crate::model::assignment::{NewShiftAssignment, ShiftAssignment};

/// ## Summary
/// Loads every assignment with `start <= day <= end`.
///
/// Rows come back by day and then in the order they were created, so a
/// reload reproduces the order employees were added to each slot.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn by_date_range(
    conn: &mut DbConnection<'_>,
    start: NaiveDate,
    end: NaiveDate,
) -> QueryResult<Vec<ShiftAssignment>> {
    shift_assignment::table
        .filter(shift_assignment::day.between(start, end))
        .order((
            shift_assignment::day.asc(),
            shift_assignment::created_at.asc(),
            shift_assignment::employee_id.asc(),
        ))
        .select(ShiftAssignment::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Inserts an assignment unless the same triple already exists.
///
/// Returns `true` if a row was written.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    assignment: &NewShiftAssignment<'_>,
) -> QueryResult<bool> {
    let inserted = diesel::insert_into(shift_assignment::table)
        .values(assignment)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(inserted > 0)
}

/// ## Summary
/// Deletes the row matching all three key columns exactly.
///
/// Returns `true` if a row was removed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(
    conn: &mut DbConnection<'_>,
    day: NaiveDate,
    shift_id: &str,
    employee_id: &str,
) -> QueryResult<bool> {
    let deleted = diesel::delete(
        shift_assignment::table
            .filter(shift_assignment::day.eq(day))
            .filter(shift_assignment::shift_id.eq(shift_id))
            .filter(shift_assignment::employee_id.eq(employee_id)),
    )
    .execute(conn)
    .await?;
    Ok(deleted > 0)
}
