//! Queries for `employee`.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::employee;
use crate::model::employee::Employee;

/// ## Summary
/// Lists active employees by name.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_active(conn: &mut DbConnection<'_>) -> QueryResult<Vec<Employee>> {
    employee::table
        .filter(employee::active.eq(true))
        .order((employee::name.asc(), employee::id.asc()))
        .select(Employee::as_select())
        .load(conn)
        .await
}
