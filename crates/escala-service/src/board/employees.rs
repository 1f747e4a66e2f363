//! Read-only employee directory.

use escala_board::{Employee, EmployeeDirectory};

use crate::error::ServiceResult;
use crate::store::BoardStore;

/// ## Summary
/// Loads the directory, ordered by name.
///
/// ## Errors
/// Returns the storage error if the read fails.
#[tracing::instrument(skip(store))]
pub async fn load_directory(store: &dyn BoardStore) -> ServiceResult<EmployeeDirectory> {
    let rows = store.list_employees().await?;
    let directory = EmployeeDirectory::from_raw(rows);
    tracing::debug!(count = directory.len(), "Employee directory loaded");
    Ok(directory)
}

/// ## Summary
/// Case-insensitive search over name, code and role. A blank query lists
/// every employee.
///
/// ## Errors
/// Returns the storage error if the read fails.
pub async fn search_employees(store: &dyn BoardStore, query: &str) -> ServiceResult<Vec<Employee>> {
    let directory = load_directory(store).await?;
    Ok(directory.search(query).into_iter().cloned().collect())
}
