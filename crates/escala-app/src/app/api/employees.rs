//! Employee directory endpoint.

use escala_service::board::employees::search_employees;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::EMPLOYEES_ROUTE_COMPONENT;
use crate::error::AppError;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// GET /api/employees?q= - Lists employees by name, filtered by `q` over
/// name, code and role.
///
/// ## Errors
/// Returns HTTP 503 if storage is unreachable.
#[handler]
#[tracing::instrument(skip_all)]
async fn get_employees(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let query = req.query::<String>("q").unwrap_or_default();

    let result = match get_store_from_depot(depot) {
        Ok(store) => search_employees(store.as_ref(), &query)
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(employees) => res.render(Json(employees)),
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EMPLOYEES_ROUTE_COMPONENT).get(get_employees)
}
