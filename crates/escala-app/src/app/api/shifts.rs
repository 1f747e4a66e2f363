//! Shift configuration endpoints.

use escala_board::ShiftDefinition;
use escala_service::board::shifts::{list_shifts, save_shifts};
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};

use crate::app::api::SHIFTS_ROUTE_COMPONENT;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// GET /api/shifts - Configured shifts in display order, or the defaults.
///
/// ## Errors
/// Returns HTTP 503 if storage is unreachable.
#[handler]
#[tracing::instrument(skip_all)]
async fn get_shifts(depot: &mut Depot, res: &mut Response) {
    let result: AppResult<Vec<ShiftDefinition>> = match get_store_from_depot(depot) {
        Ok(store) => list_shifts(store.as_ref()).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(shifts) => res.render(Json(shifts)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// PUT /api/shifts - Replaces the shift configuration.
///
/// ## Errors
/// Returns HTTP 400 for a malformed or invalid list, 500/503 if storage fails.
#[handler]
#[tracing::instrument(skip_all)]
async fn put_shifts(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let shifts: Vec<ShiftDefinition> = match req.parse_json().await {
        Ok(shifts) => shifts,
        Err(e) => {
            AppError::BadRequest(format!("invalid shift list: {e}")).render(res);
            return;
        }
    };

    let result: AppResult<Vec<ShiftDefinition>> = match get_store_from_depot(depot) {
        Ok(store) => save_shifts(store.as_ref(), shifts)
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(saved) => res.render(Json(saved)),
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SHIFTS_ROUTE_COMPONENT)
        .get(get_shifts)
        .put(put_shifts)
}
