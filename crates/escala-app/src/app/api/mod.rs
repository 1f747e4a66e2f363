mod app_specific;
mod board;
mod employees;
mod export;
mod shifts;
mod view;


use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use escala_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX, BOARD_ROUTE_COMPONENT,
    BOARD_ROUTE_PREFIX, EMPLOYEES_ROUTE_COMPONENT, EMPLOYEES_ROUTE_PREFIX,
    EXPORT_ROUTE_COMPONENT, EXPORT_ROUTE_PREFIX, SHIFTS_ROUTE_COMPONENT, SHIFTS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router. Everything except the healthcheck sits behind
/// the auth middleware.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(
            Router::new()
                .hoop(AuthMiddleware::new())
                .push(board::routes())
                .push(shifts::routes())
                .push(employees::routes())
                .push(export::routes()),
        )
}
