//! Board view and assignment endpoints.

use escala_board::assignment::Change;
use escala_board::drop::DropTarget;
use escala_board::{DateWindow, DayKey, Employee, EmployeeId, ShiftDefinition, ShiftId, ViewMode};
use escala_service::board::ShiftBoard;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};

use crate::app::api::BOARD_ROUTE_COMPONENT;
use crate::app::api::view::{ViewQuery, open_board, open_day};
use crate::error::{AppError, AppResult};

/// ## Summary
/// Board payload: the window, its days, the shift columns, the employee
/// directory and every non-empty slot.
#[derive(Debug, Serialize)]
pub struct BoardResponse<'a> {
    pub mode: ViewMode,
    pub window: DateWindow,
    pub days: Vec<DayKey>,
    pub shifts: &'a [ShiftDefinition],
    pub employees: &'a [Employee],
    pub assignments: Vec<SlotResponse<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse<'a> {
    pub day: DayKey,
    pub shift_id: &'a ShiftId,
    pub employee_ids: &'a [EmployeeId],
}

impl<'a> BoardResponse<'a> {
    fn from_board(board: &'a ShiftBoard) -> Self {
        let window = board.window();
        Self {
            mode: board.navigator().mode(),
            window,
            days: window.days(),
            shifts: board.shifts(),
            employees: board.directory().all(),
            assignments: board
                .map()
                .slots()
                .map(|(key, employee_ids)| SlotResponse {
                    day: key.day,
                    shift_id: &key.shift_id,
                    employee_ids,
                })
                .collect(),
        }
    }
}

/// ## Summary
/// Assignment payload for POST and DELETE.
#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub day: DayKey,
    pub shift_id: ShiftId,
    pub employee_id: EmployeeId,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse<'a> {
    pub change: Change,
    pub day: DayKey,
    pub shift_id: &'a ShiftId,
    pub employee_ids: &'a [EmployeeId],
}

#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub target: DropTarget,
    pub employee_id: EmployeeId,
}

/// ## Summary
/// GET /api/board - Loads the requested window.
///
/// ## Errors
/// Returns HTTP 400 for bad query parameters, 503 if storage is unreachable.
#[handler]
#[tracing::instrument(skip_all, fields(query = %req.uri().query().unwrap_or_default()))]
async fn get_board(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let board = match ViewQuery::from_request(req) {
        Ok(query) => open_board(depot, query).await,
        Err(e) => Err(e),
    };

    match board {
        Ok(board) => res.render(Json(BoardResponse::from_board(&board))),
        Err(e) => e.render(res),
    }
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Assign,
    Unassign,
}

type Mutated = (ShiftBoard, AssignmentRequest, Change);

async fn mutate(req: &mut Request, depot: &Depot, mutation: Mutation) -> AppResult<Mutated> {
    let body: AssignmentRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid assignment body: {e}")))?;

    let mut board = open_day(depot, body.day).await?;
    let change = match mutation {
        Mutation::Assign => {
            board
                .assign(body.day, body.shift_id.clone(), body.employee_id.clone())
                .await?
        }
        Mutation::Unassign => {
            board
                .unassign(body.day, body.shift_id.clone(), body.employee_id.clone())
                .await?
        }
    };

    Ok((board, body, change))
}

fn render_mutation(res: &mut Response, result: AppResult<Mutated>) {
    match result {
        Ok((board, body, change)) => {
            let key = escala_board::AssignmentKey::new(body.day, body.shift_id.clone());
            res.status_code(StatusCode::OK);
            res.render(Json(AssignmentResponse {
                change,
                day: body.day,
                shift_id: &body.shift_id,
                employee_ids: board.map().get(&key),
            }));
        }
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// POST /api/board/assignments - Adds an employee to a slot.
///
/// Assigning an employee already in the slot succeeds with `"unchanged"`.
///
/// ## Errors
/// Returns HTTP 400 for an invalid body, 500/503 if storage fails.
#[handler]
#[tracing::instrument(skip_all)]
async fn post_assignment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = mutate(req, depot, Mutation::Assign).await;
    render_mutation(res, result);
}

/// ## Summary
/// DELETE /api/board/assignments - Removes exactly one employee from a slot.
///
/// ## Errors
/// Returns HTTP 400 for an invalid body, 500/503 if storage fails.
#[handler]
#[tracing::instrument(skip_all)]
async fn delete_assignment(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = mutate(req, depot, Mutation::Unassign).await;
    render_mutation(res, result);
}

/// ## Summary
/// POST /api/board/drop - Handles an employee dropped on a shift column or
/// a day card.
///
/// ## Errors
/// Returns HTTP 400 for an invalid body, 500/503 if storage fails.
#[handler]
#[tracing::instrument(skip_all)]
async fn post_drop(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: DropRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(e) => {
            AppError::BadRequest(format!("invalid drop body: {e}")).render(res);
            return;
        }
    };

    let day = match &body.target {
        DropTarget::Shift { day, .. } | DropTarget::Day { day } => *day,
    };

    let result = match open_day(depot, day).await {
        Ok(mut board) => board
            .drop_employee(body.target, body.employee_id)
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(dropped) => res.render(Json(dropped)),
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(BOARD_ROUTE_COMPONENT)
        .get(get_board)
        .push(
            Router::with_path("assignments")
                .post(post_assignment)
                .delete(delete_assignment),
        )
        .push(Router::with_path("drop").post(post_drop))
}
