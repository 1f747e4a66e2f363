//! Resolving the requested board window from query parameters.

use escala_board::{DayKey, Navigator, ViewMode};
use escala_service::board::ShiftBoard;
use salvo::{Depot, Request};

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// `?mode=weekly|daily&date=YYYY-MM-DD&step=next|previous`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub mode: Option<ViewMode>,
    pub date: Option<DayKey>,
    pub step: Option<Step>,
}

impl ViewQuery {
    /// ## Summary
    /// Reads the view parameters from the query string.
    ///
    /// ## Errors
    /// Returns a 400-class error for an unknown mode or step, or a malformed date.
    pub fn from_request(req: &Request) -> AppResult<Self> {
        let mode = req
            .query::<String>("mode")
            .map(|value| value.parse::<ViewMode>())
            .transpose()?;
        let date = req
            .query::<String>("date")
            .map(|value| value.parse::<DayKey>())
            .transpose()?;
        let step = match req.query::<String>("step").as_deref() {
            None => None,
            Some("next") => Some(Step::Next),
            Some("previous") => Some(Step::Previous),
            Some(other) => return Err(AppError::BadRequest(format!("invalid step: {other}"))),
        };

        Ok(Self { mode, date, step })
    }

    /// ## Summary
    /// Builds the navigator for this query. Without a date the board opens on
    /// today in the configured time zone.
    ///
    /// ## Errors
    /// Returns an error if stepping leaves the supported date range.
    pub fn navigator(self, today: DayKey) -> AppResult<Navigator> {
        let mut navigator =
            Navigator::new(self.date.unwrap_or(today)).with_mode(self.mode.unwrap_or(ViewMode::Weekly));

        match self.step {
            Some(Step::Next) => {
                navigator.next()?;
            }
            Some(Step::Previous) => {
                navigator.previous()?;
            }
            None => {}
        }

        Ok(navigator)
    }
}

/// ## Summary
/// Opens a board on the window described by `query`.
///
/// ## Errors
/// Returns an error if the configuration or store is missing from the depot,
/// the time zone is invalid, or loading the board fails.
pub async fn open_board(depot: &Depot, query: ViewQuery) -> AppResult<ShiftBoard> {
    let config = get_config_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;

    let today = DayKey::today_in(&config.board.tz()?);
    let navigator = query.navigator(today)?;

    Ok(ShiftBoard::open(store, navigator, config.board.on_persist_failure).await?)
}

/// ## Summary
/// Opens a single-day board for mutating `day`.
///
/// ## Errors
/// Same as [`open_board`].
pub async fn open_day(depot: &Depot, day: DayKey) -> AppResult<ShiftBoard> {
    open_board(
        depot,
        ViewQuery {
            mode: Some(ViewMode::PointInTime),
            date: Some(day),
            step: None,
        },
    )
    .await
}
