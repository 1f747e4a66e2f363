//! Weekly and point-in-time navigation over the board.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::error::{BoardError, BoardResult};

/// Granularity of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Seven contiguous days starting on a Monday.
    Weekly,
    /// A single selected day.
    #[serde(rename = "daily", alias = "point_in_time")]
    PointInTime,
}

impl ViewMode {
    /// Number of days one navigation step moves the anchor.
    #[must_use]
    pub const fn step_days(self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::PointInTime => 1,
        }
    }

    #[must_use]
    pub const fn window_len(self) -> u64 {
        match self {
            Self::Weekly => 7,
            Self::PointInTime => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::PointInTime => "daily",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weekly" => Ok(Self::Weekly),
            "daily" | "point_in_time" => Ok(Self::PointInTime),
            other => Err(BoardError::InvalidViewMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of days shown by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DayKey,
    pub end: DayKey,
}

impl DateWindow {
    /// ## Summary
    /// Builds the window of `mode` starting at `start`.
    ///
    /// The end saturates at the last representable date.
    #[must_use]
    pub fn for_mode(mode: ViewMode, start: DayKey) -> Self {
        let end = start
            .date()
            .checked_add_days(Days::new(mode.window_len() - 1))
            .unwrap_or(NaiveDate::MAX);
        Self {
            start,
            end: DayKey::new(end),
        }
    }

    #[must_use]
    pub fn contains(&self, day: DayKey) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day of the window in ascending order.
    #[must_use]
    pub fn days(&self) -> Vec<DayKey> {
        self.start
            .date()
            .iter_days()
            .take_while(|d| *d <= self.end.date())
            .map(DayKey::new)
            .collect()
    }
}

/// Keeps one anchor per mode and the currently active mode.
///
/// Switching modes never resets the other mode's anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    mode: ViewMode,
    weekly_anchor: DayKey,
    daily_anchor: DayKey,
}

impl Navigator {
    /// Starts in weekly mode on the week containing `today`.
    #[must_use]
    pub fn new(today: DayKey) -> Self {
        Self {
            mode: ViewMode::Weekly,
            weekly_anchor: today.week_anchor(),
            daily_anchor: today,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Anchor of the active mode.
    #[must_use]
    pub const fn anchor(&self) -> DayKey {
        match self.mode {
            ViewMode::Weekly => self.weekly_anchor,
            ViewMode::PointInTime => self.daily_anchor,
        }
    }

    #[must_use]
    pub const fn anchor_for(&self, mode: ViewMode) -> DayKey {
        match mode {
            ViewMode::Weekly => self.weekly_anchor,
            ViewMode::PointInTime => self.daily_anchor,
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Moves the active mode's anchor to `day` (normalised to Monday in weekly mode).
    pub fn go_to(&mut self, day: DayKey) {
        match self.mode {
            ViewMode::Weekly => self.weekly_anchor = day.week_anchor(),
            ViewMode::PointInTime => self.daily_anchor = day,
        }
    }

    /// ## Summary
    /// Advances the active anchor by one step and returns the new window.
    ///
    /// ## Errors
    /// Returns `BoardError::DateOutOfRange` if the anchor cannot move further.
    pub fn next(&mut self) -> BoardResult<DateWindow> {
        self.step(self.mode.step_days())
    }

    /// ## Summary
    /// Moves the active anchor back by one step and returns the new window.
    ///
    /// ## Errors
    /// Returns `BoardError::DateOutOfRange` if the anchor cannot move further.
    pub fn previous(&mut self) -> BoardResult<DateWindow> {
        self.step(-self.mode.step_days())
    }

    fn step(&mut self, days: i64) -> BoardResult<DateWindow> {
        let moved = self.anchor().offset(days)?;
        match self.mode {
            ViewMode::Weekly => self.weekly_anchor = moved.week_anchor(),
            ViewMode::PointInTime => self.daily_anchor = moved,
        }
        Ok(self.window())
    }

    #[must_use]
    pub fn window(&self) -> DateWindow {
        DateWindow::for_mode(self.mode, self.anchor())
    }
}
