//! Calendar day keys.
//!
//! A `DayKey` is a plain calendar date. The board never carries a time of day
//! for its days, so two timestamps on the same local date always map to the
//! same key.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// ## Summary
    /// Builds a key from year, month and day.
    ///
    /// ## Errors
    /// Returns `BoardError::InvalidDate` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> BoardResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| BoardError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// ## Summary
    /// Normalises a timestamp to its local calendar day.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }

    /// ## Summary
    /// Returns the current day as seen from the given time zone.
    #[must_use]
    pub fn today_in<Tz: TimeZone>(tz: &Tz) -> Self {
        Self::from_datetime(&Utc::now().with_timezone(tz))
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// ## Summary
    /// Returns the Monday of the week containing this day.
    ///
    /// Sunday belongs to the week that started six days earlier. Days of the
    /// first representable week, whose Monday does not exist, clamp to the
    /// first representable Monday.
    #[must_use]
    pub fn week_anchor(self) -> Self {
        let back = u64::from(self.0.weekday().num_days_from_monday());
        Self(
            self.0
                .checked_sub_days(Days::new(back))
                .unwrap_or_else(first_monday),
        )
    }

    /// ## Summary
    /// Moves the key by `offset` days, forwards or backwards.
    ///
    /// ## Errors
    /// Returns `BoardError::DateOutOfRange` when the result is not representable.
    pub fn offset(self, offset: i64) -> BoardResult<Self> {
        let magnitude = Days::new(offset.unsigned_abs());
        let moved = if offset >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        moved.map(Self).ok_or(BoardError::DateOutOfRange)
    }

    /// Weekday name in Portuguese, e.g. "Segunda-feira".
    #[must_use]
    pub fn weekday_name(self) -> &'static str {
        match self.weekday() {
            Weekday::Mon => "Segunda-feira",
            Weekday::Tue => "Terça-feira",
            Weekday::Wed => "Quarta-feira",
            Weekday::Thu => "Quinta-feira",
            Weekday::Fri => "Sexta-feira",
            Weekday::Sat => "Sábado",
            Weekday::Sun => "Domingo",
        }
    }

    /// `DD/MM`
    #[must_use]
    pub fn short_label(self) -> String {
        self.0.format("%d/%m").to_string()
    }

    /// `DD/MM/YYYY`
    #[must_use]
    pub fn long_label(self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }

    /// `DD-MM-YYYY`, safe for file names.
    #[must_use]
    pub fn file_label(self) -> String {
        self.0.format("%d-%m-%Y").to_string()
    }
}

fn first_monday() -> NaiveDate {
    let ahead = (7 - NaiveDate::MIN.weekday().num_days_from_monday()) % 7;
    NaiveDate::MIN + Days::new(u64::from(ahead))
}

impl std::str::FromStr for DayKey {
    type Err = BoardError;

    fn from_str(s: &str) -> BoardResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| BoardError::InvalidDate(format!("{s}: {e}")))
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
