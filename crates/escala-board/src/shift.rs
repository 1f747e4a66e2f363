//! Shift definitions: the configurable time-of-day buckets of the board.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::id::ShiftId;

/// When a shift happens: either a time range or a free-form label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftSchedule {
    Range {
        #[serde(with = "hhmm")]
        start: NaiveTime,
        #[serde(with = "hhmm")]
        end: NaiveTime,
    },
    Label {
        text: String,
    },
}

impl ShiftSchedule {
    /// Human-readable description, e.g. "08:00 - 16:00".
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Range { start, end } => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            Self::Label { text } => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftStyle {
    pub text_color: String,
    pub background_color: String,
}

impl Default for ShiftStyle {
    fn default() -> Self {
        Self {
            text_color: "#1f2937".to_string(),
            background_color: "#f3f4f6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub id: ShiftId,
    pub label: String,
    pub schedule: ShiftSchedule,
    #[serde(default)]
    pub style: ShiftStyle,
}

impl ShiftDefinition {
    /// Label with its schedule, e.g. "1º Turno (08:00 - 16:00)".
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.schedule.describe())
    }

    /// ## Summary
    /// Converts the definition into its storage shape.
    #[must_use]
    pub fn to_raw(&self) -> RawShift {
        let (start_time, end_time, free_label) = match &self.schedule {
            ShiftSchedule::Range { start, end } => (
                Some(start.format("%H:%M").to_string()),
                Some(end.format("%H:%M").to_string()),
                None,
            ),
            ShiftSchedule::Label { text } => (None, None, Some(text.clone())),
        };

        RawShift {
            id: self.id.to_string(),
            label: self.label.clone(),
            start_time,
            end_time,
            free_label,
            text_color: Some(self.style.text_color.clone()),
            background_color: Some(self.style.background_color.clone()),
        }
    }
}

/// A shift row as read from storage, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawShift {
    pub id: String,
    pub label: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub free_label: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
}

impl RawShift {
    /// ## Summary
    /// Validates the row and converts it into a `ShiftDefinition`.
    ///
    /// A row with both times is a range; otherwise it needs a non-empty free label.
    ///
    /// ## Errors
    /// Returns an error if the id or label is empty, a time does not parse, or
    /// the row carries neither a complete range nor a free label.
    pub fn parse(self) -> BoardResult<ShiftDefinition> {
        let id = ShiftId::parse(&self.id)?;

        let label = self.label.trim().to_string();
        if label.is_empty() {
            return Err(BoardError::MalformedRow(format!("shift {id} has no label")));
        }

        let schedule = match (non_blank(self.start_time), non_blank(self.end_time)) {
            (Some(start), Some(end)) => ShiftSchedule::Range {
                start: parse_time(&start)?,
                end: parse_time(&end)?,
            },
            (None, None) => match non_blank(self.free_label) {
                Some(text) => ShiftSchedule::Label { text },
                None => {
                    return Err(BoardError::MalformedRow(format!(
                        "shift {id} has neither times nor a free label"
                    )));
                }
            },
            _ => {
                return Err(BoardError::MalformedRow(format!(
                    "shift {id} has only one of start/end"
                )));
            }
        };

        let defaults = ShiftStyle::default();
        let style = ShiftStyle {
            text_color: non_blank(self.text_color).unwrap_or(defaults.text_color),
            background_color: non_blank(self.background_color)
                .unwrap_or(defaults.background_color),
        };

        Ok(ShiftDefinition {
            id,
            label,
            schedule,
            style,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// ## Summary
/// Parses `HH:MM` (seconds are accepted and dropped).
///
/// ## Errors
/// Returns `BoardError::InvalidTime` if neither format matches.
pub fn parse_time(value: &str) -> BoardResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| BoardError::InvalidTime(format!("{value}: {e}")))
}

/// ## Summary
/// The shifts used when storage has none configured.
#[must_use]
pub fn default_shifts() -> Vec<ShiftDefinition> {
    let row = |id: &str, label: &str, times: Option<(&str, &str)>, free: Option<&str>, bg: &str| {
        RawShift {
            id: id.to_string(),
            label: label.to_string(),
            start_time: times.map(|(start, _)| start.to_string()),
            end_time: times.map(|(_, end)| end.to_string()),
            free_label: free.map(str::to_string),
            text_color: None,
            background_color: Some(bg.to_string()),
        }
    };

    [
        row("t1", "1º Turno", Some(("08:00", "16:00")), None, "#dbeafe"),
        row("t2", "2º Turno", Some(("16:00", "00:00")), None, "#fef3c7"),
        row("t3", "3º Turno", Some(("00:00", "08:00")), None, "#e0e7ff"),
        row("t4", "Extra", None, Some("Conforme demanda"), "#dcfce7"),
    ]
    .into_iter()
    .filter_map(|raw| raw.parse().ok())
    .collect()
}

/// ## Summary
/// Checks an ordered shift list before it replaces the stored configuration.
///
/// ## Errors
/// Returns `BoardError::InvalidShiftConfig` for an empty list, duplicate ids,
/// blank labels, or blank free labels.
pub fn validate_shifts(shifts: &[ShiftDefinition]) -> BoardResult<()> {
    if shifts.is_empty() {
        return Err(BoardError::InvalidShiftConfig(
            "at least one shift is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for shift in shifts {
        if !seen.insert(&shift.id) {
            return Err(BoardError::InvalidShiftConfig(format!(
                "duplicate shift id {}",
                shift.id
            )));
        }
        if shift.label.trim().is_empty() {
            return Err(BoardError::InvalidShiftConfig(format!(
                "shift {} has a blank label",
                shift.id
            )));
        }
        if let ShiftSchedule::Label { text } = &shift.schedule
            && text.trim().is_empty()
        {
            return Err(BoardError::InvalidShiftConfig(format!(
                "shift {} has a blank free label",
                shift.id
            )));
        }
    }

    Ok(())
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
