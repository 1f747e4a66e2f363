//! Exports of the board: chat-markup text and a paginated PDF.
//!
//! Both formatters walk the same [`ScheduleView`], so they agree on ordering:
//! days ascending, shifts in configured order (unconfigured ids last, by id),
//! employees in assignment order.

pub mod layout;
pub mod pdf;
pub mod text;

use std::collections::HashSet;

use thiserror::Error;

use crate::assignment::{AssignmentKey, AssignmentMap};
use crate::day::DayKey;
use crate::employee::EmployeeDirectory;
use crate::id::ShiftId;
use crate::navigation::{DateWindow, ViewMode};
use crate::shift::ShiftDefinition;

/// Export layer errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Everything a formatter reads. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct ExportInput<'a> {
    pub mode: ViewMode,
    pub window: DateWindow,
    pub map: &'a AssignmentMap,
    pub shifts: &'a [ShiftDefinition],
    pub directory: &'a EmployeeDirectory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    pub mode: ViewMode,
    pub window: DateWindow,
    pub days: Vec<DaySection>,
}

impl ScheduleView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.shifts.is_empty())
    }

    /// "03/06/2024 a 09/06/2024" for a week, "Segunda-feira, 03/06/2024" for a day.
    #[must_use]
    pub fn period_label(&self) -> String {
        match self.mode {
            ViewMode::Weekly => format!(
                "{} a {}",
                self.window.start.long_label(),
                self.window.end.long_label()
            ),
            ViewMode::PointInTime => format!(
                "{}, {}",
                self.window.start.weekday_name(),
                self.window.start.long_label()
            ),
        }
    }
}

/// One day of the window with its non-empty shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    pub day: DayKey,
    pub shifts: Vec<ShiftSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSection {
    pub shift_id: ShiftId,
    pub title: String,
    pub names: Vec<String>,
}

/// ## Summary
/// Resolves the map into display order.
///
/// Every day of the window is present; only shifts with at least one employee
/// are listed under it.
#[must_use]
pub fn build_view(input: &ExportInput<'_>) -> ScheduleView {
    let configured: HashSet<&ShiftId> = input.shifts.iter().map(|s| &s.id).collect();

    let days = input
        .window
        .days()
        .into_iter()
        .map(|day| {
            let configured_sections = input.shifts.iter().filter_map(|shift| {
                let key = AssignmentKey::new(day, shift.id.clone());
                section(input, &key, shift.title())
            });

            // Slots iterate in shift id order, which fixes the order of leftovers.
            let leftover_sections = input
                .map
                .slots_for_day(day)
                .filter(|(shift_id, _)| !configured.contains(shift_id))
                .filter_map(|(shift_id, _)| {
                    let key = AssignmentKey::new(day, shift_id.clone());
                    section(input, &key, shift_id.to_string())
                })
                .collect::<Vec<_>>();

            DaySection {
                day,
                shifts: configured_sections.chain(leftover_sections).collect(),
            }
        })
        .collect();

    ScheduleView {
        mode: input.mode,
        window: input.window,
        days,
    }
}

fn section(input: &ExportInput<'_>, key: &AssignmentKey, title: String) -> Option<ShiftSection> {
    let employees = input.map.get(key);
    if employees.is_empty() {
        return None;
    }
    Some(ShiftSection {
        shift_id: key.shift_id.clone(),
        title,
        names: employees
            .iter()
            .map(|id| input.directory.display_name(id))
            .collect(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::assignment::{AssignmentKey, AssignmentMap};
    use crate::day::DayKey;
    use crate::employee::{EmployeeDirectory, RawEmployee};
    use crate::id::{EmployeeId, ShiftId};

    pub fn day(s: &str) -> DayKey {
        s.parse().expect("valid test date")
    }

    pub fn key(d: &str, shift: &str) -> AssignmentKey {
        AssignmentKey::new(day(d), ShiftId::parse(shift).expect("valid shift id"))
    }

    pub fn emp(id: &str) -> EmployeeId {
        EmployeeId::parse(id).expect("valid employee id")
    }

    pub fn directory() -> EmployeeDirectory {
        EmployeeDirectory::from_raw(
            [
                ("emp-A", "Ana Souza Lima", "Garçonete"),
                ("emp-B", "Bruno Costa", "Cozinheiro"),
                ("emp-C", "Carla Mendes", "Caixa"),
            ]
            .into_iter()
            .map(|(id, name, role)| RawEmployee {
                id: id.to_string(),
                name: name.to_string(),
                code: None,
                role: Some(role.to_string()),
            }),
        )
    }

    /// Monday 2024-06-03: t1 = [A, B]; Wednesday: t3 = [C], t1 = [B]
    pub fn week_map() -> AssignmentMap {
        let mut map = AssignmentMap::new();
        map.assign(key("2024-06-03", "t1"), emp("emp-A"));
        map.assign(key("2024-06-03", "t1"), emp("emp-B"));
        map.assign(key("2024-06-05", "t3"), emp("emp-C"));
        map.assign(key("2024-06-05", "t1"), emp("emp-B"));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::navigation::Navigator;
    use crate::shift::default_shifts;

    #[test]
    fn test_view_orders_days_and_configured_shifts() {
        let map = week_map();
        let shifts = default_shifts();
        let dir = directory();
        let input = ExportInput {
            mode: ViewMode::Weekly,
            window: Navigator::new(day("2024-06-05")).window(),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };

        let view = build_view(&input);
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[0].shifts.len(), 1);
        assert_eq!(view.days[0].shifts[0].names, vec!["Ana S.", "Bruno C."]);
        assert!(view.days[1].shifts.is_empty());

        let wednesday: Vec<_> = view.days[2].shifts.iter().map(|s| s.shift_id.as_str()).collect();
        assert_eq!(wednesday, vec!["t1", "t3"]);
    }

    #[test]
    fn test_unconfigured_shift_ids_come_last_by_id() {
        let mut map = AssignmentMap::new();
        map.assign(key("2024-06-03", "zz"), emp("emp-A"));
        map.assign(key("2024-06-03", "aa"), emp("emp-B"));
        map.assign(key("2024-06-03", "t2"), emp("emp-C"));
        let shifts = default_shifts();
        let dir = directory();
        let input = ExportInput {
            mode: ViewMode::PointInTime,
            window: DateWindow::for_mode(ViewMode::PointInTime, day("2024-06-03")),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };

        let view = build_view(&input);
        let titles: Vec<_> = view.days[0].shifts.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["2º Turno (16:00 - 00:00)", "aa", "zz"]);
    }

    #[test]
    fn test_view_is_deterministic() {
        let map = week_map();
        let shifts = default_shifts();
        let dir = directory();
        let input = ExportInput {
            mode: ViewMode::Weekly,
            window: Navigator::new(day("2024-06-03")).window(),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };
        assert_eq!(build_view(&input), build_view(&input));
    }

    #[test]
    fn test_period_labels() {
        let map = AssignmentMap::new();
        let shifts = default_shifts();
        let dir = directory();
        let mut input = ExportInput {
            mode: ViewMode::Weekly,
            window: Navigator::new(day("2024-06-03")).window(),
            map: &map,
            shifts: &shifts,
            directory: &dir,
        };
        let view = build_view(&input);
        assert!(view.is_empty());
        assert_eq!(view.period_label(), "03/06/2024 a 09/06/2024");

        input.mode = ViewMode::PointInTime;
        input.window = DateWindow::for_mode(ViewMode::PointInTime, day("2024-06-03"));
        assert_eq!(build_view(&input).period_label(), "Segunda-feira, 03/06/2024");
    }
}
