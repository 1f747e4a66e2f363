//! The stateful shift board.
//!
//! A `ShiftBoard` owns the assignment map for one window plus the navigator
//! that picks the window. Mutations are applied to the map first and then
//! persisted; what happens to the map when persistence fails is decided by
//! [`PersistFailurePolicy`].

pub mod employees;
pub mod shifts;

use std::sync::Arc;

use escala_board::assignment::Change;
use escala_board::drop::{DropOutcome, DropTarget, resolve_drop};
use escala_board::export::pdf::{file_name, render_pdf};
use escala_board::export::text::{TextDraft, render_text};
use escala_board::export::ExportInput;
use escala_board::{
    AssignmentKey, AssignmentMap, AssignmentRecord, BoardResult, DateWindow, DayKey, Employee,
    EmployeeDirectory, EmployeeId, Navigator, ShiftDefinition, ShiftId, ViewMode,
};
use escala_core::config::PersistFailurePolicy;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::store::BoardStore;

pub struct ShiftBoard {
    store: Arc<dyn BoardStore>,
    on_persist_failure: PersistFailurePolicy,
    navigator: Navigator,
    window: DateWindow,
    map: AssignmentMap,
    shifts: Vec<ShiftDefinition>,
    directory: EmployeeDirectory,
}

/// A drop together with the assignment it caused, if any.
#[derive(Debug, Clone, Serialize)]
pub struct DropResult {
    pub outcome: DropOutcome,
    pub change: Option<Change>,
}

#[derive(Debug, Clone)]
pub struct PdfExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ShiftBoard {
    /// ## Summary
    /// Reads the shift configuration, the employee directory and the
    /// assignments of the navigator's window.
    ///
    /// ## Errors
    /// Returns an error if any of the reads fail.
    #[tracing::instrument(skip(store, navigator), fields(mode = %navigator.mode()))]
    pub async fn open(
        store: Arc<dyn BoardStore>,
        navigator: Navigator,
        on_persist_failure: PersistFailurePolicy,
    ) -> ServiceResult<Self> {
        let shifts = shifts::list_shifts(store.as_ref()).await?;
        let directory = employees::load_directory(store.as_ref()).await?;
        let window = navigator.window();

        let mut board = Self {
            store,
            on_persist_failure,
            navigator,
            window,
            map: AssignmentMap::new(),
            shifts,
            directory,
        };
        board.load(window).await?;
        Ok(board)
    }

    /// ## Summary
    /// Replaces the map with the stored assignments inside `window`.
    ///
    /// ## Errors
    /// Returns the storage error if the fetch fails.
    ///
    /// ## Side Effects
    /// On failure the previous map and window are kept.
    #[tracing::instrument(skip(self), fields(start = %window.start, end = %window.end))]
    pub async fn load(&mut self, window: DateWindow) -> ServiceResult<()> {
        let rows = match self.store.fetch_assignments(window).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load assignments, keeping previous board");
                return Err(e);
            }
        };

        self.map = AssignmentMap::from_raw_rows(&window, rows);
        self.window = window;
        tracing::debug!(slots = self.map.len(), "Board loaded");
        Ok(())
    }

    /// ## Summary
    /// Loads the navigator's current window again.
    ///
    /// ## Errors
    /// Returns the storage error if the fetch fails.
    pub async fn reload(&mut self) -> ServiceResult<()> {
        self.load(self.navigator.window()).await
    }

    /// ## Summary
    /// Moves one week (or one day) forward and reloads.
    ///
    /// ## Errors
    /// Returns an error if the date overflows or the reload fails; the board
    /// keeps its previous window in both cases.
    pub async fn next(&mut self) -> ServiceResult<DateWindow> {
        self.navigate(|nav| nav.next().map(|_| ())).await
    }

    /// ## Summary
    /// Moves one week (or one day) back and reloads.
    ///
    /// ## Errors
    /// Returns an error if the date overflows or the reload fails; the board
    /// keeps its previous window in both cases.
    pub async fn previous(&mut self) -> ServiceResult<DateWindow> {
        self.navigate(|nav| nav.previous().map(|_| ())).await
    }

    /// ## Summary
    /// Switches between the weekly and daily view and reloads.
    ///
    /// ## Errors
    /// Returns the storage error if the reload fails.
    pub async fn set_mode(&mut self, mode: ViewMode) -> ServiceResult<DateWindow> {
        self.navigate(|nav| {
            nav.set_mode(mode);
            Ok(())
        })
        .await
    }

    /// ## Summary
    /// Jumps the active view to the window containing `day` and reloads.
    ///
    /// ## Errors
    /// Returns the storage error if the reload fails.
    pub async fn go_to(&mut self, day: DayKey) -> ServiceResult<DateWindow> {
        self.navigate(|nav| {
            nav.go_to(day);
            Ok(())
        })
        .await
    }

    async fn navigate(
        &mut self,
        step: impl FnOnce(&mut Navigator) -> BoardResult<()>,
    ) -> ServiceResult<DateWindow> {
        let previous = self.navigator.clone();

        if let Err(e) = step(&mut self.navigator) {
            self.navigator = previous;
            return Err(e.into());
        }

        let window = self.navigator.window();
        if let Err(e) = self.load(window).await {
            self.navigator = previous;
            return Err(e);
        }
        Ok(window)
    }

    /// ## Summary
    /// Adds `employee_id` to the slot and persists the assignment.
    ///
    /// Assigning an employee who is already in the slot changes nothing and
    /// does not touch storage.
    ///
    /// ## Errors
    /// Returns the storage error if the insert fails.
    ///
    /// ## Side Effects
    /// The map is updated before the insert completes. On failure the slot is
    /// restored or left as is depending on the configured policy.
    #[tracing::instrument(skip(self))]
    pub async fn assign(
        &mut self,
        day: DayKey,
        shift_id: ShiftId,
        employee_id: EmployeeId,
    ) -> ServiceResult<Change> {
        let key = AssignmentKey::new(day, shift_id);
        let previous = self.map.get(&key).to_vec();

        if !self.map.assign(key.clone(), employee_id.clone()).is_applied() {
            tracing::debug!("Employee already assigned to slot");
            return Ok(Change::Unchanged);
        }

        let record = AssignmentRecord {
            day,
            shift_id: key.shift_id.clone(),
            employee_id,
        };
        let persisted = self.store.insert_assignment(record.to_raw()).await;
        if let Err(e) = persisted {
            self.settle_failed_write(key, previous, &e);
            return Err(e);
        }

        tracing::info!("Employee assigned");
        Ok(Change::Applied)
    }

    /// ## Summary
    /// Removes exactly `employee_id` from the slot and deletes the stored row.
    ///
    /// Other employees in the slot are untouched. Removing an employee who is
    /// not in the slot changes nothing and does not touch storage.
    ///
    /// ## Errors
    /// Returns the storage error if the delete fails.
    ///
    /// ## Side Effects
    /// Same optimistic handling as [`ShiftBoard::assign`].
    #[tracing::instrument(skip(self))]
    pub async fn unassign(
        &mut self,
        day: DayKey,
        shift_id: ShiftId,
        employee_id: EmployeeId,
    ) -> ServiceResult<Change> {
        let key = AssignmentKey::new(day, shift_id);
        let previous = self.map.get(&key).to_vec();

        if !self.map.unassign(&key, &employee_id).is_applied() {
            tracing::debug!("Employee not in slot");
            return Ok(Change::Unchanged);
        }

        let record = AssignmentRecord {
            day,
            shift_id: key.shift_id.clone(),
            employee_id,
        };
        let persisted = self.store.delete_assignment(record.to_raw()).await;
        if let Err(e) = persisted {
            self.settle_failed_write(key, previous, &e);
            return Err(e);
        }

        tracing::info!("Employee unassigned");
        Ok(Change::Applied)
    }

    fn settle_failed_write(
        &mut self,
        key: AssignmentKey,
        previous: Vec<EmployeeId>,
        error: &ServiceError,
    ) {
        match self.on_persist_failure {
            PersistFailurePolicy::Rollback => {
                tracing::error!(error = %error, "Failed to persist change, slot rolled back");
                self.map.restore_slot(key, previous);
            }
            PersistFailurePolicy::Keep => {
                tracing::error!(
                    error = %error,
                    "Failed to persist change, keeping local change until next reload"
                );
            }
        }
    }

    /// ## Summary
    /// Handles an employee dropped on a shift column or a day card.
    ///
    /// A shift column assigns right away; a day card returns the shift
    /// choices and assigns nothing.
    ///
    /// ## Errors
    /// Returns the storage error if the resulting assignment fails.
    pub async fn drop_employee(
        &mut self,
        target: DropTarget,
        employee_id: EmployeeId,
    ) -> ServiceResult<DropResult> {
        let outcome = resolve_drop(target, employee_id, &self.shifts);

        let change = match &outcome {
            DropOutcome::Assign { key, employee_id } => Some(
                self.assign(key.day, key.shift_id.clone(), employee_id.clone())
                    .await?,
            ),
            DropOutcome::ChooseShift { .. } => None,
        };

        Ok(DropResult { outcome, change })
    }

    /// Picker search over the loaded directory.
    #[must_use]
    pub fn search_employees(&self, query: &str) -> Vec<&Employee> {
        self.directory.search(query)
    }

    #[must_use]
    pub fn export_input(&self) -> ExportInput<'_> {
        ExportInput {
            mode: self.navigator.mode(),
            window: self.window,
            map: &self.map,
            shifts: &self.shifts,
            directory: &self.directory,
        }
    }

    #[must_use]
    pub fn export_text(&self) -> String {
        render_text(&self.export_input())
    }

    #[must_use]
    pub fn text_draft(&self) -> TextDraft {
        TextDraft::generate(&self.export_input())
    }

    /// ## Summary
    /// Discards the draft's edits and regenerates it from the live board.
    pub fn restore_draft(&self, draft: &mut TextDraft) {
        draft.restore(&self.export_input());
    }

    /// ## Summary
    /// Renders the current window as a PDF.
    ///
    /// ## Errors
    /// Returns `ServiceError::ExportError` if the document cannot be produced.
    #[tracing::instrument(skip(self), fields(mode = %self.navigator.mode(), start = %self.window.start))]
    pub fn export_pdf(&self) -> ServiceResult<PdfExport> {
        let bytes = render_pdf(&self.export_input())
            .inspect_err(|e| tracing::error!(error = %e, "PDF export failed"))?;

        Ok(PdfExport {
            file_name: file_name(self.navigator.mode(), self.window.start),
            bytes,
        })
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub const fn window(&self) -> DateWindow {
        self.window
    }

    #[must_use]
    pub const fn map(&self) -> &AssignmentMap {
        &self.map
    }

    #[must_use]
    pub fn shifts(&self) -> &[ShiftDefinition] {
        &self.shifts
    }

    #[must_use]
    pub const fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }
}

#[cfg(test)]
mod tests;
