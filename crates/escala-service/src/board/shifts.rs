//! Shift configuration.

use escala_board::shift::{default_shifts, validate_shifts};
use escala_board::ShiftDefinition;

use crate::error::ServiceResult;
use crate::store::BoardStore;

/// ## Summary
/// Returns the configured shifts in display order.
///
/// Falls back to the built-in defaults when nothing usable is stored.
/// Malformed rows are logged and skipped.
///
/// ## Errors
/// Returns the storage error if the read fails.
#[tracing::instrument(skip(store))]
pub async fn list_shifts(store: &dyn BoardStore) -> ServiceResult<Vec<ShiftDefinition>> {
    let rows = store.list_shifts().await?;
    if rows.is_empty() {
        tracing::debug!("No shifts configured, using defaults");
        return Ok(default_shifts());
    }

    let shifts = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match row.parse() {
                Ok(shift) => Some(shift),
                Err(e) => {
                    tracing::warn!(shift_id = %id, error = %e, "Skipping malformed shift row");
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if shifts.is_empty() {
        tracing::warn!("Every stored shift is malformed, using defaults");
        return Ok(default_shifts());
    }

    Ok(shifts)
}

/// ## Summary
/// Validates `shifts` and stores them as the new configuration.
///
/// ## Errors
/// Returns `BoardError::InvalidShiftConfig` for an invalid list, or the
/// storage error if the write fails.
///
/// ## Side Effects
/// The previous configuration is replaced as a whole.
#[tracing::instrument(skip_all, fields(count = shifts.len()))]
pub async fn save_shifts(
    store: &dyn BoardStore,
    shifts: Vec<ShiftDefinition>,
) -> ServiceResult<Vec<ShiftDefinition>> {
    validate_shifts(&shifts)?;

    store
        .replace_shifts(shifts.iter().map(ShiftDefinition::to_raw).collect())
        .await?;

    tracing::info!("Shift configuration saved");
    Ok(shifts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::store::MemoryBoardStore;
    use escala_board::shift::ShiftSchedule;
    use escala_board::{BoardError, RawShift, ShiftId};

    #[test_log::test(tokio::test)]
    async fn test_empty_store_falls_back_to_defaults() {
        let store = MemoryBoardStore::new();
        let shifts = list_shifts(&store).await.expect("list");
        let ids: Vec<_> = shifts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_rows_are_skipped() {
        let store = MemoryBoardStore::new().with_shifts(vec![
            RawShift {
                id: "manha".to_string(),
                label: "Manhã".to_string(),
                start_time: Some("06:00".to_string()),
                end_time: Some("12:00".to_string()),
                ..RawShift::default()
            },
            RawShift {
                id: "quebrado".to_string(),
                label: "Quebrado".to_string(),
                start_time: Some("25:99".to_string()),
                end_time: Some("12:00".to_string()),
                ..RawShift::default()
            },
        ]);

        let shifts = list_shifts(&store).await.expect("list");
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].title(), "Manhã (06:00 - 12:00)");
    }

    #[test_log::test(tokio::test)]
    async fn test_save_then_list_keeps_order() {
        let store = MemoryBoardStore::new();
        let mut shifts = default_shifts();
        shifts.reverse();

        save_shifts(&store, shifts.clone()).await.expect("save");
        assert_eq!(list_shifts(&store).await.expect("list"), shifts);
    }

    #[test_log::test(tokio::test)]
    async fn test_save_rejects_duplicate_ids() {
        let store = MemoryBoardStore::new();
        let mut shifts = default_shifts();
        shifts[1].id = ShiftId::parse("t1").expect("valid");

        let result = save_shifts(&store, shifts).await;
        assert!(matches!(
            result,
            Err(ServiceError::BoardError(BoardError::InvalidShiftConfig(_)))
        ));
        assert!(store.list_shifts().await.expect("list").is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_save_rejects_blank_free_label() {
        let store = MemoryBoardStore::new();
        let mut shifts = default_shifts();
        shifts[3].schedule = ShiftSchedule::Label {
            text: "  ".to_string(),
        };
        assert!(save_shifts(&store, shifts).await.is_err());
    }
}
