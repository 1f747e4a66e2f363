use std::sync::Arc;

use chrono::NaiveDate;
use escala_board::assignment::Change;
use escala_board::drop::{DropOutcome, DropTarget};
use escala_board::{
    AssignmentKey, DayKey, EmployeeId, Navigator, RawAssignment, RawEmployee, ShiftId, ViewMode,
};
use escala_core::config::PersistFailurePolicy;

use super::*;
use crate::store::MemoryBoardStore;

fn day(s: &str) -> DayKey {
    s.parse().expect("valid test date")
}

fn shift(id: &str) -> ShiftId {
    ShiftId::parse(id).expect("valid shift id")
}

fn emp(id: &str) -> EmployeeId {
    EmployeeId::parse(id).expect("valid employee id")
}

fn row(d: &str, shift_id: &str, employee_id: &str) -> RawAssignment {
    RawAssignment {
        day: NaiveDate::parse_from_str(d, "%Y-%m-%d").expect("valid test date"),
        shift_id: shift_id.to_string(),
        employee_id: employee_id.to_string(),
    }
}

fn employees() -> Vec<RawEmployee> {
    [
        ("emp-A", "Ana Souza Lima"),
        ("emp-B", "Bruno Costa"),
        ("emp-C", "Carla Mendes"),
    ]
    .into_iter()
    .map(|(id, name)| RawEmployee {
        id: id.to_string(),
        name: name.to_string(),
        code: None,
        role: Some("Atendente".to_string()),
    })
    .collect()
}

fn store_with(rows: Vec<RawAssignment>) -> Arc<MemoryBoardStore> {
    Arc::new(
        MemoryBoardStore::new()
            .with_employees(employees())
            .with_assignments(rows),
    )
}

async fn open(store: &Arc<MemoryBoardStore>, policy: PersistFailurePolicy) -> ShiftBoard {
    ShiftBoard::open(store.clone(), Navigator::new(day("2024-06-05")), policy)
        .await
        .expect("board opens")
}

fn slot(board: &ShiftBoard, d: &str, shift_id: &str) -> Vec<String> {
    board
        .map()
        .get(&AssignmentKey::new(day(d), shift(shift_id)))
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_load_unassign_and_export_scenario() {
    let store = store_with(vec![
        row("2024-06-03", "t1", "emp-A"),
        row("2024-06-03", "t1", "emp-B"),
    ]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    assert_eq!(board.window().start, day("2024-06-03"));
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A", "emp-B"]);

    let change = board
        .unassign(day("2024-06-03"), shift("t1"), emp("emp-A"))
        .await
        .expect("unassign");
    assert_eq!(change, Change::Applied);
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-B"]);
    assert_eq!(store.assignments().await, vec![row("2024-06-03", "t1", "emp-B")]);

    let text = board.export_text();
    assert!(text.contains("*Segunda-feira (03/06)*\n_1º Turno (08:00 - 16:00)_\n• Bruno C."));
    assert!(!text.contains("Ana S."));
    assert!(!text.contains("2º Turno"));
}

#[test_log::test(tokio::test)]
async fn test_assign_twice_is_idempotent() {
    let store = store_with(Vec::new());
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let first = board
        .assign(day("2024-06-04"), shift("t2"), emp("emp-C"))
        .await
        .expect("assign");
    let second = board
        .assign(day("2024-06-04"), shift("t2"), emp("emp-C"))
        .await
        .expect("assign");

    assert_eq!(first, Change::Applied);
    assert_eq!(second, Change::Unchanged);
    assert_eq!(slot(&board, "2024-06-04", "t2"), vec!["emp-C"]);
    assert_eq!(store.assignments().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_assign_keeps_insertion_order_across_reload() {
    let store = store_with(Vec::new());
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    for id in ["emp-C", "emp-A", "emp-B"] {
        board
            .assign(day("2024-06-07"), shift("t3"), emp(id))
            .await
            .expect("assign");
    }
    board.reload().await.expect("reload");

    assert_eq!(slot(&board, "2024-06-07", "t3"), vec!["emp-C", "emp-A", "emp-B"]);
}

#[test_log::test(tokio::test)]
async fn test_no_op_mutations_skip_storage() {
    let store = store_with(vec![row("2024-06-03", "t1", "emp-A")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;
    store.set_fail_writes(true);

    let repeat = board
        .assign(day("2024-06-03"), shift("t1"), emp("emp-A"))
        .await
        .expect("no storage call");
    let absent = board
        .unassign(day("2024-06-03"), shift("t1"), emp("emp-B"))
        .await
        .expect("no storage call");

    assert_eq!(repeat, Change::Unchanged);
    assert_eq!(absent, Change::Unchanged);
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A"]);
}

#[test_log::test(tokio::test)]
async fn test_failed_assign_rolls_back() {
    let store = store_with(vec![row("2024-06-03", "t1", "emp-A")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;
    store.set_fail_writes(true);

    let result = board
        .assign(day("2024-06-03"), shift("t1"), emp("emp-B"))
        .await;

    assert!(matches!(result, Err(ServiceError::StorageUnavailable(_))));
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A"]);
}

#[test_log::test(tokio::test)]
async fn test_failed_unassign_restores_original_order() {
    let store = store_with(vec![
        row("2024-06-03", "t1", "emp-A"),
        row("2024-06-03", "t1", "emp-B"),
        row("2024-06-03", "t1", "emp-C"),
    ]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;
    store.set_fail_writes(true);

    let result = board
        .unassign(day("2024-06-03"), shift("t1"), emp("emp-B"))
        .await;

    assert!(result.is_err());
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A", "emp-B", "emp-C"]);
}

#[test_log::test(tokio::test)]
async fn test_keep_policy_leaves_change_until_reload() {
    let store = store_with(Vec::new());
    let mut board = open(&store, PersistFailurePolicy::Keep).await;
    store.set_fail_writes(true);

    let result = board
        .assign(day("2024-06-03"), shift("t1"), emp("emp-A"))
        .await;
    assert!(result.is_err());
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A"]);

    board.reload().await.expect("reload");
    assert!(slot(&board, "2024-06-03", "t1").is_empty());
}

#[test_log::test(tokio::test)]
async fn test_failed_load_keeps_previous_map() {
    let store = store_with(vec![row("2024-06-03", "t1", "emp-A")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;
    store.set_fail_reads(true);

    assert!(board.reload().await.is_err());
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A"]);

    let before = board.window();
    assert!(board.next().await.is_err());
    assert_eq!(board.window(), before);
    assert_eq!(board.navigator().window(), before);
}

#[test_log::test(tokio::test)]
async fn test_navigation_reloads_window() {
    let store = store_with(vec![
        row("2024-06-03", "t1", "emp-A"),
        row("2024-06-12", "t2", "emp-B"),
    ]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;
    assert_eq!(board.map().len(), 1);

    let window = board.next().await.expect("next");
    assert_eq!(window.start, day("2024-06-10"));
    assert_eq!(slot(&board, "2024-06-12", "t2"), vec!["emp-B"]);
    assert!(slot(&board, "2024-06-03", "t1").is_empty());

    let window = board.previous().await.expect("previous");
    assert_eq!(window.start, day("2024-06-03"));
    assert_eq!(slot(&board, "2024-06-03", "t1"), vec!["emp-A"]);
}

#[test_log::test(tokio::test)]
async fn test_switching_modes_keeps_each_anchor() {
    let store = store_with(vec![row("2024-06-05", "t3", "emp-C")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let daily = board.set_mode(ViewMode::PointInTime).await.expect("daily");
    assert_eq!(daily.start, day("2024-06-05"));
    assert_eq!(daily.end, day("2024-06-05"));
    assert_eq!(slot(&board, "2024-06-05", "t3"), vec!["emp-C"]);

    board.next().await.expect("next day");
    assert!(board.map().is_empty());

    let weekly = board.set_mode(ViewMode::Weekly).await.expect("weekly");
    assert_eq!(weekly.start, day("2024-06-03"));

    let daily = board.set_mode(ViewMode::PointInTime).await.expect("daily");
    assert_eq!(daily.start, day("2024-06-06"));
}

#[test_log::test(tokio::test)]
async fn test_go_to_normalises_weekly_anchor() {
    let store = store_with(Vec::new());
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let window = board.go_to(day("2024-06-16")).await.expect("go to");
    assert_eq!(window.start, day("2024-06-10"));
    assert_eq!(window.end, day("2024-06-16"));
}

#[test_log::test(tokio::test)]
async fn test_drop_on_shift_assigns_and_on_day_asks() {
    let store = store_with(Vec::new());
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let on_day = board
        .drop_employee(DropTarget::Day { day: day("2024-06-04") }, emp("emp-A"))
        .await
        .expect("drop");
    assert!(matches!(on_day.outcome, DropOutcome::ChooseShift { ref options, .. } if options.len() == 4));
    assert!(on_day.change.is_none());
    assert!(board.map().is_empty());

    let on_shift = board
        .drop_employee(
            DropTarget::Shift {
                day: day("2024-06-04"),
                shift_id: shift("t4"),
            },
            emp("emp-A"),
        )
        .await
        .expect("drop");
    assert_eq!(on_shift.change, Some(Change::Applied));

    let again = board
        .drop_employee(
            DropTarget::Shift {
                day: day("2024-06-04"),
                shift_id: shift("t4"),
            },
            emp("emp-A"),
        )
        .await
        .expect("drop");
    assert_eq!(again.change, Some(Change::Unchanged));
    assert_eq!(store.assignments().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_draft_restore_follows_live_board() {
    let store = store_with(vec![row("2024-06-03", "t1", "emp-A")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let mut draft = board.text_draft();
    draft.edit("texto editado");
    board
        .assign(day("2024-06-03"), shift("t1"), emp("emp-B"))
        .await
        .expect("assign");

    board.restore_draft(&mut draft);
    assert!(!draft.is_modified());
    assert_eq!(draft.text(), board.export_text());
    assert!(draft.text().contains("• Bruno C."));
}

#[test_log::test(tokio::test)]
async fn test_pdf_export_is_named_after_window() {
    let store = store_with(vec![row("2024-06-03", "t1", "emp-A")]);
    let mut board = open(&store, PersistFailurePolicy::Rollback).await;

    let weekly = board.export_pdf().expect("pdf");
    assert_eq!(weekly.file_name, "escala-semanal-03-06-2024.pdf");
    assert!(weekly.bytes.starts_with(b"%PDF"));

    board.set_mode(ViewMode::PointInTime).await.expect("daily");
    let daily = board.export_pdf().expect("pdf");
    assert_eq!(daily.file_name, "escala-pontual-05-06-2024.pdf");
}

#[test_log::test(tokio::test)]
async fn test_search_uses_loaded_directory() {
    let store = store_with(Vec::new());
    let board = open(&store, PersistFailurePolicy::Rollback).await;

    let found = board.search_employees("carla");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, emp("emp-C"));
}
