//! Behavior tests for the DuckDB price store: replace semantics, ordered
//! reads, typed missing-table outcomes, and the run log.

use cuprum_core::{SeriesColumn, SeriesTable, TradingDay};
use cuprum_tests::{close_table, temp_store, trading_days};
use cuprum_warehouse::StoreError;
use uuid::Uuid;

#[test]
fn when_a_table_is_replaced_the_previous_contents_are_fully_superseded() {
    let (_temp, store) = temp_store();
    store
        .replace_table("raw_prices", &close_table(&[Some(4.1), Some(4.2), Some(4.3)]))
        .expect("first replace");

    store
        .replace_table("raw_prices", &close_table(&[Some(9.9)]))
        .expect("second replace");

    let read = store.read_all("raw_prices").expect("read");
    assert_eq!(read.len(), 1);
    assert_eq!(read.column("close").expect("close").values, vec![Some(9.9)]);
}

#[test]
fn when_a_replace_fails_the_previous_table_still_reads_back() {
    let (_temp, store) = temp_store();
    let original = close_table(&[Some(4.1), Some(4.2)]);
    store.replace_table("processed_prices", &original).expect("replace");

    // A value column colliding with the date spine fails the staged create
    let broken = SeriesTable::new(
        trading_days(1),
        vec![SeriesColumn::new("date", vec![Some(1.0)])],
    )
    .expect("table");
    store
        .replace_table("processed_prices", &broken)
        .expect_err("must fail");

    let read = store.read_all("processed_prices").expect("read");
    assert_eq!(read.len(), 2);
    assert_eq!(
        read.column("close").expect("close").values,
        vec![Some(4.1), Some(4.2)]
    );
}

#[test]
fn when_no_table_exists_reads_are_typed_not_crashes() {
    let (_temp, store) = temp_store();

    assert!(!store.table_exists("processed_prices").expect("exists"));
    let err = store.read_all("processed_prices").expect_err("must fail");
    assert!(matches!(err, StoreError::TableMissing { table } if table == "processed_prices"));
    let err = store.read_latest("processed_prices").expect_err("must fail");
    assert!(matches!(err, StoreError::TableMissing { .. }));
    let err = store.count_rows("processed_prices").expect_err("must fail");
    assert!(matches!(err, StoreError::TableMissing { .. }));
}

#[test]
fn when_rows_arrive_unordered_reads_come_back_date_ascending() {
    let (_temp, store) = temp_store();
    let mut days = trading_days(4);
    days.reverse();
    let table = SeriesTable::new(
        days,
        vec![SeriesColumn::new(
            "close",
            vec![Some(4.4), Some(4.3), Some(4.2), Some(4.1)],
        )],
    )
    .expect("table");
    store.replace_table("raw_prices", &table).expect("replace");

    let read = store.read_all("raw_prices").expect("read");
    let dates: Vec<TradingDay> = read.dates().to_vec();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(
        read.column("close").expect("close").values,
        vec![Some(4.1), Some(4.2), Some(4.3), Some(4.4)]
    );

    let latest = store.read_latest("raw_prices").expect("latest").expect("row");
    assert_eq!(latest.value("close"), Some(4.4));
}

#[test]
fn run_log_entries_come_back_newest_first_with_their_run_id() {
    let (_temp, store) = temp_store();
    let run_id = Uuid::new_v4().to_string();

    store
        .record_run_stage(&run_id, "extract", "ok", 100, 250)
        .expect("record");
    store
        .record_run_stage(&run_id, "transform", "failed", 0, 8)
        .expect("record");

    let records = store.recent_runs(10).expect("recent");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].stage, "transform");
    assert_eq!(records[0].status, "failed");
    assert_eq!(records[1].stage, "extract");
    assert_eq!(records[1].rows, 100);
    assert!(records.iter().all(|record| record.run_id == run_id));
}
