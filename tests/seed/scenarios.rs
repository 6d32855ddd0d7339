//! Foreign keys, missing references and cycles, end to end.

use crate::{load_fixture, read_csv, seed_into, SEED};
use std::collections::HashSet;
use synth_core::ErrorKind;
use synthgen::emit::OutputFormat;
use tempfile::TempDir;

#[test]
fn test_users_orders_round_trip() {
    let schema = load_fixture("users_orders.yaml");
    let temp_dir = TempDir::new().unwrap();

    let report = seed_into(&schema, temp_dir.path(), OutputFormat::Csv, SEED).unwrap();
    assert_eq!(report.seed, SEED);
    assert_eq!(report.total_rows(), 9);

    let (users_header, users) = read_csv(&temp_dir.path().join("users.csv"));
    let (orders_header, orders) = read_csv(&temp_dir.path().join("orders.csv"));
    assert_eq!(users_header, vec!["id", "name"]);
    assert_eq!(orders_header, vec!["id", "user_id", "amount"]);
    assert_eq!(users.len(), 3);
    assert_eq!(orders.len(), 6);

    let user_ids: HashSet<&str> = users.iter().map(|r| r[0].as_str()).collect();
    for order in &orders {
        assert!(user_ids.contains(order[1].as_str()), "dangling {}", order[1]);
        let amount: i64 = order[2].parse().unwrap();
        assert!((1..=100).contains(&amount));
    }
}

#[test]
fn test_same_seed_same_files() {
    let schema = load_fixture("users_orders.yaml");
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    seed_into(&schema, first.path(), OutputFormat::Csv, SEED).unwrap();
    seed_into(&schema, second.path(), OutputFormat::Csv, SEED).unwrap();

    for table in ["users.csv", "orders.csv"] {
        let a = std::fs::read_to_string(first.path().join(table)).unwrap();
        let b = std::fs::read_to_string(second.path().join(table)).unwrap();
        assert_eq!(a, b, "{table} differs between runs");
    }
}

#[test]
fn test_empty_parent_is_missing_reference() {
    let mut schema = load_fixture("users_orders.yaml");
    schema.tables[0].row_count = 0;
    let temp_dir = TempDir::new().unwrap();

    let err = seed_into(&schema, temp_dir.path(), OutputFormat::Csv, SEED).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingReference);
    assert_eq!(err.location().as_deref(), Some("orders.user_id[0]"));
}

#[test]
fn test_cycle_rejected_before_output() {
    let schema = load_fixture("cycle.yaml");
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("out");

    let err = seed_into(&schema, &out, OutputFormat::Csv, SEED).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(err.to_string().contains("a -> b -> a"), "{err}");
    assert!(!out.exists());
}
