//! JSON and SQL output of a mixed-industry schema.

use crate::{load_fixture, read_csv, seed_into, SEED};
use std::collections::HashSet;
use tempfile::TempDir;
use synthgen::emit::OutputFormat;

#[test]
fn test_shop_csv() {
    let schema = load_fixture("shop.yaml");
    let temp_dir = TempDir::new().unwrap();
    seed_into(&schema, temp_dir.path(), OutputFormat::Csv, SEED).unwrap();

    let (_, customers) = read_csv(&temp_dir.path().join("customers.csv"));
    assert_eq!(customers.len(), 20);
    assert_eq!(customers[0][0], "1000");
    assert_eq!(customers[0][1], "first@example.com");
    // the counter starts at 1 for generated rows
    assert_eq!(customers[1][0], "1");
    for row in &customers {
        assert!(["bronze", "silver", "gold"].contains(&row[2].as_str()));
    }

    let (_, products) = read_csv(&temp_dir.path().join("products.csv"));
    for row in &products {
        assert!(row[0].starts_with("SKU-"));
        assert_eq!(row[0].len(), 12);
        assert!(row[2].starts_with('(') && row[2].ends_with(')'));
    }

    let customer_ids: HashSet<&str> = customers.iter().map(|r| r[0].as_str()).collect();
    let skus: HashSet<&str> = products.iter().map(|r| r[0].as_str()).collect();
    let (header, items) = read_csv(&temp_dir.path().join("line_items.csv"));
    assert_eq!(
        header,
        vec!["customer_id", "product_sku", "quantity", "doc_id"]
    );
    assert_eq!(items.len(), 60);
    for row in &items {
        assert!(customer_ids.contains(row[0].as_str()));
        assert!(skus.contains(row[1].as_str()));
        assert_eq!(row[3].len(), 24);
    }
}

#[test]
fn test_users_orders_json() {
    let schema = load_fixture("users_orders.yaml");
    let temp_dir = TempDir::new().unwrap();
    seed_into(&schema, temp_dir.path(), OutputFormat::Json, SEED).unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("orders.json")).unwrap();
    let orders: serde_json::Value = serde_json::from_str(&content).unwrap();
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 6);
    for order in orders {
        let amount = order["amount"].as_i64().unwrap();
        assert!((1..=100).contains(&amount));
        assert!(order["user_id"].is_string());
    }
}

#[test]
fn test_users_orders_sql() {
    let schema = load_fixture("users_orders.yaml");
    let temp_dir = TempDir::new().unwrap();
    seed_into(&schema, temp_dir.path(), OutputFormat::Sql, SEED).unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("users.sql")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert!(line.starts_with(r#"INSERT INTO "users" ("id", "name") VALUES ('"#));
        assert!(line.ends_with("');"));
    }
}
