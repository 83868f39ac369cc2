mod common;

use common::table;
use rawtable_core::{RawTable, RowView};

fn item_table() -> RawTable {
    table(&[
        &["test", "item.key", "item.value", "no.item"],
        &["1", "value-key", "value-value", "2"],
        &["1", "", "", "2"],
    ])
}

#[test]
fn simple_select() {
    let t = item_table();
    let rows: Vec<RowView<'_>> = t
        .rows()
        .map(|row| row.select_columns("item.", true))
        .collect();

    assert_eq!(rows[0].headers(), vec!["key", "value"]);
    assert!(!rows[0].is_empty());
    assert_eq!(rows[0].get_string("key").unwrap(), "value-key");
    assert_eq!(rows[0].get_string("value").unwrap(), "value-value");

    assert!(!rows[0].has_column_in_header("test"));
    assert!(!rows[0].has_column_in_header("no.item"));
    assert!(!rows[0].has_column_in_header("item.key"));

    assert!(rows[1].is_empty());
    assert!(rows[1].is_column_empty("key"));
    assert!(rows[1].get_string("key").is_err());
}

#[test]
fn select_keeping_prefix() {
    let t = item_table();
    let row = t.get_row(0).unwrap().select_columns("ITEM.", false);

    assert_eq!(row.headers(), vec!["item.key", "item.value"]);
    assert!(row.has_column_in_header("Item.Key"));
    assert_eq!(row.raw_value("item.key"), Some("value-key"));
    assert_eq!(row.raw_value("key"), None);
}

#[test]
fn prefix_matching_whole_name_is_skipped_when_stripped() {
    let t = table(&[&["item", "item.key"], &["x", "y"]]);
    let row = t.get_row(0).unwrap().select_columns("item", true);

    assert_eq!(row.headers(), vec![".key"]);
    assert_eq!(row.raw_value(".key"), Some("y"));
    assert!(!row.has_column_in_header(""));
}

#[test]
fn nested_select() {
    let t = table(&[
        &["a.b.x", "a.b.y", "a.c"],
        &["1", "2", "3"],
    ]);
    let row = t
        .get_row(0)
        .unwrap()
        .select_columns("a.", true)
        .select_columns("b.", true);

    assert_eq!(row.headers(), vec!["x", "y"]);
    assert_eq!(row.get_int("y").unwrap(), 2);
    assert_eq!(row.location(), "test, row 2");
}

#[test]
fn no_matching_columns_gives_empty_view() {
    let t = item_table();
    let row = t.get_row(0).unwrap().select_columns("missing.", true);

    assert!(row.headers().is_empty());
    assert!(row.is_empty());
    assert!(row.is_column_empty("key"));
}
