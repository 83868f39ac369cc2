mod common;

use common::{nullable_table, table};
use rawtable_core::RowView;

#[test]
fn replace_single_value() {
    let t = nullable_table(&[
        &[Some("c1"), Some("c2"), None],
        &[Some("src1"), Some("src2"), None],
    ]);
    let row = t.get_row(0).unwrap().raw_replace("C1", "dst1");

    assert_eq!(row.get_string("c1").unwrap(), "dst1");
    assert_eq!(row.get_string("c2").unwrap(), "src2");
    assert_eq!(row.headers(), vec!["c1", "c2"]);
    assert_eq!(row.location(), "test, row 2");
}

#[test]
fn replace_to_blank_empties_the_column() {
    let t = table(&[&["c1", "c2"], &["src1", "src2"]]);
    let row = t.get_row(0).unwrap().raw_replace("c1", "");

    assert!(row.is_column_empty("c1"));
    assert_eq!(row.raw_value("c1"), Some(""));
    assert!(row.get_string("c1").is_err());
    assert_eq!(row.get_string_or("c1", "none"), "none");
    assert!(!row.is_empty());

    let blank = row.raw_replace("c2", " ");
    assert!(blank.is_empty());
}

#[test]
fn replace_fills_blank_base_cells() {
    let t = nullable_table(&[&[Some("c1"), Some("c2")], &[None, Some("")]]);
    let base = t.get_row(0).unwrap();
    assert!(base.is_empty());

    let row = base.replace([("c1", "1"), ("c2", "2")]);
    assert!(!row.is_empty());
    assert_eq!(row.get_int("c1").unwrap(), 1);
    assert_eq!(row.get_int("c2").unwrap(), 2);
}

#[test]
fn replace_of_unknown_column_leaves_others_alone() {
    let t = table(&[&["c1", "c2"], &["src1", "src2"]]);
    let row = t.get_row(0).unwrap().raw_replace("c3", "x");

    assert_eq!(row.headers(), vec!["c1", "c2"]);
    assert!(!row.has_column_in_header("c3"));
    assert_eq!(row.get_string("c1").unwrap(), "src1");
    assert_eq!(row.get_string("c2").unwrap(), "src2");
}

#[test]
fn overridden_columns_are_listed() {
    let t = table(&[&["c1", "c2"], &["src1", "src2"]]);
    let row = t
        .get_row(0)
        .unwrap()
        .replace([("c2".to_string(), "x".to_string())]);

    match &row {
        RowView::Replace(replace) => {
            assert_eq!(replace.overridden().collect::<Vec<_>>(), vec!["c2"]);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn replace_over_selected_columns() {
    let t = table(&[&["item.key", "item.value"], &["k", "v"]]);
    let row = t
        .get_row(0)
        .unwrap()
        .select_columns("item.", true)
        .raw_replace("value", "w");

    assert_eq!(row.get_string("key").unwrap(), "k");
    assert_eq!(row.get_string("value").unwrap(), "w");
}
