mod common;

use common::table;
use rawtable_core::{join_rows, Error, RowView};

#[test]
fn join_with_itself_fails() {
    let t = table(&[&["t1", "t2", "t3"], &["1", "2", "3"]]);
    let first = t.get_row(0).unwrap();

    let err = first.clone().join(first).unwrap_err();
    match err {
        Error::RowValue(e) => {
            assert_eq!(e.location(), "test, row 2");
            assert!(e.message().contains("duplicate header"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn join_of_no_rows_is_an_argument_error() {
    let err = join_rows(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn join_disjoint_rows() {
    let t1 = table(&[&["t1", "t2"], &["1", "2"]]);
    let t2 = table(&[&["T3", "t4"], &["3", ""]]);

    let joined = t1
        .get_row(0)
        .unwrap()
        .join(t2.get_row(0).unwrap())
        .unwrap();

    assert_eq!(joined.headers(), vec!["t1", "t2", "T3", "t4"]);
    assert!(joined.has_column_in_header("t3"));
    assert_eq!(joined.get_int("t1").unwrap(), 1);
    assert_eq!(joined.get_int("t3").unwrap(), 3);
    assert!(joined.is_column_empty("t4"));
    assert!(joined.is_column_empty("t5"));
    assert!(!joined.is_empty());
    assert_eq!(joined.location(), t1.get_row(0).unwrap().location());
}

#[test]
fn join_of_selected_halves() {
    let t = table(&[
        &["left.id", "left.name", "right.id", "right.price"],
        &["1", "sword", "9", "10"],
    ]);
    let row = t.get_row(0).unwrap();

    // the same row twice, once per prefix; exposed names must not collide
    let left = row.clone().select_columns("left.", false);
    let right = row.clone().select_columns("right.", false);
    let joined = join_rows(vec![left, right]).unwrap();
    assert_eq!(joined.headers().len(), 4);

    let left = row.clone().select_columns("left.", true);
    let right = row.select_columns("right.", true);
    assert!(matches!(
        join_rows(vec![left, right]),
        Err(Error::RowValue(_))
    ));
}

#[test]
fn joined_row_is_empty_only_when_all_parts_are() {
    let t = table(&[&["a", "b.x"], &["", ""], &["", "1"]]);
    let split = |i: usize| {
        let row: RowView<'_> = t.get_row(i).unwrap();
        let left = row.clone().select_columns("a", false);
        let right = row.select_columns("b.", true);
        left.join(right).unwrap()
    };

    assert!(split(0).is_empty());
    assert!(!split(1).is_empty());
    assert_eq!(split(1).get_int("x").unwrap(), 1);
}
