//! Array operation integration tests

use arbor::{
    array, group,
    tree::{Document, Kind, TreeError, Value},
};

use crate::helpers::*;

fn numbers() -> Document {
    Document::new(group! { "arr" => array![1, 2, 3] })
}

fn arr(doc: &Document) -> Value {
    doc.get("arr").unwrap().to_value()
}

#[test]
fn test_insert_before_index() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();

    list.arr_insert(1, 99).unwrap();
    assert_eq!(list.to_value(), array![1, 99, 2, 3]);

    // Inserting at the length appends
    list.arr_insert(4, 100).unwrap();
    assert_eq!(list.to_value(), array![1, 99, 2, 3, 100]);
}

#[test]
fn test_insert_past_end_fails() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();
    assert_eq!(
        list.arr_insert(5, 99).unwrap_err(),
        TreeError::IndexOutOfRange { index: 5 }
    );
    assert_eq!(arr(&doc), array![1, 2, 3]);
}

#[test]
fn test_push_pop_shift_unshift() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();

    list.arr_push(4).unwrap();
    list.arr_unshift(0).unwrap();
    assert_eq!(list.to_value(), array![0, 1, 2, 3, 4]);

    assert_eq!(list.arr_pop().unwrap(), 4);
    assert_eq!(list.arr_shift().unwrap(), 0);
    assert_eq!(list.arr_len().unwrap(), 3);
}

#[test]
fn test_pop_and_shift_on_empty_array() {
    let mut doc = Document::new(array![]);
    let mut root = doc.root_mut();
    assert_eq!(
        root.arr_pop().unwrap_err(),
        TreeError::IndexOutOfRange { index: 0 }
    );
    assert!(root.arr_shift().unwrap_err().is_index_error());
}

#[test]
fn test_remove_at_index() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();

    assert_eq!(list.arr_remove(1).unwrap(), 2);
    assert_eq!(list.to_value(), array![1, 3]);
    assert_eq!(
        list.arr_remove(2).unwrap_err(),
        TreeError::IndexOutOfRange { index: 2 }
    );
}

#[test]
fn test_removed_element_returns_whole_subtree() {
    let mut doc = mixed_doc();
    let removed = doc.get_mut("servers").unwrap().arr_remove(0).unwrap();
    assert_eq!(removed, group! { "host" => "alpha", "ports" => array![80, 443] });
    assert_eq!(doc.get("servers.[0].host").unwrap().as_str().unwrap(), "beta");
}

#[test]
fn test_set_and_get_at_index() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();

    let id = list.arr_get(1).unwrap().id();
    assert_eq!(list.arr_set(1, "two").unwrap(), id);
    assert_eq!(list.arr_get(1).unwrap().as_str().unwrap(), "two");
    assert!(list.arr_set(3, 0).unwrap_err().is_index_error());
    assert!(list.arr_get(3).unwrap_err().is_index_error());
}

#[test]
fn test_get_mut_at_index() {
    let mut doc = mixed_doc();
    let mut servers = doc.get_mut("servers").unwrap();
    servers.arr_get_mut(1).unwrap().set("host", "delta").unwrap();
    assert_eq!(doc.get("servers.[1].host").unwrap().as_str().unwrap(), "delta");
}

#[test]
fn test_push_all_and_merge() {
    let mut doc = numbers();
    let mut list = doc.get_mut("arr").unwrap();

    list.arr_push_all([4, 5]).unwrap();
    list.arr_merge(array!["x", group! { "y" => 1 }]).unwrap();
    assert_eq!(list.to_value(), array![1, 2, 3, 4, 5, "x", group! { "y" => 1 }]);

    assert_eq!(
        list.arr_merge(group! {}).unwrap_err(),
        TreeError::WrongKind {
            expected: Kind::Array,
            actual: Kind::Group
        }
    );
    assert_eq!(list.arr_len().unwrap(), 7);
    assert_parent_links(doc.root());
}

#[test]
fn test_operations_require_array() {
    let mut doc = mixed_doc();
    let wrong = TreeError::WrongKind {
        expected: Kind::Array,
        actual: Kind::Group,
    };
    let mut limits = doc.get_mut("limits").unwrap();

    assert_eq!(limits.arr_len().unwrap_err(), wrong);
    assert_eq!(limits.arr_push(1).unwrap_err(), wrong);
    assert_eq!(limits.arr_pop().unwrap_err(), wrong);
    assert_eq!(limits.arr_insert(0, 1).unwrap_err(), wrong);
    assert_eq!(limits.arr_merge(array![1]).unwrap_err(), wrong);
    assert!(limits.has("cpu"));

    let name = doc.get("name").unwrap();
    assert!(name.arr_get(0).unwrap_err().is_kind_error());
}

#[test]
fn test_foreach_visits_in_order() {
    let doc = mixed_doc();
    let mut seen = Vec::new();
    doc.get("tags")
        .unwrap()
        .arr_foreach(|index, node| {
            seen.push((index, node.as_string()?));
            Ok::<_, TreeError>(())
        })
        .unwrap();
    assert_eq!(
        seen,
        vec![(0, "a".to_string()), (1, "b".to_string()), (2, "c".to_string())]
    );
}

#[test]
fn test_foreach_stops_at_first_error() {
    let doc = Document::new(array![1, "two", 3]);
    let mut visited = 0;
    let err = doc
        .root()
        .arr_foreach(|_, node| {
            visited += 1;
            node.as_i64()?;
            Ok::<_, TreeError>(())
        })
        .unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(visited, 2);
}

#[test]
fn test_foreach_mut_edits_elements() {
    let mut doc = numbers();
    doc.get_mut("arr")
        .unwrap()
        .arr_foreach_mut(|_, node| {
            let doubled = node.as_i64()? * 2;
            node.set_val(doubled);
            Ok::<_, arbor::Error>(())
        })
        .unwrap();
    assert_eq!(arr(&doc), array![2, 4, 6]);
}

#[test]
fn test_each_mutation_notifies_once() {
    let mut doc = numbers();
    let counter = HookCounter::new();
    let mut list = doc.get_mut("arr").unwrap();
    counter.attach(&mut list);

    list.arr_push(4).unwrap();
    list.arr_push_all([5, 6, 7]).unwrap();
    list.arr_insert(0, 0).unwrap();
    list.arr_remove(0).unwrap();
    list.arr_pop().unwrap();
    list.arr_shift().unwrap();
    list.arr_set(0, 9).unwrap();
    assert_eq!(counter.count(), 7);

    // Failed calls do not notify
    let _ = list.arr_insert(99, 0);
    let _ = list.arr_merge(1);
    assert_eq!(counter.count(), 7);
}
