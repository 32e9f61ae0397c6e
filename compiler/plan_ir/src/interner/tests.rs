#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn interning_is_idempotent() {
    let mut table = NameTable::new();
    let a = table.try_intern("Key").unwrap();
    let b = table.try_intern("Key").unwrap();
    assert_eq!(a, b);
    assert_eq!(table.lookup(a), "Key");
}

#[test]
fn distinct_text_gets_distinct_names() {
    let mut table = NameTable::new();
    let a = table.try_intern("a").unwrap();
    let b = table.try_intern("b").unwrap();
    assert_ne!(a, b);
    assert_eq!(table.len(), 3);
}

#[test]
fn empty_string_is_preinterned() {
    let mut table = NameTable::with_capacity(64);
    assert!(table.is_empty());
    assert_eq!(table.try_intern("").unwrap(), Name::EMPTY);
    assert_eq!(table.lookup(Name::EMPTY), "");
    assert!(table.is_empty());
}

#[test]
fn get_does_not_intern() {
    let mut table = NameTable::new();
    assert_eq!(table.get("missing"), None);
    assert_eq!(table.len(), 1);
    let name = table.try_intern("present").unwrap();
    assert_eq!(table.get("present"), Some(name));
    assert!(table.contains(name));
}
