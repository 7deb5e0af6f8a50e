#![allow(non_snake_case)]

use super::*;

fn three_entry_blob() -> Vec<u8> {
    FixtureBuilder::new()
        .entry("a.txt", 10, 0x1, 100, [0xa1; 16])
        .entry("b.dat", 0, 0x2, 101, [0xb2; 16])
        .entry("c/d.bin", 4096, 0x4, 102, [0xc3; 16])
        .build()
        .unwrap()
}

fn collect(root: &FixtureRoot, mask: &str) -> Vec<String> {
    let mut cursor = root.begin_search(mask).unwrap();
    let mut names = Vec::new();
    while let Some(entry) = cursor.next_match().unwrap() {
        names.push(entry.name.to_string());
    }
    cursor.end_search();
    names
}

#[test]
fn FixtureRoot___open___reads_declared_count() {
    let root = FixtureRoot::open(&three_entry_blob()).unwrap();

    assert_eq!(root.file_count(), 3);
}

#[test]
fn FixtureRoot___search_all___yields_in_record_order() {
    let root = FixtureRoot::open(&three_entry_blob()).unwrap();

    assert_eq!(collect(&root, "*"), ["a.txt", "b.dat", "c/d.bin"]);
}

#[test]
fn FixtureRoot___search_mask___filters_entries() {
    let root = FixtureRoot::open(&three_entry_blob()).unwrap();

    assert_eq!(collect(&root, "c/*"), ["c/d.bin"]);
}

#[test]
fn FixtureBuilder___name_longer_than_length_prefix___fails_to_build() {
    let name = "n".repeat(usize::from(u16::MAX) + 1);

    let result = FixtureBuilder::new().entry(name, 1, 0, 1, [0; 16]).build();

    assert!(matches!(result, Err(MndxError::InvalidEntryName(_))));
}

#[test]
fn FixtureBuilder___name_at_length_prefix_limit___round_trips() {
    let name = "n".repeat(usize::from(u16::MAX));
    let blob = FixtureBuilder::new()
        .entry(name.clone(), 1, 0, 1, [0; 16])
        .build()
        .unwrap();

    let root = FixtureRoot::open(&blob).unwrap();

    assert_eq!(collect(&root, "*"), [name]);
}

#[test]
fn FixtureRoot___bad_magic___returns_format_error() {
    let mut blob = three_entry_blob();
    blob[0] = b'X';

    assert!(matches!(FixtureRoot::open(&blob), Err(MndxError::Format(_))));
}

#[test]
fn FixtureRoot___future_header_version___returns_format_error() {
    let blob = FixtureBuilder::new().header_version(3).build().unwrap();

    let err = FixtureRoot::open(&blob).unwrap_err();

    assert!(err.to_string().contains("unsupported header version 3"));
}

#[test]
fn FixtureRoot___truncated_blob___returns_format_error() {
    let blob = three_entry_blob();

    let result = FixtureRoot::open(&blob[..blob.len() - 1]);

    assert!(matches!(result, Err(MndxError::Format(_))));
}

#[test]
fn FixtureRoot___trailing_bytes___returns_format_error() {
    let mut blob = three_entry_blob();
    blob.push(0);

    assert!(matches!(FixtureRoot::open(&blob), Err(MndxError::Format(_))));
}

#[test]
fn FixtureRoot___empty_input___returns_format_error() {
    assert!(matches!(FixtureRoot::open(&[]), Err(MndxError::Format(_))));
}

#[test]
fn FixtureRoot___declared_count_override___reported_verbatim() {
    let blob = FixtureBuilder::new()
        .entry("a.txt", 1, 0, 1, [0; 16])
        .declared_count(5)
        .build()
        .unwrap();

    let root = FixtureRoot::open(&blob).unwrap();

    assert_eq!(root.file_count(), 5);
    assert_eq!(collect(&root, "*").len(), 1);
}

#[test]
fn FixtureCursor___fault_index___returns_search_error() {
    let blob = FixtureBuilder::new()
        .entry("a.txt", 1, 0, 1, [0; 16])
        .entry("b.txt", 1, 0, 2, [0; 16])
        .fail_search_at(1)
        .build()
        .unwrap();
    let root = FixtureRoot::open(&blob).unwrap();
    let mut cursor = root.begin_search("*").unwrap();

    assert!(cursor.next_match().unwrap().is_some());
    assert!(matches!(cursor.next_match(), Err(MndxError::Search(_))));
    cursor.end_search();
}

#[test]
fn FixtureStats___open_search_close___balanced() {
    let before = FixtureStats::snapshot();

    let root = FixtureRoot::open(&three_entry_blob()).unwrap();
    collect(&root, "*");
    root.close();

    let delta = FixtureStats::snapshot().since(&before);
    assert_eq!(delta.opened, 1);
    assert_eq!(delta.searches_begun, 1);
    assert!(delta.is_balanced());
}

#[test]
fn FixtureStats___dropped_without_close___unbalanced() {
    let before = FixtureStats::snapshot();

    let root = FixtureRoot::open(&three_entry_blob()).unwrap();
    drop(root);

    let delta = FixtureStats::snapshot().since(&before);
    assert!(!delta.is_balanced());
}
