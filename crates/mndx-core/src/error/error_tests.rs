#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(MndxError::Format("bad".into()), 1 ; "format")]
#[test_case(MndxError::Allocation("oom".into()), 2 ; "allocation")]
#[test_case(MndxError::Search("fault".into()), 3 ; "search")]
#[test_case(MndxError::InvalidArgument("null".into()), 4 ; "invalid_argument")]
#[test_case(MndxError::InvalidEntryName("a\0b".into()), 5 ; "invalid_entry_name")]
#[test_case(MndxError::EntryCountMismatch { declared: 3, yielded: 2 }, 6 ; "entry_count_mismatch")]
#[test_case(MndxError::Config("json".into()), 7 ; "config")]
#[test_case(MndxError::Internal("panic".into()), 8 ; "internal")]
fn MndxError___variant___maps_to_correct_code(error: MndxError, expected_code: i32) {
    assert_eq!(error.status_code(), expected_code);
}

#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(6)]
#[test_case(7)]
#[test_case(8)]
fn MndxError___from_code___round_trips_status(code: i32) {
    let error = MndxError::from_code(code, "message".into());

    assert_eq!(error.status_code(), code);
}

#[test]
fn MndxError___from_unknown_code___becomes_internal() {
    let error = MndxError::from_code(999, "mystery".into());

    assert!(matches!(error, MndxError::Internal(ref m) if m == "mystery"));
}

#[test]
fn MndxError___status_code___never_zero() {
    let errors = [
        MndxError::Format(String::new()),
        MndxError::Allocation(String::new()),
        MndxError::Search(String::new()),
        MndxError::InvalidArgument(String::new()),
        MndxError::InvalidEntryName(String::new()),
        MndxError::EntryCountMismatch {
            declared: 0,
            yielded: 0,
        },
        MndxError::Config(String::new()),
        MndxError::Internal(String::new()),
    ];

    for error in errors {
        assert_ne!(error.status_code(), 0, "{error} must not look like success");
    }
}

#[test]
fn MndxError___display___includes_message() {
    let error = MndxError::Format("unsupported header version 3".into());

    assert_eq!(error.to_string(), "format error: unsupported header version 3");
}

#[test]
fn MndxError___entry_count_mismatch___display_has_both_counts() {
    let error = MndxError::EntryCountMismatch {
        declared: 10,
        yielded: 7,
    };

    let message = error.to_string();

    assert!(message.contains("declared 10"));
    assert!(message.contains("yielded 7"));
}

#[test]
fn MndxError___from_serde_json___becomes_config() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let error: MndxError = json_err.into();

    assert_eq!(error.status_code(), 7);
}

#[test]
fn MndxError___from_try_reserve___becomes_allocation() {
    let mut v: Vec<u64> = Vec::new();
    let reserve_err = v.try_reserve(usize::MAX).unwrap_err();

    let error: MndxError = reserve_err.into();

    assert!(matches!(error, MndxError::Allocation(_)));
}
