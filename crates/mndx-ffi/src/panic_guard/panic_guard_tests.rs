#![allow(non_snake_case)]

use super::*;

#[test]
fn catch_panic___successful_function___returns_ok() {
    let result = catch_panic(|| 42);

    assert!(matches!(result, Ok(42)));
}

#[test]
fn catch_panic___panicking_function___returns_internal_error() {
    let result: Result<(), MndxError> = catch_panic(|| {
        panic!("Test panic");
    });

    match result {
        Err(e) => assert_eq!(e.status_code(), 8),
        Ok(_) => panic!("Expected Err, got Ok"),
    }
}

#[test]
fn catch_panic___formatted_panic___includes_message() {
    let detail = "record 7";
    let result: Result<(), MndxError> = catch_panic(|| {
        panic!("cursor overran {detail}");
    });

    match result {
        Err(MndxError::Internal(message)) => assert!(message.contains("cursor overran record 7")),
        other => panic!("Expected Internal, got {other:?}"),
    }
}

#[test]
fn panic_to_string___str_payload___formats_correctly() {
    let payload: Box<dyn Any + Send> = Box::new("test panic");

    assert_eq!(panic_to_string(&payload), "bridge panicked: test panic");
}

#[test]
fn panic_to_string___string_payload___formats_correctly() {
    let payload: Box<dyn Any + Send> = Box::new("owned string".to_string());

    assert_eq!(panic_to_string(&payload), "bridge panicked: owned string");
}

#[test]
fn panic_to_string___unknown_payload___returns_fallback() {
    let payload: Box<dyn Any + Send> = Box::new(42);

    assert_eq!(
        panic_to_string(&payload),
        "bridge panicked with unknown payload"
    );
}

#[test]
fn install_panic_hook___can_be_called_multiple_times() {
    install_panic_hook();
    install_panic_hook();
    let _ = panic::take_hook();
}
