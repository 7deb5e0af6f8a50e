#![allow(non_snake_case)]

use super::*;

const KEY_BYTES: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

#[test]
fn ContentKey___display___is_lowercase_hex() {
    let key = ContentKey::new(KEY_BYTES);

    assert_eq!(key.to_string(), "00112233445566778899aabbccddeeff");
}

#[test]
fn ContentKey___from_str___parses_upper_and_lower_case() {
    let lower: ContentKey = "00112233445566778899aabbccddeeff".parse().unwrap();
    let upper: ContentKey = "00112233445566778899AABBCCDDEEFF".parse().unwrap();

    assert_eq!(lower, ContentKey::new(KEY_BYTES));
    assert_eq!(upper, lower);
}

#[test]
fn ContentKey___from_str_too_short___returns_length_error() {
    let result = "0011".parse::<ContentKey>();

    assert_eq!(
        result,
        Err(ContentKeyError::InvalidLength {
            expected: 32,
            actual: 4
        })
    );
}

#[test]
fn ContentKey___from_str_non_hex___returns_hex_error() {
    let result = "zz112233445566778899aabbccddeeff".parse::<ContentKey>();

    assert!(matches!(result, Err(ContentKeyError::InvalidHex(_))));
}

#[test]
fn ContentKey___as_bytes___exposes_all_sixteen_bytes() {
    let key = ContentKey::from(KEY_BYTES);

    assert_eq!(key.as_bytes().len(), CONTENT_KEY_SIZE);
    assert_eq!(key.as_bytes(), &KEY_BYTES);
}

#[test]
fn FileEntry___serialize___writes_key_as_hex_string() {
    let entry = FileEntry {
        name: "c/d.bin".to_string(),
        size: 4096,
        locale_flags: 0x2,
        file_data_id: 7,
        content_key: ContentKey::new(KEY_BYTES),
    };

    let json = serde_json::to_value(&entry).unwrap();

    assert_eq!(json["name"], "c/d.bin");
    assert_eq!(json["content_key"], "00112233445566778899aabbccddeeff");
}

#[test]
fn FileEntry___deserialize___restores_entry() {
    let json = r#"{
        "name": "a.txt",
        "size": 10,
        "locale_flags": 1,
        "file_data_id": 42,
        "content_key": "00112233445566778899aabbccddeeff"
    }"#;

    let entry: FileEntry = serde_json::from_str(json).unwrap();

    assert_eq!(entry.name, "a.txt");
    assert_eq!(entry.file_data_id, 42);
    assert_eq!(entry.content_key, ContentKey::new(KEY_BYTES));
}

#[test]
fn FileEntry___deserialize_bad_key___returns_error() {
    let json = r#"{"name": "a", "size": 0, "locale_flags": 0, "file_data_id": 0, "content_key": "00"}"#;

    let result = serde_json::from_str::<FileEntry>(json);

    assert!(result.is_err());
}
