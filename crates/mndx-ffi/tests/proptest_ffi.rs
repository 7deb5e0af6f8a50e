//! Property-based tests for enumeration fidelity
//!
//! Any set of entries a handler yields comes back across the C ABI with the
//! same count, in the same order, with every field intact.

use mndx_core::fixture::FixtureBuilder;
use mndx_core::fixture::FixtureRoot;
use mndx_ffi::{MndxFile, mndx_free_files};
use proptest::prelude::*;
use std::ffi::CStr;
use std::ptr;

mndx_ffi::mndx_bridge_entry!(FixtureRoot);

#[derive(Debug, Clone)]
struct Record {
    name: String,
    size: u32,
    locale_flags: u32,
    file_data_id: u32,
    key: [u8; 16],
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        "[A-Za-z0-9_./-]{1,48}",
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
        any::<[u8; 16]>(),
    )
        .prop_map(|(name, size, locale_flags, file_data_id, key)| Record {
            name,
            size,
            locale_flags,
            file_data_id,
            key,
        })
}

fn build(records: &[Record]) -> Vec<u8> {
    records
        .iter()
        .fold(FixtureBuilder::new(), |builder, r| {
            builder.entry(r.name.clone(), r.size, r.locale_flags, r.file_data_id, r.key)
        })
        .build()
        .unwrap()
}

fn enumerate(blob: &[u8]) -> (i32, *mut MndxFile, u32) {
    let mut files = ptr::null_mut();
    let mut count = 0;
    let status =
        unsafe { mndx_enumerate(blob.as_ptr(), blob.len() as u32, &mut files, &mut count) };
    (status, files, count)
}

proptest! {
    /// Property: the reported count equals the number of entries yielded
    #[test]
    fn proptest_count_matches_entries_yielded(records in prop::collection::vec(arb_record(), 0..64)) {
        let (status, files, count) = enumerate(&build(&records));

        prop_assert_eq!(status, 0);
        prop_assert!(!files.is_null());
        prop_assert_eq!(count as usize, records.len());

        unsafe { mndx_free_files(files, count) };
    }

    /// Property: every field, including all 16 key bytes, survives the copy
    #[test]
    fn proptest_entries_preserved_in_order(records in prop::collection::vec(arb_record(), 1..32)) {
        let (status, files, count) = enumerate(&build(&records));
        prop_assert_eq!(status, 0);

        let slice = unsafe { std::slice::from_raw_parts(files, count as usize) };
        for (file, record) in slice.iter().zip(&records) {
            let name = unsafe { CStr::from_ptr(file.name) };
            prop_assert_eq!(name.to_bytes(), record.name.as_bytes());
            prop_assert_eq!(file.size, record.size);
            prop_assert_eq!(file.locale_flags, record.locale_flags);
            prop_assert_eq!(file.file_data_id, record.file_data_id);
            prop_assert_eq!(file.encoding_key, record.key);
        }

        unsafe { mndx_free_files(files, count) };
    }

    /// Property: truncating a valid blob never succeeds and never writes the out-params
    #[test]
    fn proptest_truncated_blob_rejected(
        records in prop::collection::vec(arb_record(), 1..8),
        cut in any::<prop::sample::Index>(),
    ) {
        let blob = build(&records);
        let truncated = &blob[..cut.index(blob.len())];
        let mut files: *mut MndxFile = ptr::null_mut();
        let mut count = 0xffff_u32;

        let status = unsafe {
            mndx_enumerate(truncated.as_ptr(), truncated.len() as u32, &mut files, &mut count)
        };

        prop_assert_eq!(status, 1);
        prop_assert!(files.is_null());
        prop_assert_eq!(count, 0xffff);
    }
}
