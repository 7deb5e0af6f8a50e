//! mndx-ffi - C ABI bridge from a root-file parser to caller-owned arrays
//!
//! This crate provides the FFI boundary layer:
//! - [`Session`] and [`Search`], scoped guards over a [`RootHandler`] and its cursor
//! - [`Enumeration`], the open → search → copy → close driver
//! - [`ResultSet`] and [`MndxFile`], the array handed to the host
//! - C ABI exported functions
//!
//! # FFI Functions
//!
//! Exported with C linkage by this crate:
//!
//! - `mndx_free_files` - Release an array returned by `mndx_enumerate`
//! - `mndx_init_logging` - Register the host log callback
//! - `mndx_set_log_level` - Set the minimum forwarded log level
//! - `mndx_status_message` - Describe a status code
//!
//! Generated per root handler by [`mndx_bridge_entry!`]:
//!
//! - `mndx_enumerate` - Enumerate every entry of a root file
//! - `mndx_enumerate_with_config` - Same, with a JSON [`BridgeConfig`]

mod enumeration;
mod panic_guard;
mod result_set;
mod session;

pub mod exports;

pub use enumeration::{Enumeration, Materialize, enumerate, enumerate_files, file_map};
pub use exports::{
    MNDX_OK, mndx_free_files, mndx_init_logging, mndx_set_log_level, mndx_status_message,
};
pub use panic_guard::{catch_panic, install_panic_hook};
pub use result_set::{MndxFile, ResultSet};
pub use session::{CallState, Search, Session};

// Re-export types needed to implement a root handler
pub use mndx_core::{
    BridgeConfig, ContentKey, EnumerationState, FileEntry, LogLevel, MndxError, MndxResult,
    RootEntry, RootHandler, SearchCursor,
};
pub use mndx_logging::LogCallback;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Enumeration, MndxFile, ResultSet, enumerate, enumerate_files, file_map};
    pub use mndx_core::prelude::*;
    pub use mndx_logging::prelude::*;
}

/// Generate the enumeration entry points for a root handler
///
/// Expands to `mndx_enumerate` and `mndx_enumerate_with_config`, exported
/// with C linkage. Invoke it once, in the cdylib that links the handler.
///
/// # Example
///
/// ```ignore
/// use mndx_ffi::prelude::*;
///
/// struct MyRoot;
///
/// // ... implement RootHandler for MyRoot ...
///
/// mndx_ffi::mndx_bridge_entry!(MyRoot);
/// ```
#[macro_export]
macro_rules! mndx_bridge_entry {
    ($handler:ty) => {
        /// Enumerate every entry of a root file
        ///
        /// Returns 0 and writes `*out_files`/`*out_count` on success, or a
        /// nonzero status with both left untouched. Release the array with
        /// `mndx_free_files`.
        ///
        /// # Safety
        /// - `root_file` must be valid for `root_file_len` bytes
        /// - `out_files` and `out_count` must be valid for writes
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn mndx_enumerate(
            root_file: *const u8,
            root_file_len: u32,
            out_files: *mut *mut $crate::MndxFile,
            out_count: *mut u32,
        ) -> i32 {
            unsafe {
                $crate::exports::enumerate_export::<$handler>(
                    root_file,
                    root_file_len,
                    ::std::ptr::null(),
                    0,
                    out_files,
                    out_count,
                )
            }
        }

        /// Enumerate a root file using a JSON configuration
        ///
        /// A null or empty `config_json` selects the defaults.
        ///
        /// # Safety
        /// - `root_file` must be valid for `root_file_len` bytes
        /// - `config_json` must be valid for `config_len` bytes if not null
        /// - `out_files` and `out_count` must be valid for writes
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn mndx_enumerate_with_config(
            root_file: *const u8,
            root_file_len: u32,
            config_json: *const u8,
            config_len: usize,
            out_files: *mut *mut $crate::MndxFile,
            out_count: *mut u32,
        ) -> i32 {
            unsafe {
                $crate::exports::enumerate_export::<$handler>(
                    root_file,
                    root_file_len,
                    config_json,
                    config_len,
                    out_files,
                    out_count,
                )
            }
        }
    };
}
