//! C ABI exported functions
//!
//! `mndx_free_files`, `mndx_init_logging`, `mndx_set_log_level` and
//! `mndx_status_message` are exported directly. The enumeration entry points
//! depend on the root handler, so they are generated per handler by
//! [`mndx_bridge_entry!`](crate::mndx_bridge_entry) and forward to
//! [`enumerate_export`].

use crate::enumeration::enumerate_files;
use crate::panic_guard::{catch_panic, install_panic_hook};
use crate::result_set::{MndxFile, ResultSet};
use mndx_core::{BridgeConfig, LogLevel, MndxError, MndxResult, RootHandler};
use mndx_logging::{LogCallback, LogSink, ReloadHandle};
use std::ffi::c_char;
use std::panic::AssertUnwindSafe;

/// Status returned by a successful enumeration
pub const MNDX_OK: i32 = 0;

/// Shared body of `mndx_enumerate` and `mndx_enumerate_with_config`
///
/// Returns [`MNDX_OK`] and writes `*out_files`/`*out_count` on success;
/// otherwise returns the error's status code and leaves both untouched.
///
/// # Safety
/// - `root_file` must be valid for `root_file_len` bytes, or null with a length of 0
/// - `config_json` must be valid for `config_len` bytes, or null
/// - `out_files` and `out_count` must be valid for writes
#[doc(hidden)]
pub unsafe fn enumerate_export<H: RootHandler>(
    root_file: *const u8,
    root_file_len: u32,
    config_json: *const u8,
    config_len: usize,
    out_files: *mut *mut MndxFile,
    out_count: *mut u32,
) -> i32 {
    let outcome = catch_panic(AssertUnwindSafe(|| unsafe {
        enumerate_impl::<H>(
            root_file,
            root_file_len,
            config_json,
            config_len,
            out_files,
            out_count,
        )
    }));

    match outcome.and_then(|result| result) {
        Ok(()) => MNDX_OK,
        Err(e) => {
            tracing::debug!(status = e.status_code(), "enumeration failed: {}", e);
            e.status_code()
        }
    }
}

/// Internal implementation of the enumeration exports (wrapped by panic handler)
unsafe fn enumerate_impl<H: RootHandler>(
    root_file: *const u8,
    root_file_len: u32,
    config_json: *const u8,
    config_len: usize,
    out_files: *mut *mut MndxFile,
    out_count: *mut u32,
) -> MndxResult<()> {
    if out_files.is_null() || out_count.is_null() {
        return Err(MndxError::InvalidArgument(
            "output pointers must not be null".to_string(),
        ));
    }

    let blob = if root_file.is_null() {
        if root_file_len != 0 {
            return Err(MndxError::InvalidArgument(format!(
                "root file is null but length is {root_file_len}"
            )));
        }
        &[][..]
    } else {
        // SAFETY: caller guarantees root_file is valid for root_file_len bytes
        unsafe { std::slice::from_raw_parts(root_file, root_file_len as usize) }
    };

    let config = if config_json.is_null() || config_len == 0 {
        BridgeConfig::default()
    } else {
        // SAFETY: caller guarantees config_json is valid for config_len bytes
        let config_slice = unsafe { std::slice::from_raw_parts(config_json, config_len) };
        BridgeConfig::from_json(config_slice)?
    };

    let files = enumerate_files::<H>(blob, &config)?;
    let (files, count) = files.into_raw()?;
    // SAFETY: both checked non-null above; caller guarantees they are writable
    unsafe {
        out_files.write(files);
        out_count.write(count);
    }
    Ok(())
}

/// Release an array returned by `mndx_enumerate`
///
/// Frees every entry name, then the array. A null `files` is a no-op.
///
/// # Safety
/// - `files` and `count` must be exactly the pair written by `mndx_enumerate`
/// - Must only be called once per array
#[unsafe(no_mangle)]
pub unsafe extern "C" fn mndx_free_files(files: *mut MndxFile, count: u32) {
    if files.is_null() {
        return;
    }
    let _ = catch_panic(AssertUnwindSafe(|| {
        // SAFETY: caller guarantees the pair came from mndx_enumerate
        drop(unsafe { ResultSet::from_raw(files, count) });
    }));
}

/// Route bridge diagnostics to `callback`
///
/// Installs the logging subscriber (once per process) and a panic hook that
/// reports through it. Passing `None` silences the bridge again.
#[unsafe(no_mangle)]
pub extern "C" fn mndx_init_logging(callback: Option<LogCallback>) {
    let _ = catch_panic(|| {
        LogSink::global().set_callback(callback);
        mndx_logging::init_logging();
        install_panic_hook();
    });
}

/// Set the minimum level delivered to the log callback
///
/// Levels: 0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error, 5=Off. Unknown values
/// are treated as Off.
#[unsafe(no_mangle)]
pub extern "C" fn mndx_set_log_level(level: u8) {
    let _ = catch_panic(|| {
        let level = LogLevel::from_u8(level);
        LogSink::global().set_level(level);
        if let Err(e) = ReloadHandle::global().reload_level(level) {
            tracing::trace!("level filter not reloaded: {}", e);
        }
    });
}

/// Static description of a status code
///
/// The returned string is NUL-terminated and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn mndx_status_message(status: i32) -> *const c_char {
    let message = match status {
        MNDX_OK => c"success",
        1 => c"root file format error",
        2 => c"allocation failed",
        3 => c"search failed",
        4 => c"invalid argument",
        5 => c"entry name is not representable as a C string",
        6 => c"declared entry count does not match entries yielded",
        7 => c"configuration rejected",
        8 => c"internal error",
        _ => c"unknown status",
    };
    message.as_ptr()
}
