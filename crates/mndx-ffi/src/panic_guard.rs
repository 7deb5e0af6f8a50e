//! Panic containment for the C ABI
//!
//! Nothing may unwind into the host. Exports wrap their bodies in
//! [`catch_panic`], which turns a panic into [`MndxError::Internal`].

use mndx_core::MndxError;
use std::any::Any;
use std::panic;

/// Run `f`, converting a panic into [`MndxError::Internal`]
///
/// The panic message is logged through `tracing` before it is returned.
///
/// # Example
///
/// ```ignore
/// #[unsafe(no_mangle)]
/// pub unsafe extern "C" fn mndx_free_files(files: *mut MndxFile, count: u32) {
///     let _ = catch_panic(AssertUnwindSafe(|| unsafe { drop(ResultSet::from_raw(files, count)) }));
/// }
/// ```
pub fn catch_panic<F, R>(f: F) -> Result<R, MndxError>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    panic::catch_unwind(f).map_err(|payload| {
        let message = panic_to_string(&payload);
        tracing::error!("FFI panic caught: {}", message);
        MndxError::Internal(message)
    })
}

/// Render a panic payload
fn panic_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("bridge panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("bridge panicked: {}", s)
    } else {
        "bridge panicked with unknown payload".to_string()
    }
}

/// Install a process-wide panic hook that reports panics through `tracing`
///
/// Replaces any existing hook. Called from `mndx_init_logging` so panics
/// reach the host callback with their location.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Box<dyn Any>");

        match info.location() {
            Some(location) => tracing::error!(
                "PANIC at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                payload
            ),
            None => tracing::error!("PANIC at unknown location: {}", payload),
        }
    }));
}

#[cfg(test)]
#[path = "panic_guard/panic_guard_tests.rs"]
mod panic_guard_tests;
