//! Host log callback storage

use mndx_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Host callback receiving log records
///
/// # Parameters
/// - `level`: Log level (0=Trace, 1=Debug, 2=Info, 3=Warn, 4=Error)
/// - `target`: Module path of the event, null-terminated C string
/// - `message`: UTF-8 message bytes, not null-terminated
/// - `message_len`: Length of `message` in bytes
///
/// Both pointers are only valid for the duration of the call.
pub type LogCallback = extern "C" fn(
    level: u8,
    target: *const std::ffi::c_char,
    message: *const u8,
    message_len: usize,
);

static GLOBAL_SINK: OnceCell<LogSink> = OnceCell::new();

/// Destination for log records bound for the host
pub struct LogSink {
    callback: RwLock<Option<LogCallback>>,
    level: AtomicU8,
}

impl LogSink {
    /// Create a sink with no callback, passing `Warn` and above
    pub const fn new() -> Self {
        Self {
            callback: RwLock::new(None),
            level: AtomicU8::new(LogLevel::Warn as u8),
        }
    }

    /// Process-wide sink used by the exported C functions
    pub fn global() -> &'static LogSink {
        GLOBAL_SINK.get_or_init(LogSink::new)
    }

    pub fn set_callback(&self, callback: Option<LogCallback>) {
        *self.callback.write() = callback;
    }

    pub fn callback(&self) -> Option<LogCallback> {
        *self.callback.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::SeqCst))
    }

    /// A record at `level` would reach a callback
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.level() && self.callback().is_some()
    }

    /// Deliver one record to the host
    pub fn emit(&self, level: LogLevel, target: &str, message: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let Some(callback) = self.callback() else {
            return;
        };
        // Targets are module paths; a NUL would only come from a hand-written target
        let Ok(target) = std::ffi::CString::new(target) else {
            return;
        };

        callback(level as u8, target.as_ptr(), message.as_ptr(), message.len());
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}
