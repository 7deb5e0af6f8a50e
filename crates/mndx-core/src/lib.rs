//! mndx-core - Core types and the root-format contract
//!
//! This crate provides the foundational types for enumerating root files:
//! - [`RootHandler`] and [`SearchCursor`], the contract a root-format parser exposes
//! - [`FileEntry`] and [`ContentKey`] for enumerated archive members
//! - [`EnumerationState`] for tracking the nested handles of one call
//! - [`MndxError`] for error handling
//! - [`BridgeConfig`] for per-call configuration
//! - [`FileTree`] for browsing an enumerated list as directories

mod config;
mod entry;
mod error;
mod lifecycle;
mod root;

pub mod mask;
pub mod tree;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use config::BridgeConfig;
pub use entry::{CONTENT_KEY_SIZE, ContentKey, ContentKeyError, FileEntry};
pub use error::{MndxError, MndxResult};
pub use lifecycle::EnumerationState;
pub use root::{RootEntry, RootHandler, SearchCursor};
pub use tree::{FileTree, TreeError};

/// Log levels for FFI callbacks
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BridgeConfig, ContentKey, EnumerationState, FileEntry, LogLevel, MndxError, MndxResult,
        RootEntry, RootHandler, SearchCursor,
    };
}
