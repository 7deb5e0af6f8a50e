//! mndx-logging - Tracing to host log callback bridge
//!
//! The bridge itself never prints. Hosts that want diagnostics register a
//! [`LogCallback`]; this crate routes `tracing` events to it:
//! - [`LogSink`] holds the callback and the minimum level
//! - [`HostLogLayer`] is the `tracing_subscriber` layer feeding the sink
//! - [`ReloadHandle`] swaps the subscriber's level filter at runtime

mod layer;
mod reload;
mod sink;

pub use layer::{HostLogLayer, init_logging};
pub use mndx_core::LogLevel;
pub use reload::ReloadHandle;
pub use sink::{LogCallback, LogSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{HostLogLayer, LogCallback, LogLevel, LogSink, init_logging};
}
