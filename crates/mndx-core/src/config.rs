//! Bridge configuration types

use serde::{Deserialize, Serialize};

/// Configuration for a single enumeration call
///
/// Parsed from JSON at the C ABI (`mndx_enumerate_with_config`). Every field
/// has a default, so an empty document or empty byte slice yields
/// [`BridgeConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Wildcard mask handed to the root handler's search (`*` and `?`)
    #[serde(default = "default_search_mask")]
    pub search_mask: String,

    /// Fail when the search yields a different count than the handler declared
    ///
    /// When false, the yielded count wins and a mismatch is only logged.
    #[serde(default)]
    pub strict_entry_count: bool,

    /// Upper bound on the up-front reservation taken from the declared count
    ///
    /// The result still grows past this bound if the search yields more
    /// entries; it only stops a corrupt header from forcing a huge allocation.
    #[serde(default = "default_max_preallocated")]
    pub max_preallocated_entries: usize,
}

fn default_search_mask() -> String {
    "*".to_string()
}

fn default_max_preallocated() -> usize {
    1 << 20
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            search_mask: default_search_mask(),
            strict_entry_count: false,
            max_preallocated_entries: default_max_preallocated(),
        }
    }
}

impl BridgeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Use a different search mask
    pub fn with_search_mask(mut self, mask: impl Into<String>) -> Self {
        self.search_mask = mask.into();
        self
    }

    /// Require the yielded count to match the declared count
    pub fn with_strict_entry_count(mut self, strict: bool) -> Self {
        self.strict_entry_count = strict;
        self
    }

    /// Capacity to reserve for a handler that declares `declared` entries
    pub fn initial_capacity(&self, declared: u32) -> usize {
        (declared as usize).min(self.max_preallocated_entries)
    }
}
