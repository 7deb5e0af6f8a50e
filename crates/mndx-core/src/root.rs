//! Root-format collaborator contract
//!
//! A root handler parses a root-file blob into an index and exposes it through
//! a stateful search. The bridge consumes these traits and never sees the
//! binary format itself.

use crate::entry::{ContentKey, FileEntry};
use crate::error::MndxResult;

/// Borrowed view of one entry produced by a [`SearchCursor`]
///
/// The name borrows from the cursor and is only valid until the next call to
/// [`SearchCursor::next_match`]; the bridge copies it out immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootEntry<'a> {
    pub name: &'a str,
    pub size: u32,
    pub locale_flags: u32,
    pub file_data_id: u32,
    pub content_key: ContentKey,
}

impl RootEntry<'_> {
    /// Copy this view into an owned [`FileEntry`]
    ///
    /// The name buffer is reserved fallibly at its exact length.
    pub fn try_to_owned(&self) -> MndxResult<FileEntry> {
        let mut name = String::new();
        name.try_reserve_exact(self.name.len())?;
        name.push_str(self.name);

        Ok(FileEntry {
            name,
            size: self.size,
            locale_flags: self.locale_flags,
            file_data_id: self.file_data_id,
            content_key: self.content_key,
        })
    }
}

/// A parsed root file
///
/// Implementations own whatever index they build in [`RootHandler::open`] and
/// release it in [`RootHandler::close`]. The bridge calls `close` exactly once
/// per successfully opened handler, after every cursor has ended.
pub trait RootHandler: Sized {
    /// Cursor type borrowing the handler's index
    type Cursor<'a>: SearchCursor
    where
        Self: 'a;

    /// Parse a root-file blob
    ///
    /// Returns [`MndxError::Format`](crate::MndxError::Format) when the
    /// header or version is unsupported or the blob is malformed, and
    /// [`MndxError::Allocation`](crate::MndxError::Allocation) when the
    /// storage context cannot be created. The blob is not retained.
    fn open(root_file: &[u8]) -> MndxResult<Self>;

    /// Total number of entries the handler declares
    fn file_count(&self) -> u32;

    /// Start a search over every entry matching `mask`
    fn begin_search<'a>(&'a self, mask: &str) -> MndxResult<Self::Cursor<'a>>;

    /// Release the handler's index
    fn close(self) {}
}

/// Stateful, monotonic iterator over a handler's entries
///
/// A cursor cannot be rewound; enumerating again requires a new cursor.
pub trait SearchCursor {
    /// Advance to the next match
    ///
    /// `Ok(None)` signals the end of the sequence. Errors are reported as
    /// [`MndxError::Search`](crate::MndxError::Search) and end the enumeration.
    fn next_match(&mut self) -> MndxResult<Option<RootEntry<'_>>>;

    /// Release per-search state
    fn end_search(self)
    where
        Self: Sized,
    {
    }
}
