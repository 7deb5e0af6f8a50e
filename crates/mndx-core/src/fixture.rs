//! Reference root format for exercising the bridge
//!
//! A small versioned binary format, little-endian throughout:
//!
//! ```text
//! magic            4 bytes  "MFIX"
//! header_version   u32      must be <= 2
//! declared_count   u32      what `file_count` reports
//! search_fault_at  u32      index at which the search faults (u32::MAX = never)
//! record_count     u32
//! records          record_count times:
//!     name_len     u16
//!     name         name_len bytes of UTF-8
//!     size         u32
//!     locale_flags u32
//!     file_data_id u32
//!     content_key  16 bytes
//! ```
//!
//! Handlers count their lifecycle calls in thread-local counters so tests can
//! check that every open is closed and every search is ended.

use crate::entry::{CONTENT_KEY_SIZE, ContentKey, FileEntry};
use crate::error::{MndxError, MndxResult};
use crate::mask::matches_mask;
use crate::root::{RootEntry, RootHandler, SearchCursor};
use std::cell::Cell;

/// Leading bytes of every fixture root file
pub const FIXTURE_MAGIC: [u8; 4] = *b"MFIX";

/// Highest header version the fixture handler accepts
pub const MAX_HEADER_VERSION: u32 = 2;

const NO_FAULT: u32 = u32::MAX;

thread_local! {
    static OPENED: Cell<usize> = const { Cell::new(0) };
    static CLOSED: Cell<usize> = const { Cell::new(0) };
    static SEARCHES_BEGUN: Cell<usize> = const { Cell::new(0) };
    static SEARCHES_ENDED: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
    counter.with(|c| c.set(c.get() + 1));
}

/// Lifecycle calls made on the current thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureStats {
    pub opened: usize,
    pub closed: usize,
    pub searches_begun: usize,
    pub searches_ended: usize,
}

impl FixtureStats {
    /// Read the current thread's counters
    pub fn snapshot() -> Self {
        Self {
            opened: OPENED.with(Cell::get),
            closed: CLOSED.with(Cell::get),
            searches_begun: SEARCHES_BEGUN.with(Cell::get),
            searches_ended: SEARCHES_ENDED.with(Cell::get),
        }
    }

    /// Counters accumulated since `earlier`
    pub fn since(&self, earlier: &FixtureStats) -> FixtureStats {
        FixtureStats {
            opened: self.opened - earlier.opened,
            closed: self.closed - earlier.closed,
            searches_begun: self.searches_begun - earlier.searches_begun,
            searches_ended: self.searches_ended - earlier.searches_ended,
        }
    }

    /// Every open was closed and every search was ended
    pub fn is_balanced(&self) -> bool {
        self.opened == self.closed && self.searches_begun == self.searches_ended
    }
}

/// Builds fixture root files
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    header_version: u32,
    declared_count: Option<u32>,
    search_fault_at: u32,
    entries: Vec<FileEntry>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self {
            header_version: 1,
            declared_count: None,
            search_fault_at: NO_FAULT,
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn entry(
        mut self,
        name: impl Into<String>,
        size: u32,
        locale_flags: u32,
        file_data_id: u32,
        content_key: [u8; CONTENT_KEY_SIZE],
    ) -> Self {
        self.entries.push(FileEntry {
            name: name.into(),
            size,
            locale_flags,
            file_data_id,
            content_key: ContentKey::new(content_key),
        });
        self
    }

    /// Append an already-built entry
    pub fn file(mut self, entry: FileEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn header_version(mut self, version: u32) -> Self {
        self.header_version = version;
        self
    }

    /// Declare a count different from the number of records
    pub fn declared_count(mut self, count: u32) -> Self {
        self.declared_count = Some(count);
        self
    }

    /// Make the search fault when it reaches record `index`
    pub fn fail_search_at(mut self, index: u32) -> Self {
        self.search_fault_at = index;
        self
    }

    /// Serialize to a root-file blob
    ///
    /// Fails with [`MndxError::InvalidEntryName`] for a name longer than the
    /// format's 16-bit length prefix.
    pub fn build(&self) -> MndxResult<Vec<u8>> {
        let record_count = u32::try_from(self.entries.len())
            .map_err(|_| MndxError::Format("more than u32::MAX records".to_string()))?;
        let mut out = Vec::new();
        out.extend_from_slice(&FIXTURE_MAGIC);
        out.extend_from_slice(&self.header_version.to_le_bytes());
        out.extend_from_slice(&self.declared_count.unwrap_or(record_count).to_le_bytes());
        out.extend_from_slice(&self.search_fault_at.to_le_bytes());
        out.extend_from_slice(&record_count.to_le_bytes());
        for entry in &self.entries {
            let name_len = u16::try_from(entry.name.len()).map_err(|_| {
                MndxError::InvalidEntryName(format!(
                    "{} byte name exceeds the u16 length prefix",
                    entry.name.len()
                ))
            })?;
            out.extend_from_slice(&name_len.to_le_bytes());
            out.extend_from_slice(entry.name.as_bytes());
            out.extend_from_slice(&entry.size.to_le_bytes());
            out.extend_from_slice(&entry.locale_flags.to_le_bytes());
            out.extend_from_slice(&entry.file_data_id.to_le_bytes());
            out.extend_from_slice(entry.content_key.as_bytes());
        }
        Ok(out)
    }
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, what: &str) -> MndxResult<&'a [u8]> {
        if self.data.len() < len {
            return Err(MndxError::Format(format!("truncated {what}")));
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }

    fn array<const N: usize>(&mut self, what: &str) -> MndxResult<[u8; N]> {
        let bytes = self.take(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn u16(&mut self, what: &str) -> MndxResult<u16> {
        Ok(u16::from_le_bytes(self.array(what)?))
    }

    fn u32(&mut self, what: &str) -> MndxResult<u32> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }
}

/// Parsed fixture root file
#[derive(Debug)]
pub struct FixtureRoot {
    declared_count: u32,
    search_fault_at: u32,
    entries: Vec<FileEntry>,
}

impl RootHandler for FixtureRoot {
    type Cursor<'a> = FixtureCursor<'a>;

    fn open(root_file: &[u8]) -> MndxResult<Self> {
        let mut reader = Reader { data: root_file };

        let magic: [u8; 4] = reader.array("magic")?;
        if magic != FIXTURE_MAGIC {
            return Err(MndxError::Format(format!("bad magic {magic:02x?}")));
        }
        let header_version = reader.u32("header version")?;
        if header_version > MAX_HEADER_VERSION {
            return Err(MndxError::Format(format!(
                "unsupported header version {header_version}"
            )));
        }
        let declared_count = reader.u32("declared count")?;
        let search_fault_at = reader.u32("search fault index")?;
        let record_count = reader.u32("record count")?;

        let mut entries = Vec::new();
        for _ in 0..record_count {
            let name_len = reader.u16("name length")? as usize;
            let name = std::str::from_utf8(reader.take(name_len, "name")?)
                .map_err(|e| MndxError::Format(format!("name is not UTF-8: {e}")))?;
            let size = reader.u32("size")?;
            let locale_flags = reader.u32("locale flags")?;
            let file_data_id = reader.u32("file data id")?;
            let content_key = ContentKey::new(reader.array("content key")?);

            entries.try_reserve(1)?;
            entries.push(FileEntry {
                name: name.to_string(),
                size,
                locale_flags,
                file_data_id,
                content_key,
            });
        }
        if !reader.data.is_empty() {
            return Err(MndxError::Format(format!(
                "{} trailing bytes",
                reader.data.len()
            )));
        }

        bump(&OPENED);
        Ok(Self {
            declared_count,
            search_fault_at,
            entries,
        })
    }

    fn file_count(&self) -> u32 {
        self.declared_count
    }

    fn begin_search<'a>(&'a self, mask: &str) -> MndxResult<FixtureCursor<'a>> {
        let mut owned_mask = String::new();
        owned_mask.try_reserve_exact(mask.len())?;
        owned_mask.push_str(mask);

        bump(&SEARCHES_BEGUN);
        Ok(FixtureCursor {
            root: self,
            mask: owned_mask,
            position: 0,
        })
    }

    fn close(self) {
        bump(&CLOSED);
    }
}

/// Search over a [`FixtureRoot`]
#[derive(Debug)]
pub struct FixtureCursor<'a> {
    root: &'a FixtureRoot,
    mask: String,
    position: usize,
}

impl SearchCursor for FixtureCursor<'_> {
    fn next_match(&mut self) -> MndxResult<Option<RootEntry<'_>>> {
        while let Some(entry) = self.root.entries.get(self.position) {
            if self.position as u32 == self.root.search_fault_at {
                return Err(MndxError::Search(format!(
                    "index corrupt at record {}",
                    self.position
                )));
            }
            self.position += 1;
            if matches_mask(&entry.name, &self.mask) {
                return Ok(Some(RootEntry {
                    name: &entry.name,
                    size: entry.size,
                    locale_flags: entry.locale_flags,
                    file_data_id: entry.file_data_id,
                    content_key: entry.content_key,
                }));
            }
        }
        Ok(None)
    }

    fn end_search(self) {
        bump(&SEARCHES_ENDED);
    }
}

#[cfg(test)]
#[path = "fixture/fixture_tests.rs"]
mod fixture_tests;
